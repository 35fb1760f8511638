use super::{footer, heading, mode, or_no_data};
use crate::error::Result;
use crate::models::{month_name, weekday_name, Dataset};
use chrono::Weekday;
use std::io::Write;
use std::time::Instant;
use tracing::debug;

/// Most frequent times of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeStats {
    pub month: Option<u32>,
    pub weekday: Option<Weekday>,
    pub hour: Option<u32>,
}

/// `None` when the dataset has no start-time column.
pub fn time_stats(dataset: &Dataset) -> Option<TimeStats> {
    if !dataset.columns.start_time {
        return None;
    }
    let trips = &dataset.trips;
    Some(TimeStats {
        month: mode(trips.iter().filter_map(|t| t.month)),
        weekday: mode(trips.iter().filter_map(|t| t.weekday)),
        hour: mode(trips.iter().filter_map(|t| t.start_hour())),
    })
}

pub fn report_time_stats<W: Write>(dataset: &Dataset, out: &mut W) -> Result<()> {
    let started = Instant::now();

    match time_stats(dataset) {
        None => writeln!(out, "No start time data for {} data", dataset.city)?,
        Some(stats) => {
            heading(out, "Calculating The Most Frequent Times of Travel...")?;
            writeln!(
                out,
                "Most common month to start a trip: {}",
                or_no_data(stats.month.map(month_name))
            )?;
            writeln!(
                out,
                "Most common day of the week to start a trip: {}",
                or_no_data(stats.weekday.map(weekday_name))
            )?;
            writeln!(
                out,
                "Most common hour to start a trip: {}",
                or_no_data(stats.hour.map(|h| format!("{:02}:00", h)))
            )?;
            debug!("Time stats for {}: {:?}", dataset.city, stats);
        },
    }

    footer(out, started)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{City, Columns, RawTrip, Trip};
    use chrono::NaiveDateTime;

    fn trip(start: &str) -> Trip {
        let start = NaiveDateTime::parse_from_str(start, "%Y-%m-%d %H:%M:%S").unwrap();
        Trip::new(RawTrip::default(), Some(start), None)
    }

    #[test]
    fn test_time_stats_modes() {
        let dataset = Dataset::new(
            City::Chicago,
            Columns::all(),
            vec![
                trip("2017-06-23 15:09:32"), // Fri
                trip("2017-06-26 17:01:20"), // Mon
                trip("2017-05-29 17:10:00"), // Mon
                trip("2017-05-24 08:00:00"), // Wed
            ],
        );
        let stats = time_stats(&dataset).unwrap();
        // June and May tie on two trips each; June appears first.
        assert_eq!(stats.month, Some(6));
        assert_eq!(stats.weekday, Some(Weekday::Mon));
        assert_eq!(stats.hour, Some(17));
    }

    #[test]
    fn test_time_stats_absent_without_start_time_column() {
        let columns = Columns {
            start_time: false,
            ..Columns::all()
        };
        let dataset = Dataset::new(City::Washington, columns, vec![]);
        assert_eq!(time_stats(&dataset), None);

        let mut out = Vec::new();
        report_time_stats(&dataset, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("No start time data for Washington data"));
        assert!(text.contains("This took"));
    }

    #[test]
    fn test_report_time_stats_on_empty_dataset() {
        let dataset = Dataset::new(City::Chicago, Columns::all(), vec![]);
        let mut out = Vec::new();
        report_time_stats(&dataset, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Most common month to start a trip: no data"));
        assert!(text.contains("Most common hour to start a trip: no data"));
    }

    #[test]
    fn test_report_time_stats_prints_names() {
        let dataset = Dataset::new(
            City::Chicago,
            Columns::all(),
            vec![trip("2017-03-06 09:15:00")],
        );
        let mut out = Vec::new();
        report_time_stats(&dataset, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Most common month to start a trip: March"));
        assert!(text.contains("Most common day of the week to start a trip: Monday"));
        assert!(text.contains("Most common hour to start a trip: 09:00"));
        assert!(text.contains(&"-".repeat(40)));
    }
}
