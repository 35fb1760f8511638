use super::{footer, heading};
use crate::error::Result;
use crate::models::Dataset;
use std::io::Write;
use std::time::Instant;
use tracing::debug;

/// Total and mean trip duration, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationStats {
    pub total: f64,
    /// `None` when no trip has a duration.
    pub mean: Option<f64>,
    pub trips: usize,
}

/// `None` when the dataset has no trip-duration column.
pub fn trip_duration_stats(dataset: &Dataset) -> Option<DurationStats> {
    if !dataset.columns.trip_duration {
        return None;
    }
    let (total, trips) = dataset
        .trips
        .iter()
        .filter_map(|t| t.trip_duration)
        .fold((0.0, 0usize), |(sum, n), d| (sum + d, n + 1));

    Some(DurationStats {
        total,
        mean: (trips > 0).then(|| total / trips as f64),
        trips,
    })
}

/// Renders seconds as `1d 2h 3m 4s`, dropping leading zero units.
pub fn humanize_seconds(seconds: f64) -> String {
    let mut remaining = seconds.max(0.0).round() as u64;
    let days = remaining / 86_400;
    remaining %= 86_400;
    let hours = remaining / 3_600;
    remaining %= 3_600;
    let minutes = remaining / 60;
    let secs = remaining % 60;

    let parts = [(days, "d"), (hours, "h"), (minutes, "m")];
    let mut out: Vec<String> = parts
        .iter()
        .skip_while(|(value, _)| *value == 0)
        .map(|(value, unit)| format!("{}{}", value, unit))
        .collect();
    out.push(format!("{}s", secs));
    out.join(" ")
}

pub fn report_trip_duration_stats<W: Write>(dataset: &Dataset, out: &mut W) -> Result<()> {
    let started = Instant::now();

    match trip_duration_stats(dataset) {
        None => writeln!(out, "No trip duration data for {}", dataset.city)?,
        Some(stats) => {
            heading(out, "Calculating Trip Duration...")?;
            writeln!(
                out,
                "Total travel time: {:.2} seconds ({})",
                stats.total,
                humanize_seconds(stats.total)
            )?;
            match stats.mean {
                Some(mean) => writeln!(
                    out,
                    "Mean travel time: {:.2} seconds ({})",
                    mean,
                    humanize_seconds(mean)
                )?,
                None => writeln!(out, "Mean travel time: no trips matched the filters")?,
            }
            writeln!(out, "Trips with a recorded duration: {}", stats.trips)?;
            debug!("Duration stats for {}: {:?}", dataset.city, stats);
        },
    }

    footer(out, started)
}
