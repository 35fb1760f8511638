use super::{footer, heading, mode, or_no_data};
use crate::error::Result;
use crate::models::Dataset;
use std::io::Write;
use std::time::Instant;
use tracing::debug;

/// Most popular stations and trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationStats {
    pub start_station: Option<String>,
    pub end_station: Option<String>,
    /// "<start> and <end>".
    pub route: Option<String>,
}

/// `None` when the dataset has no start-time column, which marks a usable trip log.
pub fn station_stats(dataset: &Dataset) -> Option<StationStats> {
    if !dataset.columns.start_time {
        return None;
    }
    let trips = &dataset.trips;
    Some(StationStats {
        start_station: mode(trips.iter().filter_map(|t| t.start_station.as_deref()))
            .map(str::to_string),
        end_station: mode(trips.iter().filter_map(|t| t.end_station.as_deref()))
            .map(str::to_string),
        route: mode(trips.iter().filter_map(|t| t.route())),
    })
}

pub fn report_station_stats<W: Write>(dataset: &Dataset, out: &mut W) -> Result<()> {
    let started = Instant::now();

    match station_stats(dataset) {
        None => writeln!(out, "No start time in {} data", dataset.city)?,
        Some(stats) => {
            heading(out, "Calculating The Most Popular Stations and Trip...")?;
            writeln!(
                out,
                "Most common station to start a trip from: {}",
                or_no_data(stats.start_station.as_deref())
            )?;
            writeln!(
                out,
                "Most commonly used station to end a trip: {}",
                or_no_data(stats.end_station.as_deref())
            )?;
            writeln!(
                out,
                "Most frequent combination of start station and end station trip: {}",
                or_no_data(stats.route.as_deref())
            )?;
            debug!("Station stats for {}: {:?}", dataset.city, stats);
        },
    }

    footer(out, started)
}
