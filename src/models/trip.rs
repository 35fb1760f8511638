//! Trip records and the in-memory dataset built from one city's CSV file.

use super::filters::{City, DayFilter, MonthFilter};
use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::Deserialize;

pub const START_TIME: &str = "Start Time";
pub const END_TIME: &str = "End Time";
pub const START_STATION: &str = "Start Station";
pub const END_STATION: &str = "End Station";
pub const TRIP_DURATION: &str = "Trip Duration";
pub const USER_TYPE: &str = "User Type";
pub const GENDER: &str = "Gender";
pub const BIRTH_YEAR: &str = "Birth Year";

/// One CSV row as it appears on disk. Blank cells deserialize to `None`,
/// columns missing from the header deserialize to `None` as well.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTrip {
    #[serde(rename = "Start Time")]
    pub start_time: Option<String>,
    #[serde(rename = "End Time")]
    pub end_time: Option<String>,
    #[serde(rename = "Start Station")]
    pub start_station: Option<String>,
    #[serde(rename = "End Station")]
    pub end_station: Option<String>,
    #[serde(rename = "Trip Duration")]
    pub trip_duration: Option<f64>,
    #[serde(rename = "User Type")]
    pub user_type: Option<String>,
    #[serde(rename = "Gender")]
    pub gender: Option<String>,
    #[serde(rename = "Birth Year")]
    pub birth_year: Option<f64>,
}

/// A parsed trip with its derived calendar fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
    pub start_station: Option<String>,
    pub end_station: Option<String>,
    /// Seconds.
    pub trip_duration: Option<f64>,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<f64>,
    /// Derived from `start_time`, January = 1.
    pub month: Option<u32>,
    /// Derived from `start_time`.
    pub weekday: Option<Weekday>,
}

impl Trip {
    /// Builds a trip from already-parsed timestamps and derives month and weekday.
    pub fn new(
        raw: RawTrip,
        start_time: Option<NaiveDateTime>,
        end_time: Option<NaiveDateTime>,
    ) -> Self {
        Self {
            month: start_time.map(|t| t.month()),
            weekday: start_time.map(|t| t.weekday()),
            start_time,
            end_time,
            start_station: raw.start_station,
            end_station: raw.end_station,
            trip_duration: raw.trip_duration,
            user_type: raw.user_type,
            gender: raw.gender,
            birth_year: raw.birth_year,
        }
    }

    pub fn start_hour(&self) -> Option<u32> {
        self.start_time.map(|t| t.hour())
    }

    /// "<start> and <end>" when both stations are known.
    pub fn route(&self) -> Option<String> {
        match (&self.start_station, &self.end_station) {
            (Some(start), Some(end)) => Some(format!("{} and {}", start, end)),
            _ => None,
        }
    }
}

/// Which schema columns the source file carried.
///
/// Computed once from the CSV header; reporters check these flags instead of
/// inspecting records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Columns {
    pub start_time: bool,
    pub end_time: bool,
    pub start_station: bool,
    pub end_station: bool,
    pub trip_duration: bool,
    pub user_type: bool,
    pub gender: bool,
    pub birth_year: bool,
}

impl Columns {
    pub fn from_headers<'a, I>(headers: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut columns = Columns::default();
        for header in headers {
            match header.trim() {
                START_TIME => columns.start_time = true,
                END_TIME => columns.end_time = true,
                START_STATION => columns.start_station = true,
                END_STATION => columns.end_station = true,
                TRIP_DURATION => columns.trip_duration = true,
                USER_TYPE => columns.user_type = true,
                GENDER => columns.gender = true,
                BIRTH_YEAR => columns.birth_year = true,
                _ => {},
            }
        }
        columns
    }

    /// Every schema column, as found in a Chicago or New York City file.
    #[cfg(test)]
    pub fn all() -> Self {
        Self {
            start_time: true,
            end_time: true,
            start_station: true,
            end_station: true,
            trip_duration: true,
            user_type: true,
            gender: true,
            birth_year: true,
        }
    }

    /// Names of the present columns in schema order.
    pub fn present(&self) -> Vec<&'static str> {
        [
            (self.start_time, START_TIME),
            (self.end_time, END_TIME),
            (self.start_station, START_STATION),
            (self.end_station, END_STATION),
            (self.trip_duration, TRIP_DURATION),
            (self.user_type, USER_TYPE),
            (self.gender, GENDER),
            (self.birth_year, BIRTH_YEAR),
        ]
        .into_iter()
        .filter_map(|(present, name)| present.then_some(name))
        .collect()
    }
}

/// Trips for one city in file order, possibly narrowed by month and day.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub city: City,
    pub columns: Columns,
    pub trips: Vec<Trip>,
}

impl Dataset {
    pub fn new(city: City, columns: Columns, trips: Vec<Trip>) -> Self {
        Self {
            city,
            columns,
            trips,
        }
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    /// Keeps trips whose derived month and weekday satisfy both filters.
    /// Order is preserved, so applying the same filters twice is a no-op.
    pub fn filter(self, month: MonthFilter, day: DayFilter) -> Self {
        let trips = self
            .trips
            .into_iter()
            .filter(|trip| month.matches(trip.month) && day.matches(trip.weekday))
            .collect();
        Self { trips, ..self }
    }
}
