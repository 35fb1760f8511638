//! Filter criteria chosen at the start of each session.
//!
//! Cities, months and weekdays are closed enumerations backed by static lookup
//! tables. The same tables drive prompt validation and dataset filtering, so a value
//! accepted at the prompt always maps to the ordinal the loader filters on.

use chrono::Weekday;
use std::fmt;

/// The cities a dataset is available for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

/// Static city table: (city, prompt name, dataset file name).
static CITY_DATA: [(City, &str, &str); 3] = [
    (City::Chicago, "chicago", "chicago.csv"),
    (City::NewYorkCity, "new york city", "new_york_city.csv"),
    (City::Washington, "washington", "washington.csv"),
];

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Looks a city up by its prompt name. Input is trimmed and case-folded.
    pub fn from_name(input: &str) -> Option<Self> {
        let needle = normalize(input);
        City::ALL.into_iter().find(|city| city.name() == needle)
    }

    /// The lowercase name accepted at the prompt.
    pub fn name(self) -> &'static str {
        self.entry().1
    }

    /// File name of this city's dataset inside the data directory.
    pub fn file_name(self) -> &'static str {
        self.entry().2
    }

    fn entry(self) -> &'static (City, &'static str, &'static str) {
        // CITY_DATA has exactly one row per variant.
        &CITY_DATA[self as usize]
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = match self {
            City::Chicago => "Chicago",
            City::NewYorkCity => "New York City",
            City::Washington => "Washington",
        };
        f.write_str(title)
    }
}

/// Full month names, indexed by ordinal - 1. Used for display.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Months the datasets cover, as (prompt name, ordinal). January = 1.
pub const FILTER_MONTHS: [(&str, u32); 6] = [
    ("january", 1),
    ("february", 2),
    ("march", 3),
    ("april", 4),
    ("may", 5),
    ("june", 6),
];

/// Weekdays as (prompt name, weekday). Position in the table is the Monday = 0 index.
pub const DAYS: [(&str, Weekday); 7] = [
    ("monday", Weekday::Mon),
    ("tuesday", Weekday::Tue),
    ("wednesday", Weekday::Wed),
    ("thursday", Weekday::Thu),
    ("friday", Weekday::Fri),
    ("saturday", Weekday::Sat),
    ("sunday", Weekday::Sun),
];

const ALL: &str = "all";

/// Display name for a month ordinal (1-12).
pub fn month_name(ordinal: u32) -> &'static str {
    ordinal
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i as usize))
        .copied()
        .unwrap_or("Unknown")
}

/// Display name for a weekday.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Month component of the filter criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthFilter {
    All,
    /// 1-indexed month ordinal taken from [`FILTER_MONTHS`].
    Only(u32),
}

impl MonthFilter {
    pub fn from_name(input: &str) -> Option<Self> {
        let needle = normalize(input);
        if needle == ALL {
            return Some(MonthFilter::All);
        }
        FILTER_MONTHS
            .iter()
            .find(|(name, _)| *name == needle)
            .map(|(_, ordinal)| MonthFilter::Only(*ordinal))
    }

    pub fn matches(self, month: Option<u32>) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::Only(wanted) => month == Some(wanted),
        }
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthFilter::All => f.write_str("all months"),
            MonthFilter::Only(ordinal) => f.write_str(month_name(*ordinal)),
        }
    }
}

/// Day-of-week component of the filter criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayFilter {
    All,
    Only(Weekday),
}

impl DayFilter {
    pub fn from_name(input: &str) -> Option<Self> {
        let needle = normalize(input);
        if needle == ALL {
            return Some(DayFilter::All);
        }
        DAYS.iter()
            .find(|(name, _)| *name == needle)
            .map(|(_, day)| DayFilter::Only(*day))
    }

    pub fn matches(self, weekday: Option<Weekday>) -> bool {
        match self {
            DayFilter::All => true,
            DayFilter::Only(wanted) => weekday == Some(wanted),
        }
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayFilter::All => f.write_str("all days"),
            DayFilter::Only(day) => f.write_str(weekday_name(*day)),
        }
    }
}

/// One validated (city, month, day) selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Filters {
    pub city: City,
    pub month: MonthFilter,
    pub day: DayFilter,
}

fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}
