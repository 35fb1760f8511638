use super::{footer, heading, mode};
use crate::error::Result;
use crate::models::Dataset;
use std::io::Write;
use std::time::Instant;
use tracing::debug;

/// User types reported even when they never occur.
const KNOWN_USER_TYPES: [&str; 2] = ["Subscriber", "Customer"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenderCounts {
    pub male: usize,
    pub female: usize,
}

/// Birth years rounded to the nearest integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthYearStats {
    pub earliest: i64,
    pub most_recent: i64,
    pub most_common: i64,
}

/// User demographics. Each field is `None` when its column is absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStats {
    /// (user type, count): Subscriber and Customer first, then other values by first appearance.
    pub user_types: Option<Vec<(String, usize)>>,
    pub genders: Option<GenderCounts>,
    /// `Some(None)` when the column exists but every cell is blank.
    pub birth_years: Option<Option<BirthYearStats>>,
}

pub fn user_stats(dataset: &Dataset) -> UserStats {
    let columns = dataset.columns;
    UserStats {
        user_types: columns.user_type.then(|| count_user_types(dataset)),
        genders: columns.gender.then(|| count_genders(dataset)),
        birth_years: columns.birth_year.then(|| birth_year_stats(dataset)),
    }
}

fn count_user_types(dataset: &Dataset) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = KNOWN_USER_TYPES
        .iter()
        .map(|name| (name.to_string(), 0))
        .collect();

    for user_type in dataset.trips.iter().filter_map(|t| t.user_type.as_deref()) {
        match counts.iter_mut().find(|(name, _)| name == user_type) {
            Some((_, count)) => *count += 1,
            None => counts.push((user_type.to_string(), 1)),
        }
    }
    counts
}

fn count_genders(dataset: &Dataset) -> GenderCounts {
    dataset
        .trips
        .iter()
        .filter_map(|t| t.gender.as_deref())
        .fold(GenderCounts::default(), |mut counts, gender| {
            match gender {
                "Male" => counts.male += 1,
                "Female" => counts.female += 1,
                _ => {},
            }
            counts
        })
}

fn birth_year_stats(dataset: &Dataset) -> Option<BirthYearStats> {
    let years: Vec<f64> = dataset
        .trips
        .iter()
        .filter_map(|t| t.birth_year)
        .filter(|y| y.is_finite())
        .collect();

    let earliest = years.iter().copied().reduce(f64::min)?;
    let most_recent = years.iter().copied().reduce(f64::max)?;
    let most_common = mode(years.iter().map(|y| y.to_bits())).map(f64::from_bits)?;

    Some(BirthYearStats {
        earliest: earliest.round() as i64,
        most_recent: most_recent.round() as i64,
        most_common: most_common.round() as i64,
    })
}

pub fn report_user_stats<W: Write>(dataset: &Dataset, out: &mut W) -> Result<()> {
    let started = Instant::now();
    heading(out, "Calculating User Stats...")?;

    let stats = user_stats(dataset);
    let city = dataset.city;

    match &stats.user_types {
        None => writeln!(out, "No data for user type in {}", city)?,
        Some(counts) => {
            for (user_type, count) in counts {
                writeln!(out, "Number of {} users: {}", user_type.to_lowercase(), count)?;
            }
        },
    }
    writeln!(out)?;

    match stats.genders {
        None => writeln!(out, "No data for gender in {}", city)?,
        Some(counts) => {
            writeln!(out, "The number of male users: {}", counts.male)?;
            writeln!(out, "The number of female users: {}", counts.female)?;
        },
    }
    writeln!(out)?;

    match stats.birth_years {
        None | Some(None) => writeln!(out, "No data for birth year in {}", city)?,
        Some(Some(years)) => {
            writeln!(out, "Earliest year of birth: {}", years.earliest)?;
            writeln!(out, "Most recent year of birth: {}", years.most_recent)?;
            writeln!(out, "Most common year of birth: {}", years.most_common)?;
        },
    }

    debug!("User stats for {}: {:?}", city, stats);
    footer(out, started)
}
