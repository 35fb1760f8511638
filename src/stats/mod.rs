//! Descriptive statistics over a loaded [`Dataset`](crate::models::Dataset).
//!
//! Each reporter has a pure `*_stats` function returning a summary struct and a
//! `report_*` function that times the computation and prints the summary. Reporters
//! never fail on missing columns; they print a "no data" line and carry on.

mod duration;
mod station;
mod time;
mod user;

pub use duration::*;
pub use station::*;
pub use time::*;
pub use user::*;

use crate::error::Result;
use crate::models::Dataset;
use colored::*;
use std::collections::HashMap;
use std::hash::Hash;
use std::io::Write;
use std::time::Instant;

/// Width of the dashed rule printed after each report.
pub const SEPARATOR_WIDTH: usize = 40;

/// Most frequent value. Ties go to the value seen first; `None` for an empty input.
pub fn mode<T, I>(values: I) -> Option<T>
where
    T: Eq + Hash,
    I: IntoIterator<Item = T>,
{
    // value -> (occurrences, position of first occurrence)
    let mut counts: HashMap<T, (usize, usize)> = HashMap::new();
    for (position, value) in values.into_iter().enumerate() {
        counts.entry(value).or_insert((0, position)).0 += 1;
    }

    counts
        .into_iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(value, _)| value)
}

/// Runs all four reporters in order.
pub fn report_all<W: Write>(dataset: &Dataset, out: &mut W) -> Result<()> {
    report_time_stats(dataset, out)?;
    report_station_stats(dataset, out)?;
    report_trip_duration_stats(dataset, out)?;
    report_user_stats(dataset, out)?;
    Ok(())
}

pub(crate) fn heading<W: Write>(out: &mut W, text: &str) -> Result<()> {
    writeln!(out, "\n{}\n", text.cyan().bold())?;
    Ok(())
}

/// Prints the elapsed time since `started` and the closing rule.
pub(crate) fn footer<W: Write>(out: &mut W, started: Instant) -> Result<()> {
    writeln!(
        out,
        "\nThis took {:.6} seconds.",
        started.elapsed().as_secs_f64()
    )?;
    writeln!(out, "{}", "-".repeat(SEPARATOR_WIDTH))?;
    Ok(())
}

pub(crate) fn or_no_data<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "no data".to_string(), |v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_picks_highest_count() {
        assert_eq!(mode(vec![3, 1, 3, 2, 3, 1]), Some(3));
    }

    #[test]
    fn test_mode_tie_goes_to_first_seen() {
        assert_eq!(mode(vec!["b", "a", "a", "b"]), Some("b"));
        assert_eq!(mode(vec![9, 2, 2, 9, 5, 5]), Some(9));
    }

    #[test]
    fn test_mode_of_empty_is_none() {
        assert_eq!(mode(Vec::<u32>::new()), None);
    }

    #[test]
    fn test_or_no_data() {
        assert_eq!(or_no_data(Some(5)), "5");
        assert_eq!(or_no_data(None::<u32>), "no data");
    }
}
