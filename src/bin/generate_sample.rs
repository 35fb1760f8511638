//! Writes small synthetic trip datasets for all three cities so the explorer can run
//! without the real bikeshare exports. Output is deterministic for a given seed.

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use clap::Parser;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::fs;
use std::path::{Path, PathBuf};

/// Generate sample bikeshare CSV files
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Output directory (created if missing)
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Trips per city
    #[arg(short, long, default_value = "2000")]
    trips: usize,

    /// Random seed
    #[arg(long, default_value = "42")]
    seed: u64,
}

struct CitySpec {
    file_name: &'static str,
    stations: &'static [&'static str],
    demographics: bool,
    fractional_durations: bool,
}

const CITIES: [CitySpec; 3] = [
    CitySpec {
        file_name: "chicago.csv",
        stations: &[
            "Streeter Dr & Grand Ave",
            "Lake Shore Dr & Monroe St",
            "Clinton St & Washington Blvd",
            "Canal St & Adams St",
            "Theater on the Lake",
            "Wood St & Hubbard St",
            "Clark St & Elm St",
        ],
        demographics: true,
        fractional_durations: false,
    },
    CitySpec {
        file_name: "new_york_city.csv",
        stations: &[
            "Pershing Square North",
            "E 17 St & Broadway",
            "W 21 St & 6 Ave",
            "Broadway & E 22 St",
            "West St & Chambers St",
            "12 Ave & W 40 St",
        ],
        demographics: true,
        fractional_durations: false,
    },
    CitySpec {
        file_name: "washington.csv",
        stations: &[
            "Columbus Circle / Union Station",
            "Lincoln Memorial",
            "Jefferson Dr & 14th St SW",
            "Massachusetts Ave & Dupont Circle NW",
            "15th & P St NW",
        ],
        demographics: false,
        fractional_durations: true,
    },
];

const USER_TYPES: [(&str, u32); 3] = [("Subscriber", 80), ("Customer", 19), ("Dependent", 1)];

fn main() -> Result<()> {
    let args = Args::parse();
    fs::create_dir_all(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;

    let mut rng = StdRng::seed_from_u64(args.seed);
    for city in &CITIES {
        let path = args.output.join(city.file_name);
        write_city(&path, city, args.trips, &mut rng)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("Wrote {} trips to {}", args.trips, path.display());
    }
    Ok(())
}

fn write_city(path: &Path, city: &CitySpec, trips: usize, rng: &mut StdRng) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    let mut header = vec![
        "",
        "Start Time",
        "End Time",
        "Trip Duration",
        "Start Station",
        "End Station",
        "User Type",
    ];
    if city.demographics {
        header.extend(["Gender", "Birth Year"]);
    }
    writer.write_record(&header)?;

    let first_day = NaiveDate::from_ymd_opt(2017, 1, 1).context("invalid start date")?;
    for id in 0..trips {
        let start = random_start(first_day, rng)?;
        let seconds = rng.gen_range(60.0..3_600.0_f64);
        let end = start + Duration::milliseconds((seconds * 1000.0) as i64);

        let mut record = vec![
            id.to_string(),
            start.format("%Y-%m-%d %H:%M:%S").to_string(),
            end.format("%Y-%m-%d %H:%M:%S").to_string(),
            if city.fractional_durations {
                format!("{:.3}", seconds)
            } else {
                format!("{:.0}", seconds)
            },
            pick(city.stations, rng).to_string(),
            pick(city.stations, rng).to_string(),
            USER_TYPES
                .choose_weighted(rng, |(_, weight)| *weight)
                .map(|(name, _)| *name)
                .context("invalid user type weights")?
                .to_string(),
        ];

        if city.demographics {
            // Customers usually leave demographics blank.
            if record[6] == "Subscriber" {
                let gender = if rng.gen_bool(0.75) { "Male" } else { "Female" };
                record.push(gender.to_string());
                record.push(format!("{:.1}", rng.gen_range(1940..=2001) as f64));
            } else {
                record.push(String::new());
                record.push(String::new());
            }
        }
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

/// A start time within January-June 2017, weighted toward commute hours.
fn random_start(first_day: NaiveDate, rng: &mut StdRng) -> Result<NaiveDateTime> {
    let day = first_day + Duration::days(rng.gen_range(0..181));
    let hour = if rng.gen_bool(0.5) {
        *[7u32, 8, 17, 18]
            .choose(rng)
            .context("empty hour list")?
    } else {
        rng.gen_range(0..24)
    };
    day.and_hms_opt(hour, rng.gen_range(0..60), rng.gen_range(0..60))
        .context("invalid time of day")
}

fn pick<'a>(items: &[&'a str], rng: &mut StdRng) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}
