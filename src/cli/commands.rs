use super::pager::{render_page, RawDataPager, PAGE_SIZE};
use super::prompt::{collect_filters, is_affirmative, Prompter};
use crate::data::{dataset_path, load_data};
use crate::error::Result;
use crate::models::{Dataset, Filters};
use crate::stats;
use clap::Parser;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::env;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

/// Environment variable naming the directory that holds the city CSV files.
pub const DATA_DIR_ENV: &str = "BIKESHARE_DATA_DIR";

/// Interactive explorer for US bikeshare trip data
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory containing chicago.csv, new_york_city.csv and washington.csv
    /// (defaults to $BIKESHARE_DATA_DIR, then the current directory)
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Runtime configuration resolved from the command line and environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
}

impl Config {
    /// Resolves the data directory: `--data-dir`, then `BIKESHARE_DATA_DIR`
    /// (after loading any `.env` file), then the working directory.
    pub fn from_cli(cli: &Cli) -> Self {
        dotenv::dotenv().ok();
        Self::resolve(cli.data_dir.clone(), env::var(DATA_DIR_ENV).ok())
    }

    fn resolve(flag: Option<PathBuf>, env_value: Option<String>) -> Self {
        let data_dir = flag
            .or_else(|| env_value.filter(|v| !v.trim().is_empty()).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."));
        Self { data_dir }
    }
}

/// CLI application: one explorer session per loop iteration.
pub struct App<P: Prompter, W: Write> {
    config: Config,
    prompter: P,
    out: W,
    show_spinner: bool,
}

impl<P: Prompter, W: Write> App<P, W> {
    pub fn new(config: Config, prompter: P, out: W) -> Self {
        Self {
            config,
            prompter,
            out,
            show_spinner: true,
        }
    }

    /// Disables the loading spinner (used when output is not a terminal session).
    pub fn without_spinner(mut self) -> Self {
        self.show_spinner = false;
        self
    }

    /// Runs sessions until the user declines to restart.
    pub fn run(&mut self) -> Result<()> {
        let mut sessions = 0usize;
        loop {
            sessions += 1;
            info!("Starting session {}", sessions);
            self.run_session()?;

            let answer = self
                .prompter
                .ask("Would you like to restart? Enter yes or no.")?;
            if !is_affirmative(&answer) {
                break;
            }
            writeln!(self.out, "\n")?;
        }

        info!("Exiting after {} session(s)", sessions);
        writeln!(self.out, "{}", "Goodbye!".green())?;
        Ok(())
    }

    /// Filters → load → four reports → optional raw data.
    fn run_session(&mut self) -> Result<()> {
        let filters = collect_filters(&mut self.prompter, &mut self.out)?;
        let dataset = self.load(&filters)?;

        writeln!(
            self.out,
            "Loaded {} trips for {} ({}, {})",
            dataset.len(),
            dataset.city,
            filters.month,
            filters.day
        )?;

        if dataset.is_empty() {
            writeln!(
                self.out,
                "{}",
                "No trips match these filters; statistics will be empty.".yellow()
            )?;
        }

        stats::report_all(&dataset, &mut self.out)?;
        self.show_raw_data(&dataset)
    }

    fn load(&self, filters: &Filters) -> Result<Dataset> {
        if !self.show_spinner {
            return load_data(&self.config.data_dir, filters);
        }

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(ProgressStyle::with_template("{spinner:.green} {msg}")?);
        spinner.set_message(format!(
            "Loading {}",
            dataset_path(&self.config.data_dir, filters.city).display()
        ));
        spinner.enable_steady_tick(Duration::from_millis(100));

        let result = load_data(&self.config.data_dir, filters);
        spinner.finish_and_clear();
        result
    }

    /// Pages through raw trips five at a time while the user keeps saying yes.
    fn show_raw_data(&mut self, dataset: &Dataset) -> Result<()> {
        let mut pager = RawDataPager::new(PAGE_SIZE);
        let prompt = format!(
            "Do you want to view {} lines of raw data? Please enter 'yes' or 'no'",
            PAGE_SIZE
        );

        loop {
            let answer = self.prompter.ask(&prompt)?;
            if !is_affirmative(&answer) {
                break;
            }

            let first_row = pager.offset();
            let page = pager.next_page(&dataset.trips);
            debug!("Showing raw rows {}..{}", first_row, first_row + page.len());

            if page.is_empty() {
                writeln!(self.out, "{}", "No more raw data to display.".yellow())?;
            } else {
                writeln!(
                    self.out,
                    "{}",
                    render_page(page, first_row, &dataset.columns)
                )?;
            }
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn into_parts(self) -> (P, W) {
        (self.prompter, self.out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{LinePrompter, ScriptedPrompter};
    use crate::error::AppError;
    use std::fs;
    use tempfile::TempDir;

    const CHICAGO_CSV: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
1,2017-06-23 15:09:32,2017-06-23 15:14:53,321,Wood St & Hubbard St,Damen Ave & Chicago Ave,Subscriber,Male,1992.0
2,2017-06-05 07:10:00,2017-06-05 07:30:00,1200,Canal St & Adams St,Clinton St & Madison St,Subscriber,Female,1975.0
3,2017-06-12 07:15:00,2017-06-12 07:40:00,1500,Canal St & Adams St,Clinton St & Madison St,Customer,,
4,2017-06-19 07:05:00,2017-06-19 07:20:00,900,Canal St & Adams St,State St & Harrison St,Subscriber,Male,1988.0
5,2017-06-26 07:00:00,2017-06-26 07:25:00,1500,Wood St & Hubbard St,Clinton St & Madison St,Subscriber,Male,1988.0
6,2017-06-27 08:00:00,2017-06-27 08:15:00,900,Clark St & Lake St,Canal St & Adams St,Customer,Female,1990.0
7,2017-05-01 09:00:00,2017-05-01 09:10:00,600,Clark St & Lake St,Canal St & Adams St,Subscriber,Male,1980.0
";

    const WASHINGTON_CSV: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type
1,2017-06-21 08:36:34,2017-06-21 08:44:43,489.066,14th & Belmont St NW,15th & K St NW,Subscriber
";

    fn fixture_dir() -> TempDir {
        let dir = TempDir::new().expect("temp dir");
        fs::write(dir.path().join("chicago.csv"), CHICAGO_CSV).expect("write chicago");
        fs::write(dir.path().join("washington.csv"), WASHINGTON_CSV).expect("write washington");
        dir
    }

    fn run_app(dir: &TempDir, answers: &[&str]) -> (Result<()>, ScriptedPrompter, String) {
        let config = Config {
            data_dir: dir.path().to_path_buf(),
        };
        let mut app = App::new(config, ScriptedPrompter::new(answers.iter().copied()), Vec::new())
            .without_spinner();
        let result = app.run();
        let (prompter, out) = app.into_parts();
        (result, prompter, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_config_resolution_order() {
        let flag = Some(PathBuf::from("/flag"));
        let env_value = Some("/env".to_string());

        assert_eq!(
            Config::resolve(flag.clone(), env_value.clone()).data_dir,
            PathBuf::from("/flag")
        );
        assert_eq!(
            Config::resolve(None, env_value).data_dir,
            PathBuf::from("/env")
        );
        assert_eq!(
            Config::resolve(None, Some("  ".to_string())).data_dir,
            PathBuf::from(".")
        );
        assert_eq!(Config::resolve(None, None).data_dir, PathBuf::from("."));
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::parse_from(["bikeshare-explorer", "--data-dir", "/srv/data"]);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/srv/data")));
        assert_eq!(cli.log_file, None);
    }

    #[test]
    fn test_session_reports_and_exits_on_no() {
        let dir = fixture_dir();
        let (result, prompter, out) = run_app(&dir, &["chicago", "june", "all", "no", "no"]);

        assert!(result.is_ok());
        assert_eq!(prompter.remaining(), 0);
        assert!(out.contains("Loaded 6 trips for Chicago (June, all days)"));
        assert!(out.contains("Most common month to start a trip: June"));
        assert!(out.contains("Most common day of the week to start a trip: Monday"));
        assert!(out.contains("Most common station to start a trip from: Canal St & Adams St"));
        assert!(out.contains("Canal St & Adams St and Clinton St & Madison St"));
        assert!(out.contains("Number of subscriber users: 4"));
        assert!(out.contains("The number of male users: 3"));
        assert!(out.contains("Most common year of birth: 1988"));
        assert!(out.contains("Goodbye!"));
    }

    #[test]
    fn test_session_pages_raw_data() {
        let dir = fixture_dir();
        let (result, prompter, out) =
            run_app(&dir, &["chicago", "all", "all", "yes", "y", "yes", "no", "no"]);

        assert!(result.is_ok());
        // Rows 0-4, then 5-6, then an empty window past the end.
        assert!(out.contains("Wood St & Hubbard St"));
        assert!(out.contains("Clark St & Lake St"));
        assert!(out.contains("No more raw data to display."));
        let raw_prompts = prompter
            .prompts()
            .iter()
            .filter(|p| p.contains("lines of raw data"))
            .count();
        assert_eq!(raw_prompts, 4);
    }

    #[test]
    fn test_restart_runs_another_session() {
        let dir = fixture_dir();
        let (result, _, out) = run_app(
            &dir,
            &[
                "chicago", "all", "all", "no", "yes", "washington", "all", "all", "no", "nope",
            ],
        );

        assert!(result.is_ok());
        assert!(out.contains("Loaded 7 trips for Chicago"));
        assert!(out.contains("Loaded 1 trips for Washington"));
        assert!(out.contains("No data for gender in Washington"));
        assert!(out.contains("No data for birth year in Washington"));
        assert_eq!(out.matches("Goodbye!").count(), 1);
    }

    #[test]
    fn test_session_from_piped_lines() {
        let dir = fixture_dir();
        let config = Config {
            data_dir: dir.path().to_path_buf(),
        };
        let input = std::io::Cursor::new("chicago\nall\nall\nno\nno\n");
        let mut app = App::new(config, LinePrompter::new(input, Vec::new()), Vec::new())
            .without_spinner();

        assert!(app.run().is_ok());
        let (_, out) = app.into_parts();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Loaded 7 trips for Chicago"));
        assert!(out.contains("Goodbye!"));
    }

    #[test]
    fn test_piped_input_ending_early_is_cli_error() {
        let dir = fixture_dir();
        let config = Config {
            data_dir: dir.path().to_path_buf(),
        };
        let input = std::io::Cursor::new("chicago\nall\n");
        let mut app = App::new(config, LinePrompter::new(input, Vec::new()), Vec::new())
            .without_spinner();
        assert!(matches!(app.run(), Err(AppError::Cli(_))));
    }

    #[test]
    fn test_missing_dataset_is_fatal() {
        let dir = fixture_dir();
        let (result, _, _) = run_app(&dir, &["new york city", "all", "all"]);
        assert!(matches!(result, Err(AppError::Io(_))));
    }
}
