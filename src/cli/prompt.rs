//! Input collection: reading answers from the user and validating them against
//! the enumerated choices for city, month and day.

use crate::error::{AppError, Result};
use crate::models::{City, DayFilter, Filters, MonthFilter};
use colored::*;
use dialoguer::{theme::ColorfulTheme, Input};
use std::io::{self, BufRead, IsTerminal, Write};
use tracing::{debug, info};

/// Source of free-text answers. The terminal in production, a script in tests.
pub trait Prompter {
    /// Shows `prompt` and blocks until the user submits a line.
    fn ask(&mut self, prompt: &str) -> Result<String>;
}

/// Reads answers with `dialoguer` when attached to a terminal, and falls back to
/// plain lines from standard input when input is piped or stderr is redirected.
pub struct TerminalPrompter {
    theme: ColorfulTheme,
    interactive: bool,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        // dialoguer draws on stderr and refuses to run when it is not a terminal.
        let interactive = io::stdin().is_terminal() && io::stderr().is_terminal();
        debug!("Interactive prompts: {}", interactive);
        Self {
            theme: ColorfulTheme::default(),
            interactive,
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn ask(&mut self, prompt: &str) -> Result<String> {
        if !self.interactive {
            return LinePrompter::new(io::stdin().lock(), io::stdout()).ask(prompt);
        }

        // Empty answers are allowed through so validation decides what to re-ask.
        let answer = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(answer)
    }
}

/// Writes each prompt on its own line and reads one answer line from `input`.
pub struct LinePrompter<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self { input, out }
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn ask(&mut self, prompt: &str) -> Result<String> {
        writeln!(self.out, "{}", prompt)?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(AppError::Cli(format!(
                "input closed while waiting for an answer to: {}",
                prompt
            )));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// Asks until `parse` accepts the answer. There is no retry limit.
pub fn prompt_valid<T, P, W, F>(prompter: &mut P, out: &mut W, prompt: &str, parse: F) -> Result<T>
where
    P: Prompter + ?Sized,
    W: Write,
    F: Fn(&str) -> Option<T>,
{
    loop {
        let answer = prompter.ask(prompt)?;
        match parse(&answer) {
            Some(value) => return Ok(value),
            None => {
                debug!("Rejected input {:?} for prompt {:?}", answer, prompt);
                writeln!(out, "{}", "Invalid input, please try again.".red())?;
            },
        }
    }
}

/// `yes` or `y`, ignoring case and surrounding whitespace.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "yes" | "y")
}

/// Collects one validated (city, month, day) selection.
pub fn collect_filters<P, W>(prompter: &mut P, out: &mut W) -> Result<Filters>
where
    P: Prompter + ?Sized,
    W: Write,
{
    writeln!(
        out,
        "{}",
        "Hello! Let's explore some US bikeshare data!".cyan().bold()
    )?;

    let city = prompt_valid(
        prompter,
        out,
        "Which city would you like to explore: Chicago, New York City, or Washington?",
        City::from_name,
    )?;

    let month_prompt = format!(
        "Which month would you like to analyze for {}? January, February, March, April, May, June or All",
        city
    );
    let month = prompt_valid(prompter, out, &month_prompt, MonthFilter::from_name)?;

    let day = prompt_valid(
        prompter,
        out,
        "Which day of the week? Monday through Sunday, or All",
        DayFilter::from_name,
    )?;

    writeln!(out, "{}", "-".repeat(crate::stats::SEPARATOR_WIDTH))?;

    let filters = Filters { city, month, day };
    info!("Selected filters: {:?}", filters);
    Ok(filters)
}
