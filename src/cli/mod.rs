//! Handles Command Line Interface (CLI) related functionalities.
//!
//! Includes parsing arguments, resolving configuration, collecting filter criteria
//! from the user, paging raw data, and running the session loop.

mod commands;
#[cfg(test)]
mod mock;
mod pager;
mod prompt;

pub use commands::*;
#[cfg(test)]
pub use mock::*;
pub use prompt::*;
