//! Defines the data structures and models used throughout the application.
//!
//! This includes the filter criteria collected from the user and the trip records
//! loaded from a city's dataset.

mod filters;
mod trip;

pub use filters::*;
pub use trip::*;
