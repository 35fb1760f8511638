//! Provides dataset loading functionalities.
//!
//! Currently, this module reads the per-city trip CSV files via the `loader` submodule.

mod loader;

pub use loader::*;
