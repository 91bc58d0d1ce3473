//! Validation utilities for prime artifacts and console input
//!
//! Pure functions with no I/O dependencies.

pub mod bounds;
pub mod parsing;

pub use bounds::{validate_array_bounds, validate_bound, word_count};
pub use parsing::{is_sentinel, parse_query, SENTINEL};
