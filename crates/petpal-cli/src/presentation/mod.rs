//! Shared CLI presentation utilities.
//!
//! Keep this module format-only: no domain transforms.

pub mod pet_display;
pub mod tables;

pub use pet_display::{format_age, format_coordinate, insight_heading};
pub use tables::{print_separator, truncate_string};
