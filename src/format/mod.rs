//! Formatting and parsing on top of chrono
//!
//! Patterns and style codes are compiled once into chrono format items and
//! wrapped in an immutable [`Formatter`].

mod formatter;
mod names;
mod pattern;
mod style;

pub use formatter::Formatter;
