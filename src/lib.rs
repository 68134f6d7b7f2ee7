//! Date-time conversion adapters on top of chrono
//!
//! Converts between text, field lists, epoch instants and chrono values.
//! Each conversion resolves its formatting strategy once (a pattern, a style
//! code or a prebuilt formatter, with optional locale, chronology and time
//! zone) and is then reusable from any number of threads. Absent input
//! always yields absent output.
//!
//! ```no_run
//! use octofhir_temporal_convert::{Conversion, LocalDateToString, StringToLocalDate};
//!
//! let parse = StringToLocalDate::from_pattern("yyyy-MM-dd")?;
//! let print = LocalDateToString::from_pattern("dd.MM.yyyy")?;
//!
//! let date = parse.convert("2020-01-15")?;
//! assert_eq!(print.convert(date)?, "15.01.2020");
//! assert_eq!(parse.apply(None)?, None);
//! # Ok::<(), octofhir_temporal_convert::ConversionError>(())
//! ```

pub mod conversion;
pub mod core;
pub mod format;

// Re-export main types
pub use conversion::*;
pub use crate::core::{
    Chronology, ConversionError, ErrorCode, ErrorInfo, LocalDate, LocalDateTime, LocalTime,
    Result, ZonedDateTime,
};
pub use format::Formatter;

// Re-export collaborator types used in the public API
pub use chrono::Locale;
pub use chrono_tz::Tz;
