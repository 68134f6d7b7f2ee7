//! Conversions between text, field lists, epoch instants and temporal values
//!
//! Every conversion is immutable once built and implements [`Conversion`].
//! Text conversions are resolved through a [`ConversionSpec`]; field and
//! instant conversions only take an optional time zone and chronology.

mod config;
mod fields;
mod function;
mod instant;
mod spec;
mod to_string;
mod to_value;
mod zone;

pub use config::ConversionConfig;
pub use fields::{
    FieldTarget, FieldsToDateTime, FieldsToLocalDate, FieldsToLocalTime, FieldsToValue,
    StringFieldsToDateTime, StringFieldsToLocalDate, StringFieldsToLocalTime,
    StringFieldsToValue,
};
pub use function::Conversion;
pub use instant::{MillisToDateTime, SystemTimeToDateTime};
pub use spec::{ConversionSpec, ConversionSpecBuilder, Strategy};
pub use to_string::{
    DateTimeToString, FormatSource, LocalDateTimeToString, LocalDateToString, LocalTimeToString,
    ValueToString,
};
pub use to_value::{
    ParseTarget, StringToDateTime, StringToLocalDate, StringToLocalDateTime, StringToLocalTime,
    StringToValue,
};
