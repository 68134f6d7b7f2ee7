// Copyright 2024 OctoFHIR Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Core error type with error codes

use super::error_code::{
    DT0051, DT0052, DT0053, DT0101, DT0102, DT0103, DT0104, ErrorCode, ErrorInfo,
};
use std::num::ParseIntError;
use thiserror::Error;

/// Main conversion error type
///
/// Configuration errors are raised while a conversion is being built; every
/// other variant is raised by a single execution and is terminal for it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// Invalid or incomplete construction parameters
    #[error("{error_code}: {message}")]
    Configuration {
        error_code: ErrorCode,
        message: String,
    },

    /// A pattern with textual month or weekday names was used for parsing without a locale
    #[error(
        "{code}: pattern '{pattern}' contains month or weekday names; parsing it requires an explicit locale",
        code = DT0051
    )]
    AmbiguousFormat { pattern: String },

    /// Field list length outside the range accepted by the target type
    #[error("{code}: expected {min} to {max} fields, got {actual}", code = DT0052)]
    FieldCount {
        min: usize,
        max: usize,
        actual: usize,
    },

    /// Textual field that is not an integer
    #[error("{code}: field {index} ('{field}') is not an integer: {source}", code = DT0053)]
    FieldParse {
        index: usize,
        field: String,
        source: ParseIntError,
    },

    /// Pattern could not be compiled into a formatter
    #[error("{code}: invalid pattern '{pattern}': {message}", code = DT0101)]
    InvalidPattern { pattern: String, message: String },

    /// Text rejected by chrono's parser
    #[error("{code}: cannot parse '{text}': {source}", code = DT0102)]
    Parse {
        text: String,
        source: chrono::ParseError,
    },

    /// Value rejected by chrono's printer
    #[error("{code}: {message}", code = DT0103)]
    Format { message: String },

    /// Fields that do not form a valid date-time
    #[error("{code}: {message}", code = DT0104)]
    InvalidValue { message: String },
}

impl ConversionError {
    /// Create a configuration error
    pub fn configuration(error_code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Configuration {
            error_code,
            message: message.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(message: impl Into<String>) -> Self {
        Self::InvalidValue {
            message: message.into(),
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::Configuration { error_code, .. } => *error_code,
            Self::AmbiguousFormat { .. } => DT0051,
            Self::FieldCount { .. } => DT0052,
            Self::FieldParse { .. } => DT0053,
            Self::InvalidPattern { .. } => DT0101,
            Self::Parse { .. } => DT0102,
            Self::Format { .. } => DT0103,
            Self::InvalidValue { .. } => DT0104,
        }
    }

    /// Get error information with help text
    pub fn error_info(&self) -> &'static ErrorInfo {
        self.error_code().info()
    }

    /// Whether this error was raised while building a conversion
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }
}

/// Result type for conversion operations
pub type Result<T> = std::result::Result<T, ConversionError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error_code::DT0003;

    #[test]
    fn test_configuration_error_display() {
        let err = ConversionError::configuration(DT0003, "pattern must not be empty");
        assert_eq!(err.to_string(), "DT0003: pattern must not be empty");
        assert!(err.is_configuration());
        assert_eq!(err.error_info().title, "Empty pattern or style");
    }

    #[test]
    fn test_field_count_display() {
        let err = ConversionError::FieldCount {
            min: 4,
            max: 7,
            actual: 3,
        };
        assert_eq!(err.to_string(), "DT0052: expected 4 to 7 fields, got 3");
        assert_eq!(err.error_code(), DT0052);
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_field_parse_keeps_source() {
        let source = "x1".parse::<i32>().unwrap_err();
        let err = ConversionError::FieldParse {
            index: 2,
            field: "x1".to_string(),
            source,
        };
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("DT0053: field 2 ('x1')"));
    }
}
