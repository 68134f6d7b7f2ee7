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

//! Error code system in the style of the Rust compiler (E0001, E0002, ...)
//!
//! Every conversion failure carries a stable `DT0001`-style code so callers
//! can match on it without parsing messages.

use std::fmt;

/// Error categories for organizing error codes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Construction-time configuration errors (DT0001-DT0050)
    Configuration,
    /// Execution-time input errors (DT0051-DT0100)
    Execution,
    /// Errors raised by the underlying date-time library (DT0101-DT0150)
    Library,
}

/// Error code following Rust compiler pattern (DT0001, DT0002, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode {
    pub code: u16,
}

impl ErrorCode {
    /// Create a new error code
    pub const fn new(code: u16) -> Self {
        Self { code }
    }

    /// Get the full error code string (e.g., "DT0001")
    pub fn code_str(&self) -> String {
        format!("DT{:04}", self.code)
    }

    /// Get error information from the registry
    pub fn info(&self) -> &'static ErrorInfo {
        ERROR_REGISTRY.get_error_info(self)
    }

    /// Get error category for this error code
    pub fn category(&self) -> ErrorCategory {
        match self.code {
            51..=100 => ErrorCategory::Execution,
            101..=150 => ErrorCategory::Library,
            _ => ErrorCategory::Configuration,
        }
    }

    /// Get human-readable description for this error code
    pub fn description(&self) -> &'static str {
        self.info().title
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DT{:04}", self.code)
    }
}

/// Error information with help text
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    /// Error code number
    pub code: u16,
    /// Human-readable error title
    pub title: &'static str,
    /// Detailed description of the error
    pub description: &'static str,
    /// Help information and suggested solutions
    pub help: &'static str,
}

impl ErrorInfo {
    pub const fn new(
        code: u16,
        title: &'static str,
        description: &'static str,
        help: &'static str,
    ) -> Self {
        Self {
            code,
            title,
            description,
            help,
        }
    }
}

/// Central error registry containing all error definitions
pub struct ErrorRegistry;

impl ErrorRegistry {
    /// Get error information for a given error code
    pub fn get_error_info(&self, error_code: &ErrorCode) -> &'static ErrorInfo {
        match error_code.code {
            // Configuration Errors (DT0001-DT0050)
            1 => &DT0001_INFO,
            2 => &DT0002_INFO,
            3 => &DT0003_INFO,
            4 => &DT0004_INFO,
            5 => &DT0005_INFO,
            6 => &DT0006_INFO,
            7 => &DT0007_INFO,
            8 => &DT0008_INFO,
            9 => &DT0009_INFO,
            10 => &DT0010_INFO,

            // Execution Errors (DT0051-DT0100)
            51 => &DT0051_INFO,
            52 => &DT0052_INFO,
            53 => &DT0053_INFO,

            // Library Errors (DT0101-DT0150)
            101 => &DT0101_INFO,
            102 => &DT0102_INFO,
            103 => &DT0103_INFO,
            104 => &DT0104_INFO,

            _ => &UNKNOWN_ERROR_INFO,
        }
    }
}

/// Global error registry instance
pub static ERROR_REGISTRY: ErrorRegistry = ErrorRegistry;

// ========== Error Code Definitions ==========

// Configuration Error Codes (DT0001-DT0050)
pub const DT0001: ErrorCode = ErrorCode::new(1); // No pattern, style or formatter
pub const DT0002: ErrorCode = ErrorCode::new(2); // More than one strategy source
pub const DT0003: ErrorCode = ErrorCode::new(3); // Empty pattern or style text
pub const DT0004: ErrorCode = ErrorCode::new(4); // Override not accepted with a formatter
pub const DT0005: ErrorCode = ErrorCode::new(5); // Unknown locale name
pub const DT0006: ErrorCode = ErrorCode::new(6); // Unknown time zone name
pub const DT0007: ErrorCode = ErrorCode::new(7); // Invalid chronology
pub const DT0008: ErrorCode = ErrorCode::new(8); // Invalid style code
pub const DT0009: ErrorCode = ErrorCode::new(9); // Option not supported by this conversion
pub const DT0010: ErrorCode = ErrorCode::new(10); // Malformed configuration document

// Execution Error Codes (DT0051-DT0100)
pub const DT0051: ErrorCode = ErrorCode::new(51); // Textual names without a locale
pub const DT0052: ErrorCode = ErrorCode::new(52); // Field count out of range
pub const DT0053: ErrorCode = ErrorCode::new(53); // Field is not an integer

// Library Error Codes (DT0101-DT0150)
pub const DT0101: ErrorCode = ErrorCode::new(101); // Invalid pattern
pub const DT0102: ErrorCode = ErrorCode::new(102); // Text does not match the format
pub const DT0103: ErrorCode = ErrorCode::new(103); // Value cannot be printed
pub const DT0104: ErrorCode = ErrorCode::new(104); // Invalid date-time value

// ========== Error Information Definitions ==========

static DT0001_INFO: ErrorInfo = ErrorInfo::new(
    1,
    "No conversion strategy",
    "A conversion was configured without a pattern, a style or a prebuilt formatter.",
    "Supply exactly one of pattern, style or formatter.",
);

static DT0002_INFO: ErrorInfo = ErrorInfo::new(
    2,
    "Conflicting conversion strategies",
    "More than one of pattern, style and formatter was supplied.",
    "Pattern, style and formatter are mutually exclusive. Keep only one of them.",
);

static DT0003_INFO: ErrorInfo = ErrorInfo::new(
    3,
    "Empty pattern or style",
    "The pattern or style text is empty.",
    "Provide a non-empty pattern such as 'yyyy-MM-dd' or a style code such as 'MS'.",
);

static DT0004_INFO: ErrorInfo = ErrorInfo::new(
    4,
    "Override not accepted with a formatter",
    "A locale or chronology was supplied together with a prebuilt formatter.",
    "Bind the locale or chronology on the formatter itself with Formatter::with_locale or Formatter::with_chronology.",
);

static DT0005_INFO: ErrorInfo = ErrorInfo::new(
    5,
    "Unknown locale",
    "The locale name does not resolve to a known locale.",
    "Use a POSIX-style locale name such as 'en_US' or 'fr_FR'.",
);

static DT0006_INFO: ErrorInfo = ErrorInfo::new(
    6,
    "Unknown time zone",
    "The time zone name does not resolve to an entry of the IANA time zone database.",
    "Use an IANA identifier such as 'UTC' or 'Europe/Paris'.",
);

static DT0007_INFO: ErrorInfo = ErrorInfo::new(
    7,
    "Invalid chronology",
    "The chronology text is not recognized.",
    "Use 'ISO', 'ISO[UTC]' or 'ISO[<zone>]' with an IANA zone identifier.",
);

static DT0008_INFO: ErrorInfo = ErrorInfo::new(
    8,
    "Invalid style code",
    "A style code must be two characters, each one of S, M, L, F or '-', and not '--'.",
    "Use a date style followed by a time style, for example 'MS' or 'S-'.",
);

static DT0009_INFO: ErrorInfo = ErrorInfo::new(
    9,
    "Option not supported",
    "The conversion does not accept one of the supplied options.",
    "Time zones apply only to conversions that produce date-time values.",
);

static DT0010_INFO: ErrorInfo = ErrorInfo::new(
    10,
    "Malformed configuration",
    "The conversion configuration document could not be read.",
    "Check the document against the ConversionConfig fields: pattern, style, locale, chronology, time_zone.",
);

static DT0051_INFO: ErrorInfo = ErrorInfo::new(
    51,
    "Textual names require a locale",
    "The pattern contains month or weekday names but no locale was supplied for parsing.",
    "Supply an explicit locale so that parsing does not depend on the environment.",
);

static DT0052_INFO: ErrorInfo = ErrorInfo::new(
    52,
    "Field count out of range",
    "The number of supplied fields is outside the range accepted by the target type.",
    "Date-times take 4 to 7 fields, dates 1 to 3 and times of day 0 to 4.",
);

static DT0053_INFO: ErrorInfo = ErrorInfo::new(
    53,
    "Field is not an integer",
    "A textual field could not be parsed as an integer.",
    "Make sure every field holds a decimal integer such as '2020' or '15'.",
);

static DT0101_INFO: ErrorInfo = ErrorInfo::new(
    101,
    "Invalid pattern",
    "The format pattern could not be compiled.",
    "Check the pattern letters; quote literal text with single quotes.",
);

static DT0102_INFO: ErrorInfo = ErrorInfo::new(
    102,
    "Text does not match format",
    "The input text could not be parsed with the resolved format.",
    "Make sure the text follows the pattern or style exactly.",
);

static DT0103_INFO: ErrorInfo = ErrorInfo::new(
    103,
    "Value cannot be formatted",
    "The value does not carry a field the format prints, such as an offset on a local time.",
    "Use a pattern that only references fields of the value type.",
);

static DT0104_INFO: ErrorInfo = ErrorInfo::new(
    104,
    "Invalid date-time value",
    "The fields do not describe a valid date-time, or the local time does not exist in the zone.",
    "Check month, day and time ranges and daylight saving transitions.",
);

static UNKNOWN_ERROR_INFO: ErrorInfo = ErrorInfo::new(
    0,
    "Unknown error",
    "An unknown error occurred.",
    "Report this error together with the conversion that produced it.",
);
