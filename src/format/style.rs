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

//! Style codes
//!
//! A style is two characters: the date style then the time style. Each is
//! `S` (short), `M` (medium), `L` (long), `F` (full) or `-` to leave that
//! part out.

use crate::core::error_code::DT0008;
use crate::core::{ConversionError, Result};

/// Expand a style code into the equivalent pattern
pub(crate) fn style_pattern(style: &str) -> Result<String> {
    let invalid = || {
        ConversionError::configuration(
            DT0008,
            format!("invalid style '{style}', expected two of S, M, L, F or '-'"),
        )
    };

    let mut chars = style.chars();
    let (Some(date_style), Some(time_style), None) = (chars.next(), chars.next(), chars.next())
    else {
        return Err(invalid());
    };

    let date = date_pattern(date_style).ok_or_else(invalid)?;
    let time = time_pattern(time_style).ok_or_else(invalid)?;

    match (date, time) {
        (Some(date), Some(time)) => Ok(format!("{date} {time}")),
        (Some(date), None) => Ok(date.to_string()),
        (None, Some(time)) => Ok(time.to_string()),
        (None, None) => Err(invalid()),
    }
}

fn date_pattern(style: char) -> Option<Option<&'static str>> {
    match style {
        'S' => Some(Some("M/d/yy")),
        'M' => Some(Some("MMM d, yyyy")),
        'L' => Some(Some("MMMM d, yyyy")),
        'F' => Some(Some("EEEE, MMMM d, yyyy")),
        '-' => Some(None),
        _ => None,
    }
}

fn time_pattern(style: char) -> Option<Option<&'static str>> {
    match style {
        'S' => Some(Some("h:mm a")),
        'M' => Some(Some("h:mm:ss a")),
        'L' => Some(Some("h:mm:ss a ZZ")),
        'F' => Some(Some("h:mm:ss a z")),
        '-' => Some(None),
        _ => None,
    }
}
