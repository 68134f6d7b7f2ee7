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

//! Temporal value types, chronologies and name resolution

use crate::core::error_code::{DT0005, DT0006, DT0007};
use crate::core::{ConversionError, Result};
use chrono::{DateTime, Locale, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::Tz;
use std::fmt;
use std::str::FromStr;

/// An instant bound to an IANA time zone
pub type ZonedDateTime = DateTime<Tz>;

/// A calendar date without zone
pub type LocalDate = NaiveDate;

/// A time of day without zone
pub type LocalTime = NaiveTime;

/// A calendar date and time of day without zone
pub type LocalDateTime = NaiveDateTime;

/// Calendar system override
///
/// chrono implements the proleptic Gregorian (ISO 8601) calendar only, so a
/// chronology is the ISO calendar optionally bound to a time zone. The zone
/// decides how instants are printed and how local text is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Chronology {
    zone: Option<Tz>,
}

impl Chronology {
    /// ISO calendar without a zone of its own
    pub const fn iso() -> Self {
        Self { zone: None }
    }

    /// ISO calendar in UTC
    pub const fn iso_utc() -> Self {
        Self { zone: Some(Tz::UTC) }
    }

    /// ISO calendar in the given zone
    pub const fn iso_in(zone: Tz) -> Self {
        Self { zone: Some(zone) }
    }

    /// The zone bound to this chronology, if any
    pub fn zone(&self) -> Option<Tz> {
        self.zone
    }
}

impl Default for Chronology {
    fn default() -> Self {
        Self::iso()
    }
}

impl fmt::Display for Chronology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.zone {
            Some(zone) => write!(f, "ISO[{}]", zone.name()),
            None => write!(f, "ISO"),
        }
    }
}

impl FromStr for Chronology {
    type Err = ConversionError;

    /// Parses `ISO`, `ISO[UTC]` or `ISO[<IANA zone>]`
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let (system, zone) = match trimmed.split_once('[') {
            Some((system, rest)) => {
                let zone = rest.strip_suffix(']').ok_or_else(|| {
                    ConversionError::configuration(
                        DT0007,
                        format!("chronology '{trimmed}' is missing a closing ']'"),
                    )
                })?;
                (system, Some(zone))
            }
            None => (trimmed, None),
        };

        if !system.eq_ignore_ascii_case("ISO") {
            return Err(ConversionError::configuration(
                DT0007,
                format!("unsupported chronology '{trimmed}', only the ISO calendar is available"),
            ));
        }

        match zone {
            Some(name) => Ok(Self::iso_in(resolve_time_zone(name)?)),
            None => Ok(Self::iso()),
        }
    }
}

/// Resolve a locale name such as `en_US` using chrono's locale table
pub fn resolve_locale(name: &str) -> Result<Locale> {
    Locale::try_from(name).map_err(|_| {
        ConversionError::configuration(DT0005, format!("unknown locale '{name}'"))
    })
}

/// Resolve an IANA time zone name such as `Europe/Paris`
pub fn resolve_time_zone(name: &str) -> Result<Tz> {
    name.trim().parse::<Tz>().map_err(|_| {
        ConversionError::configuration(DT0006, format!("unknown time zone '{name}'"))
    })
}

/// Zone used to anchor local values: the explicit zone, else the chronology's, else UTC
pub fn effective_zone(time_zone: Option<Tz>, chronology: Option<&Chronology>) -> Tz {
    time_zone
        .or_else(|| chronology.and_then(Chronology::zone))
        .unwrap_or(Tz::UTC)
}

/// Place a local date-time in a zone
///
/// Ambiguous local times (clocks turned back) resolve to the earlier instant;
/// local times skipped by a transition are rejected.
pub fn resolve_local(local: &NaiveDateTime, zone: &Tz) -> Result<ZonedDateTime> {
    zone.from_local_datetime(local).earliest().ok_or_else(|| {
        ConversionError::invalid_value(format!(
            "local date-time {local} does not exist in time zone {}",
            zone.name()
        ))
    })
}
