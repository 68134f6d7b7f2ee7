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

//! Epoch-based instants to zoned date-times

use super::function::Conversion;
use super::zone::ZoneOptions;
use crate::core::{Chronology, ConversionError, Result, ZonedDateTime};
use chrono::{TimeZone, Utc};
use chrono_tz::Tz;
use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch to a date-time in the effective zone
#[derive(Debug, Clone, Default)]
pub struct MillisToDateTime {
    options: ZoneOptions,
}

impl MillisToDateTime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_time_zone(mut self, time_zone: Tz) -> Self {
        self.options.time_zone = Some(time_zone);
        self
    }

    pub fn with_chronology(mut self, chronology: Chronology) -> Self {
        self.options.chronology = Some(chronology);
        self
    }
}

impl Conversion<i64> for MillisToDateTime {
    type Output = ZonedDateTime;

    fn name(&self) -> &'static str {
        "MillisToDateTime"
    }

    fn convert(&self, millis: i64) -> Result<ZonedDateTime> {
        let instant = Utc.timestamp_millis_opt(millis).single().ok_or_else(|| {
            ConversionError::invalid_value(format!("{millis} ms is outside the supported range"))
        })?;
        Ok(instant.with_timezone(&self.options.zone()))
    }
}

/// System clock readings to a date-time in the effective zone
#[derive(Debug, Clone, Default)]
pub struct SystemTimeToDateTime {
    options: ZoneOptions,
}

impl SystemTimeToDateTime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_time_zone(mut self, time_zone: Tz) -> Self {
        self.options.time_zone = Some(time_zone);
        self
    }

    pub fn with_chronology(mut self, chronology: Chronology) -> Self {
        self.options.chronology = Some(chronology);
        self
    }
}

impl Conversion<SystemTime> for SystemTimeToDateTime {
    type Output = ZonedDateTime;

    fn name(&self) -> &'static str {
        "SystemTimeToDateTime"
    }

    fn convert(&self, time: SystemTime) -> Result<ZonedDateTime> {
        let (secs, nanos) = match time.duration_since(UNIX_EPOCH) {
            Ok(after) => (i64::try_from(after.as_secs()).ok(), after.subsec_nanos()),
            Err(before) => {
                let before = before.duration();
                let secs = i64::try_from(before.as_secs()).ok().map(|secs| -secs);
                match before.subsec_nanos() {
                    0 => (secs, 0),
                    nanos => (secs.and_then(|secs| secs.checked_sub(1)), 1_000_000_000 - nanos),
                }
            }
        };
        let instant = secs
            .and_then(|secs| Utc.timestamp_opt(secs, nanos).single())
            .ok_or_else(|| {
                ConversionError::invalid_value(format!(
                    "system time {time:?} is outside the supported range"
                ))
            })?;
        Ok(instant.with_timezone(&self.options.zone()))
    }
}
