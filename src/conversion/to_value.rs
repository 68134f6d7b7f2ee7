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

//! String to temporal value conversions

use super::function::Conversion;
use super::spec::{ConversionSpec, Strategy};
use crate::core::{
    ConversionError, LocalDate, LocalDateTime, LocalTime, Result, ZonedDateTime,
};
use crate::format::Formatter;
use chrono_tz::Tz;
use std::marker::PhantomData;
use std::sync::Arc;

/// Temporal type that can be parsed by a [`Formatter`]
pub trait ParseTarget: Sized + 'static {
    /// Name of the string conversion producing this type
    const CONVERSION: &'static str;

    fn parse(formatter: &Formatter, text: &str, time_zone: Option<Tz>) -> Result<Self>;
}

impl ParseTarget for ZonedDateTime {
    const CONVERSION: &'static str = "StringToDateTime";

    fn parse(formatter: &Formatter, text: &str, time_zone: Option<Tz>) -> Result<Self> {
        formatter.parse_zoned(text, time_zone)
    }
}

impl ParseTarget for LocalDate {
    const CONVERSION: &'static str = "StringToLocalDate";

    fn parse(formatter: &Formatter, text: &str, _time_zone: Option<Tz>) -> Result<Self> {
        formatter.parse_date(text)
    }
}

impl ParseTarget for LocalTime {
    const CONVERSION: &'static str = "StringToLocalTime";

    fn parse(formatter: &Formatter, text: &str, _time_zone: Option<Tz>) -> Result<Self> {
        formatter.parse_time(text)
    }
}

impl ParseTarget for LocalDateTime {
    const CONVERSION: &'static str = "StringToLocalDateTime";

    fn parse(formatter: &Formatter, text: &str, _time_zone: Option<Tz>) -> Result<Self> {
        formatter.parse_local_date_time(text)
    }
}

/// Parses text into a temporal value using a resolved [`ConversionSpec`]
///
/// Pattern-based conversions whose pattern contains month or weekday names
/// are rejected at execution time unless a locale was given, since the
/// meaning of such names depends on the locale.
#[derive(Debug, Clone)]
pub struct StringToValue<T> {
    spec: ConversionSpec,
    _target: PhantomData<fn() -> T>,
}

impl<T: ParseTarget> StringToValue<T> {
    pub fn new(spec: ConversionSpec) -> Self {
        log::debug!(
            "Created {} conversion using {} '{}'",
            T::CONVERSION,
            spec.strategy(),
            spec.formatter()
        );
        Self {
            spec,
            _target: PhantomData,
        }
    }

    pub fn from_pattern(pattern: impl Into<String>) -> Result<Self> {
        ConversionSpec::from_pattern(pattern).map(Self::new)
    }

    pub fn from_style(style: impl Into<String>) -> Result<Self> {
        ConversionSpec::from_style(style).map(Self::new)
    }

    pub fn from_formatter(formatter: Arc<Formatter>) -> Result<Self> {
        ConversionSpec::from_formatter(formatter).map(Self::new)
    }

    pub fn spec(&self) -> &ConversionSpec {
        &self.spec
    }

    fn check_names(&self) -> Result<()> {
        let formatter = self.spec.formatter();
        if self.spec.strategy() == Strategy::FromPattern
            && self.spec.locale().is_none()
            && formatter.has_textual_names()
        {
            return Err(ConversionError::AmbiguousFormat {
                pattern: formatter.to_string(),
            });
        }
        Ok(())
    }
}

impl<'a, T: ParseTarget> Conversion<&'a str> for StringToValue<T> {
    type Output = T;

    fn name(&self) -> &'static str {
        T::CONVERSION
    }

    fn convert(&self, text: &'a str) -> Result<T> {
        self.check_names()?;
        log::trace!("{}: parsing '{text}'", T::CONVERSION);
        T::parse(self.spec.formatter(), text, self.spec.time_zone())
    }
}

pub type StringToDateTime = StringToValue<ZonedDateTime>;
pub type StringToLocalDate = StringToValue<LocalDate>;
pub type StringToLocalTime = StringToValue<LocalTime>;
pub type StringToLocalDateTime = StringToValue<LocalDateTime>;
