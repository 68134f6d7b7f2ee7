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

//! Temporal value to string conversions

use super::function::Conversion;
use super::spec::ConversionSpec;
use crate::core::error_code::DT0009;
use crate::core::{
    ConversionError, LocalDate, LocalDateTime, LocalTime, Result, ZonedDateTime,
};
use crate::format::Formatter;
use std::marker::PhantomData;
use std::sync::Arc;

/// Temporal type that can be printed by a [`Formatter`]
pub trait FormatSource: Sized + 'static {
    /// Name of the conversion printing this type
    const CONVERSION: &'static str;

    fn format(&self, formatter: &Formatter) -> Result<String>;
}

impl FormatSource for ZonedDateTime {
    const CONVERSION: &'static str = "DateTimeToString";

    fn format(&self, formatter: &Formatter) -> Result<String> {
        formatter.format_zoned(self)
    }
}

impl FormatSource for LocalDate {
    const CONVERSION: &'static str = "LocalDateToString";

    fn format(&self, formatter: &Formatter) -> Result<String> {
        formatter.format_date(self)
    }
}

impl FormatSource for LocalTime {
    const CONVERSION: &'static str = "LocalTimeToString";

    fn format(&self, formatter: &Formatter) -> Result<String> {
        formatter.format_time(self)
    }
}

impl FormatSource for LocalDateTime {
    const CONVERSION: &'static str = "LocalDateTimeToString";

    fn format(&self, formatter: &Formatter) -> Result<String> {
        formatter.format_local_date_time(self)
    }
}

/// Prints temporal values using a resolved [`ConversionSpec`]
///
/// Values carry their own zone, so a spec with a time zone is rejected.
#[derive(Debug, Clone)]
pub struct ValueToString<T> {
    spec: ConversionSpec,
    _source: PhantomData<fn(T)>,
}

impl<T: FormatSource> ValueToString<T> {
    pub fn new(spec: ConversionSpec) -> Result<Self> {
        if spec.time_zone().is_some() {
            return Err(ConversionError::configuration(
                DT0009,
                format!("{} does not accept a time zone", T::CONVERSION),
            ));
        }
        log::debug!(
            "Created {} conversion using {} '{}'",
            T::CONVERSION,
            spec.strategy(),
            spec.formatter()
        );
        Ok(Self {
            spec,
            _source: PhantomData,
        })
    }

    pub fn from_pattern(pattern: impl Into<String>) -> Result<Self> {
        Self::new(ConversionSpec::from_pattern(pattern)?)
    }

    pub fn from_style(style: impl Into<String>) -> Result<Self> {
        Self::new(ConversionSpec::from_style(style)?)
    }

    pub fn from_formatter(formatter: Arc<Formatter>) -> Result<Self> {
        Self::new(ConversionSpec::from_formatter(formatter)?)
    }

    pub fn spec(&self) -> &ConversionSpec {
        &self.spec
    }
}

impl<T: FormatSource> Conversion<T> for ValueToString<T> {
    type Output = String;

    fn name(&self) -> &'static str {
        T::CONVERSION
    }

    fn convert(&self, value: T) -> Result<String> {
        log::trace!("{}: formatting with '{}'", T::CONVERSION, self.spec.formatter());
        value.format(self.spec.formatter())
    }
}

pub type DateTimeToString = ValueToString<ZonedDateTime>;
pub type LocalDateToString = ValueToString<LocalDate>;
pub type LocalTimeToString = ValueToString<LocalTime>;
pub type LocalDateTimeToString = ValueToString<LocalDateTime>;
