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

//! Conversion strategy resolution
//!
//! A [`ConversionSpec`] is resolved once from a pattern, a style code or a
//! prebuilt [`Formatter`], plus optional locale, chronology and time zone
//! overrides. All construction rules are checked in
//! [`ConversionSpecBuilder::build`]; a built spec is immutable and can be
//! shared freely between threads.

use crate::core::error_code::{DT0001, DT0002, DT0003, DT0004};
use crate::core::temporal::{resolve_locale, resolve_time_zone};
use crate::core::{Chronology, ConversionError, Result};
use crate::format::Formatter;
use chrono::Locale;
use chrono_tz::Tz;
use std::fmt;
use std::sync::Arc;

/// How the formatter of a spec was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Compiled from a letter pattern
    FromPattern,
    /// Compiled from a style code
    FromStyle,
    /// Supplied prebuilt by the caller
    FromFormatter,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::FromPattern => write!(f, "pattern"),
            Strategy::FromStyle => write!(f, "style"),
            Strategy::FromFormatter => write!(f, "formatter"),
        }
    }
}

/// Resolved, immutable conversion configuration
#[derive(Debug, Clone)]
pub struct ConversionSpec {
    strategy: Strategy,
    formatter: Arc<Formatter>,
    time_zone: Option<Tz>,
}

impl ConversionSpec {
    /// Start building a spec
    pub fn builder() -> ConversionSpecBuilder {
        ConversionSpecBuilder::default()
    }

    /// Spec compiled from a pattern with no overrides
    pub fn from_pattern(pattern: impl Into<String>) -> Result<Self> {
        Self::builder().pattern(pattern).build()
    }

    /// Spec compiled from a style code with no overrides
    pub fn from_style(style: impl Into<String>) -> Result<Self> {
        Self::builder().style(style).build()
    }

    /// Spec using a prebuilt formatter as-is
    pub fn from_formatter(formatter: Arc<Formatter>) -> Result<Self> {
        Self::builder().formatter(formatter).build()
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// The pattern text, for pattern-based specs
    pub fn pattern(&self) -> Option<&str> {
        match self.strategy {
            Strategy::FromPattern => self.formatter.pattern(),
            _ => None,
        }
    }

    /// The style code, for style-based specs
    pub fn style(&self) -> Option<&str> {
        match self.strategy {
            Strategy::FromStyle => self.formatter.style(),
            _ => None,
        }
    }

    /// The resolved formatter with locale and chronology bound
    pub fn formatter(&self) -> &Arc<Formatter> {
        &self.formatter
    }

    pub fn locale(&self) -> Option<Locale> {
        self.formatter.locale()
    }

    pub fn chronology(&self) -> Option<Chronology> {
        self.formatter.chronology()
    }

    pub fn time_zone(&self) -> Option<Tz> {
        self.time_zone
    }
}

#[derive(Debug, Clone)]
enum LocaleSource {
    Locale(Locale),
    Name(String),
}

#[derive(Debug, Clone)]
enum ZoneSource {
    Zone(Tz),
    Name(String),
}

/// Builder collecting the construction parameters of a [`ConversionSpec`]
///
/// Setters only record values; names are resolved and every rule is
/// checked by [`ConversionSpecBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct ConversionSpecBuilder {
    pattern: Option<String>,
    style: Option<String>,
    formatter: Option<Arc<Formatter>>,
    locale: Option<LocaleSource>,
    chronology: Option<Chronology>,
    time_zone: Option<ZoneSource>,
}

impl ConversionSpecBuilder {
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn formatter(mut self, formatter: Arc<Formatter>) -> Self {
        self.formatter = Some(formatter);
        self
    }

    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = Some(LocaleSource::Locale(locale));
        self
    }

    /// Locale given by name, resolved when the spec is built
    pub fn locale_name(mut self, name: impl Into<String>) -> Self {
        self.locale = Some(LocaleSource::Name(name.into()));
        self
    }

    pub fn chronology(mut self, chronology: Chronology) -> Self {
        self.chronology = Some(chronology);
        self
    }

    pub fn time_zone(mut self, time_zone: Tz) -> Self {
        self.time_zone = Some(ZoneSource::Zone(time_zone));
        self
    }

    /// Time zone given by IANA name, resolved when the spec is built
    pub fn time_zone_name(mut self, name: impl Into<String>) -> Self {
        self.time_zone = Some(ZoneSource::Name(name.into()));
        self
    }

    /// Validate the parameters and resolve the spec
    pub fn build(self) -> Result<ConversionSpec> {
        let (strategy, formatter) = match (self.pattern, self.style, self.formatter) {
            (None, None, None) => {
                return Err(ConversionError::configuration(
                    DT0001,
                    "a pattern, a style or a formatter is required",
                ));
            }
            (Some(pattern), None, None) => {
                if pattern.is_empty() {
                    return Err(ConversionError::configuration(
                        DT0003,
                        "pattern must not be empty",
                    ));
                }
                (Strategy::FromPattern, Formatter::for_pattern(&pattern)?)
            }
            (None, Some(style), None) => {
                if style.is_empty() {
                    return Err(ConversionError::configuration(
                        DT0003,
                        "style must not be empty",
                    ));
                }
                (Strategy::FromStyle, Formatter::for_style(&style)?)
            }
            (None, None, Some(formatter)) => {
                if self.locale.is_some() || self.chronology.is_some() {
                    return Err(ConversionError::configuration(
                        DT0004,
                        "locale and chronology cannot be combined with a prebuilt formatter",
                    ));
                }
                let time_zone = self.time_zone.map(resolve_zone).transpose()?;
                return Ok(resolved(Strategy::FromFormatter, formatter, time_zone));
            }
            _ => {
                return Err(ConversionError::configuration(
                    DT0002,
                    "pattern, style and formatter are mutually exclusive",
                ));
            }
        };

        let mut formatter = formatter;
        if let Some(locale) = self.locale {
            let locale = match locale {
                LocaleSource::Locale(locale) => locale,
                LocaleSource::Name(name) => resolve_locale(&name)?,
            };
            formatter = formatter.with_locale(locale);
        }
        if let Some(chronology) = self.chronology {
            formatter = formatter.with_chronology(chronology);
        }
        let time_zone = self.time_zone.map(resolve_zone).transpose()?;

        Ok(resolved(strategy, Arc::new(formatter), time_zone))
    }
}

fn resolve_zone(source: ZoneSource) -> Result<Tz> {
    match source {
        ZoneSource::Zone(zone) => Ok(zone),
        ZoneSource::Name(name) => resolve_time_zone(&name),
    }
}

fn resolved(strategy: Strategy, formatter: Arc<Formatter>, time_zone: Option<Tz>) -> ConversionSpec {
    log::debug!(
        "Resolved {strategy} conversion '{formatter}' (locale: {:?}, chronology: {:?}, time zone: {:?})",
        formatter.locale(),
        formatter.chronology(),
        time_zone.map(|zone| zone.name()),
    );
    ConversionSpec {
        strategy,
        formatter,
        time_zone,
    }
}
