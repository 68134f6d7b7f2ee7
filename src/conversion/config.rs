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

//! Serializable conversion settings
//!
//! [`ConversionConfig`] carries the textual form of a [`ConversionSpec`]'s
//! parameters so conversions can be declared in JSON configuration files.
//!
//! ```json
//! { "pattern": "d MMMM yyyy", "locale": "fr_FR", "time_zone": "Europe/Paris" }
//! ```

use super::spec::ConversionSpec;
use crate::core::error_code::DT0010;
use crate::core::{Chronology, ConversionError, Result};
use serde::{Deserialize, Serialize};

/// Textual conversion parameters, resolved with [`ConversionConfig::to_spec`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConversionConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    /// Locale name such as `en_US`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// `ISO`, `ISO[UTC]` or `ISO[<IANA zone>]`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chronology: Option<String>,
    /// IANA time zone name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl ConversionConfig {
    /// Config with a pattern
    pub fn pattern(pattern: impl Into<String>) -> Self {
        Self {
            pattern: Some(pattern.into()),
            ..Self::default()
        }
    }

    /// Config with a style code
    pub fn style(style: impl Into<String>) -> Self {
        Self {
            style: Some(style.into()),
            ..Self::default()
        }
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn with_chronology(mut self, chronology: impl Into<String>) -> Self {
        self.chronology = Some(chronology.into());
        self
    }

    pub fn with_time_zone(mut self, time_zone: impl Into<String>) -> Self {
        self.time_zone = Some(time_zone.into());
        self
    }

    /// Read a config from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            ConversionError::configuration(DT0010, format!("invalid conversion config: {e}"))
        })
    }

    /// Write the config as JSON text
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| {
            ConversionError::configuration(DT0010, format!("cannot serialize conversion config: {e}"))
        })
    }

    /// Resolve names and validate the parameters
    pub fn to_spec(&self) -> Result<ConversionSpec> {
        let mut builder = ConversionSpec::builder();
        if let Some(pattern) = &self.pattern {
            builder = builder.pattern(pattern.as_str());
        }
        if let Some(style) = &self.style {
            builder = builder.style(style.as_str());
        }
        if let Some(locale) = &self.locale {
            builder = builder.locale_name(locale.as_str());
        }
        if let Some(chronology) = &self.chronology {
            builder = builder.chronology(chronology.parse::<Chronology>()?);
        }
        if let Some(time_zone) = &self.time_zone {
            builder = builder.time_zone_name(time_zone.as_str());
        }
        builder.build()
    }
}

impl TryFrom<&ConversionConfig> for ConversionSpec {
    type Error = ConversionError;

    fn try_from(config: &ConversionConfig) -> Result<Self> {
        config.to_spec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error_code::{DT0001, DT0002, DT0007};
    use crate::conversion::Strategy;
    use chrono::Locale;
    use chrono_tz::Tz;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_json() {
        let config = ConversionConfig::from_json(
            r#"{"pattern": "d MMMM yyyy", "locale": "fr_FR", "time_zone": "Europe/Paris"}"#,
        )
        .unwrap();
        assert_eq!(
            config,
            ConversionConfig::pattern("d MMMM yyyy")
                .with_locale("fr_FR")
                .with_time_zone("Europe/Paris")
        );

        let spec = config.to_spec().unwrap();
        assert_eq!(spec.strategy(), Strategy::FromPattern);
        assert_eq!(spec.locale(), Some(Locale::fr_FR));
        assert_eq!(spec.time_zone(), Some(Tz::Europe__Paris));
    }

    #[test]
    fn test_chronology_from_config() {
        let spec = ConversionConfig::style("MM")
            .with_chronology("ISO[Asia/Tokyo]")
            .to_spec()
            .unwrap();
        assert_eq!(spec.chronology(), Some(Chronology::iso_in(Tz::Asia__Tokyo)));

        let err = ConversionConfig::style("MM")
            .with_chronology("Julian")
            .to_spec()
            .unwrap_err();
        assert_eq!(err.error_code(), DT0007);
    }

    #[test]
    fn test_json_round_trip_omits_unset_fields() {
        let config = ConversionConfig::style("S-").with_locale("de_DE");
        let json = config.to_json().unwrap();
        assert_eq!(json, r#"{"style":"S-","locale":"de_DE"}"#);
        assert_eq!(ConversionConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_malformed_json() {
        let err = ConversionConfig::from_json(r#"{"patern": "yyyy"}"#).unwrap_err();
        assert_eq!(err.error_code(), DT0010);

        let err = ConversionConfig::from_json("not json").unwrap_err();
        assert_eq!(err.error_code(), DT0010);
    }

    #[test]
    fn test_builder_rules_apply() {
        let err = ConversionConfig::default().to_spec().unwrap_err();
        assert_eq!(err.error_code(), DT0001);

        let config = ConversionConfig {
            pattern: Some("yyyy".to_string()),
            style: Some("S-".to_string()),
            ..ConversionConfig::default()
        };
        let err = ConversionSpec::try_from(&config).unwrap_err();
        assert_eq!(err.error_code(), DT0002);
    }
}
