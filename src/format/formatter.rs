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

//! Prebuilt formatter over chrono's formatting and parsing engine

use super::names::NameTable;
use super::pattern::{compile, has_textual_names};
use super::style::style_pattern;
use crate::core::temporal::{effective_zone, resolve_local};
use crate::core::{
    Chronology, ConversionError, LocalDate, LocalDateTime, LocalTime, Result, ZonedDateTime,
};
use chrono::format::{DelayedFormat, Fixed, Item, ParseResult, Parsed};
use chrono::{Locale, NaiveDate, NaiveTime, Offset};
use chrono_tz::Tz;
use std::fmt::{self, Write};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Source {
    Pattern(String),
    Style(String),
}

/// Compiled pattern or style with optional locale and chronology
///
/// A formatter is immutable: [`Formatter::with_locale`] and
/// [`Formatter::with_chronology`] return new formatters sharing the compiled
/// items. It can be shared across threads behind an [`Arc`].
#[derive(Debug, Clone)]
pub struct Formatter {
    source: Source,
    items: Arc<[Item<'static>]>,
    textual: bool,
    locale: Option<Locale>,
    names: Option<Arc<NameTable>>,
    chronology: Option<Chronology>,
}

impl Formatter {
    /// Compile a letter pattern such as `yyyy-MM-dd'T'HH:mm`
    pub fn for_pattern(pattern: &str) -> Result<Self> {
        let items = compile(pattern)?;
        Ok(Self::from_items(Source::Pattern(pattern.to_string()), items))
    }

    /// Compile a two-character style code such as `MS`
    pub fn for_style(style: &str) -> Result<Self> {
        let items = compile(&style_pattern(style)?)?;
        Ok(Self::from_items(Source::Style(style.to_string()), items))
    }

    fn from_items(source: Source, items: Vec<Item<'static>>) -> Self {
        let textual = has_textual_names(&items);
        Self {
            source,
            items: items.into(),
            textual,
            locale: None,
            names: None,
            chronology: None,
        }
    }

    /// Copy of this formatter printing and parsing names in `locale`
    pub fn with_locale(&self, locale: Locale) -> Self {
        let localized = self.textual
            || self
                .items
                .iter()
                .any(|item| matches!(item, Item::Fixed(Fixed::UpperAmPm | Fixed::LowerAmPm)));
        let names = localized.then(|| Arc::new(NameTable::new(locale)));
        Self {
            locale: Some(locale),
            names,
            ..self.clone()
        }
    }

    /// Copy of this formatter using `chronology`
    pub fn with_chronology(&self, chronology: Chronology) -> Self {
        Self {
            chronology: Some(chronology),
            ..self.clone()
        }
    }

    /// The pattern this formatter was compiled from
    pub fn pattern(&self) -> Option<&str> {
        match &self.source {
            Source::Pattern(pattern) => Some(pattern),
            Source::Style(_) => None,
        }
    }

    /// The style code this formatter was compiled from
    pub fn style(&self) -> Option<&str> {
        match &self.source {
            Source::Style(style) => Some(style),
            Source::Pattern(_) => None,
        }
    }

    pub fn locale(&self) -> Option<Locale> {
        self.locale
    }

    pub fn chronology(&self) -> Option<Chronology> {
        self.chronology
    }

    /// Whether the formatter prints or parses month or weekday names
    pub fn has_textual_names(&self) -> bool {
        self.textual
    }

    /// Print an instant, moved into the chronology's zone when it has one
    pub fn format_zoned(&self, value: &ZonedDateTime) -> Result<String> {
        let value = match self.chronology.and_then(|chronology| chronology.zone()) {
            Some(zone) => value.with_timezone(&zone),
            None => *value,
        };
        let local = value.naive_local();
        self.render_with_offset(local.date(), local.time(), value.offset())
    }

    pub fn format_date(&self, value: &LocalDate) -> Result<String> {
        self.render(Some(*value), None)
    }

    pub fn format_time(&self, value: &LocalTime) -> Result<String> {
        self.render(None, Some(*value))
    }

    pub fn format_local_date_time(&self, value: &LocalDateTime) -> Result<String> {
        self.render(Some(value.date()), Some(value.time()))
    }

    /// Parse an instant
    ///
    /// Text with an offset denotes that instant. Text without one is local
    /// time in `time_zone`, else in the chronology's zone, else in UTC. The
    /// result is expressed in that same zone. Fields the pattern leaves out
    /// take their lowest value.
    pub fn parse_zoned(&self, text: &str, time_zone: Option<Tz>) -> Result<ZonedDateTime> {
        let mut parsed = self.parse_fields(text)?;
        fill_date_defaults(&mut parsed)
            .and_then(|_| fill_time_defaults(&mut parsed))
            .map_err(|source| parse_error(text, source))?;
        let zone = effective_zone(time_zone, self.chronology.as_ref());

        if parsed.to_fixed_offset().is_ok() {
            let instant = parsed
                .to_datetime()
                .map_err(|source| parse_error(text, source))?;
            Ok(instant.with_timezone(&zone))
        } else {
            let local = parsed
                .to_naive_datetime_with_offset(0)
                .map_err(|source| parse_error(text, source))?;
            resolve_local(&local, &zone)
        }
    }

    pub fn parse_date(&self, text: &str) -> Result<LocalDate> {
        let mut parsed = self.parse_fields(text)?;
        fill_date_defaults(&mut parsed)
            .and_then(|_| parsed.to_naive_date())
            .map_err(|source| parse_error(text, source))
    }

    pub fn parse_time(&self, text: &str) -> Result<LocalTime> {
        let mut parsed = self.parse_fields(text)?;
        fill_time_defaults(&mut parsed)
            .and_then(|_| parsed.to_naive_time())
            .map_err(|source| parse_error(text, source))
    }

    pub fn parse_local_date_time(&self, text: &str) -> Result<LocalDateTime> {
        let mut parsed = self.parse_fields(text)?;
        fill_date_defaults(&mut parsed)
            .and_then(|_| fill_time_defaults(&mut parsed))
            .and_then(|_| parsed.to_naive_datetime_with_offset(0))
            .map_err(|source| parse_error(text, source))
    }

    fn parse_fields(&self, text: &str) -> Result<Parsed> {
        let mut parsed = Parsed::new();
        let result = match &self.names {
            Some(names) => parse_with_names(names, &self.items, text, &mut parsed),
            None => chrono::format::parse(&mut parsed, text, self.items.iter()),
        };
        result.map_err(|source| parse_error(text, source))?;
        Ok(parsed)
    }

    fn render(&self, date: Option<NaiveDate>, time: Option<NaiveTime>) -> Result<String> {
        match self.locale {
            Some(locale) => self.write_out(DelayedFormat::new_with_locale(
                date,
                time,
                self.items.iter(),
                locale,
            )),
            None => self.write_out(DelayedFormat::new(date, time, self.items.iter())),
        }
    }

    fn render_with_offset<Off>(&self, date: NaiveDate, time: NaiveTime, offset: &Off) -> Result<String>
    where
        Off: Offset + fmt::Display,
    {
        match self.locale {
            Some(locale) => self.write_out(DelayedFormat::new_with_offset_and_locale(
                Some(date),
                Some(time),
                offset,
                self.items.iter(),
                locale,
            )),
            None => self.write_out(DelayedFormat::new_with_offset(
                Some(date),
                Some(time),
                offset,
                self.items.iter(),
            )),
        }
    }

    // chrono reports fields the value does not carry as fmt::Error
    fn write_out(&self, display: impl fmt::Display) -> Result<String> {
        let mut out = String::new();
        write!(out, "{display}").map_err(|_| ConversionError::Format {
            message: format!("value has fields missing for format '{self}'"),
        })?;
        Ok(out)
    }
}

impl fmt::Display for Formatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Source::Pattern(pattern) => write!(f, "{pattern}"),
            Source::Style(style) => write!(f, "style {style}"),
        }
    }
}

/// Parse item by item, reading localized names where chrono only knows English
fn parse_with_names(
    names: &NameTable,
    items: &[Item<'static>],
    text: &str,
    parsed: &mut Parsed,
) -> ParseResult<()> {
    let mut rest = text;
    for item in items {
        rest = match names.consume(item, rest, parsed)? {
            Some(len) => &rest[len..],
            None => chrono::format::parse_and_remainder(parsed, rest, std::iter::once(item))?,
        };
    }
    // reports trailing text the same way a whole-pattern parse does
    chrono::format::parse(parsed, rest, std::iter::empty::<Item<'static>>())
}

/// Default an absent hour to midnight and absent minutes or seconds to zero
fn fill_time_defaults(parsed: &mut Parsed) -> ParseResult<()> {
    if parsed.timestamp().is_some() {
        return Ok(());
    }
    if parsed.hour_mod_12().is_none() {
        match parsed.hour_div_12() {
            Some(_) => parsed.set_hour12(12)?,
            None => parsed.set_hour(0)?,
        }
    }
    if parsed.hour_div_12().is_none() {
        parsed.set_ampm(false)?;
    }
    if parsed.minute().is_none() {
        parsed.set_minute(0)?;
    }
    if parsed.second().is_none() {
        parsed.set_second(0)?;
    }
    Ok(())
}

/// Default an absent month or day of month to the first
///
/// Dates given by ordinal day or by week are left for chrono to resolve.
fn fill_date_defaults(parsed: &mut Parsed) -> ParseResult<()> {
    let by_other_fields = parsed.timestamp().is_some()
        || parsed.ordinal().is_some()
        || parsed.isoweek().is_some()
        || parsed.week_from_mon().is_some()
        || parsed.week_from_sun().is_some();
    if by_other_fields {
        return Ok(());
    }
    if parsed.month().is_none() {
        parsed.set_month(1)?;
    }
    if parsed.day().is_none() {
        parsed.set_day(1)?;
    }
    Ok(())
}

fn parse_error(text: &str, source: chrono::ParseError) -> ConversionError {
    ConversionError::Parse {
        text: text.to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error_code::{DT0102, DT0103};
    use chrono::{Datelike, TimeZone, Timelike};
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_pattern_formats_local_values() {
        let formatter = Formatter::for_pattern("yyyy-MM-dd").unwrap();
        assert_eq!(formatter.format_date(&date(2020, 1, 5)).unwrap(), "2020-01-05");

        let formatter = Formatter::for_pattern("d/M/yy").unwrap();
        assert_eq!(formatter.format_date(&date(2020, 1, 5)).unwrap(), "5/1/20");

        let formatter = Formatter::for_pattern("HH:mm:ss.SSS").unwrap();
        let time = NaiveTime::from_hms_milli_opt(9, 5, 7, 42).unwrap();
        assert_eq!(formatter.format_time(&time).unwrap(), "09:05:07.042");
    }

    #[test]
    fn test_missing_field_is_a_format_error() {
        let formatter = Formatter::for_pattern("yyyy-MM-dd").unwrap();
        let err = formatter
            .format_time(&NaiveTime::from_hms_opt(10, 0, 0).unwrap())
            .unwrap_err();
        assert_eq!(err.error_code(), DT0103);
    }

    #[test]
    fn test_locale_formats_names() {
        let formatter = Formatter::for_pattern("EEEE d MMMM yyyy")
            .unwrap()
            .with_locale(Locale::fr_FR);
        assert_eq!(
            formatter.format_date(&date(2021, 1, 15)).unwrap(),
            "vendredi 15 janvier 2021"
        );
    }

    #[test]
    fn test_locale_parses_names() {
        let formatter = Formatter::for_pattern("EEEE d MMMM yyyy")
            .unwrap()
            .with_locale(Locale::fr_FR);
        let parsed = formatter.parse_date("vendredi 15 janvier 2021").unwrap();
        assert_eq!(parsed, date(2021, 1, 15));
    }

    #[test]
    fn test_short_month_names_parse_with_locale() {
        let formatter = Formatter::for_pattern("d MMM yyyy")
            .unwrap()
            .with_locale(Locale::de_DE);
        let parsed = formatter.parse_date("3 Mär 2021").unwrap();
        assert_eq!(parsed.month(), 3);
    }

    #[test]
    fn test_spanish_weekday_and_month_share_a_spelling() {
        let formatter = Formatter::for_pattern("EEE d MMM yyyy")
            .unwrap()
            .with_locale(Locale::es_ES);
        let text = formatter.format_date(&date(2020, 3, 3)).unwrap();
        assert_eq!(text, "mar 3 mar 2020");
        assert_eq!(formatter.parse_date(&text).unwrap(), date(2020, 3, 3));
    }

    #[test]
    fn test_trailing_text_after_localized_names_fails() {
        let formatter = Formatter::for_pattern("d MMMM yyyy")
            .unwrap()
            .with_locale(Locale::fr_FR);
        let err = formatter.parse_date("15 janvier 2021 extra").unwrap_err();
        assert_eq!(err.error_code(), DT0102);
    }

    #[test]
    fn test_absent_fields_take_lowest_value() {
        let formatter = Formatter::for_pattern("yyyy-MM-dd").unwrap();
        let parsed = formatter.parse_local_date_time("2020-01-15").unwrap();
        assert_eq!(parsed, date(2020, 1, 15).and_hms_opt(0, 0, 0).unwrap());
        let zoned = formatter
            .parse_zoned("2020-01-15", Some(Tz::Europe__Paris))
            .unwrap();
        assert_eq!(zoned.naive_local(), parsed);

        let formatter = Formatter::for_pattern("HH").unwrap();
        assert_eq!(
            formatter.parse_time("07").unwrap(),
            NaiveTime::from_hms_opt(7, 0, 0).unwrap()
        );

        let formatter = Formatter::for_pattern("yyyy-MM").unwrap();
        assert_eq!(formatter.parse_date("2020-06").unwrap(), date(2020, 6, 1));
    }

    #[test]
    fn test_twelve_hour_clock_without_marker_is_morning() {
        let formatter = Formatter::for_pattern("h:mm").unwrap();
        assert_eq!(
            formatter.parse_time("12:30").unwrap(),
            NaiveTime::from_hms_opt(0, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_style_formatter() {
        let formatter = Formatter::for_style("M-").unwrap();
        assert_eq!(formatter.style(), Some("M-"));
        assert_eq!(formatter.pattern(), None);
        assert_eq!(formatter.format_date(&date(2020, 1, 15)).unwrap(), "Jan 15, 2020");
        assert_eq!(formatter.parse_date("Jan 15, 2020").unwrap(), date(2020, 1, 15));
    }

    #[test]
    fn test_parse_zoned_with_offset_keeps_instant() {
        let formatter = Formatter::for_pattern("yyyy-MM-dd'T'HH:mmZZ").unwrap();
        let parsed = formatter
            .parse_zoned("2020-01-15T10:00+02:00", Some(Tz::UTC))
            .unwrap();
        assert_eq!(parsed, Tz::UTC.with_ymd_and_hms(2020, 1, 15, 8, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_zoned_without_offset_uses_zone() {
        let formatter = Formatter::for_pattern("yyyy-MM-dd HH:mm").unwrap();
        let parsed = formatter
            .parse_zoned("2020-01-15 10:00", Some(Tz::Europe__Paris))
            .unwrap();
        assert_eq!(parsed.timezone(), Tz::Europe__Paris);
        assert_eq!(parsed.hour(), 10);

        let default = formatter.parse_zoned("2020-01-15 10:00", None).unwrap();
        assert_eq!(default.timezone(), Tz::UTC);
    }

    #[test]
    fn test_chronology_zone_applies_to_zoned_values() {
        let formatter = Formatter::for_pattern("HH:mm")
            .unwrap()
            .with_chronology(Chronology::iso_in(Tz::Asia__Tokyo));
        let instant = Tz::UTC.with_ymd_and_hms(2020, 1, 15, 10, 0, 0).unwrap();
        assert_eq!(formatter.format_zoned(&instant).unwrap(), "19:00");

        let formatter = Formatter::for_pattern("yyyy-MM-dd HH:mm")
            .unwrap()
            .with_chronology(Chronology::iso_in(Tz::Asia__Tokyo));
        let parsed = formatter.parse_zoned("2020-01-15 19:00", None).unwrap();
        assert_eq!(parsed.with_timezone(&Tz::UTC).hour(), 10);
    }

    #[test]
    fn test_mismatched_text_is_a_parse_error() {
        let formatter = Formatter::for_pattern("yyyy-MM-dd").unwrap();
        let err = formatter.parse_date("15/01/2020").unwrap_err();
        assert_eq!(err.error_code(), DT0102);
    }

    #[test]
    fn test_display_shows_source() {
        assert_eq!(Formatter::for_pattern("HH:mm").unwrap().to_string(), "HH:mm");
        assert_eq!(Formatter::for_style("-S").unwrap().to_string(), "style -S");
    }
}
