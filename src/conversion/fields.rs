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

//! Field list to temporal value conversions
//!
//! Fields are positional: year, month, day, hour, minute, second and
//! millisecond for date-times; hour, minute, second and millisecond for
//! times; year, month and day for dates. Trailing fields may be omitted and
//! default to zero (one for month and day).

use super::function::Conversion;
use super::zone::ZoneOptions;
use crate::core::temporal::resolve_local;
use crate::core::{Chronology, ConversionError, LocalDate, LocalTime, Result, ZonedDateTime};
use chrono::{NaiveDate, NaiveTime};
use chrono_tz::Tz;
use std::marker::PhantomData;

/// Temporal type that can be assembled from integer fields
pub trait FieldTarget: Sized + 'static {
    /// Smallest accepted number of fields
    const MIN_FIELDS: usize;
    /// Largest accepted number of fields
    const MAX_FIELDS: usize;
    /// Name of the integer field conversion
    const CONVERSION: &'static str;
    /// Name of the text field conversion
    const STRING_CONVERSION: &'static str;

    /// Build the value from a field list whose length is already checked
    fn from_fields(fields: &[i32], zone: Tz) -> Result<Self>;
}

impl FieldTarget for ZonedDateTime {
    // the hour is mandatory for date-times
    const MIN_FIELDS: usize = 4;
    const MAX_FIELDS: usize = 7;
    const CONVERSION: &'static str = "FieldsToDateTime";
    const STRING_CONVERSION: &'static str = "StringFieldsToDateTime";

    fn from_fields(fields: &[i32], zone: Tz) -> Result<Self> {
        let date = date_of(field(fields, 0, 0), field(fields, 1, 1), field(fields, 2, 1))?;
        let time = time_of(
            field(fields, 3, 0),
            field(fields, 4, 0),
            field(fields, 5, 0),
            field(fields, 6, 0),
        )?;
        resolve_local(&date.and_time(time), &zone)
    }
}

impl FieldTarget for LocalTime {
    const MIN_FIELDS: usize = 0;
    const MAX_FIELDS: usize = 4;
    const CONVERSION: &'static str = "FieldsToLocalTime";
    const STRING_CONVERSION: &'static str = "StringFieldsToLocalTime";

    fn from_fields(fields: &[i32], _zone: Tz) -> Result<Self> {
        time_of(
            field(fields, 0, 0),
            field(fields, 1, 0),
            field(fields, 2, 0),
            field(fields, 3, 0),
        )
    }
}

impl FieldTarget for LocalDate {
    const MIN_FIELDS: usize = 1;
    const MAX_FIELDS: usize = 3;
    const CONVERSION: &'static str = "FieldsToLocalDate";
    const STRING_CONVERSION: &'static str = "StringFieldsToLocalDate";

    fn from_fields(fields: &[i32], _zone: Tz) -> Result<Self> {
        date_of(field(fields, 0, 0), field(fields, 1, 1), field(fields, 2, 1))
    }
}

fn field(fields: &[i32], index: usize, default: i32) -> i32 {
    fields.get(index).copied().unwrap_or(default)
}

fn unsigned(value: i32, name: &str) -> Result<u32> {
    u32::try_from(value)
        .map_err(|_| ConversionError::invalid_value(format!("{name} {value} is out of range")))
}

fn date_of(year: i32, month: i32, day: i32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, unsigned(month, "month")?, unsigned(day, "day")?).ok_or_else(
        || ConversionError::invalid_value(format!("invalid date {year}-{month}-{day}")),
    )
}

fn time_of(hour: i32, minute: i32, second: i32, millis: i32) -> Result<NaiveTime> {
    let invalid =
        || ConversionError::invalid_value(format!("invalid time {hour}:{minute}:{second}.{millis}"));
    // chrono reads milliseconds above 999 as a leap second
    if !(0..1000).contains(&millis) {
        return Err(invalid());
    }
    NaiveTime::from_hms_nano_opt(
        unsigned(hour, "hour")?,
        unsigned(minute, "minute")?,
        unsigned(second, "second")?,
        unsigned(millis, "millisecond")? * 1_000_000,
    )
    .ok_or_else(invalid)
}

fn check_count<T: FieldTarget>(actual: usize) -> Result<()> {
    if (T::MIN_FIELDS..=T::MAX_FIELDS).contains(&actual) {
        Ok(())
    } else {
        Err(ConversionError::FieldCount {
            min: T::MIN_FIELDS,
            max: T::MAX_FIELDS,
            actual,
        })
    }
}

/// Builds temporal values from integer field lists
#[derive(Debug, Clone)]
pub struct FieldsToValue<T> {
    options: ZoneOptions,
    _target: PhantomData<fn() -> T>,
}

impl<T: FieldTarget> FieldsToValue<T> {
    pub fn new() -> Self {
        Self {
            options: ZoneOptions::default(),
            _target: PhantomData,
        }
    }

    /// Zone the fields are read in, for date-time targets
    pub fn with_time_zone(mut self, time_zone: Tz) -> Self {
        self.options.time_zone = Some(time_zone);
        self
    }

    /// Chronology whose zone is used when no time zone is given
    pub fn with_chronology(mut self, chronology: Chronology) -> Self {
        self.options.chronology = Some(chronology);
        self
    }

    pub fn time_zone(&self) -> Option<Tz> {
        self.options.time_zone
    }

    pub fn chronology(&self) -> Option<Chronology> {
        self.options.chronology
    }
}

impl<T: FieldTarget> Default for FieldsToValue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T: FieldTarget> Conversion<&'a [i32]> for FieldsToValue<T> {
    type Output = T;

    fn name(&self) -> &'static str {
        T::CONVERSION
    }

    fn convert(&self, fields: &'a [i32]) -> Result<T> {
        check_count::<T>(fields.len())?;
        log::trace!("{}: {fields:?}", T::CONVERSION);
        T::from_fields(fields, self.options.zone())
    }
}

/// Builds temporal values from textual field lists such as `["2020", "1", "15", "10"]`
///
/// Each field is trimmed and parsed as an integer before the list is handed
/// to the matching [`FieldsToValue`], so both accept exactly the same lists.
#[derive(Debug, Clone)]
pub struct StringFieldsToValue<T> {
    inner: FieldsToValue<T>,
}

impl<T: FieldTarget> StringFieldsToValue<T> {
    pub fn new() -> Self {
        Self {
            inner: FieldsToValue::new(),
        }
    }

    pub fn with_time_zone(self, time_zone: Tz) -> Self {
        Self {
            inner: self.inner.with_time_zone(time_zone),
        }
    }

    pub fn with_chronology(self, chronology: Chronology) -> Self {
        Self {
            inner: self.inner.with_chronology(chronology),
        }
    }

    pub fn time_zone(&self) -> Option<Tz> {
        self.inner.time_zone()
    }

    pub fn chronology(&self) -> Option<Chronology> {
        self.inner.chronology()
    }
}

impl<T: FieldTarget> Default for StringFieldsToValue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T, F> Conversion<&'a [F]> for StringFieldsToValue<T>
where
    T: FieldTarget,
    F: AsRef<str>,
{
    type Output = T;

    fn name(&self) -> &'static str {
        T::STRING_CONVERSION
    }

    fn convert(&self, fields: &'a [F]) -> Result<T> {
        check_count::<T>(fields.len())?;
        let numbers = fields
            .iter()
            .enumerate()
            .map(|(index, field)| {
                let field = field.as_ref();
                field
                    .trim()
                    .parse::<i32>()
                    .map_err(|source| ConversionError::FieldParse {
                        index,
                        field: field.to_string(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        self.inner.convert(&numbers)
    }
}

pub type FieldsToDateTime = FieldsToValue<ZonedDateTime>;
pub type FieldsToLocalTime = FieldsToValue<LocalTime>;
pub type FieldsToLocalDate = FieldsToValue<LocalDate>;
pub type StringFieldsToDateTime = StringFieldsToValue<ZonedDateTime>;
pub type StringFieldsToLocalTime = StringFieldsToValue<LocalTime>;
pub type StringFieldsToLocalDate = StringFieldsToValue<LocalDate>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error_code::{DT0052, DT0053, DT0104};
    use chrono::{TimeZone, Timelike};
    use rstest::rstest;

    const NO_FIELDS: &[i32] = &[];

    #[test]
    fn test_date_time_from_four_fields() {
        let conversion = FieldsToDateTime::new();
        assert_eq!(conversion.name(), "FieldsToDateTime");
        let value = conversion.convert(&[2020, 1, 15, 10][..]).unwrap();
        assert_eq!(value, Tz::UTC.with_ymd_and_hms(2020, 1, 15, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_date_time_from_seven_fields() {
        let value = FieldsToDateTime::new()
            .convert(&[2020, 1, 15, 10, 30, 45, 123][..])
            .unwrap();
        assert_eq!(value.nanosecond(), 123_000_000);
        assert_eq!(value.second(), 45);
    }

    #[test]
    fn test_date_time_in_time_zone() {
        let value = FieldsToDateTime::new()
            .with_time_zone(Tz::Europe__Paris)
            .convert(&[2020, 7, 1, 12][..])
            .unwrap();
        assert_eq!(
            value.with_timezone(&Tz::UTC),
            Tz::UTC.with_ymd_and_hms(2020, 7, 1, 10, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_date_time_in_chronology_zone() {
        let value = FieldsToDateTime::new()
            .with_chronology(Chronology::iso_in(Tz::Asia__Tokyo))
            .convert(&[2020, 1, 1, 9][..])
            .unwrap();
        assert_eq!(value.timezone(), Tz::Asia__Tokyo);
    }

    #[rstest]
    #[case(&[2020, 1, 15])]
    #[case(&[2020, 1, 15, 10, 0, 0, 0, 0])]
    #[case(&[])]
    fn test_date_time_field_count(#[case] fields: &[i32]) {
        let err = FieldsToDateTime::new().convert(fields).unwrap_err();
        assert_eq!(err.error_code(), DT0052);
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_local_time_fields() {
        let conversion = FieldsToLocalTime::new();
        assert_eq!(
            conversion.convert(NO_FIELDS).unwrap(),
            NaiveTime::from_hms_opt(0, 0, 0).unwrap()
        );
        assert_eq!(
            conversion.convert(&[13, 5, 9, 7][..]).unwrap(),
            NaiveTime::from_hms_milli_opt(13, 5, 9, 7).unwrap()
        );
        let err = conversion.convert(&[1, 2, 3, 4, 5][..]).unwrap_err();
        assert_eq!(err.error_code(), DT0052);
    }

    #[test]
    fn test_local_date_fields() {
        let conversion = FieldsToLocalDate::new();
        assert_eq!(
            conversion.convert(&[2021][..]).unwrap(),
            NaiveDate::from_ymd_opt(2021, 1, 1).unwrap()
        );
        assert_eq!(
            conversion.convert(&[2021, 2, 28][..]).unwrap(),
            NaiveDate::from_ymd_opt(2021, 2, 28).unwrap()
        );
        assert_eq!(conversion.convert(NO_FIELDS).unwrap_err().error_code(), DT0052);
    }

    #[rstest]
    #[case(&[2021, 2, 30, 0])]
    #[case(&[2021, 13, 1, 0])]
    #[case(&[2021, 1, 1, 24])]
    #[case(&[2021, 1, 1, -1])]
    #[case(&[2021, 1, 1, 0, 0, 0, 1000])]
    fn test_invalid_field_values(#[case] fields: &[i32]) {
        let err = FieldsToDateTime::new().convert(fields).unwrap_err();
        assert_eq!(err.error_code(), DT0104);
    }

    #[test]
    fn test_skipped_local_time_is_invalid() {
        // 02:30 does not exist in Paris on 2021-03-28
        let err = FieldsToDateTime::new()
            .with_time_zone(Tz::Europe__Paris)
            .convert(&[2021, 3, 28, 2, 30][..])
            .unwrap_err();
        assert_eq!(err.error_code(), DT0104);
    }

    #[test]
    fn test_string_fields_match_int_fields() {
        let from_strings = StringFieldsToDateTime::new()
            .convert(&["2020", " 1", "15 ", "10", "30"][..])
            .unwrap();
        let from_ints = FieldsToDateTime::new()
            .convert(&[2020, 1, 15, 10, 30][..])
            .unwrap();
        assert_eq!(from_strings, from_ints);
    }

    #[test]
    fn test_string_fields_accept_owned_strings() {
        let fields = vec!["12".to_string(), "30".to_string()];
        let value = StringFieldsToLocalTime::new().convert(&fields[..]).unwrap();
        assert_eq!(value, NaiveTime::from_hms_opt(12, 30, 0).unwrap());
    }

    #[test]
    fn test_string_field_not_integer() {
        let err = StringFieldsToDateTime::new()
            .convert(&["2020", "Jan", "15", "10"][..])
            .unwrap_err();
        assert_eq!(err.error_code(), DT0053);
        match err {
            ConversionError::FieldParse { index, field, .. } => {
                assert_eq!(index, 1);
                assert_eq!(field, "Jan");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_string_field_count_checked_before_parsing() {
        let err = StringFieldsToDateTime::new()
            .convert(&["x", "y", "z"][..])
            .unwrap_err();
        assert_eq!(err.error_code(), DT0052);
    }

    #[test]
    fn test_absent_fields() {
        assert_eq!(FieldsToDateTime::new().apply(None::<&[i32]>).unwrap(), None);
        assert_eq!(
            StringFieldsToDateTime::new().apply(None::<&[&str]>).unwrap(),
            None
        );
    }
}
