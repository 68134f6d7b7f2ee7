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

//! Localized month, weekday and AM/PM names for parsing
//!
//! chrono prints names in any of its locales but only parses the English
//! ones. A [`NameTable`] holds the names of one locale, obtained from chrono
//! itself by printing reference dates, and reads them at the position of the
//! matching format item. Months are only looked up at month items and
//! weekdays at weekday items, so locales where a short month and a short
//! weekday share a spelling (Spanish `mar`) stay unambiguous.

use chrono::format::{DelayedFormat, Fixed, Item, ParseResult, Parsed};
use chrono::{Datelike, Locale, NaiveDate, NaiveTime, Weekday};

#[derive(Debug)]
pub(crate) struct NameTable {
    /// Long and short month names, longest first
    months: Vec<(String, u32)>,
    /// Long and short weekday names, longest first
    weekdays: Vec<(String, Weekday)>,
    /// AM and PM markers, empty when the locale prints none
    am_pm: [String; 2],
}

impl NameTable {
    pub(crate) fn new(locale: Locale) -> Self {
        let mut months = Vec::new();
        for month in 1..=12 {
            if let Some(date) = NaiveDate::from_ymd_opt(2021, month, 1) {
                for spec in ["%B", "%b"] {
                    let name = date.format_localized(spec, locale).to_string();
                    push_name(&mut months, name, month);
                }
            }
        }

        let mut weekdays = Vec::new();
        // 2021-01-04 is a Monday
        for day in 4..=10 {
            if let Some(date) = NaiveDate::from_ymd_opt(2021, 1, day) {
                for spec in ["%A", "%a"] {
                    let name = date.format_localized(spec, locale).to_string();
                    push_name(&mut weekdays, name, date.weekday());
                }
            }
        }

        let marker = |hour| {
            let item = [Item::Fixed(Fixed::UpperAmPm)];
            NaiveTime::from_hms_opt(hour, 0, 0)
                .map(|time| {
                    DelayedFormat::new_with_locale(None, Some(time), item.iter(), locale)
                        .to_string()
                        .trim()
                        .to_string()
                })
                .unwrap_or_default()
        };

        Self {
            months: longest_first(months),
            weekdays: longest_first(weekdays),
            am_pm: [marker(1), marker(13)],
        }
    }

    /// Read a localized name for `item` at the start of `text`
    ///
    /// Returns the number of bytes consumed, or `None` when `item` takes no
    /// names or no localized name matches, in which case chrono's own parser
    /// handles the item.
    pub(crate) fn consume(
        &self,
        item: &Item<'_>,
        text: &str,
        parsed: &mut Parsed,
    ) -> ParseResult<Option<usize>> {
        match item {
            Item::Fixed(Fixed::ShortMonthName | Fixed::LongMonthName) => {
                match lookup(&self.months, text) {
                    Some((month, len)) => {
                        parsed.set_month(i64::from(month))?;
                        Ok(Some(len))
                    }
                    None => Ok(None),
                }
            }
            Item::Fixed(Fixed::ShortWeekdayName | Fixed::LongWeekdayName) => {
                match lookup(&self.weekdays, text) {
                    Some((weekday, len)) => {
                        parsed.set_weekday(weekday)?;
                        Ok(Some(len))
                    }
                    None => Ok(None),
                }
            }
            Item::Fixed(Fixed::UpperAmPm | Fixed::LowerAmPm) => {
                let [am, pm] = &self.am_pm;
                if am.is_empty() && pm.is_empty() {
                    // the locale prints no marker, so there is nothing to read
                    return Ok(Some(0));
                }
                for (marker, is_pm) in [(am, false), (pm, true)] {
                    if let Some(len) = match_name(text, marker) {
                        parsed.set_ampm(is_pm)?;
                        return Ok(Some(len));
                    }
                }
                Ok(None)
            }
            _ => Ok(None),
        }
    }
}

fn push_name<T: PartialEq>(entries: &mut Vec<(String, T)>, name: String, value: T) {
    let name = name.trim().to_string();
    if name.is_empty() {
        return;
    }
    let known = entries
        .iter()
        .any(|(existing, _)| existing.to_lowercase() == name.to_lowercase());
    if !known {
        entries.push((name, value));
    }
}

fn longest_first<T>(mut entries: Vec<(String, T)>) -> Vec<(String, T)> {
    entries.sort_by(|a, b| b.0.chars().count().cmp(&a.0.chars().count()));
    entries
}

fn lookup<T: Copy>(entries: &[(String, T)], text: &str) -> Option<(T, usize)> {
    entries
        .iter()
        .find_map(|(name, value)| match_name(text, name).map(|len| (*value, len)))
}

/// Byte length of `name` at the start of `text`, compared without case,
/// provided the match ends on a word boundary
fn match_name(text: &str, name: &str) -> Option<usize> {
    if name.is_empty() {
        return None;
    }
    let mut text_chars = text.char_indices();
    let mut end = 0;
    for expected in name.chars() {
        let (index, actual) = text_chars.next()?;
        if !actual.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
        end = index + actual.len_utf8();
    }
    match text[end..].chars().next() {
        Some(next)
            if next.is_alphabetic() && name.chars().last().is_some_and(char::is_alphabetic) =>
        {
            None
        }
        _ => Some(end),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(table: &NameTable, item: Fixed, text: &str) -> (Parsed, Option<usize>) {
        let mut parsed = Parsed::new();
        let consumed = table
            .consume(&Item::Fixed(item), text, &mut parsed)
            .unwrap();
        (parsed, consumed)
    }

    #[test]
    fn test_french_long_and_short_names() {
        let table = NameTable::new(Locale::fr_FR);

        let (parsed, consumed) = read(&table, Fixed::LongMonthName, "janvier 2021");
        assert_eq!(parsed.month(), Some(1));
        assert_eq!(consumed, Some("janvier".len()));

        let (parsed, consumed) = read(&table, Fixed::ShortMonthName, "janv. 2021");
        assert_eq!(parsed.month(), Some(1));
        assert_eq!(consumed, Some("janv.".len()));

        let (parsed, _) = read(&table, Fixed::LongWeekdayName, "vendredi 15");
        assert_eq!(parsed.weekday(), Some(Weekday::Fri));
    }

    #[test]
    fn test_shared_spelling_follows_item_kind() {
        let table = NameTable::new(Locale::es_ES);

        let (parsed, _) = read(&table, Fixed::ShortMonthName, "mar 2020");
        assert_eq!(parsed.month(), Some(3));
        assert_eq!(parsed.weekday(), None);

        let (parsed, _) = read(&table, Fixed::ShortWeekdayName, "mar 3");
        assert_eq!(parsed.weekday(), Some(Weekday::Tue));
        assert_eq!(parsed.month(), None);
    }

    #[test]
    fn test_german_names_ignore_case() {
        let table = NameTable::new(Locale::de_DE);
        let (parsed, consumed) = read(&table, Fixed::LongMonthName, "MÄRZ 2021");
        assert_eq!(parsed.month(), Some(3));
        assert_eq!(consumed, Some("MÄRZ".len()));
    }

    #[test]
    fn test_names_only_match_whole_words() {
        let table = NameTable::new(Locale::de_DE);
        // "Mai" must not be read out of another word
        let (parsed, consumed) = read(&table, Fixed::LongMonthName, "Maisfeld");
        assert_eq!(consumed, None);
        assert_eq!(parsed.month(), None);
    }

    #[test]
    fn test_other_items_are_left_to_chrono() {
        let table = NameTable::new(Locale::fr_FR);
        let mut parsed = Parsed::new();
        let consumed = table
            .consume(&Item::Literal("-"), "-", &mut parsed)
            .unwrap();
        assert_eq!(consumed, None);
    }

    #[test]
    fn test_locale_without_am_pm_markers() {
        let table = NameTable::new(Locale::fr_FR);
        let (parsed, consumed) = read(&table, Fixed::UpperAmPm, "");
        assert_eq!(consumed, Some(0));
        assert_eq!(parsed.hour_div_12(), None);

        let table = NameTable::new(Locale::en_US);
        let (parsed, consumed) = read(&table, Fixed::UpperAmPm, "PM");
        assert_eq!(consumed, Some(2));
        assert_eq!(parsed.hour_div_12(), Some(1));
    }
}
