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

//! Pattern compiler
//!
//! Turns a letter pattern such as `yyyy-MM-dd HH:mm` into chrono format
//! items. Runs of the same letter form one field; the run length selects the
//! width or the textual form:
//!
//! | Letters        | Field                                   |
//! |----------------|-----------------------------------------|
//! | `y` `u` `Y`    | year (`yy` two digits)                  |
//! | `x`            | ISO week-based year (`xx` two digits)   |
//! | `w`            | ISO week of year                        |
//! | `M`            | month (`MMM` short name, `MMMM` name)   |
//! | `d` / `D`      | day of month / day of year              |
//! | `E`            | weekday name (`EEEE` full name)         |
//! | `e`            | weekday number, Monday = 1              |
//! | `a`            | AM/PM marker                            |
//! | `H` / `h`      | hour 0-23 / hour 1-12                   |
//! | `m` / `s`      | minute / second                         |
//! | `S`            | fraction of second, 3, 6 or 9 digits    |
//! | `Z`            | offset `+0100` (`ZZ` `+01:00`, `ZZZ` zone name) |
//! | `z`            | zone name                               |
//!
//! Text between single quotes is literal and `''` is a quote character.

use crate::core::{ConversionError, Result};
use chrono::format::{Fixed, Item, Numeric, Pad, StrftimeItems};

/// Compile a pattern into owned chrono items
pub(crate) fn compile(pattern: &str) -> Result<Vec<Item<'static>>> {
    let invalid = |message: String| ConversionError::InvalidPattern {
        pattern: pattern.to_string(),
        message,
    };

    if pattern.is_empty() {
        return Err(invalid("pattern is empty".to_string()));
    }

    let chars: Vec<char> = pattern.chars().collect();
    let mut items = Vec::new();
    let mut literal = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '\'' {
            if chars.get(i + 1) == Some(&'\'') {
                literal.push('\'');
                i += 2;
                continue;
            }
            let mut j = i + 1;
            let mut closed = false;
            while j < chars.len() {
                if chars[j] == '\'' {
                    if chars.get(j + 1) == Some(&'\'') {
                        literal.push('\'');
                        j += 2;
                        continue;
                    }
                    closed = true;
                    break;
                }
                literal.push(chars[j]);
                j += 1;
            }
            if !closed {
                return Err(invalid(format!("unterminated quote at position {i}")));
            }
            i = j + 1;
            continue;
        }

        if c.is_ascii_alphabetic() {
            let mut count = 1;
            while chars.get(i + count) == Some(&c) {
                count += 1;
            }
            flush_literal(&mut items, &mut literal);
            items.push(field_item(c, count).map_err(invalid)?);
            i += count;
            continue;
        }

        if c.is_whitespace() {
            flush_literal(&mut items, &mut literal);
            let mut run = String::new();
            while let Some(&ws) = chars.get(i)
                && ws.is_whitespace()
            {
                run.push(ws);
                i += 1;
            }
            items.push(Item::OwnedSpace(run.into_boxed_str()));
            continue;
        }

        literal.push(c);
        i += 1;
    }

    flush_literal(&mut items, &mut literal);
    Ok(items)
}

/// Whether the items print or parse month or weekday names
pub(crate) fn has_textual_names(items: &[Item<'_>]) -> bool {
    items.iter().any(|item| {
        matches!(
            item,
            Item::Fixed(
                Fixed::ShortMonthName
                    | Fixed::LongMonthName
                    | Fixed::ShortWeekdayName
                    | Fixed::LongWeekdayName
            )
        )
    })
}

fn flush_literal(items: &mut Vec<Item<'static>>, literal: &mut String) {
    if !literal.is_empty() {
        items.push(Item::OwnedLiteral(std::mem::take(literal).into_boxed_str()));
    }
}

fn numeric(field: Numeric, count: usize) -> Item<'static> {
    let pad = if count > 1 { Pad::Zero } else { Pad::None };
    Item::Numeric(field, pad)
}

// Fractions without a leading dot only exist as chrono-internal items, so
// they are taken from the strftime parser.
fn strftime_item(spec: &'static str) -> Item<'static> {
    StrftimeItems::new(spec).next().unwrap_or(Item::Error)
}

fn field_item(letter: char, count: usize) -> std::result::Result<Item<'static>, String> {
    let item = match letter {
        'y' | 'u' | 'Y' => match count {
            2 => Item::Numeric(Numeric::YearMod100, Pad::Zero),
            _ => numeric(Numeric::Year, count),
        },
        'x' => match count {
            2 => Item::Numeric(Numeric::IsoYearMod100, Pad::Zero),
            _ => numeric(Numeric::IsoYear, count),
        },
        'w' => numeric(Numeric::IsoWeek, count),
        'M' => match count {
            1 | 2 => numeric(Numeric::Month, count),
            3 => Item::Fixed(Fixed::ShortMonthName),
            _ => Item::Fixed(Fixed::LongMonthName),
        },
        'd' => numeric(Numeric::Day, count),
        'D' => numeric(Numeric::Ordinal, count),
        'E' => match count {
            1..=3 => Item::Fixed(Fixed::ShortWeekdayName),
            _ => Item::Fixed(Fixed::LongWeekdayName),
        },
        'e' => Item::Numeric(Numeric::WeekdayFromMon, Pad::None),
        'a' => Item::Fixed(Fixed::UpperAmPm),
        'H' => numeric(Numeric::Hour, count),
        'h' => numeric(Numeric::Hour12, count),
        'm' => numeric(Numeric::Minute, count),
        's' => numeric(Numeric::Second, count),
        'S' => match count {
            3 => strftime_item("%3f"),
            6 => strftime_item("%6f"),
            9 => strftime_item("%9f"),
            _ => {
                return Err(format!(
                    "fraction of second supports 3, 6 or 9 digits, got {count}"
                ));
            }
        },
        'Z' => match count {
            1 => Item::Fixed(Fixed::TimezoneOffset),
            2 => Item::Fixed(Fixed::TimezoneOffsetColon),
            _ => Item::Fixed(Fixed::TimezoneName),
        },
        'z' => Item::Fixed(Fixed::TimezoneName),
        other => return Err(format!("unsupported pattern letter '{other}'")),
    };
    Ok(item)
}
