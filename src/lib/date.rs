// src/lib/date.rs

// dependencies
use crate::clock::system_millis;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use std::fmt::Write;
use thiserror::Error;

pub const DEFAULT_PATTERN: &str = "%Y-%m-%d %H:%M:%S";

// enum type to represent errors related to date formatting and parsing
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateError {
    #[error("invalid date pattern {0:?}")]
    Pattern(String),
    #[error("timestamp {0} is out of the supported range")]
    OutOfRange(u64),
    #[error("{0:?} is before the unix epoch")]
    BeforeEpoch(String),
    #[error("{name} field of {text:?} has no digits")]
    Field { name: &'static str, text: String },
    #[error("{0:?} is not a valid calendar date")]
    Invalid(String),
}

/// Formats a millisecond timestamp with a strftime `pattern`.
///
/// `None` formats the current system time. With `millis` set the result
/// gets a `.mmm` suffix; `local` picks the local time zone over UTC.
pub fn datef(
    ms: Option<u64>,
    pattern: &str,
    millis: bool,
    local: bool,
) -> Result<String, DateError> {
    let ms = ms.unwrap_or_else(system_millis);

    let mut out = if local {
        render(to_zone(&Local, ms)?, pattern)?
    } else {
        render(to_zone(&Utc, ms)?, pattern)?
    };
    if millis {
        write!(out, ".{:03}", ms % 1000).map_err(|_| DateError::Pattern(pattern.to_string()))?;
    }
    Ok(out)
}

pub fn datef_ymd(ms: Option<u64>, local: bool) -> Result<String, DateError> {
    datef(ms, "%Y-%m-%d", false, local)
}

fn to_zone<Tz: TimeZone>(zone: &Tz, ms: u64) -> Result<DateTime<Tz>, DateError> {
    i64::try_from(ms)
        .ok()
        .and_then(|signed| zone.timestamp_millis_opt(signed).earliest())
        .ok_or(DateError::OutOfRange(ms))
}

fn render<Tz: TimeZone>(at: DateTime<Tz>, pattern: &str) -> Result<String, DateError>
where
    Tz::Offset: std::fmt::Display,
{
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(DateError::Pattern(pattern.to_string()));
    }
    let mut out = String::new();
    write!(out, "{}", at.format(pattern)).map_err(|_| DateError::Pattern(pattern.to_string()))?;
    Ok(out)
}

// (name, byte offset, width, default) for `YYYY-MM-DD HH:MM:SS.mmm`
const FIELDS: [(&str, usize, usize, u32); 7] = [
    ("year", 0, 4, 1970),
    ("month", 5, 2, 1),
    ("day", 8, 2, 1),
    ("hour", 11, 2, 0),
    ("minute", 14, 2, 0),
    ("second", 17, 2, 0),
    ("millisecond", 20, 3, 0),
];

/// Parses `YYYY-MM-DD HH:MM:SS.mmm` into milliseconds since the epoch.
///
/// Truncated input keeps the fields it reaches and defaults the rest to
/// the epoch start, so `"2024"` is midnight on 2024-01-01. Empty input
/// yields `0`.
pub fn date_parse(text: &str, local: bool) -> Result<u64, DateError> {
    if text.is_empty() {
        return Ok(0);
    }

    let mut values = [0u32; 7];
    for (value, &(name, offset, width, default)) in values.iter_mut().zip(FIELDS.iter()) {
        *value = if text.len() >= offset + width {
            text.get(offset..offset + width)
                .and_then(leading_number)
                .ok_or_else(|| DateError::Field {
                    name,
                    text: text.to_string(),
                })?
        } else {
            default
        };
    }
    let [year, month, day, hour, minute, second, milli] = values;

    let naive = i32::try_from(year)
        .ok()
        .and_then(|year| NaiveDate::from_ymd_opt(year, month, day))
        .and_then(|date| date.and_hms_milli_opt(hour, minute, second, milli))
        .ok_or_else(|| DateError::Invalid(text.to_string()))?;

    let ms = if local {
        Local
            .from_local_datetime(&naive)
            .earliest()
            .ok_or_else(|| DateError::Invalid(text.to_string()))?
            .timestamp_millis()
    } else {
        naive.and_utc().timestamp_millis()
    };
    u64::try_from(ms).map_err(|_| DateError::BeforeEpoch(text.to_string()))
}

// leading decimal digits after optional whitespace, as in "07:" -> 7
fn leading_number(field: &str) -> Option<u32> {
    let field = field.trim_start();
    let digits = field.bytes().take_while(u8::is_ascii_digit).count();
    field[..digits].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: u64 = 1_700_000_000_123;

    #[test]
    fn formats_epoch_in_utc() {
        assert_eq!(
            datef(Some(0), DEFAULT_PATTERN, true, false).unwrap(),
            "1970-01-01 00:00:00.000"
        );
    }

    #[test]
    fn formats_with_and_without_millis() {
        assert_eq!(
            datef(Some(SAMPLE), DEFAULT_PATTERN, true, false).unwrap(),
            "2023-11-14 22:13:20.123"
        );
        assert_eq!(
            datef(Some(SAMPLE), DEFAULT_PATTERN, false, false).unwrap(),
            "2023-11-14 22:13:20"
        );
        assert_eq!(datef(Some(5), "%H:%M", true, false).unwrap(), "00:00.005");
    }

    #[test]
    fn ymd_shortcut() {
        assert_eq!(datef_ymd(Some(SAMPLE), false).unwrap(), "2023-11-14");
    }

    #[test]
    fn none_formats_current_time() {
        let year = datef(None, "%Y", false, false).unwrap();
        assert!(year.parse::<u32>().unwrap() >= 2023);
    }

    #[test]
    fn parses_full_layout() {
        assert_eq!(date_parse("2023-11-14 22:13:20.123", false).unwrap(), SAMPLE);
    }

    #[test]
    fn parses_truncated_layouts() {
        assert_eq!(date_parse("", false).unwrap(), 0);
        assert_eq!(date_parse("1970", false).unwrap(), 0);
        assert_eq!(date_parse("2023", false).unwrap(), 1_672_531_200_000);
        assert_eq!(date_parse("2023-11-14", false).unwrap(), 1_699_920_000_000);
        assert_eq!(date_parse("2023-11-14 22:13:20", false).unwrap(), 1_700_000_000_000);
    }

    #[test]
    fn short_fields_take_their_leading_digits() {
        assert_eq!(date_parse("2023-1-5", false).unwrap(), date_parse("2023-01", false).unwrap());
    }

    #[test]
    fn rejects_fields_without_digits() {
        assert_eq!(
            date_parse("abcd", false),
            Err(DateError::Field {
                name: "year",
                text: "abcd".to_string()
            })
        );
    }

    #[test]
    fn rejects_impossible_dates() {
        assert!(matches!(date_parse("2023-13-01", false), Err(DateError::Invalid(_))));
        assert!(matches!(date_parse("2023-02-30", false), Err(DateError::Invalid(_))));
    }

    #[test]
    fn rejects_dates_before_the_epoch() {
        assert_eq!(
            date_parse("1969-12-31", false),
            Err(DateError::BeforeEpoch("1969-12-31".to_string()))
        );
    }

    #[test]
    fn millis_need_all_three_digits() {
        assert_eq!(date_parse("2023-11-14 22:13:20.12", false).unwrap(), 1_700_000_000_000);
        assert_eq!(date_parse("2023-11-14 22:13:20.120", false).unwrap(), 1_700_000_000_120);
    }

    #[test]
    fn rejects_malformed_patterns() {
        for pattern in ["%", "%Q", "%Y%", "%:"] {
            assert_eq!(
                datef(Some(0), pattern, false, false),
                Err(DateError::Pattern(pattern.to_string()))
            );
        }
    }

    #[test]
    fn rejects_timestamps_chrono_can_not_place() {
        for ms in [u64::MAX, i64::MAX as u64] {
            assert_eq!(
                datef(Some(ms), DEFAULT_PATTERN, true, false),
                Err(DateError::OutOfRange(ms))
            );
        }
    }

    #[test]
    fn parse_inverts_format() {
        for local in [false, true] {
            let text = datef(Some(SAMPLE), DEFAULT_PATTERN, true, local).unwrap();
            assert_eq!(date_parse(&text, local).unwrap(), SAMPLE);
        }
    }
}
