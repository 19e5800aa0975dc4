//! Lenient parsing of the date and time strings admins type or export from
//! spreadsheets.
//!
//! Each parser walks an ordered list of accepted formats and returns the
//! first one that matches.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, ParseResult};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Invalid date '{0}'")]
    InvalidDate(String),

    #[error("Invalid time '{0}' (expected HH:MM or HH:MM AM/PM)")]
    InvalidTime(String),

    #[error("Invalid date/time '{0}'")]
    InvalidDateTime(String),
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

const TIME_FORMATS: &[&str] = &["%H:%M", "%H:%M:%S", "%I:%M %p", "%I:%M%p"];

#[derive(Debug, Clone, Copy)]
enum DateTimeFormat {
    Rfc3339,
    Pattern(&'static str),
}

impl DateTimeFormat {
    fn parse(self, input: &str) -> ParseResult<NaiveDateTime> {
        match self {
            DateTimeFormat::Rfc3339 => DateTime::parse_from_rfc3339(input).map(|dt| dt.naive_local()),
            DateTimeFormat::Pattern(pattern) => NaiveDateTime::parse_from_str(input, pattern),
        }
    }
}

/// Accepted date/time formats, highest priority first
const DATETIME_FORMATS: &[DateTimeFormat] = &[
    DateTimeFormat::Rfc3339,
    DateTimeFormat::Pattern("%Y-%m-%dT%H:%M:%S"),
    DateTimeFormat::Pattern("%Y-%m-%dT%H:%M"),
    DateTimeFormat::Pattern("%Y-%m-%d %H:%M:%S"),
    DateTimeFormat::Pattern("%Y-%m-%d %H:%M"),
    DateTimeFormat::Pattern("%m/%d/%Y %H:%M"),
    DateTimeFormat::Pattern("%m/%d/%Y %I:%M %p"),
    DateTimeFormat::Pattern("%Y-%m-%d %I:%M %p"),
];

pub fn parse_date(input: &str) -> Result<NaiveDate, ParseError> {
    let trimmed = input.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| ParseError::InvalidDate(input.to_string()))
}

/// Parses a time of day in 24-hour (`13:30`) or 12-hour (`1:30 PM`) form.
pub fn parse_time_of_day(input: &str) -> Result<NaiveTime, ParseError> {
    let trimmed = input.trim();
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| ParseError::InvalidTime(input.to_string()))
}

pub fn parse_datetime(input: &str) -> Result<NaiveDateTime, ParseError> {
    let trimmed = input.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|format| format.parse(trimmed).ok())
        .ok_or_else(|| ParseError::InvalidDateTime(input.to_string()))
}
