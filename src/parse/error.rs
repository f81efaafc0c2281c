use std::{fmt::Display, io, num::ParseIntError};

use chrono::NaiveDate;

/// Why a `<year>年<month>月<day>日` string could not be read.
#[derive(Debug)]
pub enum DateError {
    YearMarkerNotFound,
    MonthMarkerNotFound,
    DayMarkerNotFound,
    Number(String, ParseIntError),
    OutOfRange { year: i32, month: u32, day: u32 },
}

impl Display for DateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::YearMarkerNotFound => write!(f, "year not found"),
            Self::MonthMarkerNotFound => write!(f, "month not found"),
            Self::DayMarkerNotFound => write!(f, "day not found"),
            Self::Number(segment, e) => write!(f, "{segment:?} is not a number: {e}"),
            Self::OutOfRange { year, month, day } => {
                write!(f, "{year}-{month}-{day} is not a calendar date")
            }
        }
    }
}

impl std::error::Error for DateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Number(_, e) => Some(e),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum Error {
    MalformedDate(DateError),
    DateMarkerNotFound,
    DayOfWeekMarkerNotFound,
    UnexpectedColumnCount(String),
    NoMenuForDate(NaiveDate),
    Read(io::Error),
}

impl From<DateError> for Error {
    fn from(e: DateError) -> Self {
        Self::MalformedDate(e)
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Read(e)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedDate(e) => write!(f, "malformed date: {e}"),
            Self::DateMarkerNotFound => write!(f, "date not found"),
            Self::DayOfWeekMarkerNotFound => write!(f, "parentheses for day of week not found"),
            Self::UnexpectedColumnCount(line) => write!(f, "unexpected column number in {line:?}"),
            Self::NoMenuForDate(date) => write!(f, "no menu for {} found", date.format("%Y%m%d")),
            Self::Read(e) => write!(f, "reading body: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MalformedDate(e) => Some(e),
            Self::Read(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
