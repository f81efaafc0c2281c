use chrono::NaiveDate;

use super::error::DateError;

/// Position of the first `marker` in `chars`, or `-1` when it is absent.
#[allow(clippy::cast_possible_wrap)]
pub fn index_of(chars: &[char], marker: char) -> isize {
    chars
        .iter()
        .position(|&c| c == marker)
        .map_or(-1, |i| i as isize)
}

/// Splits `chars` at the first `marker`, dropping the marker itself.
fn split_at_marker(chars: &[char], marker: char) -> Option<(&[char], &[char])> {
    let i = usize::try_from(index_of(chars, marker)).ok()?;
    Some((&chars[..i], &chars[i + 1..]))
}

fn number<T: std::str::FromStr<Err = std::num::ParseIntError>>(
    segment: &[char],
) -> Result<T, DateError> {
    let segment: String = segment.iter().collect();
    segment
        .parse()
        .map_err(|e| DateError::Number(segment, e))
}

/// Parses dates written like `2019年7月15日`.
///
/// Anything after `日` is ignored. Months and days outside the calendar are
/// rejected instead of rolling over into the next month.
pub fn parse_localized_date(text: &str) -> Result<NaiveDate, DateError> {
    let chars: Vec<char> = text.chars().collect();

    let (year, rest) = split_at_marker(&chars, '年').ok_or(DateError::YearMarkerNotFound)?;
    let year: i32 = number(year)?;

    let (month, rest) = split_at_marker(rest, '月').ok_or(DateError::MonthMarkerNotFound)?;
    let month: u32 = number(month)?;

    let (day, _) = split_at_marker(rest, '日').ok_or(DateError::DayMarkerNotFound)?;
    let day: u32 = number(day)?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or(DateError::OutOfRange { year, month, day })
}
