//! Cell-level normalization rules applied during dataset loads.
//!
//! All three rules are soft except JSON parsing: a date or number that does
//! not parse becomes [`Cell::Null`], while malformed JSON is an error the
//! caller must surface.

use std::str::FromStr;

use serde_json::{Map, Value};
use time::{Date, Month};

use crate::Cell;

/// Parse a day-month-year date such as `05-03-2023` or `5-3-2023`.
///
/// Day and month accept one or two digits; the year must be exactly four.
/// Anything else, including out-of-range components, yields `None`.
pub fn parse_date_dmy(input: &str) -> Option<Date> {
    let mut parts = input.trim().split('-');
    let day = parts.next()?;
    let month = parts.next()?;
    let year = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    if day.is_empty() || day.len() > 2 || month.is_empty() || month.len() > 2 || year.len() != 4 {
        return None;
    }

    let day: u8 = parse_digits(day)?;
    let month: u8 = parse_digits(month)?;
    let year: i32 = parse_digits(year)?;
    let month = Month::try_from(month).ok()?;
    Date::from_calendar_date(year, month, day).ok()
}

/// Coerce a cell to a calendar date, or null.
///
/// Text is parsed as day-month-year and existing dates pass through;
/// everything else becomes null.
pub fn coerce_date(cell: Cell) -> Cell {
    match cell {
        Cell::Date(value) => Cell::Date(value),
        Cell::Text(value) => match parse_date_dmy(&value) {
            Some(date) => Cell::Date(date),
            None => Cell::Null,
        },
        _ => Cell::Null,
    }
}

/// Coerce a cell to a finite number, or null.
///
/// Text is parsed as a float and booleans map to 1 and 0; numbers pass
/// through. Everything else, and any non-finite result, becomes null.
pub fn coerce_numeric(cell: Cell) -> Cell {
    match cell {
        Cell::Number(value) if value.is_finite() => Cell::Number(value),
        Cell::Bool(value) => Cell::Number(if value { 1.0 } else { 0.0 }),
        Cell::Text(value) => match value.trim().parse::<f64>() {
            Ok(parsed) if parsed.is_finite() => Cell::Number(parsed),
            _ => Cell::Null,
        },
        _ => Cell::Null,
    }
}

/// Normalize a structured-text cell into a parsed JSON document.
///
/// Non-blank text must parse as JSON. Blank text and non-text values,
/// including cells that already hold a document, become an empty object.
pub fn normalize_json_cell(cell: Cell) -> Result<Cell, serde_json::Error> {
    match cell {
        Cell::Text(value) if !value.trim().is_empty() => {
            serde_json::from_str(&value).map(Cell::Json)
        }
        _ => Ok(Cell::Json(Value::Object(Map::new()))),
    }
}

/// Parse a string consisting only of ASCII digits.
fn parse_digits<T: FromStr>(input: &str) -> Option<T> {
    if !input.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    input.parse().ok()
}
