//! Month/period formatting for work experience dates.
//!
//! The form's month picker sends `YYYY-MM`. Anything that does not parse is
//! displayed exactly as entered.

use chrono::{Datelike, NaiveDate};

const MONTHS_RU: [&str; 12] = [
    "январь",
    "февраль",
    "март",
    "апрель",
    "май",
    "июнь",
    "июль",
    "август",
    "сентябрь",
    "октябрь",
    "ноябрь",
    "декабрь",
];

pub const PRESENT_RU: &str = "по настоящее время";

/// Formats `2021-03` as "март 2021 г.".
pub fn format_month(value: &str) -> String {
    let value = value.trim();
    match parse_month(value) {
        Some(date) => format!("{} {} г.", MONTHS_RU[date.month0() as usize], date.year()),
        None => value.to_string(),
    }
}

fn parse_month(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y-%m-%d"))
        .ok()
}

/// Joins start and end with an em dash. A current job always ends "по настоящее время".
pub fn format_period(start: &str, end: &str, is_current: bool) -> String {
    let start = format_month(start);
    let end = if is_current {
        PRESENT_RU.to_string()
    } else {
        format_month(end)
    };

    match (start.is_empty(), end.is_empty()) {
        (true, _) => end,
        (false, true) => start,
        (false, false) => format!("{start} — {end}"),
    }
}
