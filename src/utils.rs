//! Date formatting and naming helpers.
//!
//! This module provides helper functions used throughout the application:
//! - Month abbreviations from a fixed English table (no locale support)
//! - Full (`"Jan 03 2020"`) and short (`"Jan 03"`) date labels
//! - Month folder names such as `"1 - Jan"`

use chrono::{Datelike, NaiveDate};

/// Capitalized three-letter English month names, January first.
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Abbreviation for a 1-based month number.
///
/// # Panics
///
/// Panics if `month` is not in `1..=12`. Callers pass values obtained from
/// [`chrono::Datelike::month`] or from iterating `1..=12`.
pub fn month_abbrev(month: u32) -> &'static str {
    MONTH_ABBREVIATIONS[(month - 1) as usize]
}

/// Render a date as `"MMM DD YYYY"` with a zero-padded day.
///
/// # Examples
///
/// ```ignore
/// let date = NaiveDate::from_ymd_opt(2020, 1, 3).unwrap();
/// assert_eq!(format_date(date), "Jan 03 2020");
/// ```
pub fn format_date(date: NaiveDate) -> String {
    format!(
        "{} {:02} {}",
        month_abbrev(date.month()),
        date.day(),
        date.year()
    )
}

/// Render a date as `"MMM DD"`, the leading part of [`format_date`].
pub fn short_label(date: NaiveDate) -> String {
    format!("{} {:02}", month_abbrev(date.month()), date.day())
}

/// Folder name for a month, e.g. `"3 - Mar"`.
pub fn month_folder_name(month: u32) -> String {
    format!("{} - {}", month, month_abbrev(month))
}
