//! Localized day-header formatting.
//!
//! Pure functions only; the panel displays the result verbatim.

use chrono::{Locale, NaiveDate};

/// Formats a date as "<weekday> <day> <month> <year>" in `locale`.
///
/// French example: `mardi 12 novembre 2019`.
pub fn format_day_header(date: NaiveDate, locale: Locale) -> String {
    date.format_localized("%A %-d %B %Y", locale).to_string()
}

/// Maps a settings locale tag to a chrono locale, defaulting to French.
pub fn locale_for_tag(tag: &str) -> Locale {
    match tag.trim().to_ascii_lowercase().replace('-', "_").as_str() {
        "en" | "en_us" => Locale::en_US,
        "en_gb" => Locale::en_GB,
        _ => Locale::fr_FR,
    }
}
