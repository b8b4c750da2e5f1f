#[cfg(test)]
#[path = "format_test.rs"]
mod tests;

use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt::Display;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Human readable size with a 1024 base, e.g. `1.5 KB`.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut exp = 0;
    while value >= 1024.0 && exp < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        exp += 1;
    }

    let value = format!("{:.2}", value);
    let value = value.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", value, SIZE_UNITS[exp])
}

/// `YYYY/MM/DD` of a unix timestamp in seconds, in local time.
pub fn format_date(secs: f64) -> String {
    format_date_in(secs, &Local)
}

pub fn format_date_in<Tz: TimeZone>(secs: f64, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    if !secs.is_finite() {
        return "-".to_string();
    }
    let nanos = (secs.fract() * 1e9) as u32;
    match DateTime::from_timestamp(secs.trunc() as i64, nanos) {
        Some(dt) => dt.with_timezone(tz).format("%Y/%m/%d").to_string(),
        None => "-".to_string(),
    }
}

/// `YYYY/MM/DD HH:MM` in local time.
pub fn format_datetime(dt: Option<&DateTime<Utc>>) -> String {
    format_datetime_in(dt, &Local)
}

pub fn format_datetime_in<Tz: TimeZone>(dt: Option<&DateTime<Utc>>, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    match dt {
        Some(dt) => dt.with_timezone(tz).format("%Y/%m/%d %H:%M").to_string(),
        None => "-".to_string(),
    }
}

/// Cut `text` to at most `max_width` terminal columns, marking the cut with
/// an ellipsis.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut width = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > max_width - 1 {
            break;
        }
        width += w;
        out.push(c);
    }
    out.push('…');
    out
}

/// Pad `text` with spaces up to `width` columns.
pub fn pad_to_width(text: &str, width: usize) -> String {
    let current = text.width();
    if current >= width {
        return text.to_string();
    }
    format!("{}{}", text, " ".repeat(width - current))
}
