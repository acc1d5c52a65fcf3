use chrono::{DateTime, NaiveDate};

use crate::types::DailyFilter;

/// Fixed draw session labels.
pub const DRAW_LABELS: &[&str] = &["2PM", "5PM", "9PM"];

/// Date layouts accepted in path segments.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
];

pub fn is_valid_date(s: &str) -> bool {
    let s = s.trim();
    if s.is_empty() {
        return false;
    }
    DATE_FORMATS
        .iter()
        .any(|fmt| NaiveDate::parse_from_str(s, fmt).is_ok())
        || DateTime::parse_from_rfc3339(s).is_ok()
}

pub fn is_valid_draw(s: &str) -> bool {
    let upper = s.to_uppercase();
    DRAW_LABELS.contains(&upper.as_str())
}

/// Build a filter from up to three free-form path segments. Each segment is a
/// date if it parses as one, else a draw label, else a game slug.
pub fn filter_from_segments<S: AsRef<str>>(segments: &[S]) -> DailyFilter {
    let mut filter = DailyFilter::default();
    for segment in segments.iter().take(3) {
        let segment = segment.as_ref();
        if segment.is_empty() {
            continue;
        }
        if is_valid_date(segment) {
            filter.date = Some(segment.to_string());
        } else if is_valid_draw(segment) {
            filter.draw = Some(segment.to_uppercase());
        } else {
            filter.game = Some(segment.to_string());
        }
    }
    filter
}
