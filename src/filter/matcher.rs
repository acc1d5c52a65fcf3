use crate::types::{DailyFilter, DailyResult};

/// Slug form of a stored game name: lower-cased, with each run of whitespace
/// or `/` collapsed to one `-`. `"6/55 Lotto"` becomes `"6-55-lotto"`.
///
/// Only the stored side is slugged. Filter values arrive already hyphenated
/// and are just lower-cased, so `"6/55 Lotto"` as a filter value never matches.
pub fn normalize_game(game: &str) -> String {
    let mut out = String::with_capacity(game.len());
    let mut in_separator = false;
    for ch in game.chars() {
        if ch.is_whitespace() || ch == '/' {
            if !in_separator {
                out.push('-');
                in_separator = true;
            }
        } else {
            out.extend(ch.to_lowercase());
            in_separator = false;
        }
    }
    out
}

/// True when every field present in `filter` matches `record`.
pub fn matches_filter(record: &DailyResult, filter: &DailyFilter) -> bool {
    let date_ok = filter.date.as_ref().map_or(true, |d| record.date == *d);

    let game_ok = filter
        .game
        .as_ref()
        .map_or(true, |g| normalize_game(&record.game) == g.to_lowercase());

    let draw_ok = filter
        .draw
        .as_ref()
        .map_or(true, |d| record.draw.to_lowercase().contains(&d.to_lowercase()));

    date_ok && game_ok && draw_ok
}

/// Keep matching records in their original order.
pub fn filter_daily_data(records: &[DailyResult], filter: &DailyFilter) -> Vec<DailyResult> {
    records
        .iter()
        .filter(|r| matches_filter(r, filter))
        .cloned()
        .collect()
}
