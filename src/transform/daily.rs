use tracing::info;

use crate::types::{DailyResult, RawRow};

/// Ball cells occupy the first six tail positions; jackpot and winners follow.
const BALL_SLOTS: usize = 6;
const JACKPOT_SLOT: usize = 6;
const WINNERS_SLOT: usize = 7;

/// Format every daily row after the header. No deduplication.
pub fn format_daily(rows: &[RawRow]) -> Vec<DailyResult> {
    let data = rows.get(1..).unwrap_or(&[]);
    let results: Vec<DailyResult> = data.iter().map(to_daily).collect();
    info!("Formatted daily entries: {}", results.len());
    results
}

fn to_daily(row: &RawRow) -> DailyResult {
    let tail = row.tail();
    let cell = |i: usize| tail.get(i).cloned().unwrap_or_default();

    DailyResult {
        timestamp: row.timestamp().to_string(),
        date: row.date().to_string(),
        game: row.game().to_string(),
        draw: row.draw().to_string(),
        ball_numbers: tail
            .iter()
            .take(BALL_SLOTS)
            .filter(|n| !n.is_empty())
            .cloned()
            .collect(),
        jackpot: cell(JACKPOT_SLOT),
        winners: cell(WINNERS_SLOT),
    }
}
