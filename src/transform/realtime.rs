use std::collections::HashSet;

use tracing::{debug, info};

use crate::types::{RawRow, RealtimeResult, LEADING_FIELDS};

/// Normalize the live feed: drop the header row, strip empty ball cells and
/// keep only the first record for each (date, game, numbers) key.
///
/// Output order is the order in which each key was first seen.
pub fn normalize_realtime(rows: &[RawRow]) -> Vec<RealtimeResult> {
    let data = rows.get(1..).unwrap_or(&[]);
    info!("Processing realtime data, total rows: {}", rows.len());

    let mut seen: HashSet<String> = HashSet::with_capacity(data.len());
    let mut results = Vec::with_capacity(data.len());

    for (idx, row) in data.iter().enumerate() {
        if row.len() < LEADING_FIELDS {
            debug!(row = idx + 1, cells = row.len(), "short realtime row, missing cells read as empty");
        }

        let record = to_realtime(row);
        if seen.insert(record.dedup_key()) {
            results.push(record);
        }
    }

    info!(
        "Processed realtime entries: {} ({} duplicates dropped)",
        results.len(),
        data.len() - results.len()
    );
    results
}

fn to_realtime(row: &RawRow) -> RealtimeResult {
    RealtimeResult {
        timestamp: row.timestamp().to_string(),
        date: row.date().to_string(),
        game: row.game().to_string(),
        draw: row.draw().to_string(),
        ball_numbers: row
            .tail()
            .iter()
            .filter(|n| !n.is_empty())
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> RawRow {
        cells.iter().copied().collect()
    }

    fn header() -> RawRow {
        row(&["Timestamp", "Date", "Game", "Draw", "N1", "N2", "N3", "N4", "N5", "N6"])
    }

    #[test]
    fn header_only_yields_nothing() {
        assert!(normalize_realtime(&[header()]).is_empty());
        assert!(normalize_realtime(&[]).is_empty());
    }

    #[test]
    fn rows_differing_only_in_timestamp_collapse() {
        let rows = vec![
            header(),
            row(&["10:00", "2024-05-01", "6/55 Lotto", "9PM", "01", "05", "12", "33", "40", "55"]),
            row(&["10:05", "2024-05-01", "6/55 Lotto", "9PM", "01", "05", "12", "33", "40", "55"]),
        ];
        let out = normalize_realtime(&rows);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].timestamp, "10:00", "first occurrence wins");
    }

    #[test]
    fn draw_label_is_not_part_of_the_key() {
        let rows = vec![
            header(),
            row(&["t1", "2024-05-01", "Swertres", "2PM", "1", "2", "3"]),
            row(&["t2", "2024-05-01", "Swertres", "5PM", "1", "2", "3"]),
        ];
        let out = normalize_realtime(&rows);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].draw, "2PM");
    }

    #[test]
    fn empty_cells_are_removed_before_keying() {
        let rows = vec![
            header(),
            row(&["t1", "2024-05-01", "EZ2", "9PM", "04", "", "11"]),
            row(&["t2", "2024-05-01", "EZ2", "9PM", "04", "11"]),
        ];
        let out = normalize_realtime(&rows);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].ball_numbers, vec!["04", "11"]);
    }

    #[test]
    fn order_is_first_seen_order() {
        let rows = vec![
            header(),
            row(&["t1", "2024-05-02", "B", "9PM", "2"]),
            row(&["t2", "2024-05-01", "A", "9PM", "1"]),
            row(&["t3", "2024-05-02", "B", "9PM", "2"]),
            row(&["t4", "2024-05-03", "C", "9PM", "3"]),
        ];
        let games: Vec<_> = normalize_realtime(&rows).into_iter().map(|r| r.game).collect();
        assert_eq!(games, vec!["B", "A", "C"]);
    }

    #[test]
    fn short_rows_degrade_to_empty_fields() {
        let rows = vec![header(), row(&["t1", "2024-05-01"]), row(&[])];
        let out = normalize_realtime(&rows);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].game, "");
        assert!(out[0].ball_numbers.is_empty());
        assert_eq!(out[1].date, "");
    }

    #[test]
    fn output_never_exceeds_data_rows() {
        let rows = vec![
            header(),
            row(&["t1", "d", "g", "2PM", "1"]),
            row(&["t2", "d", "g", "5PM", "2"]),
            row(&["t3", "d", "h", "9PM", "1"]),
        ];
        let out = normalize_realtime(&rows);
        assert!(out.len() <= rows.len() - 1);
        assert_eq!(out.len(), 3);
    }
}
