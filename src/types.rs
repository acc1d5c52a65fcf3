use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// RawRow
// ---------------------------------------------------------------------------

/// Leading columns shared by both sheets: timestamp, date, game, draw.
pub const LEADING_FIELDS: usize = 4;

/// One spreadsheet row as returned by the values API. Rows are ragged: trailing
/// empty cells are omitted upstream, so every accessor defaults to `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow(Vec<String>);

impl RawRow {
    /// Build a row from JSON cells. Strings pass through, numbers and booleans
    /// are stringified, `null` and nested values become `""`.
    pub fn from_json_cells(cells: Vec<serde_json::Value>) -> Self {
        let cells = cells
            .into_iter()
            .map(|cell| match cell {
                serde_json::Value::String(s) => s,
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Bool(b) => b.to_string(),
                _ => String::new(),
            })
            .collect();
        Self(cells)
    }

    pub fn cell(&self, index: usize) -> &str {
        self.0.get(index).map(String::as_str).unwrap_or("")
    }

    pub fn timestamp(&self) -> &str {
        self.cell(0)
    }

    pub fn date(&self) -> &str {
        self.cell(1)
    }

    pub fn game(&self) -> &str {
        self.cell(2)
    }

    pub fn draw(&self) -> &str {
        self.cell(3)
    }

    /// Dataset-specific cells after the draw label. Empty for short rows.
    pub fn tail(&self) -> &[String] {
        self.0.get(LEADING_FIELDS..).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<S: Into<String>> FromIterator<S> for RawRow {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

// ---------------------------------------------------------------------------
// Result records
// ---------------------------------------------------------------------------

/// Live feed record. `ball_numbers` never holds empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealtimeResult {
    pub timestamp: String,
    pub date: String,
    pub game: String,
    pub draw: String,
    pub ball_numbers: Vec<String>,
}

impl RealtimeResult {
    /// Identity used for deduplication: date, game and the cleaned numbers.
    /// Timestamp and draw are deliberately left out.
    pub fn dedup_key(&self) -> String {
        format!("{}_{}_{}", self.date, self.game, self.ball_numbers.join(","))
    }
}

/// Daily summary record, one per sheet row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyResult {
    pub timestamp: String,
    pub date: String,
    pub game: String,
    pub draw: String,
    pub ball_numbers: Vec<String>,
    pub jackpot: String,
    pub winners: String,
}

// ---------------------------------------------------------------------------
// Daily filter
// ---------------------------------------------------------------------------

/// Optional predicate over daily results. Absent fields always match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailyFilter {
    /// Exact match against `DailyResult::date`.
    pub date: Option<String>,
    /// Hyphenated slug, e.g. `6-55-lotto`.
    pub game: Option<String>,
    /// Case-insensitive substring of `DailyResult::draw`.
    pub draw: Option<String>,
}

impl DailyFilter {
    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.game.is_none() && self.draw.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_row_defaults_to_empty_cells() {
        let row: RawRow = ["ts", "2024-05-01"].into_iter().collect();
        assert_eq!(row.timestamp(), "ts");
        assert_eq!(row.date(), "2024-05-01");
        assert_eq!(row.game(), "");
        assert_eq!(row.draw(), "");
        assert!(row.tail().is_empty());
    }

    #[test]
    fn tail_starts_after_draw_label() {
        let row: RawRow = ["ts", "d", "g", "9PM", "01", "02"].into_iter().collect();
        assert_eq!(row.tail(), &["01".to_string(), "02".to_string()]);
    }

    #[test]
    fn json_cells_are_stringified() {
        let row = RawRow::from_json_cells(vec![
            serde_json::json!("ts"),
            serde_json::json!(12),
            serde_json::json!(true),
            serde_json::Value::Null,
        ]);
        assert_eq!(row.cell(1), "12");
        assert_eq!(row.cell(2), "true");
        assert_eq!(row.cell(3), "");
        assert_eq!(row.len(), 4);
    }

    #[test]
    fn realtime_serializes_camel_case() {
        let r = RealtimeResult {
            timestamp: "t".to_string(),
            date: "2024-05-01".to_string(),
            game: "6/55 Lotto".to_string(),
            draw: "9PM".to_string(),
            ball_numbers: vec!["01".to_string()],
        };
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["ballNumbers"], serde_json::json!(["01"]));
        assert_eq!(r.dedup_key(), "2024-05-01_6/55 Lotto_01");
    }
}
