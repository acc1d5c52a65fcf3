//! External row sources. The service only ever asks for a range of rows.

pub mod sheets;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::RawRow;

pub use sheets::SheetsClient;

/// Anything that can return the rows of a named spreadsheet range.
///
/// An empty `Vec` means the range holds no data; that is not an error here.
/// Callers decide whether an empty range matters.
#[async_trait]
pub trait RowSource: Send + Sync {
    async fn fetch_range(&self, range: &str) -> Result<Vec<RawRow>>;
}
