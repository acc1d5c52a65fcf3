pub mod matcher;
pub mod segments;

pub use matcher::{filter_daily_data, matches_filter};
pub use segments::filter_from_segments;
