pub mod daily;
pub mod realtime;

pub use daily::format_daily;
pub use realtime::normalize_realtime;
