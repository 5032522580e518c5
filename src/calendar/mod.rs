//! Pure date logic shared by the view endpoints and the client library.

pub mod bucket;
pub mod color;
pub mod navigation;

pub use bucket::{anchor_timestamp, bucket_all, bucket_latest, day_key, parse_utc_offset, Timestamped};
pub use color::{color_of, CellColor};
pub use navigation::{Navigator, YearMonth};
