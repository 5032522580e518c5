//! Day bucketing.
//!
//! Records carry a UTC timestamp; the day they belong to is the calendar date
//! of that timestamp in the viewer's offset. Nothing here is persisted.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use std::collections::BTreeMap;

const MAX_OFFSET_MINUTES: i32 = 24 * 60;

pub trait Timestamped {
    fn timestamp(&self) -> DateTime<Utc>;
}

impl<T: Timestamped> Timestamped for &T {
    fn timestamp(&self) -> DateTime<Utc> {
        (*self).timestamp()
    }
}

/// Minutes east of UTC, e.g. `120` for CEST or `-300` for EST.
pub fn parse_utc_offset(minutes: i32) -> Option<FixedOffset> {
    if minutes.abs() >= MAX_OFFSET_MINUTES {
        return None;
    }
    FixedOffset::east_opt(minutes * 60)
}

pub fn day_key(timestamp: DateTime<Utc>, offset: &FixedOffset) -> NaiveDate {
    timestamp.with_timezone(offset).date_naive()
}

/// Local noon of `date`, converted back to UTC.
///
/// Used when a record is created for a day other than now; noon keeps the
/// record on the same day for any offset within twelve hours of the one used.
pub fn anchor_timestamp(date: NaiveDate, offset: &FixedOffset) -> DateTime<Utc> {
    let noon = date.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN));
    match offset.from_local_datetime(&noon).single() {
        Some(local) => local.with_timezone(&Utc),
        None => Utc.from_utc_datetime(&noon),
    }
}

/// One record per day: the latest by timestamp. Among equal timestamps the
/// record that occurs later in `records` wins.
pub fn bucket_latest<T, I>(records: I, offset: &FixedOffset) -> BTreeMap<NaiveDate, T>
where
    T: Timestamped,
    I: IntoIterator<Item = T>,
{
    let mut days: BTreeMap<NaiveDate, T> = BTreeMap::new();
    for record in records {
        let key = day_key(record.timestamp(), offset);
        match days.get(&key) {
            Some(current) if current.timestamp() > record.timestamp() => {}
            _ => {
                days.insert(key, record);
            }
        }
    }
    days
}

/// Every record under exactly one day; input order is kept within a day.
pub fn bucket_all<T, I>(records: I, offset: &FixedOffset) -> BTreeMap<NaiveDate, Vec<T>>
where
    T: Timestamped,
    I: IntoIterator<Item = T>,
{
    let mut days: BTreeMap<NaiveDate, Vec<T>> = BTreeMap::new();
    for record in records {
        days.entry(day_key(record.timestamp(), offset))
            .or_default()
            .push(record);
    }
    days
}
