//! Server-side aggregation for the calendar, diary, day-detail and to-do
//! views. Handlers load the user's rows, everything else is pure.

pub mod assemble;
pub mod handlers;
pub mod models;

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::{anchor_timestamp, parse_utc_offset, Navigator, YearMonth};
use crate::config::Config;
use crate::error::{ApiError, ApiResult};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub date: Option<NaiveDate>,
    pub tz_offset: Option<i32>,
}

impl ViewQuery {
    /// Month view for `year`/`month` (defaulting to the current month) or the
    /// exact-date filter when `date` is present.
    pub fn navigator(&self, today: NaiveDate) -> ApiResult<Navigator> {
        let mut nav = Navigator::new(today);
        if self.year.is_some() || self.month.is_some() {
            let current = nav.month();
            let month = YearMonth::new(
                self.year.unwrap_or(current.year),
                self.month.unwrap_or(current.month),
            )
            .ok_or_else(|| ApiError::Validation("Month must be between 1 and 12".into()))?;
            nav = Navigator::Month(month);
        }
        if let Some(date) = self.date {
            nav.select_date(date);
        }
        Ok(nav)
    }
}

pub fn resolve_offset(tz_offset: Option<i32>, config: &Config) -> ApiResult<FixedOffset> {
    let minutes = tz_offset.unwrap_or(config.default_utc_offset_minutes);
    parse_utc_offset(minutes).ok_or_else(|| {
        ApiError::Validation("tz_offset must be minutes east of UTC, under 24 hours".into())
    })
}

/// Creation time for a record: now, or local noon of `date` when the record
/// is filed under a specific day.
pub fn created_at_for(date: Option<NaiveDate>, offset: &FixedOffset) -> DateTime<Utc> {
    match date {
        Some(date) => anchor_timestamp(date, offset),
        None => Utc::now(),
    }
}

pub fn today_in(offset: &FixedOffset) -> NaiveDate {
    Utc::now().with_timezone(offset).date_naive()
}
