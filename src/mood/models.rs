use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::calendar::Timestamped;

pub const MOOD_RANGE: std::ops::RangeInclusive<i32> = 1..=5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct MoodRating {
    pub id: i32,
    pub user_id: i32,
    pub mood: i32,
    pub journal_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl Timestamped for MoodRating {
    fn timestamp(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateMoodRequest {
    pub mood: i32,
    /// Rate a past or future day instead of now.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journal_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tz_offset: Option<i32>,
}
