use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::calendar::Timestamped;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct JournalEntry {
    pub id: i32,
    pub user_id: i32,
    pub journal_header: String,
    pub journal_text: String,
    pub created_at: DateTime<Utc>,
}

impl Timestamped for JournalEntry {
    fn timestamp(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateJournalRequest {
    #[serde(default)]
    pub journal_header: String,
    #[serde(default)]
    pub journal_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tz_offset: Option<i32>,
}

/// Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateJournalRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journal_header: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journal_text: Option<String>,
}
