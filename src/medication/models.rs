use chrono::{Months, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Medication {
    pub id: i32,
    pub user_id: i32,
    pub drug_name: String,
    pub dosage: i32,
    pub prescriber: String,
    pub renew_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateMedicationRequest {
    pub drug_name: String,
    pub dosage: i32,
    pub prescriber: String,
    #[serde(default)]
    pub renew_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateMedicationRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drug_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dosage: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prescriber: Option<String>,
    /// Absent leaves the date alone, `null` clears it.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub renew_date: Option<Option<NaiveDate>>,
}

// A field that is present maps to `Some`, even when its value is `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Next renewal one calendar month out. Short months clamp to their last
/// day (Jan 31 -> Feb 29 in a leap year). Without a date, counts from `today`.
pub fn extend_by_month(renew_date: Option<NaiveDate>, today: NaiveDate) -> NaiveDate {
    let from = renew_date.unwrap_or(today);
    from.checked_add_months(Months::new(1)).unwrap_or(from)
}
