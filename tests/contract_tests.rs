use daybook::auth::models::{LoginRequest, SignupRequest, User, UserResponse};
use daybook::calendar::{CellColor, YearMonth};
use daybook::medication::models::UpdateMedicationRequest;
use daybook::mood::models::CreateMoodRequest;
use daybook::todo::models::UpdateTodoRequest;
use daybook::views::models::CalendarCell;
use serde_json::json;

#[test]
fn test_signup_accepts_hashed_password_alias() {
    // 1. Legacy browser payload
    let json_data = json!({
        "username": "ada",
        "first_name": "Ada",
        "last_name": "Lovelace",
        "_hashed_password": "password123",
    });

    // 2. Deserialize
    let request: SignupRequest =
        serde_json::from_value(json_data).expect("Failed to deserialize SignupRequest");

    // 3. Verify mappings
    assert_eq!(request.username, "ada");
    assert_eq!(request.password, "password123");
}

#[test]
fn test_login_accepts_user_or_username() {
    let a: LoginRequest = serde_json::from_value(json!({ "user": "ada", "password": "x" })).unwrap();
    let b: LoginRequest =
        serde_json::from_value(json!({ "username": "ada", "password": "x" })).unwrap();
    assert_eq!(a.user, b.user);
}

#[test]
fn test_user_never_serializes_password_hash() {
    let user = User {
        id: 1,
        username: "ada".into(),
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        password_hash: "$2b$04$secret".into(),
        created_at: chrono::Utc::now(),
    };

    let json_val = serde_json::to_value(&user).expect("Failed to serialize");
    assert!(json_val.get("password_hash").is_none());

    let json_val = serde_json::to_value(UserResponse::from(user)).unwrap();
    assert_eq!(json_val["first_name"], "Ada");
    assert!(json_val.get("password_hash").is_none());
}

#[test]
fn test_partial_updates_omit_absent_fields() {
    let extend = UpdateMedicationRequest {
        renew_date: Some(chrono::NaiveDate::from_ymd_opt(2024, 7, 14)),
        ..Default::default()
    };
    assert_eq!(
        serde_json::to_value(&extend).unwrap(),
        json!({ "renew_date": "2024-07-14" })
    );

    let toggle = UpdateTodoRequest {
        task_text: None,
        completed: Some(true),
    };
    assert_eq!(serde_json::to_value(&toggle).unwrap(), json!({ "completed": true }));
}

#[test]
fn test_mood_request_defaults() {
    let request: CreateMoodRequest = serde_json::from_value(json!({ "mood": 3 })).unwrap();
    assert_eq!(request.mood, 3);
    assert!(request.date.is_none());
    assert!(request.journal_id.is_none());
    assert!(request.tz_offset.is_none());
}

#[test]
fn test_calendar_cell_wire_format() {
    let cell = CalendarCell {
        date: chrono::NaiveDate::from_ymd_opt(2024, 6, 7).unwrap(),
        mood: Some(5),
        color: CellColor::Great,
        journal_count: 1,
        open_todos: 0,
        done_todos: 2,
        renewals: vec!["Sertraline".into()],
    };

    let json_val = serde_json::to_value(&cell).unwrap();
    assert_eq!(json_val["date"], "2024-06-07");
    assert_eq!(json_val["color"], "#2ecc71");
    assert_eq!(json_val["renewals"][0], "Sertraline");

    let back: CalendarCell = serde_json::from_value(json_val).unwrap();
    assert_eq!(back, cell);
}

#[test]
fn test_year_month_wire_format() {
    let month = YearMonth::new(2024, 6).unwrap();
    assert_eq!(
        serde_json::to_value(month).unwrap(),
        json!({ "year": 2024, "month": 6 })
    );
}
