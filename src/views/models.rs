use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{CellColor, YearMonth};
use crate::journal::models::JournalEntry;
use crate::todo::models::Todo;

pub const NO_MOOD: &str = "(None)";
pub const NO_JOURNAL_ENTRIES: &str = "No journal entry available";
pub const NO_TASKS_FOR_DAY: &str = "No tasks for this day";
pub const NO_TASKS_FOR_MONTH: &str = "No tasks for this month";
pub const NO_ENTRIES_FOR_DAY: &str = "No journal entries for this day";
pub const NO_ENTRIES_FOR_MONTH: &str = "No journal entries for this month";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub mood: Option<i32>,
    pub color: CellColor,
    pub journal_count: usize,
    pub open_todos: usize,
    pub done_todos: usize,
    /// Drugs whose renewal falls on this day.
    pub renewals: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarResponse {
    pub title: String,
    pub month: YearMonth,
    pub previous: YearMonth,
    pub next: YearMonth,
    pub days: Vec<CalendarCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiaryDay {
    pub date: NaiveDate,
    pub mood: Option<i32>,
    pub color: CellColor,
    pub entries: Vec<JournalEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiaryResponse {
    pub title: String,
    pub day_filter: bool,
    pub days: Vec<DiaryDay>,
    pub empty_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayDetailResponse {
    pub date: NaiveDate,
    pub title: String,
    pub mood: Option<i32>,
    pub mood_display: String,
    pub color: CellColor,
    pub journal_entries: Vec<JournalEntry>,
    pub journal_message: Option<String>,
    pub todos: Vec<Todo>,
    pub todo_message: Option<String>,
    pub renewals: Vec<String>,
    pub previous: NaiveDate,
    pub next: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoDay {
    pub date: NaiveDate,
    pub todos: Vec<Todo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoListResponse {
    pub title: String,
    pub day_filter: bool,
    pub days: Vec<TodoDay>,
    pub empty_message: Option<String>,
}
