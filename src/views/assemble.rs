use chrono::{FixedOffset, NaiveDate};
use std::collections::BTreeMap;

use crate::calendar::{bucket_all, bucket_latest, color_of, Navigator, YearMonth};
use crate::journal::models::JournalEntry;
use crate::medication::models::Medication;
use crate::mood::models::MoodRating;
use crate::todo::models::Todo;
use crate::views::models::*;

/// Everything a user has stored, as loaded for one view request.
#[derive(Debug, Clone, Default)]
pub struct UserRecords {
    pub moods: Vec<MoodRating>,
    pub journals: Vec<JournalEntry>,
    pub todos: Vec<Todo>,
    pub medications: Vec<Medication>,
}

fn mood_by_day(moods: &[MoodRating], offset: &FixedOffset) -> BTreeMap<NaiveDate, i32> {
    bucket_latest(moods.iter(), offset)
        .into_iter()
        .map(|(day, rating)| (day, rating.mood))
        .collect()
}

fn renewals_by_day(medications: &[Medication]) -> BTreeMap<NaiveDate, Vec<String>> {
    let mut days: BTreeMap<NaiveDate, Vec<String>> = BTreeMap::new();
    for med in medications {
        if let Some(date) = med.renew_date {
            days.entry(date).or_default().push(med.drug_name.clone());
        }
    }
    days
}

pub fn calendar(month: YearMonth, records: &UserRecords, offset: &FixedOffset) -> CalendarResponse {
    let moods = mood_by_day(&records.moods, offset);
    let journals = bucket_all(records.journals.iter(), offset);
    let todos = bucket_all(records.todos.iter(), offset);
    let mut renewals = renewals_by_day(&records.medications);

    let days = month
        .days()
        .map(|date| {
            let mood = moods.get(&date).copied();
            let day_todos = todos.get(&date).map(Vec::as_slice).unwrap_or_default();
            let done_todos = day_todos.iter().filter(|t| t.completed).count();
            CalendarCell {
                date,
                mood,
                color: color_of(mood),
                journal_count: journals.get(&date).map_or(0, Vec::len),
                open_todos: day_todos.len() - done_todos,
                done_todos,
                renewals: renewals.remove(&date).unwrap_or_default(),
            }
        })
        .collect();

    CalendarResponse {
        title: month.name(),
        month,
        previous: month.pred(),
        next: month.succ(),
        days,
    }
}

pub fn diary(
    nav: &Navigator,
    moods: &[MoodRating],
    journals: &[JournalEntry],
    offset: &FixedOffset,
) -> DiaryResponse {
    let mood_days = mood_by_day(moods, offset);

    let days: Vec<DiaryDay> = bucket_all(journals.iter(), offset)
        .into_iter()
        .rev()
        .filter(|(date, _)| nav.includes(*date))
        .map(|(date, entries)| {
            let mut entries: Vec<JournalEntry> = entries.into_iter().cloned().collect();
            entries.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
            let mood = mood_days.get(&date).copied();
            DiaryDay {
                date,
                mood,
                color: color_of(mood),
                entries,
            }
        })
        .collect();

    let empty_message = days.is_empty().then(|| {
        let message = if nav.is_day_filter() {
            NO_ENTRIES_FOR_DAY
        } else {
            NO_ENTRIES_FOR_MONTH
        };
        message.to_string()
    });

    DiaryResponse {
        title: nav.title(),
        day_filter: nav.is_day_filter(),
        days,
        empty_message,
    }
}

pub fn day_detail(date: NaiveDate, records: &UserRecords, offset: &FixedOffset) -> DayDetailResponse {
    let mood = mood_by_day(&records.moods, offset).get(&date).copied();

    let journal_entries: Vec<JournalEntry> = bucket_all(records.journals.iter(), offset)
        .remove(&date)
        .unwrap_or_default()
        .into_iter()
        .cloned()
        .collect();
    let todos: Vec<Todo> = bucket_all(records.todos.iter(), offset)
        .remove(&date)
        .unwrap_or_default()
        .into_iter()
        .cloned()
        .collect();

    let mut nav = Navigator::new(date);
    nav.select_date(date);

    DayDetailResponse {
        date,
        title: nav.title(),
        mood,
        mood_display: mood.map_or_else(|| NO_MOOD.to_string(), |m| m.to_string()),
        color: color_of(mood),
        journal_message: journal_entries
            .is_empty()
            .then(|| NO_JOURNAL_ENTRIES.to_string()),
        journal_entries,
        todo_message: todos.is_empty().then(|| NO_TASKS_FOR_DAY.to_string()),
        todos,
        renewals: renewals_by_day(&records.medications)
            .remove(&date)
            .unwrap_or_default(),
        previous: date.pred_opt().unwrap_or(date),
        next: date.succ_opt().unwrap_or(date),
    }
}

pub fn todo_list(nav: &Navigator, todos: &[Todo], offset: &FixedOffset) -> TodoListResponse {
    let days: Vec<TodoDay> = bucket_all(todos.iter(), offset)
        .into_iter()
        .rev()
        .filter(|(date, _)| nav.includes(*date))
        .map(|(date, todos)| TodoDay {
            date,
            todos: todos.into_iter().cloned().collect(),
        })
        .collect();

    let empty_message = days.is_empty().then(|| {
        let message = if nav.is_day_filter() {
            NO_TASKS_FOR_DAY
        } else {
            NO_TASKS_FOR_MONTH
        };
        message.to_string()
    });

    TodoListResponse {
        title: nav.title(),
        day_filter: nav.is_day_filter(),
        days,
        empty_message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{parse_utc_offset, CellColor};
    use chrono::{DateTime, Utc};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn utc() -> FixedOffset {
        parse_utc_offset(0).unwrap()
    }

    fn mood(id: i32, value: i32, when: &str) -> MoodRating {
        MoodRating {
            id,
            user_id: 1,
            mood: value,
            journal_id: None,
            created_at: at(when),
        }
    }

    fn journal(id: i32, header: &str, when: &str) -> JournalEntry {
        JournalEntry {
            id,
            user_id: 1,
            journal_header: header.into(),
            journal_text: format!("{header} body"),
            created_at: at(when),
        }
    }

    fn todo(id: i32, text: &str, completed: bool, when: &str) -> Todo {
        Todo {
            id,
            user_id: 1,
            task_text: text.into(),
            completed,
            created_at: at(when),
        }
    }

    fn medication(id: i32, name: &str, renew: Option<&str>) -> Medication {
        Medication {
            id,
            user_id: 1,
            drug_name: name.into(),
            dosage: 10,
            prescriber: "Dr. Okafor".into(),
            renew_date: renew.map(date),
        }
    }

    #[test]
    fn test_calendar_uses_latest_mood_color() {
        let records = UserRecords {
            moods: vec![
                mood(1, 3, "2024-06-07T08:00:00Z"),
                mood(2, 5, "2024-06-07T20:00:00Z"),
            ],
            ..Default::default()
        };
        let month = YearMonth::new(2024, 6).unwrap();
        let response = calendar(month, &records, &utc());

        assert_eq!(response.days.len(), 30);
        assert_eq!(response.title, "June 2024");
        let cell = &response.days[6];
        assert_eq!(cell.date, date("2024-06-07"));
        assert_eq!(cell.mood, Some(5));
        assert_eq!(cell.color, color_of(Some(5)));
        assert_eq!(response.days[0].color, CellColor::Neutral);
    }

    #[test]
    fn test_calendar_counts_and_renewals() {
        let records = UserRecords {
            journals: vec![
                journal(1, "a", "2024-06-10T08:00:00Z"),
                journal(2, "b", "2024-06-10T09:00:00Z"),
            ],
            todos: vec![
                todo(1, "Buy milk", true, "2024-06-10T07:00:00Z"),
                todo(2, "Call pharmacy", false, "2024-06-10T07:30:00Z"),
                todo(3, "Next month", false, "2024-07-01T07:30:00Z"),
            ],
            medications: vec![
                medication(1, "Sertraline", Some("2024-06-10")),
                medication(2, "Lithium", None),
            ],
            ..Default::default()
        };
        let response = calendar(YearMonth::new(2024, 6).unwrap(), &records, &utc());
        let cell = &response.days[9];
        assert_eq!(cell.journal_count, 2);
        assert_eq!(cell.done_todos, 1);
        assert_eq!(cell.open_todos, 1);
        assert_eq!(cell.renewals, vec!["Sertraline".to_string()]);
        let total_open: usize = response.days.iter().map(|d| d.open_todos).sum();
        assert_eq!(total_open, 1);
    }

    #[test]
    fn test_calendar_prev_next_wrap() {
        let response = calendar(
            YearMonth::new(2024, 12).unwrap(),
            &UserRecords::default(),
            &utc(),
        );
        assert_eq!(response.next, YearMonth::new(2025, 1).unwrap());
        assert_eq!(response.previous, YearMonth::new(2024, 11).unwrap());
        assert_eq!(response.days.len(), 31);
    }

    #[test]
    fn test_day_detail_empty_day() {
        let response = day_detail(date("2024-06-07"), &UserRecords::default(), &utc());
        assert_eq!(response.mood, None);
        assert_eq!(response.mood_display, "(None)");
        assert!(response.journal_entries.is_empty());
        assert_eq!(
            response.journal_message.as_deref(),
            Some("No journal entry available")
        );
        assert_eq!(response.todo_message.as_deref(), Some(NO_TASKS_FOR_DAY));
        assert_eq!(response.previous, date("2024-06-06"));
        assert_eq!(response.next, date("2024-06-08"));
        assert_eq!(response.title, "June 7, 2024");
    }

    #[test]
    fn test_day_detail_at_calendar_bounds() {
        let last = day_detail(NaiveDate::MAX, &UserRecords::default(), &utc());
        assert_eq!(last.next, NaiveDate::MAX);
        assert_eq!(Some(last.previous), NaiveDate::MAX.pred_opt());

        let first = day_detail(NaiveDate::MIN, &UserRecords::default(), &utc());
        assert_eq!(first.previous, NaiveDate::MIN);
    }

    #[test]
    fn test_day_detail_scopes_to_local_day() {
        let records = UserRecords {
            moods: vec![mood(1, 2, "2024-06-07T23:30:00Z")],
            journals: vec![
                journal(1, "late", "2024-06-07T23:30:00Z"),
                journal(2, "early", "2024-06-07T10:00:00Z"),
            ],
            ..Default::default()
        };
        let east = parse_utc_offset(120).unwrap();

        let june7 = day_detail(date("2024-06-07"), &records, &east);
        assert_eq!(june7.mood, None);
        assert_eq!(june7.journal_entries.len(), 1);
        assert_eq!(june7.journal_entries[0].journal_header, "early");

        let june8 = day_detail(date("2024-06-08"), &records, &east);
        assert_eq!(june8.mood_display, "2");
        assert_eq!(june8.journal_entries[0].journal_header, "late");
        assert_eq!(june8.journal_message, None);
    }

    #[test]
    fn test_diary_month_filter_newest_first() {
        let journals = vec![
            journal(1, "may", "2024-05-31T10:00:00Z"),
            journal(2, "first", "2024-06-01T10:00:00Z"),
            journal(3, "second", "2024-06-01T12:00:00Z"),
            journal(4, "later", "2024-06-20T10:00:00Z"),
        ];
        let moods = vec![mood(1, 4, "2024-06-20T09:00:00Z")];
        let nav = Navigator::Month(YearMonth::new(2024, 6).unwrap());

        let response = diary(&nav, &moods, &journals, &utc());
        let dates: Vec<NaiveDate> = response.days.iter().map(|d| d.date).collect();
        assert_eq!(dates, vec![date("2024-06-20"), date("2024-06-01")]);
        assert_eq!(response.days[0].mood, Some(4));
        let headers: Vec<&str> = response.days[1]
            .entries
            .iter()
            .map(|e| e.journal_header.as_str())
            .collect();
        assert_eq!(headers, vec!["second", "first"]);
        assert_eq!(response.empty_message, None);
    }

    #[test]
    fn test_diary_exact_date_filter() {
        let journals = vec![
            journal(1, "a", "2024-06-01T10:00:00Z"),
            journal(2, "b", "2024-06-02T10:00:00Z"),
        ];
        let mut nav = Navigator::new(date("2024-06-14"));
        nav.select_date(date("2024-06-02"));
        let response = diary(&nav, &[], &journals, &utc());
        assert!(response.day_filter);
        assert_eq!(response.days.len(), 1);
        assert_eq!(response.days[0].entries[0].id, 2);

        nav.select_date(date("2024-06-03"));
        let response = diary(&nav, &[], &journals, &utc());
        assert_eq!(response.empty_message.as_deref(), Some(NO_ENTRIES_FOR_DAY));
    }

    #[test]
    fn test_todo_list_groups_and_filters() {
        let todos = vec![
            todo(1, "a", false, "2024-06-01T10:00:00Z"),
            todo(2, "b", true, "2024-06-01T11:00:00Z"),
            todo(3, "c", false, "2024-06-03T10:00:00Z"),
            todo(4, "d", false, "2024-07-03T10:00:00Z"),
        ];
        let nav = Navigator::Month(YearMonth::new(2024, 6).unwrap());
        let response = todo_list(&nav, &todos, &utc());
        assert_eq!(response.days.len(), 2);
        assert_eq!(response.days[0].date, date("2024-06-03"));
        let ids: Vec<i32> = response.days[1].todos.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2]);

        let empty = todo_list(
            &Navigator::Month(YearMonth::new(2024, 8).unwrap()),
            &todos,
            &utc(),
        );
        assert_eq!(empty.empty_message.as_deref(), Some(NO_TASKS_FOR_MONTH));
    }
}
