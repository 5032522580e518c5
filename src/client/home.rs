use futures::future::{join_all, OptionFuture};

use crate::client::{ApiClient, ClientError, RecordStore};
use crate::journal::models::{CreateJournalRequest, JournalEntry};
use crate::mood::models::{CreateMoodRequest, MoodRating};
use crate::todo::models::{CreateTodoRequest, Todo};

/// Everything the Home form collects for today.
#[derive(Debug, Clone, Default)]
pub struct TodaySubmission {
    pub mood: Option<i32>,
    pub journal_header: String,
    pub journal_text: String,
    pub tasks: Vec<String>,
    pub tz_offset: Option<i32>,
}

/// Per-part results. `None` means the part was left blank and not sent.
#[derive(Debug, Default)]
pub struct TodayOutcome {
    pub mood: Option<Result<MoodRating, ClientError>>,
    pub journal: Option<Result<JournalEntry, ClientError>>,
    pub tasks: Vec<Result<Todo, ClientError>>,
}

impl TodayOutcome {
    pub fn is_success(&self) -> bool {
        self.mood.as_ref().map_or(true, Result::is_ok)
            && self.journal.as_ref().map_or(true, Result::is_ok)
            && self.tasks.iter().all(Result::is_ok)
    }
}

impl TodaySubmission {
    fn mood_request(&self) -> Option<CreateMoodRequest> {
        self.mood.map(|mood| CreateMoodRequest {
            mood,
            tz_offset: self.tz_offset,
            ..Default::default()
        })
    }

    fn journal_request(&self) -> Option<CreateJournalRequest> {
        if self.journal_header.trim().is_empty() && self.journal_text.trim().is_empty() {
            return None;
        }
        Some(CreateJournalRequest {
            journal_header: self.journal_header.trim().to_string(),
            journal_text: self.journal_text.clone(),
            tz_offset: self.tz_offset,
            ..Default::default()
        })
    }

    fn task_requests(&self) -> Vec<CreateTodoRequest> {
        self.tasks
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(|t| CreateTodoRequest {
                task_text: t.to_string(),
                tz_offset: self.tz_offset,
                ..Default::default()
            })
            .collect()
    }
}

/// Post mood, journal and tasks concurrently. Each part succeeds or fails on
/// its own.
pub async fn submit_today(api: &ApiClient, submission: &TodaySubmission) -> TodayOutcome {
    let mood = submission.mood_request();
    let journal = submission.journal_request();
    let tasks = submission.task_requests();

    let mood_fut: OptionFuture<_> = mood.as_ref().map(|m| api.record_mood(m)).into();
    let journal_fut: OptionFuture<_> = journal
        .as_ref()
        .map(|j| RecordStore::<JournalEntry>::create(api, j))
        .into();
    let tasks_fut = join_all(tasks.iter().map(|t| RecordStore::<Todo>::create(api, t)));

    let (mood, journal, tasks) = futures::join!(mood_fut, journal_fut, tasks_fut);

    let outcome = TodayOutcome { mood, journal, tasks };
    if !outcome.is_success() {
        tracing::warn!("Some parts of today's submission failed");
    }
    outcome
}
