use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::{de::DeserializeOwned, Serialize};

use crate::auth::models::{LoginRequest, SignupRequest, UserResponse};
use crate::client::{ClientError, RecordStore};
use crate::journal::models::{CreateJournalRequest, JournalEntry, UpdateJournalRequest};
use crate::medication::models::{CreateMedicationRequest, Medication, UpdateMedicationRequest};
use crate::mood::models::{CreateMoodRequest, MoodRating};
use crate::todo::models::{CreateTodoRequest, Todo, UpdateTodoRequest};
use crate::views::models::{CalendarResponse, DayDetailResponse, DiaryResponse, TodoListResponse};
use crate::views::ViewQuery;

/// HTTP client for the daybook API. The session cookie set by login/signup
/// is kept in the client's cookie store and sent on every later request.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let client = Client::builder().cookie_store(true).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> Result<Url, ClientError> {
        Url::parse(&format!("{}{path}", self.base_url))
            .map_err(|e| ClientError::Invalid(format!("bad url {}{path}: {e}", self.base_url)))
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ClientError> {
        let resp = builder.send().await?;
        if resp.status().is_success() {
            Ok(resp)
        } else {
            Err(status_error(resp).await)
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ClientError> {
        let resp = self.send(self.client.get(url)).await?;
        Ok(resp.json().await?)
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let resp = self
            .send(self.client.post(self.url(path)?).json(body))
            .await?;
        Ok(resp.json().await?)
    }

    async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let resp = self
            .send(self.client.put(self.url(path)?).json(body))
            .await?;
        Ok(resp.json().await?)
    }

    async fn delete_req(&self, path: &str) -> Result<(), ClientError> {
        self.send(self.client.delete(self.url(path)?)).await?;
        Ok(())
    }

    // -- Session --

    pub async fn signup(&self, request: &SignupRequest) -> Result<UserResponse, ClientError> {
        self.post_json("/api/users", request).await
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<UserResponse, ClientError> {
        let request = LoginRequest {
            user: username.to_string(),
            password: password.to_string(),
        };
        self.post_json("/api/login", &request).await
    }

    pub async fn logout(&self) -> Result<(), ClientError> {
        self.delete_req("/api/logout").await
    }

    /// `None` when there is no live session (the server answers 204).
    pub async fn current_session(&self) -> Result<Option<UserResponse>, ClientError> {
        let resp = self
            .send(self.client.get(self.url("/api/get-session")?))
            .await?;
        if resp.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        Ok(Some(resp.json().await?))
    }

    // -- Moods --

    pub async fn list_moods(&self) -> Result<Vec<MoodRating>, ClientError> {
        self.get_json(self.url("/api/mood-ratings")?).await
    }

    pub async fn record_mood(&self, request: &CreateMoodRequest) -> Result<MoodRating, ClientError> {
        self.post_json("/api/mood-ratings", request).await
    }

    // -- Views --

    pub async fn calendar(&self, query: &ViewQuery) -> Result<CalendarResponse, ClientError> {
        self.get_json(with_view_query(self.url("/api/calendar")?, query))
            .await
    }

    pub async fn diary(&self, query: &ViewQuery) -> Result<DiaryResponse, ClientError> {
        self.get_json(with_view_query(self.url("/api/diary")?, query))
            .await
    }

    pub async fn day(
        &self,
        date: NaiveDate,
        tz_offset: Option<i32>,
    ) -> Result<DayDetailResponse, ClientError> {
        let query = ViewQuery {
            tz_offset,
            ..Default::default()
        };
        let url = self.url(&format!("/api/days/{}", date.format("%Y-%m-%d")))?;
        self.get_json(with_view_query(url, &query)).await
    }

    pub async fn todo_list(&self, query: &ViewQuery) -> Result<TodoListResponse, ClientError> {
        self.get_json(with_view_query(self.url("/api/todo-list")?, query))
            .await
    }
}

fn with_view_query(mut url: Url, query: &ViewQuery) -> Url {
    {
        let mut pairs = url.query_pairs_mut();
        if let Some(year) = query.year {
            pairs.append_pair("year", &year.to_string());
        }
        if let Some(month) = query.month {
            pairs.append_pair("month", &month.to_string());
        }
        if let Some(date) = query.date {
            pairs.append_pair("date", &date.format("%Y-%m-%d").to_string());
        }
        if let Some(offset) = query.tz_offset {
            pairs.append_pair("tz_offset", &offset.to_string());
        }
    }
    if url.query() == Some("") {
        url.set_query(None);
    }
    url
}

async fn status_error(resp: Response) -> ClientError {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or(body);
    ClientError::Status { status, message }
}

#[async_trait]
impl RecordStore<JournalEntry> for ApiClient {
    async fn list(&self) -> Result<Vec<JournalEntry>, ClientError> {
        self.get_json(self.url("/api/journals")?).await
    }

    async fn create(&self, new: &CreateJournalRequest) -> Result<JournalEntry, ClientError> {
        self.post_json("/api/journal-entries", new).await
    }

    async fn update(&self, id: i32, draft: &UpdateJournalRequest) -> Result<JournalEntry, ClientError> {
        self.put_json(&format!("/api/journals/{id}"), draft).await
    }

    async fn delete(&self, id: i32) -> Result<(), ClientError> {
        self.delete_req(&format!("/api/journals/{id}")).await
    }
}

#[async_trait]
impl RecordStore<Medication> for ApiClient {
    async fn list(&self) -> Result<Vec<Medication>, ClientError> {
        self.get_json(self.url("/api/medications")?).await
    }

    async fn create(&self, new: &CreateMedicationRequest) -> Result<Medication, ClientError> {
        self.post_json("/api/medications", new).await
    }

    async fn update(&self, id: i32, draft: &UpdateMedicationRequest) -> Result<Medication, ClientError> {
        self.put_json(&format!("/api/medications/{id}"), draft).await
    }

    async fn delete(&self, id: i32) -> Result<(), ClientError> {
        self.delete_req(&format!("/api/medications/{id}")).await
    }
}

#[async_trait]
impl RecordStore<Todo> for ApiClient {
    async fn list(&self) -> Result<Vec<Todo>, ClientError> {
        self.get_json(self.url("/api/todos")?).await
    }

    async fn create(&self, new: &CreateTodoRequest) -> Result<Todo, ClientError> {
        self.post_json("/api/todos", new).await
    }

    async fn update(&self, id: i32, draft: &UpdateTodoRequest) -> Result<Todo, ClientError> {
        self.put_json(&format!("/api/todos/{id}"), draft).await
    }

    async fn delete(&self, id: i32) -> Result<(), ClientError> {
        self.delete_req(&format!("/api/todos/{id}")).await
    }
}
