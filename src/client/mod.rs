//! Client side of the API: a typed HTTP client plus the per-view state the
//! UI keeps (CRUD editors, Home submission). Each view owns its own state;
//! nothing is shared or cached between views.

pub mod api;
pub mod editor;
pub mod home;

pub use api::ApiClient;
pub use editor::{Editable, Editor, RecordStore};
pub use home::{submit_today, TodayOutcome, TodaySubmission};

use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server responded {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("{0}")]
    Invalid(String),
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status(),
            ClientError::Invalid(_) => None,
        }
    }
}
