use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

pub type TimerId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct JobDto {
    #[serde(default)]
    pub title: Option<String>,
}

/// One entry of `/applications/my`. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApplicationDto {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub job: Option<JobDto>,
    #[serde(default)]
    pub resume_score: Option<i64>,
    #[serde(default)]
    pub voice_score: Option<i64>,
}

/// Body of `/profile/me`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ProfileDto {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    /// Sent as a bucket string or a bare number; numbers are kept as their JSON text.
    #[serde(default, deserialize_with = "string_or_number")]
    pub experience_years: Option<String>,
    #[serde(default)]
    pub skills: Option<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    })
}

/// Body of `POST /profile/`. `None` fields are sent as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ProfileUpdateDto {
    pub full_name: Option<String>,
    pub company_name: Option<String>,
    pub experience_years: Option<String>,
    pub skills: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    DashboardLoaded {
        profile: Result<ProfileDto, ApiError>,
        applications: Result<Vec<ApplicationDto>, ApiError>,
    },
    ProfileSubmitted(Result<(), ApiError>),
    TimerTick {
        timer_id: TimerId,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
    /// `detail` from a JSON error body, when the backend sent one.
    pub detail: Option<String>,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            detail: None,
        }
    }

    pub(crate) fn with_detail(mut self, detail: Option<String>) -> Self {
        self.detail = detail;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureKind {
    #[error("invalid url")]
    InvalidUrl,
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("timeout")]
    Timeout,
    #[error("network error")]
    Network,
    #[error("unexpected response body")]
    Decode,
    #[error("request task aborted")]
    Aborted,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error(transparent)]
    Api(#[from] ApiError),
}
