use std::time::Duration;

use dashboard_logging::dash_debug;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    ApiError, ApplicationDto, EngineEvent, FailureKind, ProfileDto, ProfileUpdateDto,
};

const PROFILE_PATH: &str = "profile/me";
const APPLICATIONS_PATH: &str = "applications/my";
const PROFILE_UPDATE_PATH: &str = "profile/";

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Whole-request deadline. `None` leaves it to the transport.
    pub request_timeout: Option<Duration>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
        }
    }
}

#[async_trait::async_trait]
pub trait DashboardApi: Send + Sync {
    async fn fetch_profile(&self, token: &str) -> Result<ProfileDto, ApiError>;

    async fn fetch_applications(&self, token: &str) -> Result<Vec<ApplicationDto>, ApiError>;

    async fn submit_profile(&self, token: &str, update: &ProfileUpdateDto)
        -> Result<(), ApiError>;
}

/// Fetches the profile, then the applications. Each half fails on its own.
pub async fn load_dashboard(api: &dyn DashboardApi, token: &str) -> EngineEvent {
    let profile = api.fetch_profile(token).await;
    let applications = api.fetch_applications(token).await;
    EngineEvent::DashboardLoaded {
        profile,
        applications,
    }
}

#[derive(Debug, Clone)]
pub struct ReqwestDashboardApi {
    client: reqwest::Client,
    base: Url,
}

impl ReqwestDashboardApi {
    pub fn new(settings: &ApiSettings) -> Result<Self, ApiError> {
        let mut base = Url::parse(&settings.base_url)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self { client, base })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, token: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        dash_debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let body = read_success_body(response).await?;
        serde_json::from_slice(&body)
            .map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))
    }
}

#[async_trait::async_trait]
impl DashboardApi for ReqwestDashboardApi {
    async fn fetch_profile(&self, token: &str) -> Result<ProfileDto, ApiError> {
        self.get_json(PROFILE_PATH, token).await
    }

    async fn fetch_applications(&self, token: &str) -> Result<Vec<ApplicationDto>, ApiError> {
        self.get_json(APPLICATIONS_PATH, token).await
    }

    async fn submit_profile(
        &self,
        token: &str,
        update: &ProfileUpdateDto,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(PROFILE_UPDATE_PATH)?;
        let body = serde_json::to_vec(update)
            .map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))?;
        dash_debug!("POST {} ({} bytes)", url, body.len());
        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        read_success_body(response).await.map(|_| ())
    }
}

async fn read_success_body(response: reqwest::Response) -> Result<Vec<u8>, ApiError> {
    let status = response.status();
    let body = response.bytes().await.map_err(map_reqwest_error)?;
    if !status.is_success() {
        return Err(
            ApiError::new(FailureKind::HttpStatus(status.as_u16()), status.to_string())
                .with_detail(error_detail(&body)),
        );
    }
    Ok(body.to_vec())
}

/// Extracts `detail` from an error body. Validation errors carry a list of `{msg}` objects.
fn error_detail(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(text) => Some(text.clone()),
        serde_json::Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(serde_json::Value::as_str))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
