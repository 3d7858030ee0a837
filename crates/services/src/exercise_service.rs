use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use writing_core::model::{ActivityKind, Evaluation, Question, StudentProfile};

use crate::error::{ExerciseConfigError, ExerciseServiceError};

/// Production writing-service endpoint.
pub const DEFAULT_BASE_URL: &str =
    "https://alpha-essay-writing-production-23951028ed84.herokuapp.com";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where and how `ExerciseService` reaches the writing service.
#[derive(Clone, Debug)]
pub struct ExerciseServiceConfig {
    base_url: Url,
    timeout: Duration,
}

impl ExerciseServiceConfig {
    /// Validate a base URL and timeout into a config.
    ///
    /// # Errors
    ///
    /// Returns `ExerciseConfigError::InvalidBaseUrl` when the URL does not
    /// parse, and `InvalidTimeout` for a zero timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ExerciseConfigError> {
        let trimmed = base_url.trim();
        let base_url = Url::parse(trimmed).map_err(|_| ExerciseConfigError::InvalidBaseUrl {
            raw: trimmed.to_string(),
        })?;
        if timeout.is_zero() {
            return Err(ExerciseConfigError::InvalidTimeout {
                raw: "0".to_string(),
            });
        }
        Ok(Self { base_url, timeout })
    }

    /// Read `WRITING_API_BASE_URL` and `WRITING_API_TIMEOUT_SECS`, falling
    /// back to the built-in endpoint and a 30 second timeout.
    ///
    /// # Errors
    ///
    /// Returns `ExerciseConfigError` when either variable is set but invalid.
    pub fn from_env() -> Result<Self, ExerciseConfigError> {
        let base_url =
            env::var("WRITING_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let timeout = match env::var("WRITING_API_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs: u64 =
                    raw.trim()
                        .parse()
                        .map_err(|_| ExerciseConfigError::InvalidTimeout { raw: raw.clone() })?;
                Duration::from_secs(secs)
            }
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };
        Self::new(&base_url, timeout)
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// The two writing-service operations the app depends on.
///
/// Views take this trait as `Arc<dyn ExerciseApi>` so tests can substitute a
/// scripted implementation for the HTTP client.
#[async_trait]
pub trait ExerciseApi: Send + Sync {
    /// Ask the service to generate a question for one activity.
    async fn generate_question(
        &self,
        activity: ActivityKind,
        student: &StudentProfile,
    ) -> Result<Question, ExerciseServiceError>;

    /// Submit an answer together with the question's opaque activity payload.
    async fn evaluate_answer(
        &self,
        answer: &str,
        activity_payload: &Value,
        student: &StudentProfile,
    ) -> Result<Evaluation, ExerciseServiceError>;
}

/// HTTP gateway to the writing service.
#[derive(Clone)]
pub struct ExerciseService {
    client: Client,
    config: ExerciseServiceConfig,
}

impl ExerciseService {
    /// Build the gateway with a pooled client that applies the configured
    /// timeout to every request.
    ///
    /// # Errors
    ///
    /// Returns the underlying error when the HTTP client cannot be built.
    pub fn new(config: ExerciseServiceConfig) -> Result<Self, ExerciseServiceError> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self { client, config })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{path}",
            self.config.base_url().as_str().trim_end_matches('/')
        )
    }

    async fn post_json<T>(
        &self,
        path: &str,
        payload: &impl Serialize,
    ) -> Result<T, ExerciseServiceError>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(path);
        debug!("POST {url}");

        let response = self.client.post(&url).json(payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("writing service returned {status} for {url}");
            return Err(ExerciseServiceError::HttpStatus(status));
        }

        let body: Value = response.json().await?;
        if let Some(message) = service_error_message(&body) {
            warn!("writing service reported an error for {url}");
            return Err(ExerciseServiceError::Service(message));
        }

        serde_json::from_value(body).map_err(ExerciseServiceError::Decode)
    }
}

#[async_trait]
impl ExerciseApi for ExerciseService {
    async fn generate_question(
        &self,
        activity: ActivityKind,
        student: &StudentProfile,
    ) -> Result<Question, ExerciseServiceError> {
        debug!("requesting question for {activity}");
        let payload = GenerateRequest {
            activity_type: activity,
            student,
        };
        self.post_json("generate", &payload).await
    }

    async fn evaluate_answer(
        &self,
        answer: &str,
        activity_payload: &Value,
        student: &StudentProfile,
    ) -> Result<Evaluation, ExerciseServiceError> {
        let payload = EvaluateRequest {
            answer: AnswerBody { response: answer },
            activity: activity_payload,
            student,
        };
        self.post_json("evaluate", &payload).await
    }
}

/// The service signals application errors as `{"error": "..."}` inside an
/// otherwise successful response. A present, non-empty `error` string wins
/// over everything else in the body.
fn service_error_message(body: &Value) -> Option<String> {
    match body.get("error") {
        Some(Value::String(message)) if !message.is_empty() => Some(message.clone()),
        _ => None,
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    activity_type: ActivityKind,
    student: &'a StudentProfile,
}

#[derive(Debug, Serialize)]
struct EvaluateRequest<'a> {
    answer: AnswerBody<'a>,
    activity: &'a Value,
    student: &'a StudentProfile,
}

#[derive(Debug, Serialize)]
struct AnswerBody<'a> {
    #[serde(rename = "RESPONSE")]
    response: &'a str,
}
