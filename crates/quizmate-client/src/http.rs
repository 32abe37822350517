//! HTTP implementation of the quiz service.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use quizmate_core::error::ServiceError;
use quizmate_core::model::{Quiz, QuizSummary, SubmissionRecord};
use quizmate_core::traits::{BasicResults, QuizService, RawSubmitResponse};

use crate::config::ClientConfig;

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Quiz backend client over HTTP.
pub struct HttpQuizService {
    base_url: String,
    token: Option<String>,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl HttpQuizService {
    pub fn new(base_url: Option<String>, token: Option<String>) -> Self {
        Self::with_timeout(base_url, token, DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(base_url: Option<String>, token: Option<String>, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("failed to build HTTP client");

        Self {
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            token,
            timeout_secs,
            client,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::with_timeout(
            Some(config.base_url.clone()),
            config.token.clone(),
            config.timeout_secs,
        )
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.authorize(self.client.get(format!("{}{path}", self.base_url)))
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.authorize(self.client.post(format!("{}{path}", self.base_url)))
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn send_error(&self, err: reqwest::Error) -> ServiceError {
        if err.is_timeout() {
            ServiceError::Timeout(self.timeout_secs)
        } else {
            ServiceError::Transport(err.to_string())
        }
    }

    /// Map backend error statuses onto the service taxonomy.
    async fn check(&self, response: reqwest::Response) -> Result<reqwest::Response, ServiceError> {
        let status = response.status().as_u16();
        if status < 400 {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ApiErrorBody>(&body)
            .map(|e| e.detail)
            .unwrap_or(body);

        Err(match status {
            400 => ServiceError::BadRequest(detail),
            401 => ServiceError::AuthenticationFailed(detail),
            404 => ServiceError::NotFound(detail),
            _ => ServiceError::Api {
                status,
                message: detail,
            },
        })
    }
}

/// The backend wraps the submission list in an `answers` envelope.
#[derive(Serialize)]
struct SubmitBody<'a> {
    answers: &'a [SubmissionRecord],
}

#[derive(Deserialize)]
struct ApiErrorBody {
    detail: String,
}

#[async_trait]
impl QuizService for HttpQuizService {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self))]
    async fn fetch_quiz(&self, quiz_id: i64) -> Result<Quiz, ServiceError> {
        let response = self
            .get(&format!("/quiz/{quiz_id}"))
            .send()
            .await
            .map_err(|e| self.send_error(e))?;
        let response = self.check(response).await?;
        response.json().await.map_err(|e| ServiceError::Api {
            status: 0,
            message: format!("failed to parse quiz: {e}"),
        })
    }

    #[instrument(skip(self, answers), fields(count = answers.len()))]
    async fn submit_attempt(
        &self,
        quiz_id: i64,
        answers: &[SubmissionRecord],
    ) -> Result<RawSubmitResponse, ServiceError> {
        let response = self
            .post(&format!("/quiz/{quiz_id}/submit"))
            .json(&SubmitBody { answers })
            .send()
            .await
            .map_err(|e| self.send_error(e))?;
        let response = self.check(response).await?;
        response.json().await.map_err(|e| ServiceError::Api {
            status: 0,
            message: format!("failed to parse submission response: {e}"),
        })
    }

    #[instrument(skip(self))]
    async fn fetch_basic_results(&self, quiz_id: i64) -> Result<BasicResults, ServiceError> {
        let response = self
            .get(&format!("/quiz/{quiz_id}/results"))
            .send()
            .await
            .map_err(|e| self.send_error(e))?;
        let response = self.check(response).await?;
        response.json().await.map_err(|e| ServiceError::Api {
            status: 0,
            message: format!("failed to parse results: {e}"),
        })
    }

    #[instrument(skip(self))]
    async fn export_attempt(&self, quiz_id: i64) -> Result<Vec<u8>, ServiceError> {
        let response = self
            .get(&format!("/quiz/{quiz_id}/export/docx"))
            .send()
            .await
            .map_err(|e| self.send_error(e))?;
        let response = self.check(response).await?;
        let bytes = response.bytes().await.map_err(|e| self.send_error(e))?;
        Ok(bytes.to_vec())
    }

    #[instrument(skip(self))]
    async fn list_quizzes(&self) -> Result<Vec<QuizSummary>, ServiceError> {
        let response = self
            .get("/quiz/")
            .send()
            .await
            .map_err(|e| self.send_error(e))?;
        let response = self.check(response).await?;
        response.json().await.map_err(|e| ServiceError::Api {
            status: 0,
            message: format!("failed to parse quiz list: {e}"),
        })
    }
}
