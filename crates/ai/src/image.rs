//! Image-generation port and the Black Forest Labs Flux client.
//!
//! Flux is asynchronous: `POST {base}/v1/{model}` queues a job and returns
//! its id, then `GET {base}/v1/get_result?id=...` is polled until the job
//! reports `Ready` (with the image URL in `result.sample`) or a terminal
//! failure.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::chat::ensure_success;
use crate::config::ImageModelConfig;
use crate::AiError;

/// Default square output size.
pub const DEFAULT_IMAGE_SIZE: u32 = 1024;
/// Flux accepts dimensions between these bounds, in multiples of 32.
pub const MIN_IMAGE_SIZE: u32 = 256;
pub const MAX_IMAGE_SIZE: u32 = 1440;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub prompt: String,
    pub width: u32,
    pub height: u32,
    pub seed: Option<i64>,
}

impl ImageRequest {
    /// Build a request, snapping dimensions into the vendor's accepted range.
    pub fn new(prompt: impl Into<String>, width: Option<u32>, height: Option<u32>) -> Self {
        Self {
            prompt: prompt.into(),
            width: snap_dimension(width.unwrap_or(DEFAULT_IMAGE_SIZE)),
            height: snap_dimension(height.unwrap_or(DEFAULT_IMAGE_SIZE)),
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: Option<i64>) -> Self {
        self.seed = seed;
        self
    }
}

/// Clamp to the accepted range and round down to a multiple of 32.
pub fn snap_dimension(value: u32) -> u32 {
    let clamped = value.clamp(MIN_IMAGE_SIZE, MAX_IMAGE_SIZE);
    clamped - clamped % 32
}

/// A finished image job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedArt {
    pub job_id: String,
    pub url: String,
    pub seed: Option<i64>,
}

#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, request: &ImageRequest) -> Result<GeneratedArt, AiError>;
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct SubmitRequest<'a> {
    prompt: &'a str,
    width: u32,
    height: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct PollResponse {
    status: String,
    result: Option<PollResult>,
}

#[derive(Debug, Deserialize)]
struct PollResult {
    sample: Option<String>,
    seed: Option<i64>,
}

/// Where a polled job stands.
#[derive(Debug, Clone, PartialEq, Eq)]
enum JobState {
    Ready { url: String, seed: Option<i64> },
    Pending,
    Failed(String),
}

fn classify(poll: PollResponse) -> JobState {
    match poll.status.as_str() {
        "Ready" => match poll.result {
            Some(PollResult {
                sample: Some(url),
                seed,
            }) => JobState::Ready { url, seed },
            _ => JobState::Failed("Job reported Ready without an image URL".into()),
        },
        "Error" | "Content Moderated" | "Request Moderated" | "Task not found" => {
            JobState::Failed(poll.status)
        }
        // "Pending" and any status this client does not know yet.
        _ => JobState::Pending,
    }
}

// ---------------------------------------------------------------------------
// FluxClient
// ---------------------------------------------------------------------------

pub struct FluxClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    poll_attempts: u32,
    poll_interval: Duration,
}

impl FluxClient {
    pub fn new(config: &ImageModelConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            poll_attempts: config.poll_attempts.max(1),
            poll_interval: config.poll_interval,
        }
    }

    async fn submit(&self, request: &ImageRequest) -> Result<String, AiError> {
        let body = SubmitRequest {
            prompt: &request.prompt,
            width: request.width,
            height: request.height,
            seed: request.seed,
        };
        let response = self
            .client
            .post(format!("{}/v1/{}", self.base_url, self.model))
            .header("x-key", &self.api_key)
            .json(&body)
            .send()
            .await?;
        let response = ensure_success(response).await?;
        let submitted: SubmitResponse = response
            .json()
            .await
            .map_err(|e| AiError::InvalidResponse(e.to_string()))?;
        Ok(submitted.id)
    }

    async fn poll(&self, job_id: &str) -> Result<JobState, AiError> {
        let response = self
            .client
            .get(format!("{}/v1/get_result", self.base_url))
            .query(&[("id", job_id)])
            .header("x-key", &self.api_key)
            .send()
            .await?;
        let response = ensure_success(response).await?;
        let poll: PollResponse = response
            .json()
            .await
            .map_err(|e| AiError::InvalidResponse(e.to_string()))?;
        Ok(classify(poll))
    }
}

#[async_trait]
impl ImageGenerator for FluxClient {
    async fn generate(&self, request: &ImageRequest) -> Result<GeneratedArt, AiError> {
        let job_id = self.submit(request).await?;
        tracing::debug!(%job_id, model = %self.model, "Flux job submitted");

        for attempt in 1..=self.poll_attempts {
            tokio::time::sleep(self.poll_interval).await;
            match self.poll(&job_id).await? {
                JobState::Ready { url, seed } => {
                    tracing::info!(%job_id, attempt, "Flux job ready");
                    return Ok(GeneratedArt {
                        job_id,
                        url,
                        seed: seed.or(request.seed),
                    });
                }
                JobState::Failed(reason) => {
                    tracing::warn!(%job_id, attempt, %reason, "Flux job failed");
                    return Err(AiError::GenerationFailed(reason));
                }
                JobState::Pending => {}
            }
        }

        tracing::warn!(%job_id, attempts = self.poll_attempts, "Flux job timed out");
        Err(AiError::Timeout {
            attempts: self.poll_attempts,
        })
    }
}

/// Stand-in used when no API key is configured.
pub struct DisabledImageGenerator;

#[async_trait]
impl ImageGenerator for DisabledImageGenerator {
    async fn generate(&self, _request: &ImageRequest) -> Result<GeneratedArt, AiError> {
        Err(AiError::NotConfigured("Image generation"))
    }
}
