//! Blocking HTTP client for the inference endpoints.

use std::path::PathBuf;

use crate::config::ApiSettings;
use crate::http_client::{self, HttpTimeouts};
use crate::sensors::SensorInput;

use reqwest::blocking::multipart::{Form, Part};

use super::types::{AnomalyResult, ImageUpload, PredictionResult, SensorRequest};

const MAX_RESPONSE_BYTES: usize = 64 * 1024;
const FILE_FIELD: &str = "file";

/// Something that can answer image and sensor inference requests.
///
/// Calls block; the dashboard runs them on worker threads.
pub trait InferenceBackend: Send + Sync {
    fn predict_image(&self, upload: &ImageUpload) -> Result<PredictionResult, InferenceError>;
    fn predict_sensor(&self, input: &SensorInput) -> Result<AnomalyResult, InferenceError>;
}

/// Failure kinds for a single inference call.
///
/// The dashboard shows one generic message per panel; the kind is kept for
/// logs and tests.
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("Inference service unreachable: {0}")]
    Unreachable(String),
    #[error("Inference service returned HTTP {status}: {body}")]
    Server { status: u16, body: String },
    #[error("Malformed inference response: {0}")]
    MalformedResponse(String),
    /// The request could not be built (HTTP client setup or an invalid content type).
    #[error("Failed to prepare inference request: {0}")]
    Request(String),
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl InferenceError {
    /// Short machine-friendly tag used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unreachable(_) => "unreachable",
            Self::Server { .. } => "server",
            Self::MalformedResponse(_) => "malformed_response",
            Self::Request(_) => "request",
            Self::Io { .. } => "io",
        }
    }
}

/// [`InferenceBackend`] backed by the HTTP service described in [`ApiSettings`].
#[derive(Clone)]
pub struct HttpInferenceClient {
    agent: ureq::Agent,
    uploads: reqwest::blocking::Client,
    image_url: String,
    sensor_url: String,
}

impl HttpInferenceClient {
    pub fn new(settings: &ApiSettings) -> Result<Self, InferenceError> {
        let timeouts = HttpTimeouts {
            connect: settings.connect_timeout(),
            io: settings.request_timeout(),
        };
        let uploads = http_client::upload_client(timeouts)
            .map_err(|err| InferenceError::Request(err.to_string()))?;
        Ok(Self {
            agent: http_client::agent(timeouts),
            uploads,
            image_url: settings.image_endpoint(),
            sensor_url: settings.sensor_endpoint(),
        })
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn sensor_url(&self) -> &str {
        &self.sensor_url
    }
}

impl InferenceBackend for HttpInferenceClient {
    fn predict_image(&self, upload: &ImageUpload) -> Result<PredictionResult, InferenceError> {
        let part = Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(&upload.mime)
            .map_err(|err| InferenceError::Request(format!("{}: {err}", upload.mime)))?;
        let form = Form::new().part(FILE_FIELD, part);
        tracing::debug!(
            "POST {} ({} bytes, {})",
            self.image_url,
            upload.bytes.len(),
            upload.mime
        );
        let response = self
            .uploads
            .post(&self.image_url)
            .header(reqwest::header::ACCEPT, "application/json")
            .multipart(form)
            .send();
        let text = read_upload_body(response)?;
        parse_prediction(&text)
    }

    fn predict_sensor(&self, input: &SensorInput) -> Result<AnomalyResult, InferenceError> {
        tracing::debug!("POST {} {:?}", self.sensor_url, input);
        let response = self
            .agent
            .post(&self.sensor_url)
            .set("Accept", "application/json")
            .send_json(SensorRequest::from(input));
        let text = read_body(response)?;
        parse_anomaly(&text)
    }
}

fn read_body(response: Result<ureq::Response, ureq::Error>) -> Result<String, InferenceError> {
    match response {
        Ok(response) => http_client::read_response_text(response, MAX_RESPONSE_BYTES).map_err(
            |err| match err.kind() {
                std::io::ErrorKind::InvalidData => {
                    InferenceError::MalformedResponse(err.to_string())
                }
                _ => InferenceError::Unreachable(err.to_string()),
            },
        ),
        Err(ureq::Error::Status(status, response)) => {
            let body = http_client::read_response_text(response, MAX_RESPONSE_BYTES)
                .unwrap_or_else(|err| err.to_string());
            Err(InferenceError::Server { status, body })
        }
        Err(ureq::Error::Transport(err)) => Err(InferenceError::Unreachable(err.to_string())),
    }
}

fn read_upload_body(
    response: Result<reqwest::blocking::Response, reqwest::Error>,
) -> Result<String, InferenceError> {
    let response = response.map_err(|err| InferenceError::Unreachable(err.to_string()))?;
    let status = response.status();
    if !status.is_success() {
        let body = http_client::read_upload_response_text(response, MAX_RESPONSE_BYTES)
            .unwrap_or_else(|err| err.to_string());
        return Err(InferenceError::Server {
            status: status.as_u16(),
            body,
        });
    }
    http_client::read_upload_response_text(response, MAX_RESPONSE_BYTES).map_err(|err| {
        match err.kind() {
            std::io::ErrorKind::InvalidData => InferenceError::MalformedResponse(err.to_string()),
            _ => InferenceError::Unreachable(err.to_string()),
        }
    })
}

pub(crate) fn parse_prediction(body: &str) -> Result<PredictionResult, InferenceError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(InferenceError::MalformedResponse("empty response body".into()));
    }
    let parsed: PredictionResult = serde_json::from_str(trimmed)
        .map_err(|err| InferenceError::MalformedResponse(format!("{err}: {trimmed}")))?;
    parsed.validated()
}

pub(crate) fn parse_anomaly(body: &str) -> Result<AnomalyResult, InferenceError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(InferenceError::MalformedResponse("empty response body".into()));
    }
    let parsed: AnomalyResult = serde_json::from_str(trimmed)
        .map_err(|err| InferenceError::MalformedResponse(format!("{err}: {trimmed}")))?;
    parsed.validated()
}
