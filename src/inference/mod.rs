//! Client for the external quality-control inference service.
//!
//! The service exposes two endpoints: image classification
//! (`/predict-image/`, multipart upload) and sensor anomaly detection
//! (`/predict-sensor/`, JSON body). Everything behind them is opaque.

mod api;
mod types;

pub use api::{HttpInferenceClient, InferenceBackend, InferenceError};
pub use types::{AnomalyResult, ImageUpload, PredictionResult, QualityLabel};
