//! Factory quality-control dashboard: image defect checks and sensor anomaly
//! monitoring against an external inference service.

/// App directory resolution.
pub mod app_dirs;
/// Headless batch runs used by the command-line tool.
pub mod batch;
/// Persisted dashboard configuration.
pub mod config;
/// egui dashboard: controller, state and renderer.
pub mod egui_app;
pub(crate) mod http_client;
/// Client and types for the inference service.
pub mod inference;
/// Tracing setup shared by the binaries.
pub mod logging;
/// Local image previews.
pub mod preview;
/// Sensor readings and bounded history.
pub mod sensors;
/// Static showcase content.
pub mod showcase;
