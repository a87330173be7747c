//! Dashboard controller: owns UI state and drives background inference jobs.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::config::DashboardConfig;
use crate::egui_app::state::*;
use crate::egui_app::ui::style::StatusTone;
use crate::inference::{HttpInferenceClient, InferenceBackend, InferenceError};

mod background_jobs;
mod clock;
mod image_analysis;
mod insights;
mod jobs;
mod sensor_monitoring;

#[cfg(test)]
mod test_support;

use jobs::ControllerJobs;

/// Repaint cadence while a job is outstanding.
const BUSY_REPAINT_INTERVAL: Duration = Duration::from_millis(50);

/// Maintains app state and bridges inference jobs to the egui UI.
pub struct EguiController {
    pub ui: UiState,
    config: DashboardConfig,
    jobs: ControllerJobs,
}

impl EguiController {
    pub fn new(config: DashboardConfig, backend: Arc<dyn InferenceBackend>) -> Self {
        info!(
            image_endpoint = %config.api.image_endpoint(),
            sensor_endpoint = %config.api.sensor_endpoint(),
            "Dashboard controller ready"
        );
        Self {
            ui: UiState::new(config.sensor.history_capacity),
            jobs: ControllerJobs::new(backend),
            config,
        }
    }

    /// Build a controller that talks to the HTTP inference service in `config`.
    pub fn with_http_backend(config: DashboardConfig) -> Result<Self, InferenceError> {
        let backend = Arc::new(HttpInferenceClient::new(&config.api)?);
        Ok(Self::new(config, backend))
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Apply finished background work and advance the clock. Call once per frame.
    pub fn tick(&mut self) {
        self.poll_background_jobs();
        self.tick_clock(Instant::now(), crate::logging::now_local());
    }

    pub fn has_pending_jobs(&self) -> bool {
        self.jobs.has_pending()
    }

    /// How long the UI may sleep before it needs another frame.
    pub fn repaint_after(&self, now: Instant) -> Duration {
        if self.has_pending_jobs() {
            BUSY_REPAINT_INTERVAL
        } else {
            self.clock_refresh_in(now)
        }
    }

    pub fn select_tab(&mut self, tab: DashboardTab) {
        if self.ui.active_tab != tab {
            debug!(tab = tab.label(), "Switched dashboard tab");
            self.ui.active_tab = tab;
        }
    }

    pub fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.ui.status.set(text, tone);
    }
}

impl Drop for EguiController {
    fn drop(&mut self) {
        if self.jobs.cancel_all() {
            warn!("Dashboard closed with requests still in flight; results will be dropped");
        }
    }
}
