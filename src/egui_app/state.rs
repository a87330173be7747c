//! Shared state types for the egui UI.

mod image;
mod insights;
mod landing;
mod sensor;
mod status;

pub use image::*;
pub use insights::*;
pub use landing::*;
pub use sensor::*;
pub use status::*;

/// Request panel shown in the tab strip.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DashboardTab {
    #[default]
    ImageAnalysis,
    SensorMonitoring,
}

impl DashboardTab {
    pub const ALL: [DashboardTab; 2] = [Self::ImageAnalysis, Self::SensorMonitoring];

    pub fn label(self) -> &'static str {
        match self {
            Self::ImageAnalysis => "Image Analysis",
            Self::SensorMonitoring => "Sensor Monitoring",
        }
    }
}

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug)]
pub struct UiState {
    pub status: StatusBarState,
    pub landing: LandingState,
    pub active_tab: DashboardTab,
    pub image: ImagePanelState,
    pub sensor: SensorPanelState,
    pub insights: InsightsState,
}

impl UiState {
    pub fn new(history_capacity: usize) -> Self {
        Self {
            status: StatusBarState::idle(),
            landing: LandingState::default(),
            active_tab: DashboardTab::default(),
            image: ImagePanelState::default(),
            sensor: SensorPanelState::new(history_capacity),
            insights: InsightsState::default(),
        }
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new(crate::sensors::DEFAULT_HISTORY_CAPACITY)
    }
}
