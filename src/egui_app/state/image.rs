use std::path::PathBuf;

use crate::inference::PredictionResult;
use crate::preview::ImagePreview;

/// File chosen through the dialog or a drop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedImage {
    pub path: PathBuf,
    /// File name shown in the panel.
    pub name: String,
    /// MIME type the platform reported for a drop. Uploads otherwise sniff the content.
    pub reported_mime: Option<String>,
}

/// UI state for the image analysis panel.
#[derive(Clone, Debug, Default)]
pub struct ImagePanelState {
    pub file: Option<SelectedImage>,
    pub preview: Option<ImagePreview>,
    /// Bumped whenever `preview` changes so the renderer can refresh its texture.
    pub preview_revision: u64,
    /// True while the preview job for `file` is running.
    pub preview_loading: bool,
    pub preview_error: Option<String>,
    pub prediction: Option<PredictionResult>,
    /// True while an analysis request is in flight.
    pub loading: bool,
    pub error: Option<String>,
    /// Files are hovering over the window.
    pub drop_hovered: bool,
}
