use std::path::PathBuf;

use rfd::FileDialog;
use tracing::{debug, info, warn};

use super::EguiController;
use super::jobs::{ImageAnalysisResult, PreviewLoadResult};
use crate::egui_app::state::{ImagePanelState, SelectedImage};
use crate::egui_app::ui::style::StatusTone;
use crate::egui_app::view_model;
use crate::preview::{self, PICKER_EXTENSIONS};

impl EguiController {
    /// Open the native file picker and select the chosen image.
    pub fn pick_image_via_dialog(&mut self) {
        let Some(path) = FileDialog::new()
            .add_filter("Images", PICKER_EXTENSIONS)
            .pick_file()
        else {
            return;
        };
        self.select_image(path);
    }

    /// Select an image chosen through the picker.
    ///
    /// The dialog filter is the only type check on this path.
    pub fn select_image(&mut self, path: PathBuf) {
        self.load_selected_image(path, None);
    }

    /// Accept a file dropped on the window. Returns false when it was rejected.
    pub fn drop_image(&mut self, path: Option<PathBuf>, reported_mime: &str) -> bool {
        self.ui.image.drop_hovered = false;
        let Some(mime) = preview::dropped_image_mime(reported_mime, path.as_deref()) else {
            self.set_status("Only image files can be dropped here", StatusTone::Warning);
            return false;
        };
        let Some(path) = path else {
            self.set_status("Dropped image has no file path", StatusTone::Warning);
            return false;
        };
        let reported = (!reported_mime.trim().is_empty()).then_some(mime);
        self.load_selected_image(path, reported);
        true
    }

    pub fn set_drop_hovered(&mut self, hovered: bool) {
        self.ui.image.drop_hovered = hovered;
    }

    fn load_selected_image(&mut self, path: PathBuf, reported_mime: Option<String>) {
        if self.jobs.image.cancel() {
            debug!("Discarding in-flight analysis of the previous image");
        }
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        info!(path = %path.display(), mime = ?reported_mime, "Selected image");
        let state = &mut self.ui.image;
        state.file = Some(SelectedImage {
            path: path.clone(),
            name: name.clone(),
            reported_mime,
        });
        state.prediction = None;
        state.error = None;
        state.loading = false;
        state.preview = None;
        state.preview_error = None;
        state.preview_loading = true;
        state.preview_revision = state.preview_revision.wrapping_add(1);
        self.jobs.begin_preview_load(path);
        self.set_status(format!("Selected {name}"), StatusTone::Info);
    }

    /// Send the selected image for classification.
    ///
    /// No-op without a selection or while a request is already in flight.
    pub fn analyze_image(&mut self) {
        let Some(file) = self.ui.image.file.clone() else {
            return;
        };
        let Some(request_id) = self
            .jobs
            .begin_image_analysis(file.path.clone(), file.reported_mime.clone())
        else {
            debug!("Image analysis already in flight");
            return;
        };
        debug!(request_id, path = %file.path.display(), "Started image analysis");
        self.ui.image.loading = true;
        self.ui.image.error = None;
        self.set_status(format!("Analyzing {}...", file.name), StatusTone::Busy);
    }

    /// Clear the selection, preview and result, dropping any pending response.
    pub fn reset_image(&mut self) {
        let preview = self.jobs.preview.cancel();
        let analysis = self.jobs.image.cancel();
        if preview || analysis {
            debug!("Image reset discarded pending work");
        }
        let revision = self.ui.image.preview_revision.wrapping_add(1);
        self.ui.image = ImagePanelState {
            preview_revision: revision,
            ..ImagePanelState::default()
        };
        self.set_status("Image cleared", StatusTone::Idle);
    }

    pub(super) fn apply_preview_loaded(&mut self, message: PreviewLoadResult) {
        if !self.jobs.preview.complete(message.request_id) {
            debug!(request_id = message.request_id, "Discarding stale preview");
            return;
        }
        let state = &mut self.ui.image;
        state.preview_loading = false;
        match message.result {
            Ok(preview) => {
                state.preview = Some(preview);
                state.preview_revision = state.preview_revision.wrapping_add(1);
            }
            Err(err) => {
                warn!(path = %message.path.display(), "Preview failed: {err}");
                state.preview_error = Some(err.to_string());
            }
        }
    }

    pub(super) fn apply_image_analysis(&mut self, message: ImageAnalysisResult) {
        if !self.jobs.image.complete(message.request_id) {
            debug!(request_id = message.request_id, "Discarding stale image analysis");
            return;
        }
        self.ui.image.loading = false;
        match message.result {
            Ok(prediction) => {
                info!(
                    label = %prediction.label,
                    confidence = prediction.confidence,
                    "Image analyzed"
                );
                let summary = format!(
                    "{} ({} confidence)",
                    view_model::quality_headline(&prediction),
                    view_model::confidence_percent(prediction.confidence)
                );
                let tone = if prediction.label.is_good() {
                    StatusTone::Info
                } else {
                    StatusTone::Warning
                };
                self.ui.image.prediction = Some(prediction);
                self.set_status(summary, tone);
            }
            Err(err) => {
                warn!(kind = err.kind(), "Image analysis failed: {err}");
                self.ui.image.error = Some(view_model::IMAGE_FAILURE_MESSAGE.to_string());
                self.set_status(view_model::IMAGE_FAILURE_MESSAGE, StatusTone::Error);
            }
        }
    }
}
