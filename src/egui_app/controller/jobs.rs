use std::{
    path::PathBuf,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::{self, Receiver, Sender},
    },
    thread,
};

use tracing::debug;

use crate::inference::{
    AnomalyResult, ImageUpload, InferenceBackend, InferenceError, PredictionResult,
};
use crate::preview::{self, ImagePreview, PreviewError};
use crate::sensors::SensorInput;

type TryRecvError = std::sync::mpsc::TryRecvError;

pub(crate) enum JobMessage {
    PreviewLoaded(PreviewLoadResult),
    ImageAnalyzed(ImageAnalysisResult),
    SensorAnalyzed(SensorAnalysisResult),
}

#[derive(Debug)]
pub(crate) struct PreviewLoadResult {
    pub(crate) request_id: u64,
    pub(crate) path: PathBuf,
    pub(crate) result: Result<ImagePreview, PreviewError>,
}

#[derive(Debug)]
pub(crate) struct ImageAnalysisResult {
    pub(crate) request_id: u64,
    pub(crate) result: Result<PredictionResult, InferenceError>,
}

#[derive(Debug)]
pub(crate) struct SensorAnalysisResult {
    pub(crate) request_id: u64,
    /// Values captured when the request was submitted.
    pub(crate) input: SensorInput,
    pub(crate) result: Result<AnomalyResult, InferenceError>,
}

#[derive(Debug)]
struct PendingRequest {
    request_id: u64,
    cancel: Arc<AtomicBool>,
}

/// At most one outstanding request of a kind.
///
/// Results carry the id they were started with; only the pending id is
/// accepted, so anything finishing after a cancel or a newer request is stale.
#[derive(Debug, Default)]
pub(crate) struct RequestSlot {
    pending: Option<PendingRequest>,
    next_request_id: u64,
}

impl RequestSlot {
    /// Claim the slot, or `None` when a request is already pending.
    pub(crate) fn try_begin(&mut self) -> Option<(u64, Arc<AtomicBool>)> {
        if self.pending.is_some() {
            return None;
        }
        Some(self.claim())
    }

    /// Cancel whatever is pending and claim the slot.
    pub(crate) fn supersede(&mut self) -> (u64, Arc<AtomicBool>) {
        self.cancel();
        self.claim()
    }

    /// Returns true when a pending request was cancelled.
    pub(crate) fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => {
                pending.cancel.store(true, Ordering::Relaxed);
                true
            }
            None => false,
        }
    }

    /// Release the slot if `request_id` is the pending request.
    pub(crate) fn complete(&mut self, request_id: u64) -> bool {
        match &self.pending {
            Some(pending) if pending.request_id == request_id => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn claim(&mut self) -> (u64, Arc<AtomicBool>) {
        self.next_request_id = self.next_request_id.wrapping_add(1).max(1);
        let cancel = Arc::new(AtomicBool::new(false));
        self.pending = Some(PendingRequest {
            request_id: self.next_request_id,
            cancel: Arc::clone(&cancel),
        });
        (self.next_request_id, cancel)
    }
}

pub(crate) struct ControllerJobs {
    backend: Arc<dyn InferenceBackend>,
    message_tx: Sender<JobMessage>,
    message_rx: Receiver<JobMessage>,
    pub(super) preview: RequestSlot,
    pub(super) image: RequestSlot,
    pub(super) sensor: RequestSlot,
}

impl ControllerJobs {
    pub(super) fn new(backend: Arc<dyn InferenceBackend>) -> Self {
        let (message_tx, message_rx) = mpsc::channel();
        Self {
            backend,
            message_tx,
            message_rx,
            preview: RequestSlot::default(),
            image: RequestSlot::default(),
            sensor: RequestSlot::default(),
        }
    }

    pub(super) fn try_recv_message(&self) -> Result<JobMessage, TryRecvError> {
        self.message_rx.try_recv()
    }

    /// Decode a preview for `path`, replacing any preview still loading.
    pub(super) fn begin_preview_load(&mut self, path: PathBuf) -> u64 {
        let (request_id, cancel) = self.preview.supersede();
        spawn_cancellable(self.message_tx.clone(), cancel, move || {
            let result = preview::load_preview(&path);
            JobMessage::PreviewLoaded(PreviewLoadResult {
                request_id,
                path,
                result,
            })
        });
        request_id
    }

    /// Upload the image at `path`, unless an image request is already pending.
    ///
    /// `reported_mime` replaces the sniffed content type when present.
    pub(super) fn begin_image_analysis(
        &mut self,
        path: PathBuf,
        reported_mime: Option<String>,
    ) -> Option<u64> {
        let (request_id, cancel) = self.image.try_begin()?;
        let backend = Arc::clone(&self.backend);
        spawn_cancellable(self.message_tx.clone(), cancel, move || {
            let result = ImageUpload::from_path(&path).and_then(|mut upload| {
                if let Some(mime) = reported_mime {
                    upload.mime = mime;
                }
                backend.predict_image(&upload)
            });
            JobMessage::ImageAnalyzed(ImageAnalysisResult { request_id, result })
        });
        Some(request_id)
    }

    /// Submit `input`, unless a sensor request is already pending.
    pub(super) fn begin_sensor_analysis(&mut self, input: SensorInput) -> Option<u64> {
        let (request_id, cancel) = self.sensor.try_begin()?;
        let backend = Arc::clone(&self.backend);
        spawn_cancellable(self.message_tx.clone(), cancel, move || {
            let result = backend.predict_sensor(&input);
            JobMessage::SensorAnalyzed(SensorAnalysisResult {
                request_id,
                input,
                result,
            })
        });
        Some(request_id)
    }

    pub(super) fn has_pending(&self) -> bool {
        self.preview.is_pending() || self.image.is_pending() || self.sensor.is_pending()
    }

    /// Returns true when anything was still in flight.
    pub(super) fn cancel_all(&mut self) -> bool {
        let preview = self.preview.cancel();
        let image = self.image.cancel();
        let sensor = self.sensor.cancel();
        preview || image || sensor
    }
}

/// Run `work` on a worker thread and post its message unless cancelled.
///
/// A blocking call cannot be interrupted; cancellation skips the call when it
/// has not started and drops the result when it has.
fn spawn_cancellable<F>(tx: Sender<JobMessage>, cancel: Arc<AtomicBool>, work: F)
where
    F: FnOnce() -> JobMessage + Send + 'static,
{
    thread::spawn(move || {
        if cancel.load(Ordering::Relaxed) {
            return;
        }
        let message = work();
        if cancel.load(Ordering::Relaxed) {
            debug!("Dropping result of cancelled job");
            return;
        }
        let _ = tx.send(message);
    });
}
