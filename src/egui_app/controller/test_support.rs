use super::*;
use crate::inference::{AnomalyResult, ImageUpload, InferenceError, PredictionResult, QualityLabel};
use crate::sensors::SensorInput;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

/// Scripted backend that records calls and can hold them until released.
#[derive(Default)]
pub(super) struct FakeBackend {
    image_calls: AtomicUsize,
    sensor_calls: AtomicUsize,
    image_responses: Mutex<VecDeque<Result<PredictionResult, InferenceError>>>,
    sensor_responses: Mutex<VecDeque<Result<AnomalyResult, InferenceError>>>,
    uploads: Mutex<Vec<ImageUpload>>,
    sensor_inputs: Mutex<Vec<SensorInput>>,
    gate: Option<Mutex<Receiver<()>>>,
}

impl FakeBackend {
    /// Backend whose calls block until the returned sender releases them.
    pub(super) fn gated() -> (Self, Sender<()>) {
        let (tx, rx) = mpsc::channel();
        let backend = Self {
            gate: Some(Mutex::new(rx)),
            ..Self::default()
        };
        (backend, tx)
    }

    pub(super) fn push_image(&self, response: Result<PredictionResult, InferenceError>) {
        self.image_responses.lock().unwrap().push_back(response);
    }

    pub(super) fn push_sensor(&self, response: Result<AnomalyResult, InferenceError>) {
        self.sensor_responses.lock().unwrap().push_back(response);
    }

    pub(super) fn image_calls(&self) -> usize {
        self.image_calls.load(Ordering::SeqCst)
    }

    pub(super) fn sensor_calls(&self) -> usize {
        self.sensor_calls.load(Ordering::SeqCst)
    }

    pub(super) fn uploads(&self) -> Vec<ImageUpload> {
        self.uploads.lock().unwrap().clone()
    }

    pub(super) fn sensor_inputs(&self) -> Vec<SensorInput> {
        self.sensor_inputs.lock().unwrap().clone()
    }

    fn wait_for_release(&self) {
        if let Some(gate) = &self.gate {
            let _ = gate.lock().unwrap().recv_timeout(Duration::from_secs(5));
        }
    }
}

impl InferenceBackend for FakeBackend {
    fn predict_image(&self, upload: &ImageUpload) -> Result<PredictionResult, InferenceError> {
        self.image_calls.fetch_add(1, Ordering::SeqCst);
        self.uploads.lock().unwrap().push(upload.clone());
        self.wait_for_release();
        self.image_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(InferenceError::Unreachable("no scripted response".into())))
    }

    fn predict_sensor(&self, input: &SensorInput) -> Result<AnomalyResult, InferenceError> {
        self.sensor_calls.fetch_add(1, Ordering::SeqCst);
        self.sensor_inputs.lock().unwrap().push(*input);
        self.wait_for_release();
        self.sensor_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(InferenceError::Unreachable("no scripted response".into())))
    }
}

pub(super) fn controller_with(backend: Arc<FakeBackend>) -> EguiController {
    EguiController::new(DashboardConfig::default(), backend)
}

/// Tick until `done` holds, failing the test after a few seconds.
pub(super) fn pump_until(controller: &mut EguiController, done: impl Fn(&EguiController) -> bool) {
    for _ in 0..500 {
        controller.poll_background_jobs();
        if done(controller) {
            return;
        }
        thread::sleep(Duration::from_millis(10));
    }
    panic!("controller did not reach the expected state in time");
}

/// Give workers time to post anything they still might, then drain it.
pub(super) fn settle(controller: &mut EguiController) {
    thread::sleep(Duration::from_millis(50));
    controller.poll_background_jobs();
}

/// PNG bytes under `name`, whatever its extension says.
pub(super) fn write_png(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    let mut img = image::RgbaImage::new(4, 4);
    for pixel in img.pixels_mut() {
        *pixel = image::Rgba([90, 140, 200, 255]);
    }
    img.save_with_format(&path, image::ImageFormat::Png).unwrap();
    path
}

pub(super) fn good(confidence: f64) -> PredictionResult {
    PredictionResult {
        label: QualityLabel::Good,
        confidence,
    }
}

pub(super) fn defective(confidence: f64) -> PredictionResult {
    PredictionResult {
        label: QualityLabel::Defective,
        confidence,
    }
}

pub(super) fn anomaly(anomaly: bool, reconstruction_error: f64) -> AnomalyResult {
    AnomalyResult {
        anomaly,
        reconstruction_error,
    }
}

pub(super) fn server_error() -> InferenceError {
    InferenceError::Server {
        status: 500,
        body: "boom".into(),
    }
}
