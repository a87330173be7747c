use super::EguiController;
use super::jobs::JobMessage;

impl EguiController {
    pub(in crate::egui_app::controller) fn poll_background_jobs(&mut self) {
        loop {
            let message = match self.jobs.try_recv_message() {
                Ok(message) => message,
                Err(
                    std::sync::mpsc::TryRecvError::Empty
                    | std::sync::mpsc::TryRecvError::Disconnected,
                ) => {
                    break;
                }
            };

            match message {
                JobMessage::PreviewLoaded(message) => self.apply_preview_loaded(message),
                JobMessage::ImageAnalyzed(message) => self.apply_image_analysis(message),
                JobMessage::SensorAnalyzed(message) => self.apply_sensor_analysis(message),
            }
        }
    }
}
