use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::InferenceError;
use crate::sensors::SensorInput;

/// Quality verdict returned by the image classifier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QualityLabel {
    Good,
    Defective,
    /// Any label the service adds later; kept verbatim.
    Other(String),
}

impl QualityLabel {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Good => "Good",
            Self::Defective => "Defective",
            Self::Other(label) => label,
        }
    }

    pub fn is_good(&self) -> bool {
        matches!(self, Self::Good)
    }
}

impl From<String> for QualityLabel {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Good" => Self::Good,
            "Defective" => Self::Defective,
            _ => Self::Other(value),
        }
    }
}

impl From<QualityLabel> for String {
    fn from(value: QualityLabel) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for QualityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response of `/predict-image/`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub label: QualityLabel,
    /// Fraction in `[0, 1]`.
    pub confidence: f64,
}

impl PredictionResult {
    pub(crate) fn validated(self) -> Result<Self, InferenceError> {
        if self.label.as_str().trim().is_empty() {
            return Err(InferenceError::MalformedResponse("empty label".into()));
        }
        if !self.confidence.is_finite() || !(0.0..=1.0).contains(&self.confidence) {
            return Err(InferenceError::MalformedResponse(format!(
                "confidence {} outside [0, 1]",
                self.confidence
            )));
        }
        Ok(self)
    }
}

/// Response of `/predict-sensor/`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnomalyResult {
    pub anomaly: bool,
    pub reconstruction_error: f64,
}

impl AnomalyResult {
    pub(crate) fn validated(self) -> Result<Self, InferenceError> {
        if !self.reconstruction_error.is_finite() {
            return Err(InferenceError::MalformedResponse(format!(
                "reconstruction_error {} is not finite",
                self.reconstruction_error
            )));
        }
        Ok(self)
    }
}

/// JSON body of `/predict-sensor/`; the service names temperature `temp`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub(crate) struct SensorRequest {
    pub vibration: f64,
    pub temp: f64,
    pub pressure: f64,
}

impl From<&SensorInput> for SensorRequest {
    fn from(input: &SensorInput) -> Self {
        Self {
            vibration: input.vibration,
            temp: input.temperature,
            pressure: input.pressure,
        }
    }
}

/// Raw image file ready to be sent as the multipart `file` field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Read `path` from disk, guessing the MIME type from content and extension.
    ///
    /// Files over [`crate::preview::MAX_IMAGE_BYTES`] are refused as an I/O error.
    pub fn from_path(path: &Path) -> Result<Self, InferenceError> {
        let bytes = crate::preview::read_image_file(path).map_err(|source| InferenceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mime = crate::preview::guess_mime(path, Some(&bytes));
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self {
            file_name,
            mime,
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_strings() {
        assert_eq!(QualityLabel::from("Good".to_string()), QualityLabel::Good);
        assert_eq!(
            QualityLabel::from("Defective".to_string()),
            QualityLabel::Defective
        );
        assert_eq!(
            QualityLabel::from("good".to_string()),
            QualityLabel::Other("good".into())
        );
        assert!(!QualityLabel::Other("good".into()).is_good());
    }

    #[test]
    fn sensor_request_uses_wire_names() {
        let input = SensorInput {
            vibration: 0.4,
            temperature: 31.5,
            pressure: 1.1,
        };
        let json = serde_json::to_value(SensorRequest::from(&input)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"vibration": 0.4, "temp": 31.5, "pressure": 1.1})
        );
    }

    #[test]
    fn confidence_outside_unit_range_is_rejected() {
        let result = PredictionResult {
            label: QualityLabel::Good,
            confidence: 1.5,
        };
        assert!(result.validated().is_err());
    }

    #[test]
    fn upload_reads_name_and_mime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.png");
        image::RgbaImage::new(2, 2).save(&path).unwrap();

        let upload = ImageUpload::from_path(&path).unwrap();
        assert_eq!(upload.file_name, "board.png");
        assert_eq!(upload.mime, "image/png");
        assert!(!upload.bytes.is_empty());
    }

    #[test]
    fn upload_over_size_limit_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("poster.png");
        std::fs::File::create(&path)
            .unwrap()
            .set_len(crate::preview::MAX_IMAGE_BYTES + 1)
            .unwrap();

        let err = ImageUpload::from_path(&path).unwrap_err();
        match err {
            InferenceError::Io { source, .. } => {
                assert_eq!(source.kind(), std::io::ErrorKind::InvalidData)
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn upload_of_missing_file_is_io_error() {
        let err = ImageUpload::from_path(Path::new("/definitely/missing.png")).unwrap_err();
        assert!(matches!(err, InferenceError::Io { .. }));
    }
}
