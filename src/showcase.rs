//! Fixed promotional content shown on the landing strip and the insights panel.

/// Headline statistic on the landing strip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LandingStat {
    pub label: &'static str,
    pub value: &'static str,
    pub detail: &'static str,
}

pub const LANDING_STATS: [LandingStat; 4] = [
    LandingStat {
        label: "AI Models",
        value: "2",
        detail: "CNN + LSTM",
    },
    LandingStat {
        label: "Training Data",
        value: "50K+",
        detail: "Images & Sensors",
    },
    LandingStat {
        label: "Accuracy",
        value: "98.2%",
        detail: "Production Ready",
    },
    LandingStat {
        label: "Deployment",
        value: "100%",
        detail: "Containerized",
    },
];

/// Model quality figure, in percent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MetricCard {
    pub label: &'static str,
    pub value: f32,
    pub tooltip: &'static str,
    pub details: &'static str,
}

pub const METRICS: [MetricCard; 4] = [
    MetricCard {
        label: "CNN Model Accuracy",
        value: 98.2,
        tooltip: "Defect detection accuracy on test set",
        details: "Trained on 50,000+ augmented images",
    },
    MetricCard {
        label: "LSTM Anomaly Detection",
        value: 96.7,
        tooltip: "Anomaly detection accuracy on sensor data",
        details: "LSTM Autoencoder with 10,000+ sequences",
    },
    MetricCard {
        label: "Precision Score",
        value: 97.9,
        tooltip: "Average precision across models",
        details: "Minimizes false positives",
    },
    MetricCard {
        label: "Recall Score",
        value: 98.5,
        tooltip: "Average recall across models",
        details: "Maximizes defect detection",
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Achievement {
    pub title: &'static str,
    pub description: &'static str,
}

pub const ACHIEVEMENTS: [Achievement; 4] = [
    Achievement {
        title: "State-of-the-Art Performance",
        description: "Achieved industry-leading accuracy with custom CNN architecture",
    },
    Achievement {
        title: "Massive Dataset Processing",
        description: "Successfully trained on 50,000+ images with advanced augmentation",
    },
    Achievement {
        title: "Production Ready",
        description: "Containerized deployment with real-time inference capabilities",
    },
    Achievement {
        title: "Real-time Analytics",
        description: "Sub-second response times for both image and sensor analysis",
    },
];

/// Sample prediction with its bundled image, relative to the assets directory.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GalleryItem {
    pub asset: &'static str,
    pub label: &'static str,
    pub confidence: f64,
}

impl GalleryItem {
    pub fn is_good(&self) -> bool {
        self.label == "Good"
    }
}

pub const GALLERY: [GalleryItem; 4] = [
    GalleryItem {
        asset: "test_images/good_1.png",
        label: "Good",
        confidence: 0.99,
    },
    GalleryItem {
        asset: "test_images/defective_1.png",
        label: "Defective",
        confidence: 0.97,
    },
    GalleryItem {
        asset: "test_images/good_2.png",
        label: "Good",
        confidence: 0.98,
    },
    GalleryItem {
        asset: "test_images/defective_2.png",
        label: "Defective",
        confidence: 0.96,
    },
];

/// Training-history chart rendered as a static image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrainingChart {
    pub asset: &'static str,
    pub title: &'static str,
    pub caption: &'static str,
}

pub const TRAINING_CHARTS: [TrainingChart; 2] = [
    TrainingChart {
        asset: "history/lstm_training_loss.png",
        title: "LSTM Training Loss",
        caption: "Autoencoder reconstruction loss per epoch",
    },
    TrainingChart {
        asset: "history/anomaly_detection.png",
        title: "Anomaly Detection",
        caption: "Reconstruction error against the anomaly threshold",
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimelineStep {
    pub title: &'static str,
    pub description: &'static str,
}

pub const TIMELINE: [TimelineStep; 4] = [
    TimelineStep {
        title: "Data Engineering Excellence",
        description: "Collected and processed 50,000+ high-quality images with advanced augmentation techniques including rotation, scaling, and noise injection. Implemented sophisticated data preprocessing pipeline.",
    },
    TimelineStep {
        title: "Advanced Model Architecture",
        description: "Designed custom CNN with residual connections and attention mechanisms. Implemented LSTM autoencoder with bidirectional layers for superior anomaly detection.",
    },
    TimelineStep {
        title: "Rigorous Evaluation",
        description: "Comprehensive evaluation with cross-validation, confusion matrices, ROC curves, and statistical significance testing. Achieved 98.2% accuracy with 97.9% precision.",
    },
    TimelineStep {
        title: "Production Deployment",
        description: "Containerized with Docker, API-driven architecture, real-time monitoring, and scalable cloud deployment. Ready for enterprise-level factory integration.",
    },
];

/// Every asset path the insights panel may load.
pub fn asset_paths() -> impl Iterator<Item = &'static str> {
    GALLERY
        .iter()
        .map(|item| item.asset)
        .chain(TRAINING_CHARTS.iter().map(|chart| chart.asset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn gallery_alternates_good_and_defective() {
        let good: Vec<bool> = GALLERY.iter().map(GalleryItem::is_good).collect();
        assert_eq!(good, vec![true, false, true, false]);
        assert!(GALLERY.iter().all(|item| (0.0..=1.0).contains(&item.confidence)));
    }

    #[test]
    fn asset_paths_are_unique_and_relative() {
        let paths: Vec<&str> = asset_paths().collect();
        let unique: HashSet<&str> = paths.iter().copied().collect();
        assert_eq!(paths.len(), 6);
        assert_eq!(unique.len(), paths.len());
        assert!(paths.iter().all(|path| !path.starts_with('/')));
    }
}
