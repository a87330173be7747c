use std::collections::VecDeque;

use crate::egui_app::ui::style::{self, StatusTone};
use egui::Color32;

/// Number of status messages kept in the rolling log.
pub const MAX_STATUS_LOG: usize = 50;

/// Status badge + text shown in the footer.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBarState {
    /// Main status message text.
    pub text: String,
    /// Badge label shown next to the status.
    pub badge_label: String,
    /// Badge color.
    pub badge_color: Color32,
    pub tone: StatusTone,
    /// Rolling status log entries, oldest first.
    pub log: VecDeque<String>,
}

impl StatusBarState {
    /// Default status shown at launch.
    pub fn idle() -> Self {
        Self {
            text: "Select an image or enter sensor readings to get started".into(),
            badge_label: style::status_badge_label(StatusTone::Idle).into(),
            badge_color: style::status_badge_color(StatusTone::Idle),
            tone: StatusTone::Idle,
            log: VecDeque::new(),
        }
    }

    pub fn set(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.text = text.into();
        self.tone = tone;
        self.badge_label = style::status_badge_label(tone).into();
        self.badge_color = style::status_badge_color(tone);
        if self.log.len() >= MAX_STATUS_LOG {
            self.log.pop_front();
        }
        self.log.push_back(format!("[{}] {}", self.badge_label, self.text));
    }

    /// Concatenate log entries into a single displayable string.
    pub fn log_text(&self) -> String {
        self.log.iter().cloned().collect::<Vec<_>>().join("\n")
    }
}
