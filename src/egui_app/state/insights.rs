use std::time::Instant;

/// Model insights panel state.
#[derive(Clone, Debug, Default)]
pub struct InsightsState {
    /// Asset path of the image shown in the enlarge modal.
    pub enlarged: Option<&'static str>,
    /// Flips once, shortly after the panel is first shown.
    pub revealed: bool,
    pub first_shown: Option<Instant>,
}
