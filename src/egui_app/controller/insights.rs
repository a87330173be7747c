use std::path::PathBuf;
use std::time::{Duration, Instant};

use super::EguiController;

/// Delay between first showing the insights panel and revealing its cards.
const REVEAL_DELAY: Duration = Duration::from_millis(100);

impl EguiController {
    /// Record that the insights panel is on screen at `now`.
    pub fn note_insights_visible(&mut self, now: Instant) {
        let insights = &mut self.ui.insights;
        let first_shown = *insights.first_shown.get_or_insert(now);
        if !insights.revealed && now.saturating_duration_since(first_shown) >= REVEAL_DELAY {
            insights.revealed = true;
        }
    }

    /// Open the enlarge modal for a gallery or chart asset.
    pub fn enlarge_insight_image(&mut self, asset: &'static str) {
        self.ui.insights.enlarged = Some(asset);
    }

    pub fn close_enlarged_image(&mut self) {
        self.ui.insights.enlarged = None;
    }

    /// Location of a bundled asset, relative to the working directory unless
    /// the configured assets directory is absolute.
    pub fn asset_path(&self, asset: &str) -> PathBuf {
        self.config.showcase.assets_dir.join(asset)
    }
}
