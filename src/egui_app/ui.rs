//! egui renderer for the dashboard.

use std::time::Instant;

use eframe::egui::{self, Frame, Margin, RichText, TextureHandle, TextureOptions};

use crate::egui_app::controller::EguiController;
use crate::egui_app::state::DashboardTab;

mod history_chart;
mod image_panel;
mod insights_panel;
mod landing;
mod sensor_panel;
mod status_bar;
pub mod style;

use insights_panel::AssetTextures;

/// Renders the dashboard using the shared controller state.
pub struct EguiApp {
    controller: EguiController,
    visuals_set: bool,
    /// Texture for the current preview, tagged with the revision it was built from.
    preview_tex: Option<(u64, TextureHandle)>,
    assets: AssetTextures,
}

impl EguiApp {
    pub fn new(controller: EguiController) -> Self {
        Self {
            controller,
            visuals_set: false,
            preview_tex: None,
            assets: AssetTextures::default(),
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn handle_file_drops(&mut self, ctx: &egui::Context) {
        let (hovered, dropped) = ctx.input(|i| {
            (!i.raw.hovered_files.is_empty(), i.raw.dropped_files.clone())
        });
        if self.controller.ui.active_tab != DashboardTab::ImageAnalysis {
            self.controller.set_drop_hovered(false);
            return;
        }
        self.controller.set_drop_hovered(hovered);
        // Only the first file counts; the panel holds one image.
        if let Some(file) = dropped.into_iter().next() {
            self.controller.drop_image(file.path, &file.mime);
        }
    }

    /// Keep the preview texture in sync with the controller's preview.
    fn sync_preview_texture(&mut self, ctx: &egui::Context) {
        let state = &self.controller.ui.image;
        let Some(preview) = state.preview.as_ref() else {
            self.preview_tex = None;
            return;
        };
        match self.preview_tex.as_mut() {
            Some((revision, _)) if *revision == state.preview_revision => {}
            Some((revision, tex)) => {
                tex.set(preview.image.clone(), TextureOptions::LINEAR);
                *revision = state.preview_revision;
            }
            None => {
                let tex = ctx.load_texture(
                    "image_preview",
                    preview.image.clone(),
                    TextureOptions::LINEAR,
                );
                self.preview_tex = Some((state.preview_revision, tex));
            }
        }
    }

    fn render_tabs(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        ui.horizontal(|ui| {
            for tab in DashboardTab::ALL {
                let selected = self.controller.ui.active_tab == tab;
                let text = if selected {
                    RichText::new(tab.label()).strong().color(palette.accent_pink)
                } else {
                    RichText::new(tab.label()).color(palette.text_muted)
                };
                if ui.selectable_label(selected, text).clicked() {
                    self.controller.select_tab(tab);
                }
            }
        });
    }

    fn render_center(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::CentralPanel::default()
            .frame(
                Frame::new()
                    .fill(palette.bg_primary)
                    .inner_margin(Margin::same(16)),
            )
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt("dashboard_scroll")
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        self.render_tabs(ui);
                        ui.add_space(8.0);
                        match self.controller.ui.active_tab {
                            DashboardTab::ImageAnalysis => self.render_image_panel(ui),
                            DashboardTab::SensorMonitoring => self.render_sensor_panel(ui),
                        }
                        ui.add_space(24.0);
                        ui.separator();
                        self.render_insights_panel(ui);
                    });
            });
        self.render_enlarged_image(ctx);
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.controller.tick();
        self.handle_file_drops(ctx);
        self.sync_preview_texture(ctx);
        self.render_landing(ctx);
        self.render_status(ctx);
        self.render_center(ctx);
        ctx.request_repaint_after(self.controller.repaint_after(Instant::now()));
    }
}
