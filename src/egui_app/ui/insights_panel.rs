use std::collections::HashMap;
use std::time::Instant;

use eframe::egui::{self, CornerRadius, Frame, Margin, RichText, TextureHandle, TextureOptions};
use tracing::warn;

use super::EguiApp;
use crate::egui_app::controller::EguiController;
use super::style;
use crate::egui_app::view_model;
use crate::preview;
use crate::showcase::{
    ACHIEVEMENTS, GALLERY, GalleryItem, METRICS, MetricCard, TIMELINE, TRAINING_CHARTS,
    TrainingChart,
};

const THUMB_HEIGHT: f32 = 140.0;
const ENLARGED_MAX_EDGE: f32 = 640.0;

/// Textures for bundled showcase images, loaded on first use.
///
/// A missing or unreadable asset is remembered as `None` so it is reported once.
#[derive(Default)]
pub(super) struct AssetTextures {
    textures: HashMap<&'static str, Option<TextureHandle>>,
}

impl AssetTextures {
    fn get(
        &mut self,
        ctx: &egui::Context,
        controller: &EguiController,
        asset: &'static str,
    ) -> Option<TextureHandle> {
        self.textures
            .entry(asset)
            .or_insert_with(|| {
                let path = controller.asset_path(asset);
                match preview::load_preview(&path) {
                    Ok(loaded) => Some(ctx.load_texture(
                        asset,
                        loaded.image,
                        TextureOptions::LINEAR,
                    )),
                    Err(err) => {
                        warn!("Showcase asset unavailable: {err}");
                        None
                    }
                }
            })
            .clone()
    }
}

impl EguiApp {
    pub(super) fn render_insights_panel(&mut self, ui: &mut egui::Ui) {
        self.controller.note_insights_visible(Instant::now());
        let palette = style::palette();
        ui.add_space(8.0);
        ui.label(
            RichText::new("Model Insights")
                .size(18.0)
                .strong()
                .color(palette.text_primary),
        );
        if !self.controller.ui.insights.revealed {
            ui.ctx().request_repaint();
            return;
        }
        ui.add_space(8.0);
        ui.columns(METRICS.len(), |columns| {
            for (column, metric) in columns.iter_mut().zip(METRICS.iter()) {
                metric_card(column, metric);
            }
        });
        ui.add_space(12.0);
        self.render_gallery(ui);
        ui.add_space(12.0);
        self.render_training_charts(ui);
        ui.add_space(12.0);
        achievements_and_timeline(ui);
    }

    fn render_gallery(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        ui.label(
            RichText::new("Sample predictions")
                .strong()
                .color(palette.text_primary),
        );
        let mut clicked = None;
        ui.columns(GALLERY.len(), |columns| {
            for (column, item) in columns.iter_mut().zip(GALLERY.iter()) {
                let tex = self.assets.get(column.ctx(), &self.controller, item.asset);
                if gallery_card(column, item, tex.as_ref()) {
                    clicked = Some(item.asset);
                }
            }
        });
        if let Some(asset) = clicked {
            self.controller.enlarge_insight_image(asset);
        }
    }

    fn render_training_charts(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        ui.label(
            RichText::new("Training history")
                .strong()
                .color(palette.text_primary),
        );
        let mut clicked = None;
        ui.columns(TRAINING_CHARTS.len(), |columns| {
            for (column, chart) in columns.iter_mut().zip(TRAINING_CHARTS.iter()) {
                let tex = self.assets.get(column.ctx(), &self.controller, chart.asset);
                if chart_card(column, chart, tex.as_ref()) {
                    clicked = Some(chart.asset);
                }
            }
        });
        if let Some(asset) = clicked {
            self.controller.enlarge_insight_image(asset);
        }
    }

    pub(super) fn render_enlarged_image(&mut self, ctx: &egui::Context) {
        let Some(asset) = self.controller.ui.insights.enlarged else {
            return;
        };
        let tex = self.assets.get(ctx, &self.controller, asset);
        let mut open = true;
        egui::Window::new("Preview")
            .id(egui::Id::new("insight_enlarged"))
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| match tex.as_ref() {
                Some(tex) => {
                    let size = tex.size_vec2();
                    let scale = (ENLARGED_MAX_EDGE / size.x.max(size.y)).min(1.0);
                    ui.add(egui::Image::new(tex).fit_to_exact_size(size * scale));
                }
                None => {
                    ui.label(format!("{asset} is not available"));
                }
            });
        let escape = ctx.input(|i| i.key_pressed(egui::Key::Escape));
        if !open || escape {
            self.controller.close_enlarged_image();
        }
    }
}

fn card_frame() -> Frame {
    Frame::new()
        .fill(style::card_fill())
        .stroke(style::card_stroke())
        .corner_radius(CornerRadius::same(8))
        .inner_margin(Margin::same(10))
}

fn metric_card(ui: &mut egui::Ui, metric: &MetricCard) {
    let palette = style::palette();
    card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(
            RichText::new(format!("{:.1}%", metric.value))
                .size(20.0)
                .strong()
                .color(palette.accent_violet),
        )
        .on_hover_text(metric.tooltip);
        ui.label(RichText::new(metric.label).color(palette.text_primary));
        ui.add(egui::ProgressBar::new(metric.value / 100.0).fill(palette.accent_pink));
        ui.label(RichText::new(metric.details).small().color(palette.text_muted));
    });
}

/// Returns true when the image was clicked.
fn thumbnail(ui: &mut egui::Ui, tex: Option<&TextureHandle>) -> bool {
    let palette = style::palette();
    match tex {
        Some(tex) => {
            let size = tex.size_vec2();
            let scale = THUMB_HEIGHT / size.y.max(1.0);
            let width = (size.x * scale).min(ui.available_width());
            ui.add(
                egui::Image::new(tex)
                    .fit_to_exact_size(egui::vec2(width, THUMB_HEIGHT))
                    .sense(egui::Sense::click()),
            )
            .on_hover_text("Click to enlarge")
            .clicked()
        }
        None => {
            let (rect, _) = ui.allocate_exact_size(
                egui::vec2(ui.available_width(), THUMB_HEIGHT),
                egui::Sense::hover(),
            );
            ui.painter().rect_filled(rect, 4.0, palette.bg_primary);
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "Image unavailable",
                egui::FontId::proportional(12.0),
                palette.text_muted,
            );
            false
        }
    }
}

fn gallery_card(ui: &mut egui::Ui, item: &GalleryItem, tex: Option<&TextureHandle>) -> bool {
    let palette = style::palette();
    let color = style::verdict_color(item.is_good());
    card_frame()
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            let clicked = thumbnail(ui, tex);
            ui.label(RichText::new(item.label).strong().color(color));
            ui.label(
                RichText::new(format!(
                    "{} confidence",
                    view_model::confidence_percent(item.confidence)
                ))
                .small()
                .color(palette.text_muted),
            );
            clicked
        })
        .inner
}

fn chart_card(ui: &mut egui::Ui, chart: &TrainingChart, tex: Option<&TextureHandle>) -> bool {
    let palette = style::palette();
    card_frame()
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(chart.title).strong().color(palette.text_primary));
            let clicked = thumbnail(ui, tex);
            ui.label(RichText::new(chart.caption).small().color(palette.text_muted));
            clicked
        })
        .inner
}

fn achievements_and_timeline(ui: &mut egui::Ui) {
    let palette = style::palette();
    ui.columns(2, |columns| {
        columns[0].label(
            RichText::new("Key achievements")
                .strong()
                .color(palette.text_primary),
        );
        for achievement in ACHIEVEMENTS.iter() {
            card_frame().show(&mut columns[0], |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new(achievement.title).color(palette.accent_pink));
                ui.label(RichText::new(achievement.description).color(palette.text_muted));
            });
        }
        columns[1].label(
            RichText::new("Development timeline")
                .strong()
                .color(palette.text_primary),
        );
        for (index, step) in TIMELINE.iter().enumerate() {
            card_frame().show(&mut columns[1], |ui| {
                ui.set_width(ui.available_width());
                ui.label(
                    RichText::new(format!("{}. {}", index + 1, step.title))
                        .color(palette.accent_violet),
                );
                ui.label(RichText::new(step.description).color(palette.text_muted));
            });
        }
    });
}
