use eframe::egui::{
    Color32, Stroke, Visuals,
    epaint::{CornerRadius, Shadow},
    style::WidgetVisuals,
};

#[derive(Clone, Copy)]
pub struct Palette {
    pub bg_primary: Color32,
    pub bg_secondary: Color32,
    pub bg_tertiary: Color32,
    pub panel_outline: Color32,
    pub grid_soft: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub accent_violet: Color32,
    pub accent_pink: Color32,
    pub accent_ice: Color32,
    pub warning: Color32,
    pub danger: Color32,
    pub success: Color32,
    pub series_vibration: Color32,
    pub series_temperature: Color32,
    pub series_pressure: Color32,
}

pub fn palette() -> Palette {
    Palette {
        bg_primary: Color32::from_rgb(12, 10, 20),
        bg_secondary: Color32::from_rgb(24, 20, 38),
        bg_tertiary: Color32::from_rgb(40, 34, 60),
        panel_outline: Color32::from_rgb(62, 54, 92),
        grid_soft: Color32::from_rgb(44, 40, 62),
        text_primary: Color32::from_rgb(222, 216, 240),
        text_muted: Color32::from_rgb(160, 150, 190),
        accent_violet: Color32::from_rgb(168, 85, 247),
        accent_pink: Color32::from_rgb(236, 72, 153),
        accent_ice: Color32::from_rgb(167, 217, 255),
        warning: Color32::from_rgb(245, 158, 11),
        danger: Color32::from_rgb(248, 113, 113),
        success: Color32::from_rgb(74, 222, 128),
        series_vibration: Color32::from_rgb(59, 130, 246),
        series_temperature: Color32::from_rgb(16, 185, 129),
        series_pressure: Color32::from_rgb(245, 158, 11),
    }
}

pub fn apply_visuals(visuals: &mut Visuals) {
    let palette = palette();
    visuals.window_fill = palette.bg_primary;
    visuals.panel_fill = palette.bg_secondary;
    visuals.override_text_color = Some(palette.text_primary);
    visuals.hyperlink_color = palette.accent_ice;
    visuals.extreme_bg_color = palette.bg_primary;
    visuals.faint_bg_color = palette.bg_secondary;
    visuals.error_fg_color = palette.danger;
    visuals.warn_fg_color = palette.warning;
    visuals.selection.bg_fill = palette.accent_violet.gamma_multiply(0.4);
    visuals.selection.stroke = Stroke::new(1.0, palette.accent_pink);
    visuals.widgets.noninteractive.bg_fill = palette.bg_secondary;
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, palette.text_primary);
    set_rounded(&mut visuals.widgets.inactive, palette);
    set_rounded(&mut visuals.widgets.hovered, palette);
    set_rounded(&mut visuals.widgets.active, palette);
    set_rounded(&mut visuals.widgets.open, palette);
    visuals.window_corner_radius = CornerRadius::same(8);
    visuals.menu_corner_radius = CornerRadius::same(6);
    visuals.popup_shadow = Shadow::NONE;
    visuals.button_frame = true;
}

fn set_rounded(vis: &mut WidgetVisuals, palette: Palette) {
    vis.corner_radius = CornerRadius::same(6);
    vis.bg_fill = palette.bg_tertiary;
    vis.weak_bg_fill = palette.grid_soft;
    vis.bg_stroke = Stroke::new(1.0, palette.panel_outline);
    vis.fg_stroke = Stroke::new(1.0, palette.text_primary);
}

pub fn card_stroke() -> Stroke {
    Stroke::new(1.0, palette().panel_outline)
}

pub fn card_fill() -> Color32 {
    palette().bg_tertiary.gamma_multiply(0.6)
}

/// Severity of a status bar message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTone {
    Idle,
    Busy,
    Info,
    Warning,
    Error,
}

pub fn status_badge_label(tone: StatusTone) -> &'static str {
    match tone {
        StatusTone::Idle => "Idle",
        StatusTone::Busy => "Working",
        StatusTone::Info => "Info",
        StatusTone::Warning => "Warning",
        StatusTone::Error => "Error",
    }
}

pub fn status_badge_color(tone: StatusTone) -> Color32 {
    match tone {
        StatusTone::Idle => Color32::from_rgb(42, 42, 42),
        StatusTone::Busy => Color32::from_rgb(31, 139, 255),
        StatusTone::Info => Color32::from_rgb(64, 140, 112),
        StatusTone::Warning => Color32::from_rgb(192, 138, 43),
        StatusTone::Error => Color32::from_rgb(192, 57, 43),
    }
}

/// Color used for a good/defective or normal/anomaly verdict.
pub fn verdict_color(positive: bool) -> Color32 {
    let palette = palette();
    if positive {
        palette.success
    } else {
        palette.danger
    }
}
