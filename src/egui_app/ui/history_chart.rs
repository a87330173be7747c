//! Line chart of the recent sensor readings.
//!
//! Channels have different units, so each line is scaled to its own range and
//! the chart shows shape rather than magnitude. Anomalous readings get a marker
//! and the x-axis is labeled with reading times.

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, Shape, Stroke, StrokeKind};

use super::style;
use crate::sensors::{SensorField, SensorHistory};

const CHART_HEIGHT: f32 = 190.0;
const PADDING: f32 = 12.0;
const MARKER_RADIUS: f32 = 4.0;
/// Room reserved for one `HH:MM:SS` label.
const TIME_LABEL_WIDTH: f32 = 56.0;
const AXIS_HEIGHT: f32 = 16.0;
const LEGEND_HEIGHT: f32 = 14.0;

pub(super) fn render(ui: &mut egui::Ui, history: &SensorHistory) {
    let palette = style::palette();
    let width = ui.available_width();
    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, CHART_HEIGHT), Sense::hover());
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 6.0, style::card_fill());
    painter.rect_stroke(rect, 6.0, style::card_stroke(), StrokeKind::Inside);

    let plot = plot_rect(rect);
    for step in 1..4 {
        let y = plot.top() + plot.height() * step as f32 / 4.0;
        painter.line_segment(
            [Pos2::new(plot.left(), y), Pos2::new(plot.right(), y)],
            Stroke::new(1.0, palette.grid_soft),
        );
    }

    for field in SensorField::ALL {
        let values = history.series(field);
        let points = scaled_points(&values, plot);
        let color = series_color(field);
        if points.len() > 1 {
            painter.add(Shape::line(points.clone(), Stroke::new(2.0, color)));
        }
        for point in points {
            painter.circle_filled(point, 2.5, color);
        }
    }

    for (index, reading) in history.iter().enumerate() {
        if reading.anomaly {
            let x = x_position(index, history.len(), plot);
            painter.circle_stroke(
                Pos2::new(x, plot.top()),
                MARKER_RADIUS,
                Stroke::new(2.0, palette.danger),
            );
        }
    }

    let timestamps: Vec<&str> = history
        .iter()
        .map(|reading| reading.timestamp.as_str())
        .collect();
    for (index, anchor) in time_label_anchors(timestamps.len(), plot) {
        painter.line_segment(
            [Pos2::new(anchor.x, plot.bottom()), Pos2::new(anchor.x, anchor.y - 1.0)],
            Stroke::new(1.0, palette.grid_soft),
        );
        painter.text(
            anchor,
            Align2::CENTER_TOP,
            timestamps[index],
            FontId::monospace(10.0),
            palette.text_muted,
        );
    }

    let mut legend_x = plot.left();
    for field in SensorField::ALL {
        let galley_rect = painter.text(
            Pos2::new(legend_x, rect.bottom() - 2.0),
            Align2::LEFT_BOTTOM,
            field.label(),
            FontId::proportional(11.0),
            series_color(field),
        );
        legend_x = galley_rect.right() + 12.0;
    }
}

fn series_color(field: SensorField) -> Color32 {
    let palette = style::palette();
    match field {
        SensorField::Vibration => palette.series_vibration,
        SensorField::Temperature => palette.series_temperature,
        SensorField::Pressure => palette.series_pressure,
    }
}

/// Plot area inside the chart, leaving room for the time axis and legend.
fn plot_rect(chart: Rect) -> Rect {
    let side = PADDING.max(TIME_LABEL_WIDTH / 2.0);
    Rect::from_min_max(
        Pos2::new(chart.left() + side, chart.top() + PADDING),
        Pos2::new(
            chart.right() - side,
            chart.bottom() - PADDING - AXIS_HEIGHT - LEGEND_HEIGHT,
        ),
    )
}

/// Which readings get a time label, thinned so labels never overlap.
fn label_indices(count: usize, width: f32) -> Vec<usize> {
    if count == 0 {
        return Vec::new();
    }
    let slots = ((width / TIME_LABEL_WIDTH).floor() as usize).max(1);
    let step = count.div_ceil(slots);
    (0..count).step_by(step).collect()
}

/// Top-center anchor of each time label, just under the plot.
fn time_label_anchors(count: usize, plot: Rect) -> Vec<(usize, Pos2)> {
    label_indices(count, plot.width() + TIME_LABEL_WIDTH)
        .into_iter()
        .map(|index| {
            (
                index,
                Pos2::new(x_position(index, count, plot), plot.bottom() + 4.0),
            )
        })
        .collect()
}

fn x_position(index: usize, count: usize, plot: Rect) -> f32 {
    if count <= 1 {
        return plot.center().x;
    }
    plot.left() + plot.width() * index as f32 / (count - 1) as f32
}

/// Map values into `plot`, min at the bottom and max at the top.
fn scaled_points(values: &[f64], plot: Rect) -> Vec<Pos2> {
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        });
    let span = max - min;
    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let t = if span > f64::EPSILON {
                ((value - min) / span) as f32
            } else {
                0.5
            };
            Pos2::new(
                x_position(index, values.len(), plot),
                plot.bottom() - t * plot.height(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plot() -> Rect {
        Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(100.0, 50.0))
    }

    #[test]
    fn points_span_the_plot_width_and_height() {
        let points = scaled_points(&[1.0, 3.0, 2.0], plot());
        assert_eq!(points[0], Pos2::new(0.0, 50.0));
        assert_eq!(points[1], Pos2::new(50.0, 0.0));
        assert_eq!(points[2], Pos2::new(100.0, 25.0));
    }

    #[test]
    fn flat_series_sits_in_the_middle() {
        let points = scaled_points(&[4.0, 4.0], plot());
        assert!(points.iter().all(|point| point.y == 25.0));
    }

    #[test]
    fn time_labels_sit_under_their_points() {
        let wide = Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(600.0, 50.0));
        let points = scaled_points(&[1.0, 2.0, 3.0, 4.0], wide);
        let anchors = time_label_anchors(4, wide);
        assert_eq!(anchors.len(), 4);
        for (index, anchor) in anchors {
            assert_eq!(anchor.x, points[index].x);
            assert!(anchor.y > wide.bottom());
        }
    }

    #[test]
    fn time_labels_thin_out_when_narrow() {
        assert_eq!(label_indices(10, 600.0), (0..10).collect::<Vec<_>>());
        assert_eq!(label_indices(10, 170.0), vec![0, 4, 8]);
        assert_eq!(label_indices(1, 10.0), vec![0]);
        assert!(label_indices(0, 600.0).is_empty());
    }

    #[test]
    fn plot_leaves_room_for_axis_and_legend() {
        let chart = Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(400.0, CHART_HEIGHT));
        let plot = plot_rect(chart);
        assert!(plot.left() >= TIME_LABEL_WIDTH / 2.0);
        assert_eq!(
            plot.bottom(),
            CHART_HEIGHT - PADDING - AXIS_HEIGHT - LEGEND_HEIGHT
        );
    }

    #[test]
    fn single_reading_is_centered() {
        let points = scaled_points(&[7.0], plot());
        assert_eq!(points, vec![Pos2::new(50.0, 25.0)]);
    }
}
