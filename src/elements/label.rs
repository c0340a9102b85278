use crate::core::{ChartArea, Point};
use crate::options::{LabelOptions, LabelPosition};
use crate::render::{AnnotationCanvas, Color, RectPrimitive, TextPrimitive};

const LABEL_CHAR_WIDTH_RATIO: f64 = 0.6;

pub(crate) fn label_defaults() -> LabelOptions {
    LabelOptions {
        enabled: Some(false),
        content: None,
        draw_time: None,
        position: Some(LabelPosition::Center),
        x_adjust: Some(0.0),
        y_adjust: Some(0.0),
        font_size: Some(12.0),
        color: Some(Color::rgb(1.0, 1.0, 1.0)),
        background_color: Some(Color::rgba(0.0, 0.0, 0.0, 0.8)),
        padding: Some(6.0),
    }
}

/// Pixel box of a label centered on `anchor`, kept inside the chart area when it fits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct LabelBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

pub(crate) fn label_box(anchor: Point, label: &LabelOptions, content: &str, area: ChartArea) -> LabelBox {
    let font_size = label.font_size.unwrap_or(12.0);
    let padding = label.padding.unwrap_or(0.0);
    let width = content.chars().count() as f64 * font_size * LABEL_CHAR_WIDTH_RATIO + 2.0 * padding;
    let height = font_size + 2.0 * padding;

    let center_x = anchor.x + label.x_adjust.unwrap_or(0.0);
    let center_y = anchor.y + label.y_adjust.unwrap_or(0.0);

    LabelBox {
        left: clamp_start(center_x - 0.5 * width, width, area.left, area.right),
        top: clamp_start(center_y - 0.5 * height, height, area.top, area.bottom),
        width,
        height,
    }
}

fn clamp_start(start: f64, size: f64, lower: f64, upper: f64) -> f64 {
    if upper - lower <= size {
        start
    } else {
        start.clamp(lower, upper - size)
    }
}

pub(crate) fn draw_label_at(
    canvas: &mut dyn AnnotationCanvas,
    anchor: Point,
    label: &LabelOptions,
    area: ChartArea,
) {
    let Some(content) = label.content.as_deref().filter(|content| !content.is_empty()) else {
        return;
    };
    let bounds = label_box(anchor, label, content, area);

    if let Some(background) = label.background_color.filter(|color| !color.is_transparent()) {
        canvas.draw_rect(RectPrimitive::new(
            bounds.left,
            bounds.top,
            bounds.width,
            bounds.height,
            background,
        ));
    }
    canvas.draw_text(TextPrimitive::new(
        content,
        Point::new(
            bounds.left + 0.5 * bounds.width,
            bounds.top + 0.5 * bounds.height,
        ),
        label.font_size.unwrap_or(12.0),
        label.color.unwrap_or(Color::WHITE),
    ));
}
