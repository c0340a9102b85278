use crate::core::{ChartArea, Point};
use crate::elements::label::{draw_label_at, label_defaults};
use crate::elements::shape::scale_pixel;
use crate::elements::{Geometry, Shape};
use crate::host::ChartView;
use crate::options::{AnnotationOptions, ResolvedAnnotation};
use crate::render::{AnnotationCanvas, Color, RectPrimitive};

pub const BOX_KIND: &str = "box";

/// Rectangle spanning `xMin..xMax` × `yMin..yMax`; missing bounds extend to the chart area.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoxShape;

/// Area-shape resolution shared by boxes and ellipses.
pub(crate) fn resolve_area(chart: &dyn ChartView, options: &AnnotationOptions) -> Option<Geometry> {
    let x_scale_id = options.x_scale_id.as_deref();
    let y_scale_id = options.y_scale_id.as_deref();
    let has_x = x_scale_id.and_then(|id| chart.scale(id)).is_some();
    let has_y = y_scale_id.and_then(|id| chart.scale(id)).is_some();
    if !has_x && !has_y {
        return None;
    }

    let area = chart.chart_area();
    let x = scale_pixel(chart, x_scale_id, options.x_min.as_ref(), area.left);
    let x2 = scale_pixel(chart, x_scale_id, options.x_max.as_ref(), area.right);
    let y = scale_pixel(chart, y_scale_id, options.y_min.as_ref(), area.top);
    let y2 = scale_pixel(chart, y_scale_id, options.y_max.as_ref(), area.bottom);
    Some(Geometry::normalized_box(x, y, x2, y2))
}

pub(crate) fn area_defaults(kind: &str) -> AnnotationOptions {
    AnnotationOptions {
        kind: Some(kind.to_owned()),
        x_scale_id: Some("x".to_owned()),
        y_scale_id: Some("y".to_owned()),
        border_width: Some(1.0),
        border_color: Some(Color::rgba(0.0, 0.0, 0.0, 0.1)),
        background_color: Some(Color::rgba(0.0, 0.0, 0.0, 0.1)),
        ..AnnotationOptions::default()
    }
}

impl Shape for BoxShape {
    fn kind(&self) -> &str {
        BOX_KIND
    }

    fn defaults(&self) -> AnnotationOptions {
        AnnotationOptions {
            label: Some(label_defaults()),
            ..area_defaults(BOX_KIND)
        }
    }

    fn resolve_element_properties(
        &self,
        chart: &dyn ChartView,
        annotation: &ResolvedAnnotation,
    ) -> Option<Geometry> {
        resolve_area(chart, &annotation.options)
    }

    fn draw(
        &self,
        geometry: &Geometry,
        annotation: &ResolvedAnnotation,
        canvas: &mut dyn AnnotationCanvas,
    ) {
        let options = &annotation.options;
        let fill = options.background_color.unwrap_or(Color::TRANSPARENT);
        let mut rect = RectPrimitive::new(geometry.x, geometry.y, geometry.width, geometry.height, fill);
        if let (Some(width), Some(color)) = (options.border_width, options.border_color) {
            rect = rect.with_border(width.max(0.0), color);
        }
        canvas.draw_rect(rect);
    }

    fn supports_label(&self) -> bool {
        true
    }

    fn draw_label(
        &self,
        geometry: &Geometry,
        annotation: &ResolvedAnnotation,
        canvas: &mut dyn AnnotationCanvas,
        chart_area: ChartArea,
    ) {
        if let Some(label) = annotation.label() {
            draw_label_at(canvas, geometry.center(), label, chart_area);
        }
    }

    fn in_range(&self, geometry: &Geometry, annotation: &ResolvedAnnotation, point: Point) -> bool {
        let half_border = 0.5 * annotation.options.border_width.unwrap_or(0.0).max(0.0);
        point.x >= geometry.x - half_border
            && point.x <= geometry.x2 + half_border
            && point.y >= geometry.y - half_border
            && point.y <= geometry.y2 + half_border
    }
}
