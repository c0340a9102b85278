use crate::core::{ChartArea, Point};
use crate::elements::label::{draw_label_at, label_defaults};
use crate::elements::shape::scale_pixel;
use crate::elements::{Geometry, Shape};
use crate::host::ChartView;
use crate::options::{AnnotationOptions, ResolvedAnnotation};
use crate::render::{AnnotationCanvas, Color, LinePrimitive};

pub const LINE_KIND: &str = "line";

const MIN_HIT_TOLERANCE_PX: f64 = 0.001;

/// Segment annotation.
///
/// With `scaleID` the line spans the chart area at `value` (optionally sloping
/// to `endValue`); otherwise it runs between `xMin/yMin` and `xMax/yMax`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineShape;

impl Shape for LineShape {
    fn kind(&self) -> &str {
        LINE_KIND
    }

    fn defaults(&self) -> AnnotationOptions {
        AnnotationOptions {
            kind: Some(LINE_KIND.to_owned()),
            x_scale_id: Some("x".to_owned()),
            y_scale_id: Some("y".to_owned()),
            border_width: Some(2.0),
            border_color: Some(Color::rgba(0.0, 0.0, 0.0, 0.1)),
            label: Some(label_defaults()),
            ..AnnotationOptions::default()
        }
    }

    fn resolve_element_properties(
        &self,
        chart: &dyn ChartView,
        annotation: &ResolvedAnnotation,
    ) -> Option<Geometry> {
        let options = &annotation.options;
        let area = chart.chart_area();

        if let Some(scale) = options.scale_id.as_deref().and_then(|id| chart.scale(id)) {
            let scale_id = Some(scale.id());
            let pixel = scale_pixel(chart, scale_id, options.value.as_ref(), f64::NAN);
            let end_pixel = scale_pixel(chart, scale_id, options.end_value.as_ref(), pixel);
            if !pixel.is_finite() {
                return None;
            }
            return Some(if scale.is_horizontal() {
                Geometry::from_corners(pixel, area.top, end_pixel, area.bottom)
            } else {
                Geometry::from_corners(area.left, pixel, area.right, end_pixel)
            });
        }

        let x_scale_id = options.x_scale_id.as_deref();
        let y_scale_id = options.y_scale_id.as_deref();
        let has_x = x_scale_id.and_then(|id| chart.scale(id)).is_some();
        let has_y = y_scale_id.and_then(|id| chart.scale(id)).is_some();
        if !has_x && !has_y {
            return None;
        }

        let x = scale_pixel(chart, x_scale_id, options.x_min.as_ref(), area.left);
        let x2 = scale_pixel(chart, x_scale_id, options.x_max.as_ref(), area.right);
        let y = scale_pixel(chart, y_scale_id, options.y_min.as_ref(), area.top);
        let y2 = scale_pixel(chart, y_scale_id, options.y_max.as_ref(), area.bottom);
        Some(Geometry::from_corners(x, y, x2, y2))
    }

    fn draw(
        &self,
        geometry: &Geometry,
        annotation: &ResolvedAnnotation,
        canvas: &mut dyn AnnotationCanvas,
    ) {
        let options = &annotation.options;
        let width = options.border_width.unwrap_or(0.0);
        if width <= 0.0 {
            return;
        }
        canvas.draw_line(LinePrimitive::new(
            geometry.x,
            geometry.y,
            geometry.x2,
            geometry.y2,
            width,
            options.border_color.unwrap_or(Color::BLACK),
        ));
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
        let Some(label) = annotation.label() else {
            return;
        };
        let ratio = label.position.unwrap_or_default().ratio();
        let anchor = Point::new(
            geometry.x + (geometry.x2 - geometry.x) * ratio,
            geometry.y + (geometry.y2 - geometry.y) * ratio,
        );
        draw_label_at(canvas, anchor, label, chart_area);
    }

    fn in_range(&self, geometry: &Geometry, annotation: &ResolvedAnnotation, point: Point) -> bool {
        let tolerance = (0.5 * annotation.options.border_width.unwrap_or(0.0)).max(MIN_HIT_TOLERANCE_PX);
        distance_to_segment(point, geometry) <= tolerance
    }
}

fn distance_to_segment(point: Point, geometry: &Geometry) -> f64 {
    let start = Point::new(geometry.x, geometry.y);
    let dx = geometry.x2 - geometry.x;
    let dy = geometry.y2 - geometry.y;
    let length_sq = dx * dx + dy * dy;
    if length_sq == 0.0 {
        return point.distance_to(start);
    }
    let t = (((point.x - start.x) * dx + (point.y - start.y) * dy) / length_sq).clamp(0.0, 1.0);
    point.distance_to(Point::new(start.x + t * dx, start.y + t * dy))
}
