use crate::core::Point;
use crate::elements::shape::scale_pixel;
use crate::elements::{Geometry, Shape};
use crate::host::ChartView;
use crate::options::{AnnotationOptions, ResolvedAnnotation};
use crate::render::{AnnotationCanvas, Color, EllipsePrimitive};

pub const POINT_KIND: &str = "point";

const DEFAULT_RADIUS_PX: f64 = 10.0;

/// Circle of `radius` pixels centered on `(xValue, yValue)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointShape;

fn radius_of(annotation: &ResolvedAnnotation) -> f64 {
    annotation
        .options
        .radius
        .filter(|radius| radius.is_finite() && *radius >= 0.0)
        .unwrap_or(DEFAULT_RADIUS_PX)
}

impl Shape for PointShape {
    fn kind(&self) -> &str {
        POINT_KIND
    }

    fn defaults(&self) -> AnnotationOptions {
        AnnotationOptions {
            kind: Some(POINT_KIND.to_owned()),
            x_scale_id: Some("x".to_owned()),
            y_scale_id: Some("y".to_owned()),
            radius: Some(DEFAULT_RADIUS_PX),
            border_width: Some(1.0),
            border_color: Some(Color::rgba(0.0, 0.0, 0.0, 0.1)),
            background_color: Some(Color::rgba(0.0, 0.0, 0.0, 0.1)),
            ..AnnotationOptions::default()
        }
    }

    fn resolve_element_properties(
        &self,
        chart: &dyn ChartView,
        annotation: &ResolvedAnnotation,
    ) -> Option<Geometry> {
        let options = &annotation.options;
        let x_scale_id = options.x_scale_id.as_deref();
        let y_scale_id = options.y_scale_id.as_deref();
        let has_x = x_scale_id.and_then(|id| chart.scale(id)).is_some();
        let has_y = y_scale_id.and_then(|id| chart.scale(id)).is_some();
        if !has_x && !has_y {
            return None;
        }

        let fallback = chart.chart_area().center();
        let center = Point::new(
            scale_pixel(chart, x_scale_id, options.x_value.as_ref(), fallback.x),
            scale_pixel(chart, y_scale_id, options.y_value.as_ref(), fallback.y),
        );
        Some(Geometry::centered(center, radius_of(annotation)))
    }

    fn draw(
        &self,
        geometry: &Geometry,
        annotation: &ResolvedAnnotation,
        canvas: &mut dyn AnnotationCanvas,
    ) {
        let options = &annotation.options;
        let mut dot = EllipsePrimitive::circle(
            geometry.center(),
            0.5 * geometry.width.abs(),
            options.background_color.unwrap_or(Color::TRANSPARENT),
        );
        if let (Some(width), Some(color)) = (options.border_width, options.border_color) {
            dot = dot.with_border(width.max(0.0), color);
        }
        canvas.draw_ellipse(dot);
    }

    fn in_range(&self, geometry: &Geometry, annotation: &ResolvedAnnotation, point: Point) -> bool {
        let half_border = 0.5 * annotation.options.border_width.unwrap_or(0.0).max(0.0);
        point.distance_to(geometry.center()) <= 0.5 * geometry.width.abs() + half_border
    }
}
