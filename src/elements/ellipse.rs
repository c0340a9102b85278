use crate::core::Point;
use crate::elements::box_shape::{area_defaults, resolve_area};
use crate::elements::{Geometry, Shape};
use crate::host::ChartView;
use crate::options::{AnnotationOptions, ResolvedAnnotation};
use crate::render::{AnnotationCanvas, Color, EllipsePrimitive};

pub const ELLIPSE_KIND: &str = "ellipse";

/// Ellipse inscribed in the `xMin..xMax` × `yMin..yMax` box.
#[derive(Debug, Clone, Copy, Default)]
pub struct EllipseShape;

impl Shape for EllipseShape {
    fn kind(&self) -> &str {
        ELLIPSE_KIND
    }

    fn defaults(&self) -> AnnotationOptions {
        area_defaults(ELLIPSE_KIND)
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
        let center = geometry.center();
        let mut ellipse = EllipsePrimitive::new(
            center,
            0.5 * geometry.width.abs(),
            0.5 * geometry.height.abs(),
            options.background_color.unwrap_or(Color::TRANSPARENT),
        );
        if let (Some(width), Some(color)) = (options.border_width, options.border_color) {
            ellipse = ellipse.with_border(width.max(0.0), color);
        }
        canvas.draw_ellipse(ellipse);
    }

    fn in_range(&self, geometry: &Geometry, _annotation: &ResolvedAnnotation, point: Point) -> bool {
        let radius_x = 0.5 * geometry.width.abs();
        let radius_y = 0.5 * geometry.height.abs();
        if radius_x <= 0.0 || radius_y <= 0.0 {
            return false;
        }
        let center = geometry.center();
        let nx = (point.x - center.x) / radius_x;
        let ny = (point.y - center.y) / radius_y;
        nx * nx + ny * ny <= 1.0
    }
}
