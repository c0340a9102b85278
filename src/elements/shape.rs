use crate::core::{ChartArea, Point, ScaleValue};
use crate::elements::Geometry;
use crate::host::ChartView;
use crate::options::{AnnotationOptions, ResolvedAnnotation};
use crate::render::AnnotationCanvas;

/// Pluggable annotation shape.
///
/// A shape is stateless: per-chart state (geometry, options, transitions)
/// lives on [`AnnotationElement`](crate::elements::AnnotationElement), which
/// calls back into its shape for geometry, drawing and hit-testing.
pub trait Shape {
    /// Registry tag, e.g. `"box"`.
    fn kind(&self) -> &str;

    /// Static defaults merged underneath chart-level and user options.
    fn defaults(&self) -> AnnotationOptions;

    /// Resolves pixel geometry from the chart scales.
    ///
    /// Returns `None` when none of the scales the annotation refers to exist.
    fn resolve_element_properties(
        &self,
        chart: &dyn ChartView,
        annotation: &ResolvedAnnotation,
    ) -> Option<Geometry>;

    fn draw(
        &self,
        geometry: &Geometry,
        annotation: &ResolvedAnnotation,
        canvas: &mut dyn AnnotationCanvas,
    );

    fn supports_label(&self) -> bool {
        false
    }

    fn draw_label(
        &self,
        _geometry: &Geometry,
        _annotation: &ResolvedAnnotation,
        _canvas: &mut dyn AnnotationCanvas,
        _chart_area: ChartArea,
    ) {
    }

    fn in_range(&self, geometry: &Geometry, annotation: &ResolvedAnnotation, point: Point) -> bool;

    fn center_point(&self, geometry: &Geometry) -> Point {
        geometry.center()
    }
}

/// Pixel for `value` on `scale_id`, or `fallback` when the scale is missing or
/// the value does not parse to a finite number.
pub(crate) fn scale_pixel(
    chart: &dyn ChartView,
    scale_id: Option<&str>,
    value: Option<&ScaleValue>,
    fallback: f64,
) -> f64 {
    let (Some(scale), Some(value)) = (scale_id.and_then(|id| chart.scale(id)), value) else {
        return fallback;
    };
    let parsed = scale.parse(value);
    if !parsed.is_finite() {
        return fallback;
    }
    let pixel = scale.pixel_for_value(parsed);
    if pixel.is_finite() { pixel } else { fallback }
}
