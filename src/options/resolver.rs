use smallvec::SmallVec;
use tracing::trace;

use crate::core::{AnnotationScale, ScaleValue};
use crate::elements::ShapeRegistry;
use crate::host::ChartView;
use crate::options::{AnnotationList, AnnotationOptions, DisplayContext, DrawTime, LabelOptions};

/// Fully defaulted configuration of one annotation for the current cycle.
#[derive(Debug, Clone)]
pub struct ResolvedAnnotation {
    /// Key of the entry when the annotations were configured as a map.
    pub id: Option<String>,
    /// Registered shape tag actually used; unknown tags resolve to `line`.
    pub kind: String,
    pub display: bool,
    pub options: AnnotationOptions,
}

impl ResolvedAnnotation {
    #[must_use]
    pub fn draw_time(&self) -> Option<DrawTime> {
        self.options.draw_time
    }

    #[must_use]
    pub fn label(&self) -> Option<&LabelOptions> {
        self.options.label.as_ref()
    }

    /// Whether the annotation is anchored to `scale` through `<axis>ScaleID` or `scaleID`.
    #[must_use]
    pub fn references_scale(&self, scale: &dyn AnnotationScale) -> bool {
        let scale_id = scale.id();
        self.options.axis_scale_id(scale.axis()) == Some(scale_id)
            || self.options.scale_id.as_deref() == Some(scale_id)
    }

    /// Values that should stay visible on `scale`: `value`/`endValue`, then
    /// `<axis>Min`, `<axis>Max`, `<axis>Value`, when set.
    ///
    /// `value`/`endValue` belong to the `scaleID` scale only, so a line bound
    /// to another scale never widens this one.
    #[must_use]
    pub fn range_values(&self, scale: &dyn AnnotationScale) -> SmallVec<[&ScaleValue; 5]> {
        let own_values = self
            .options
            .scale_id
            .as_deref()
            .is_none_or(|scale_id| scale_id == scale.id());
        let values = if own_values {
            [self.options.value.as_ref(), self.options.end_value.as_ref()]
        } else {
            [None, None]
        };
        values
            .into_iter()
            .chain(self.options.axis_values(scale.axis()))
            .flatten()
            .collect()
    }
}

/// Resolves one raw entry against the shape defaults and chart-level defaults.
#[must_use]
pub fn resolve_annotation_options(
    chart: &dyn ChartView,
    shapes: &ShapeRegistry,
    id: Option<String>,
    raw: &AnnotationOptions,
) -> ResolvedAnnotation {
    let shape = shapes.resolve(raw.kind.as_deref());
    let kind = shape.kind().to_owned();

    let mut options = shape.defaults();
    if let Some(chart_defaults) = chart.element_defaults(&kind) {
        options = options.merged(chart_defaults);
    }
    let mut options = options.merged(raw);
    options.kind = Some(kind.clone());

    let display = options.display.as_ref().is_none_or(|display| {
        display.resolve(&DisplayContext {
            chart,
            options: &options,
        })
    });

    ResolvedAnnotation {
        id,
        kind,
        display,
        options,
    }
}

/// Turns the configured `annotations` value into an ordered resolved list.
#[must_use]
pub fn resolve_annotations(
    chart: &dyn ChartView,
    shapes: &ShapeRegistry,
    annotations: &AnnotationList,
) -> Vec<ResolvedAnnotation> {
    let resolved: Vec<ResolvedAnnotation> = match annotations {
        AnnotationList::Keyed(map) => map
            .iter()
            .map(|(key, raw)| resolve_annotation_options(chart, shapes, Some(key.clone()), raw))
            .collect(),
        AnnotationList::Ordered(list) => list
            .iter()
            .map(|raw| resolve_annotation_options(chart, shapes, None, raw))
            .collect(),
        AnnotationList::Empty => Vec::new(),
    };
    trace!(count = resolved.len(), "resolved annotation options");
    resolved
}
