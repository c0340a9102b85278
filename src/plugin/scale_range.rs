use tracing::trace;

use crate::core::AnnotationScale;
use crate::options::ResolvedAnnotation;

/// Folds every displayed annotation value anchored to `scale` into the
/// scale's current range. Unset bounds start at `±∞`; non-finite parsed
/// values are ignored.
#[must_use]
pub fn scale_limits(scale: &dyn AnnotationScale, annotations: &[ResolvedAnnotation]) -> (f64, f64) {
    let mut min = scale.min().unwrap_or(f64::NEG_INFINITY);
    let mut max = scale.max().unwrap_or(f64::INFINITY);

    for annotation in annotations
        .iter()
        .filter(|annotation| annotation.display && annotation.references_scale(scale))
    {
        for raw in annotation.range_values(scale) {
            let value = scale.parse(raw);
            if value.is_finite() {
                min = min.min(value);
                max = max.max(value);
            }
        }
    }
    (min, max)
}

/// Widens an auto-ranged scale so annotation extents stay visible.
///
/// Bounds the user set explicitly (`min`/`suggestedMin`, `max`/`suggestedMax`)
/// are never touched. Returns `true` when either bound moved.
pub fn adjust_scale_range(scale: &mut dyn AnnotationScale, annotations: &[ResolvedAnnotation]) -> bool {
    let (min, max) = scale_limits(scale, annotations);
    let bounds = scale.bounds();
    let mut changed = false;

    if min.is_finite() && !bounds.locks_min() && scale.min() != Some(min) {
        scale.set_min(min);
        changed = true;
    }
    if max.is_finite() && !bounds.locks_max() && scale.max() != Some(max) {
        scale.set_max(max);
        changed = true;
    }

    if changed {
        trace!(
            scale = %scale.id(),
            axis = scale.axis().as_str(),
            min,
            max,
            "annotation widened scale range"
        );
        scale.handle_tick_range_options();
    }
    changed
}
