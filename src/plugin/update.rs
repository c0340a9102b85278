use std::rc::Rc;

use tracing::{debug, trace};

use crate::animation::resolve_updater;
use crate::elements::{ElementProperties, ShapeRegistry};
use crate::host::{ChartView, UpdateArgs};
use crate::plugin::ChartState;
use crate::plugin::reconcile::resync_elements;

/// Brings `state.elements` in line with `state.annotations` for one update cycle.
///
/// This is the only place elements get constructed.
pub(crate) fn update_elements(
    chart: &dyn ChartView,
    shapes: &ShapeRegistry,
    state: &mut ChartState,
    args: UpdateArgs,
) {
    let updater = resolve_updater(
        chart.animation(),
        &state.options.animation,
        args.mode,
        args.now_ms,
    );

    let count = state.annotations.len();
    resync_elements(&mut state.elements, count);

    let mut created = 0usize;
    for index in 0..count {
        let annotation = state.annotations[index].clone();
        let shape = shapes.resolve(Some(&annotation.kind));

        let stale = state.elements[index]
            .as_ref()
            .is_none_or(|element| element.kind() != shape.kind());
        if stale {
            let element = state.create_element(Rc::clone(shape));
            trace!(index, kind = %annotation.kind, element = element.id().get(), "create annotation element");
            state.elements[index] = Some(element);
            created += 1;
        }

        let geometry = shape.resolve_element_properties(chart, &annotation);
        if let Some(element) = state.elements[index].as_mut() {
            updater.update(
                element,
                ElementProperties {
                    geometry,
                    options: annotation,
                },
            );
        }
    }

    debug!(count, created, mode = ?args.mode, "updated annotation elements");
}
