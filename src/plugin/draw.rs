use tracing::trace;

use crate::core::ChartArea;
use crate::elements::AnnotationElement;
use crate::options::DrawTime;
use crate::plugin::ChartState;
use crate::render::AnnotationCanvas;

/// Draws everything scheduled for `hook`: clipped bodies, then unclipped labels.
pub(crate) fn draw_annotations(
    chart_area: ChartArea,
    state: &ChartState,
    hook: DrawTime,
    canvas: &mut dyn AnnotationCanvas,
) {
    let plugin_draw_time = state.options.draw_time;
    let displayed: Vec<&AnnotationElement> = state
        .elements
        .iter()
        .flatten()
        .filter(|element| element.is_displayed())
        .collect();

    canvas.clip_area(chart_area);
    let mut bodies = 0usize;
    for element in &displayed {
        let element_time = element.options().and_then(|options| options.draw_time());
        if element_time.or(plugin_draw_time).unwrap_or(hook) == hook {
            element.draw(canvas);
            bodies += 1;
        }
    }
    canvas.unclip_area();

    let mut labels = 0usize;
    for element in displayed.iter().filter(|element| element.supports_label()) {
        let Some(options) = element.options() else {
            continue;
        };
        let Some(label) = options.label().filter(|label| label.is_enabled()) else {
            continue;
        };
        let effective = label
            .draw_time
            .or(options.draw_time())
            .or(plugin_draw_time)
            .unwrap_or(hook);
        if effective == hook {
            element.draw_label(canvas, chart_area);
            labels += 1;
        }
    }

    if bodies + labels > 0 {
        trace!(hook = ?hook, bodies, labels, "drew annotations");
    }
}
