use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::Point;
use crate::elements::ElementId;
use crate::options::{ListenerContext, ListenerHook, ListenerTable, ResolvedAnnotation};
use crate::plugin::{ChartState, HoveredElement};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartEventKind {
    #[serde(rename = "mousemove")]
    MouseMove,
    #[serde(rename = "mouseout")]
    MouseOut,
    Click,
}

/// Pointer event forwarded by the host, in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartEvent {
    pub kind: ChartEventKind,
    pub x: f64,
    pub y: f64,
    pub timestamp_ms: f64,
}

impl ChartEvent {
    #[must_use]
    pub const fn new(kind: ChartEventKind, x: f64, y: f64, timestamp_ms: f64) -> Self {
        Self {
            kind,
            x,
            y,
            timestamp_ms,
        }
    }

    #[must_use]
    pub const fn mouse_move(x: f64, y: f64, timestamp_ms: f64) -> Self {
        Self::new(ChartEventKind::MouseMove, x, y, timestamp_ms)
    }

    #[must_use]
    pub const fn mouse_out(timestamp_ms: f64) -> Self {
        Self::new(ChartEventKind::MouseOut, f64::NAN, f64::NAN, timestamp_ms)
    }

    #[must_use]
    pub const fn click(x: f64, y: f64, timestamp_ms: f64) -> Self {
        Self::new(ChartEventKind::Click, x, y, timestamp_ms)
    }

    #[must_use]
    pub const fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Refreshes the chart-level listener table and the dispatch short-circuit flags.
pub(crate) fn update_listeners(state: &mut ChartState) {
    state.listeners = state.options.listeners.clone();

    let annotations_listen = |hooks: &[ListenerHook]| {
        state
            .annotations
            .iter()
            .any(|annotation| annotation.options.listeners.has_any(hooks))
    };
    let move_listened =
        state.listeners.has_any(&ListenerHook::MOVE_HOOKS) || annotations_listen(&ListenerHook::MOVE_HOOKS);
    let listened = move_listened
        || state.listeners.has_any(&ListenerHook::CLICK_HOOKS)
        || annotations_listen(&ListenerHook::CLICK_HOOKS);

    state.move_listened = move_listened;
    state.listened = listened;
}

/// Routes one pointer event. Returns `true` when a listener ran.
pub(crate) fn handle_event(state: &mut ChartState, event: &ChartEvent) -> bool {
    if !state.listened {
        return false;
    }

    let mut invoked = flush_pending_clicks(state, event.timestamp_ms);
    match event.kind {
        ChartEventKind::MouseMove | ChartEventKind::MouseOut => {
            if state.move_listened {
                invoked |= handle_move(state, event);
            }
        }
        ChartEventKind::Click => invoked |= handle_click(state, event),
    }
    invoked
}

/// Dispatches `click` for every deferred click older than `dblClickSpeed`.
pub(crate) fn flush_pending_clicks(state: &mut ChartState, now_ms: f64) -> bool {
    let speed = state.options.dbl_click_speed_ms;
    let mut invoked = false;

    for (index, slot) in state.elements.iter_mut().enumerate() {
        let Some(element) = slot.as_mut() else {
            continue;
        };
        let expired = element
            .pending_click()
            .is_some_and(|pending| now_ms - pending.timestamp_ms > speed);
        if !expired {
            continue;
        }
        let Some(pending) = element.take_pending_click() else {
            continue;
        };
        if let Some(annotation) = element.options() {
            invoked |= dispatch(
                &state.listeners,
                ListenerHook::Click,
                index,
                element.id(),
                annotation,
                &pending,
            );
        }
    }
    invoked
}

fn nearest_element(state: &ChartState, point: Point) -> Option<usize> {
    state
        .elements
        .iter()
        .enumerate()
        .filter_map(|(index, slot)| {
            let element = slot.as_ref()?;
            if !element.is_displayed() || !element.in_range(point) {
                return None;
            }
            let center = element.center_point()?;
            Some((OrderedFloat(center.distance_to(point)), index))
        })
        .min()
        .map(|(_, index)| index)
}

fn handle_move(state: &mut ChartState, event: &ChartEvent) -> bool {
    let next = match event.kind {
        ChartEventKind::MouseOut => None,
        _ => nearest_element(state, event.position()).and_then(|index| {
            let element = state.elements.get(index)?.as_ref()?;
            Some(HoveredElement {
                id: element.id(),
                index,
                annotation: element.options()?.clone(),
            })
        }),
    };

    let previous_id = state.hovered.as_ref().map(|hovered| hovered.id);
    if previous_id == next.as_ref().map(|hovered| hovered.id) {
        return false;
    }

    let mut invoked = false;
    if let Some(previous) = state.hovered.take() {
        invoked |= dispatch(
            &state.listeners,
            ListenerHook::Leave,
            previous.index,
            previous.id,
            &previous.annotation,
            event,
        );
    }
    if let Some(hovered) = &next {
        invoked |= dispatch(
            &state.listeners,
            ListenerHook::Enter,
            hovered.index,
            hovered.id,
            &hovered.annotation,
            event,
        );
    }
    state.hovered = next;
    invoked
}

fn handle_click(state: &mut ChartState, event: &ChartEvent) -> bool {
    let Some(index) = nearest_element(state, event.position()) else {
        return false;
    };
    let Some(element) = state.elements.get_mut(index).and_then(Option::as_mut) else {
        return false;
    };
    let Some(annotation) = element.options().cloned() else {
        return false;
    };

    // Expired clicks were flushed by the caller, so a pending one is inside the window.
    if element.take_pending_click().is_some() {
        return dispatch(
            &state.listeners,
            ListenerHook::DblClick,
            index,
            element.id(),
            &annotation,
            event,
        );
    }

    let dblclick_listened =
        annotation.options.listeners.dblclick.is_some() || state.listeners.dblclick.is_some();
    if dblclick_listened {
        trace!(index, at = event.timestamp_ms, "deferred annotation click");
        element.set_pending_click(*event);
        return false;
    }

    dispatch(
        &state.listeners,
        ListenerHook::Click,
        index,
        element.id(),
        &annotation,
        event,
    )
}

fn dispatch(
    chart_listeners: &ListenerTable,
    hook: ListenerHook,
    index: usize,
    element: ElementId,
    annotation: &ResolvedAnnotation,
    event: &ChartEvent,
) -> bool {
    let Some(listener) = annotation
        .options
        .listeners
        .get(hook)
        .or_else(|| chart_listeners.get(hook))
    else {
        return false;
    };

    trace!(hook = ?hook, index, element = element.get(), "dispatch annotation listener");
    listener.call(&ListenerContext {
        hook,
        index,
        element,
        annotation,
        event,
    });
    true
}
