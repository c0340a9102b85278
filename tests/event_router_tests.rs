use std::cell::RefCell;
use std::rc::Rc;

use chart_annotations::core::{Axis, ChartArea, DataScale};
use chart_annotations::host::{HeadlessChart, UpdateArgs, UpdateMode};
use chart_annotations::options::{
    AnnotationOptions, AnnotationPluginOptions, Listener, ListenerHook,
};
use chart_annotations::{AnnotationPlugin, ChartEvent, ChartHandle};

type Log = Rc<RefCell<Vec<(ListenerHook, usize, &'static str)>>>;

fn chart() -> HeadlessChart {
    HeadlessChart::new(ChartArea::new(0.0, 0.0, 400.0, 300.0))
        .with_scale(
            DataScale::new("x", Axis::X, 0.0, 400.0)
                .and_then(|scale| scale.with_range(0.0, 100.0))
                .expect("valid x scale"),
        )
        .with_scale(
            DataScale::new("y", Axis::Y, 300.0, 0.0)
                .and_then(|scale| scale.with_range(0.0, 10.0))
                .expect("valid y scale"),
        )
}

fn recorder(log: &Log, source: &'static str) -> Listener {
    let log = Rc::clone(log);
    Listener::new(move |context| {
        log.borrow_mut().push((context.hook, context.index, source));
    })
}

/// Box 0 spans x 40..120, box 1 spans x 240..320; both cover y 60..240.
fn two_boxes() -> Vec<AnnotationOptions> {
    vec![
        AnnotationOptions::of_kind("box")
            .with_x_range(10.0, 30.0)
            .with_y_range(2.0, 8.0),
        AnnotationOptions::of_kind("box")
            .with_x_range(60.0, 80.0)
            .with_y_range(2.0, 8.0),
    ]
}

fn prepared(options: &AnnotationPluginOptions) -> (AnnotationPlugin, ChartHandle) {
    let mut plugin = AnnotationPlugin::new();
    let handle = plugin.before_init().expect("new chart");
    let mut chart = chart();
    plugin
        .run_update_cycle(handle, &mut chart, options, UpdateArgs::new(UpdateMode::None, 0.0))
        .expect("update cycle");
    (plugin, handle)
}

#[test]
fn without_listeners_events_are_ignored() {
    let (mut plugin, handle) = prepared(&AnnotationPluginOptions::new(two_boxes()));
    let state = plugin.state(handle).expect("live chart");
    assert!(!state.listened());
    assert!(!state.move_listened());

    assert!(!plugin
        .before_event(handle, &ChartEvent::mouse_move(80.0, 150.0, 0.0))
        .expect("event"));
    assert!(plugin.state(handle).expect("live chart").hovered().is_none());
}

#[test]
fn click_listeners_do_not_enable_move_tracking() {
    let log = Log::default();
    let options = AnnotationPluginOptions::new(two_boxes())
        .with_listener(ListenerHook::Click, recorder(&log, "chart"));
    let (mut plugin, handle) = prepared(&options);

    let state = plugin.state(handle).expect("live chart");
    assert!(state.listened());
    assert!(!state.move_listened());

    plugin
        .before_event(handle, &ChartEvent::mouse_move(80.0, 150.0, 0.0))
        .expect("event");
    assert!(plugin.state(handle).expect("live chart").hovered().is_none());
}

#[test]
fn annotation_level_move_listener_enables_both_flags() {
    let log = Log::default();
    let mut annotations = two_boxes();
    annotations[1] = annotations[1]
        .clone()
        .with_listener(ListenerHook::Leave, recorder(&log, "own"));
    let (plugin, handle) = prepared(&AnnotationPluginOptions::new(annotations));

    let state = plugin.state(handle).expect("live chart");
    assert!(state.listened());
    assert!(state.move_listened());
}

#[test]
fn leave_fires_before_enter_when_the_hover_moves() {
    let log = Log::default();
    let options = AnnotationPluginOptions::new(two_boxes())
        .with_listener(ListenerHook::Enter, recorder(&log, "chart"))
        .with_listener(ListenerHook::Leave, recorder(&log, "chart"));
    let (mut plugin, handle) = prepared(&options);

    let moves = [
        ChartEvent::mouse_move(80.0, 150.0, 0.0),
        ChartEvent::mouse_move(90.0, 140.0, 10.0),
        ChartEvent::mouse_move(280.0, 150.0, 20.0),
        ChartEvent::mouse_move(200.0, 150.0, 30.0),
        ChartEvent::mouse_move(280.0, 150.0, 40.0),
        ChartEvent::mouse_out(50.0),
    ];
    let redraws: Vec<bool> = moves
        .iter()
        .map(|event| plugin.before_event(handle, event).expect("event"))
        .collect();

    assert_eq!(redraws, vec![true, false, true, true, true, true]);
    assert_eq!(
        log.borrow().as_slice(),
        &[
            (ListenerHook::Enter, 0, "chart"),
            (ListenerHook::Leave, 0, "chart"),
            (ListenerHook::Enter, 1, "chart"),
            (ListenerHook::Leave, 1, "chart"),
            (ListenerHook::Enter, 1, "chart"),
            (ListenerHook::Leave, 1, "chart"),
        ]
    );
    assert!(plugin.state(handle).expect("live chart").hovered().is_none());
}

#[test]
fn element_listeners_take_precedence_over_chart_listeners() {
    let log = Log::default();
    let mut annotations = two_boxes();
    annotations[0] = annotations[0]
        .clone()
        .with_listener(ListenerHook::Enter, recorder(&log, "own"));
    let options = AnnotationPluginOptions::new(annotations)
        .with_listener(ListenerHook::Enter, recorder(&log, "chart"));
    let (mut plugin, handle) = prepared(&options);

    plugin
        .before_event(handle, &ChartEvent::mouse_move(80.0, 150.0, 0.0))
        .expect("event");
    plugin
        .before_event(handle, &ChartEvent::mouse_move(280.0, 150.0, 10.0))
        .expect("event");

    assert_eq!(
        log.borrow().as_slice(),
        &[(ListenerHook::Enter, 0, "own"), (ListenerHook::Enter, 1, "chart")]
    );
}

#[test]
fn nearest_element_wins_and_ties_go_to_the_lowest_index() {
    let log = Log::default();
    let overlapping = vec![
        AnnotationOptions::of_kind("box")
            .with_x_range(10.0, 50.0)
            .with_y_range(2.0, 8.0),
        AnnotationOptions::of_kind("box")
            .with_x_range(10.0, 50.0)
            .with_y_range(2.0, 8.0),
        AnnotationOptions::of_kind("box")
            .with_x_range(40.0, 60.0)
            .with_y_range(2.0, 8.0),
    ];
    let options = AnnotationPluginOptions::new(overlapping)
        .with_listener(ListenerHook::Click, recorder(&log, "chart"));
    let (mut plugin, handle) = prepared(&options);

    // Inside all three; box 2's center (200, 150) is closest.
    plugin
        .before_event(handle, &ChartEvent::click(190.0, 150.0, 0.0))
        .expect("event");
    // Inside boxes 0 and 1 only; identical centers.
    plugin
        .before_event(handle, &ChartEvent::click(60.0, 150.0, 1_000.0))
        .expect("event");

    let indices: Vec<usize> = log.borrow().iter().map(|(_, index, _)| *index).collect();
    assert_eq!(indices, vec![2, 0]);
}

#[test]
fn hidden_elements_are_not_hit() {
    let log = Log::default();
    let mut annotations = two_boxes();
    annotations[0] = annotations[0].clone().with_display(false);
    let options = AnnotationPluginOptions::new(annotations)
        .with_listener(ListenerHook::Click, recorder(&log, "chart"));
    let (mut plugin, handle) = prepared(&options);

    assert!(!plugin
        .before_event(handle, &ChartEvent::click(80.0, 150.0, 0.0))
        .expect("event"));
    assert!(log.borrow().is_empty());
}

#[test]
fn click_without_dblclick_listener_dispatches_immediately() {
    let log = Log::default();
    let options = AnnotationPluginOptions::new(two_boxes())
        .with_listener(ListenerHook::Click, recorder(&log, "chart"));
    let (mut plugin, handle) = prepared(&options);

    assert!(plugin
        .before_event(handle, &ChartEvent::click(80.0, 150.0, 0.0))
        .expect("event"));
    assert!(!plugin
        .before_event(handle, &ChartEvent::click(200.0, 20.0, 10.0))
        .expect("event"));
    assert_eq!(log.borrow().as_slice(), &[(ListenerHook::Click, 0, "chart")]);
}

#[test]
fn second_click_within_the_window_is_a_dblclick() {
    let log = Log::default();
    let options = AnnotationPluginOptions::new(two_boxes())
        .with_listener(ListenerHook::Click, recorder(&log, "chart"))
        .with_listener(ListenerHook::DblClick, recorder(&log, "chart"));
    let (mut plugin, handle) = prepared(&options);

    assert!(!plugin
        .before_event(handle, &ChartEvent::click(80.0, 150.0, 1_000.0))
        .expect("event"));
    assert!(log.borrow().is_empty());

    assert!(plugin
        .before_event(handle, &ChartEvent::click(82.0, 150.0, 1_200.0))
        .expect("event"));
    assert_eq!(log.borrow().as_slice(), &[(ListenerHook::DblClick, 0, "chart")]);

    // The pending click was consumed by the dblclick.
    assert!(!plugin.tick(handle, 5_000.0).expect("tick"));
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn deferred_click_is_flushed_once_the_window_expires() {
    let log = Log::default();
    let mut annotations = two_boxes();
    annotations[0] = annotations[0]
        .clone()
        .with_listener(ListenerHook::DblClick, recorder(&log, "own"))
        .with_listener(ListenerHook::Click, recorder(&log, "own"));
    let options = AnnotationPluginOptions::new(annotations).with_dbl_click_speed_ms(300.0);
    let (mut plugin, handle) = prepared(&options);

    plugin
        .before_event(handle, &ChartEvent::click(80.0, 150.0, 1_000.0))
        .expect("event");
    assert!(
        plugin
            .state(handle)
            .and_then(|state| state.element(0))
            .and_then(|element| element.pending_click())
            .is_some()
    );

    assert!(!plugin.tick(handle, 1_300.0).expect("tick"));
    assert!(log.borrow().is_empty());

    assert!(plugin.tick(handle, 1_301.0).expect("tick"));
    assert_eq!(log.borrow().as_slice(), &[(ListenerHook::Click, 0, "own")]);

    // A late second click starts a fresh window instead of a dblclick.
    plugin
        .before_event(handle, &ChartEvent::click(80.0, 150.0, 1_400.0))
        .expect("event");
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn expired_clicks_are_flushed_before_the_next_event() {
    let log = Log::default();
    let options = AnnotationPluginOptions::new(two_boxes())
        .with_listener(ListenerHook::Click, recorder(&log, "chart"))
        .with_listener(ListenerHook::DblClick, recorder(&log, "chart"));
    let (mut plugin, handle) = prepared(&options);

    plugin
        .before_event(handle, &ChartEvent::click(80.0, 150.0, 0.0))
        .expect("event");
    // A click on the other box long after: the first click flushes, the new one defers.
    assert!(plugin
        .before_event(handle, &ChartEvent::click(280.0, 150.0, 1_000.0))
        .expect("event"));

    assert_eq!(log.borrow().as_slice(), &[(ListenerHook::Click, 0, "chart")]);
    let pending = plugin
        .state(handle)
        .and_then(|state| state.element(1))
        .and_then(|element| element.pending_click())
        .copied()
        .expect("second click deferred");
    assert_eq!(pending.timestamp_ms, 1_000.0);
}

#[test]
fn listener_context_carries_the_keyed_id() {
    let seen = Rc::new(RefCell::new(Vec::<Option<String>>::new()));
    let sink = Rc::clone(&seen);
    let mut options = AnnotationPluginOptions::from_json_str(
        r#"{"annotations": {"target": {"type": "point", "xValue": 50, "yValue": 5, "radius": 8}}}"#,
    )
    .expect("valid options");
    options = options.with_listener(
        ListenerHook::Click,
        Listener::new(move |context| sink.borrow_mut().push(context.annotation.id.clone())),
    );
    let (mut plugin, handle) = prepared(&options);

    assert!(plugin
        .before_event(handle, &ChartEvent::click(203.0, 151.0, 0.0))
        .expect("event"));
    assert_eq!(seen.borrow().as_slice(), &[Some("target".to_owned())]);
}
