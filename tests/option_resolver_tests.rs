use chart_annotations::core::{Axis, ChartArea, DataScale};
use chart_annotations::elements::ShapeRegistry;
use chart_annotations::host::HeadlessChart;
use chart_annotations::options::{
    AnnotationList, AnnotationOptions, AnnotationPluginOptions, Scriptable, resolve_annotations,
};

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

#[test]
fn keyed_annotations_keep_insertion_order_and_ids() {
    let options = AnnotationPluginOptions::from_json_str(
        r#"{
            "annotations": {
                "zeta": {"type": "box", "yMin": 2, "yMax": 8},
                "alpha": {"type": "line", "scaleID": "y", "value": 5},
                "mid": {"type": "point", "xValue": 50, "yValue": 5}
            }
        }"#,
    )
    .expect("valid options");

    let resolved = resolve_annotations(
        &chart(),
        &ShapeRegistry::with_builtin_shapes(),
        &options.annotations,
    );

    let ids: Vec<Option<&str>> = resolved.iter().map(|entry| entry.id.as_deref()).collect();
    assert_eq!(ids, vec![Some("zeta"), Some("alpha"), Some("mid")]);
    let kinds: Vec<&str> = resolved.iter().map(|entry| entry.kind.as_str()).collect();
    assert_eq!(kinds, vec!["box", "line", "point"]);
}

#[test]
fn sequence_annotations_have_no_ids() {
    let options = AnnotationPluginOptions::from_json_str(
        r#"{"annotations": [{"type": "ellipse", "xMin": 1, "xMax": 2}, {"type": "box"}]}"#,
    )
    .expect("valid options");

    let resolved = resolve_annotations(
        &chart(),
        &ShapeRegistry::with_builtin_shapes(),
        &options.annotations,
    );
    assert_eq!(resolved.len(), 2);
    assert!(resolved.iter().all(|entry| entry.id.is_none()));
    assert_eq!(resolved[0].kind, "ellipse");
}

#[test]
fn malformed_annotations_degrade_gracefully() {
    let scalar = AnnotationPluginOptions::from_json_str(r#"{"annotations": 42}"#)
        .expect("scalar annotations are tolerated");
    assert!(matches!(scalar.annotations, AnnotationList::Empty));

    let mixed = AnnotationPluginOptions::from_json_str(
        r#"{"annotations": {"ok": {"type": "box"}, "text": "nope", "bad": {"yMin": [1, 2]}}}"#,
    )
    .expect("bad entries are skipped");
    assert_eq!(mixed.annotations.len(), 1);

    let resolved = resolve_annotations(
        &chart(),
        &ShapeRegistry::with_builtin_shapes(),
        &mixed.annotations,
    );
    assert_eq!(resolved[0].id.as_deref(), Some("ok"));
}

#[test]
fn invalid_json_text_is_a_config_error() {
    assert!(AnnotationPluginOptions::from_json_str("{ not json").is_err());
    assert!(AnnotationPluginOptions::from_json_str(r#"{"dblClickSpeed": -1}"#).is_err());
}

#[test]
fn layers_merge_shape_then_chart_then_entry() {
    let chart = chart().with_element_defaults(
        "box",
        AnnotationOptions {
            border_width: Some(4.0),
            radius: Some(3.0),
            ..AnnotationOptions::default()
        },
    );
    let entry = AnnotationOptions::of_kind("box").with_y_range(2.0, 8.0);
    let mut entry_with_radius = entry.clone();
    entry_with_radius.radius = Some(9.0);

    let resolved = resolve_annotations(
        &chart,
        &ShapeRegistry::with_builtin_shapes(),
        &AnnotationList::from(vec![entry, entry_with_radius]),
    );

    // Shape default.
    assert_eq!(resolved[0].options.x_scale_id.as_deref(), Some("x"));
    // Chart-level default beats the shape default.
    assert_eq!(resolved[0].options.border_width, Some(4.0));
    assert_eq!(resolved[0].options.radius, Some(3.0));
    // Entry beats both.
    assert_eq!(resolved[1].options.radius, Some(9.0));
}

#[test]
fn unknown_type_resolves_as_line() {
    let resolved = resolve_annotations(
        &chart(),
        &ShapeRegistry::with_builtin_shapes(),
        &AnnotationList::from(vec![AnnotationOptions::of_kind("hexagon").with_scale_id("y")]),
    );
    assert_eq!(resolved[0].kind, "line");
    assert_eq!(resolved[0].options.kind.as_deref(), Some("line"));
}

#[test]
fn display_defaults_to_true_and_callbacks_see_merged_options() {
    let hidden_without_value = Scriptable::computed(|context| context.options.value.is_some());
    let entries = vec![
        AnnotationOptions::of_kind("line").with_scale_id("y"),
        AnnotationOptions::of_kind("line")
            .with_scale_id("y")
            .with_display_fn(hidden_without_value.clone()),
        AnnotationOptions::of_kind("line")
            .with_scale_id("y")
            .with_value(3.0)
            .with_display_fn(hidden_without_value),
        AnnotationOptions::of_kind("box").with_display(false),
    ];

    let resolved = resolve_annotations(
        &chart(),
        &ShapeRegistry::with_builtin_shapes(),
        &AnnotationList::from(entries),
    );
    let display: Vec<bool> = resolved.iter().map(|entry| entry.display).collect();
    assert_eq!(display, vec![true, false, true, false]);
}

#[test]
fn display_callback_can_read_the_chart() {
    let needs_wide_chart = Scriptable::computed(|context| context.chart.chart_area().width() > 500.0);
    let resolved = resolve_annotations(
        &chart(),
        &ShapeRegistry::with_builtin_shapes(),
        &AnnotationList::from(vec![
            AnnotationOptions::of_kind("box").with_display_fn(needs_wide_chart),
        ]),
    );
    assert!(!resolved[0].display);
}
