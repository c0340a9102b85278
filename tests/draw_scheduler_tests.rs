use approx::assert_relative_eq;
use chart_annotations::core::{Axis, ChartArea, DataScale};
use chart_annotations::host::{HeadlessChart, UpdateArgs, UpdateMode};
use chart_annotations::options::{
    AnnotationOptions, AnnotationPluginOptions, DrawTime, LabelOptions, LabelPosition,
};
use chart_annotations::render::{DrawCommand, RenderFrame};
use chart_annotations::{AnnotationPlugin, ChartHandle};

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

fn prepared(options: &AnnotationPluginOptions) -> (AnnotationPlugin, ChartHandle, HeadlessChart) {
    let mut plugin = AnnotationPlugin::new();
    let handle = plugin.before_init().expect("new chart");
    let mut chart = chart();
    plugin
        .run_update_cycle(handle, &mut chart, options, UpdateArgs::new(UpdateMode::None, 0.0))
        .expect("update cycle");
    (plugin, handle, chart)
}

/// Draws every hook into its own frame, in host order.
fn draw_all(plugin: &AnnotationPlugin, handle: ChartHandle, chart: &HeadlessChart) -> Vec<(DrawTime, RenderFrame)> {
    DrawTime::ALL
        .into_iter()
        .map(|hook| {
            let mut frame = RenderFrame::new();
            plugin
                .draw(handle, chart, hook, &mut frame)
                .expect("draw hook");
            frame.validate().expect("balanced frame");
            (hook, frame)
        })
        .collect()
}

fn shapes_at(frames: &[(DrawTime, RenderFrame)], hook: DrawTime) -> usize {
    frames
        .iter()
        .find(|(at, _)| *at == hook)
        .map_or(0, |(_, frame)| frame.shape_count())
}

#[test]
fn default_draw_time_is_after_datasets_draw() {
    let options = AnnotationPluginOptions::new(vec![
        AnnotationOptions::of_kind("box").with_y_range(2.0, 8.0),
    ]);
    let (plugin, handle, chart) = prepared(&options);
    let frames = draw_all(&plugin, handle, &chart);

    assert_eq!(shapes_at(&frames, DrawTime::BeforeDraw), 0);
    assert_eq!(shapes_at(&frames, DrawTime::BeforeDatasetsDraw), 0);
    assert_eq!(shapes_at(&frames, DrawTime::AfterDatasetsDraw), 1);
    assert_eq!(shapes_at(&frames, DrawTime::AfterDraw), 0);
}

#[test]
fn global_after_draw_only_draws_at_after_draw() {
    let options = AnnotationPluginOptions::new(vec![
        AnnotationOptions::of_kind("box").with_y_range(2.0, 8.0),
        AnnotationOptions::of_kind("line").with_scale_id("y").with_value(5.0),
    ])
    .with_draw_time(Some(DrawTime::AfterDraw));
    let (plugin, handle, chart) = prepared(&options);
    let frames = draw_all(&plugin, handle, &chart);

    for (hook, frame) in &frames {
        let expected = if *hook == DrawTime::AfterDraw { 2 } else { 0 };
        assert_eq!(frame.shape_count(), expected, "hook {hook:?}");
    }
}

#[test]
fn element_draw_time_overrides_the_plugin_draw_time() {
    let options = AnnotationPluginOptions::new(vec![
        AnnotationOptions::of_kind("box")
            .with_y_range(2.0, 8.0)
            .with_draw_time(DrawTime::BeforeDraw),
        AnnotationOptions::of_kind("box").with_y_range(3.0, 4.0),
    ])
    .with_draw_time(Some(DrawTime::AfterDraw));
    let (plugin, handle, chart) = prepared(&options);
    let frames = draw_all(&plugin, handle, &chart);

    assert_eq!(shapes_at(&frames, DrawTime::BeforeDraw), 1);
    assert_eq!(shapes_at(&frames, DrawTime::AfterDraw), 1);
}

#[test]
fn label_draw_time_overrides_the_shape_draw_time() {
    let options = AnnotationPluginOptions::new(vec![
        AnnotationOptions::of_kind("line")
            .with_scale_id("y")
            .with_value(5.0)
            .with_label(
                LabelOptions::text("limit")
                    .with_draw_time(DrawTime::AfterDraw)
                    .with_position(LabelPosition::Start),
            ),
    ]);
    let (plugin, handle, chart) = prepared(&options);
    let frames = draw_all(&plugin, handle, &chart);

    let (_, datasets) = &frames[2];
    assert!(datasets.commands.iter().any(|command| matches!(command, DrawCommand::Line(_))));
    assert_eq!(datasets.texts().count(), 0);

    let (_, after) = &frames[3];
    assert!(!after.commands.iter().any(|command| matches!(command, DrawCommand::Line(_))));
    let texts: Vec<&str> = after.texts().map(|text| text.text.as_str()).collect();
    assert_eq!(texts, vec!["limit"]);
}

#[test]
fn labels_are_drawn_after_the_clip_is_released() {
    let options = AnnotationPluginOptions::new(vec![
        AnnotationOptions::of_kind("box")
            .with_y_range(2.0, 8.0)
            .with_label(LabelOptions::text("zone")),
    ]);
    let (plugin, handle, chart) = prepared(&options);

    let mut frame = RenderFrame::new();
    plugin
        .after_datasets_draw(handle, &chart, &mut frame)
        .expect("draw hook");

    let unclip = frame
        .commands
        .iter()
        .position(|command| matches!(command, DrawCommand::Unclip))
        .expect("unclip recorded");
    let text = frame
        .commands
        .iter()
        .position(|command| matches!(command, DrawCommand::Text(_)))
        .expect("label recorded");
    assert!(matches!(frame.commands[0], DrawCommand::Clip(_)));
    assert!(matches!(frame.commands[1], DrawCommand::Rect(_)));
    assert!(text > unclip);
}

#[test]
fn disabled_labels_and_hidden_elements_are_skipped() {
    let options = AnnotationPluginOptions::new(vec![
        AnnotationOptions::of_kind("box")
            .with_y_range(2.0, 8.0)
            .with_display(false)
            .with_label(LabelOptions::text("hidden")),
        AnnotationOptions::of_kind("line")
            .with_scale_id("y")
            .with_value(5.0)
            .with_label(LabelOptions {
                enabled: Some(false),
                ..LabelOptions::text("off")
            }),
    ]);
    let (plugin, handle, chart) = prepared(&options);

    let mut frame = RenderFrame::new();
    plugin
        .after_datasets_draw(handle, &chart, &mut frame)
        .expect("draw hook");
    assert_eq!(frame.shape_count(), 1);
    assert_eq!(frame.texts().count(), 0);
}

#[test]
fn ellipse_and_point_emit_ellipse_primitives() {
    let options = AnnotationPluginOptions::new(vec![
        AnnotationOptions::of_kind("ellipse")
            .with_x_range(10.0, 30.0)
            .with_y_range(2.0, 8.0),
        AnnotationOptions::of_kind("point").with_point(50.0, 5.0).with_radius(6.0),
    ]);
    let (plugin, handle, chart) = prepared(&options);

    let mut frame = RenderFrame::new();
    plugin
        .after_datasets_draw(handle, &chart, &mut frame)
        .expect("draw hook");

    let radii: Vec<(f64, f64)> = frame
        .commands
        .iter()
        .filter_map(|command| match command {
            DrawCommand::Ellipse(ellipse) => Some((ellipse.radius_x, ellipse.radius_y)),
            _ => None,
        })
        .collect();
    assert_eq!(radii.len(), 2);
    assert_relative_eq!(radii[0].0, 40.0, epsilon = 1e-9);
    assert_relative_eq!(radii[0].1, 90.0, epsilon = 1e-9);
    assert_relative_eq!(radii[1].0, 6.0, epsilon = 1e-9);
    assert_relative_eq!(radii[1].1, 6.0, epsilon = 1e-9);
}
