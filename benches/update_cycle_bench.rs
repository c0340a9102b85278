use chart_annotations::core::{Axis, ChartArea, DataScale};
use chart_annotations::host::{HeadlessChart, UpdateArgs, UpdateMode};
use chart_annotations::options::{
    AnnotationOptions, AnnotationPluginOptions, LabelOptions, Listener, ListenerHook,
};
use chart_annotations::render::RenderFrame;
use chart_annotations::{AnnotationPlugin, ChartEvent};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn chart() -> HeadlessChart {
    HeadlessChart::new(ChartArea::new(0.0, 0.0, 1920.0, 1080.0))
        .with_scale(
            DataScale::new("x", Axis::X, 0.0, 1920.0)
                .and_then(|scale| scale.with_range(0.0, 10_000.0))
                .expect("valid x scale"),
        )
        .with_scale(
            DataScale::new("y", Axis::Y, 1080.0, 0.0)
                .and_then(|scale| scale.with_range(0.0, 2_500.0))
                .expect("valid y scale"),
        )
}

fn mixed_annotations(count: usize) -> AnnotationPluginOptions {
    let annotations = (0..count)
        .map(|i| {
            let t = i as f64 * 10.0;
            match i % 4 {
                0 => AnnotationOptions::of_kind("box")
                    .with_x_range(t, t + 5.0)
                    .with_y_range(100.0, 200.0),
                1 => AnnotationOptions::of_kind("line")
                    .with_scale_id("y")
                    .with_value(t * 0.25)
                    .with_label(LabelOptions::text("level")),
                2 => AnnotationOptions::of_kind("ellipse")
                    .with_x_range(t, t + 20.0)
                    .with_y_range(500.0, 800.0),
                _ => AnnotationOptions::of_kind("point").with_point(t, 1_200.0),
            }
        })
        .collect::<Vec<_>>();
    AnnotationPluginOptions::new(annotations)
}

fn bench_update_cycle_1k(c: &mut Criterion) {
    let options = mixed_annotations(1_000);
    let mut plugin = AnnotationPlugin::new();
    let handle = plugin.before_init().expect("new chart");
    let mut chart = chart();

    c.bench_function("update_cycle_1k", |b| {
        b.iter(|| {
            plugin
                .run_update_cycle(
                    handle,
                    &mut chart,
                    black_box(&options),
                    UpdateArgs::new(UpdateMode::None, 0.0),
                )
                .expect("update cycle");
        })
    });
}

fn bench_draw_all_hooks_1k(c: &mut Criterion) {
    let options = mixed_annotations(1_000);
    let mut plugin = AnnotationPlugin::new();
    let handle = plugin.before_init().expect("new chart");
    let mut chart = chart();
    plugin
        .run_update_cycle(handle, &mut chart, &options, UpdateArgs::new(UpdateMode::None, 0.0))
        .expect("update cycle");
    let mut frame = RenderFrame::new();

    c.bench_function("draw_all_hooks_1k", |b| {
        b.iter(|| {
            frame.clear();
            plugin
                .before_draw(handle, &chart, &mut frame)
                .and_then(|()| plugin.before_datasets_draw(handle, &chart, &mut frame))
                .and_then(|()| plugin.after_datasets_draw(handle, &chart, &mut frame))
                .and_then(|()| plugin.after_draw(handle, &chart, &mut frame))
                .expect("draw hooks");
            black_box(frame.shape_count());
        })
    });
}

fn bench_hover_routing_1k(c: &mut Criterion) {
    let options = mixed_annotations(1_000).with_listener(
        ListenerHook::Enter,
        Listener::new(|context| {
            black_box(context.index);
        }),
    );
    let mut plugin = AnnotationPlugin::new();
    let handle = plugin.before_init().expect("new chart");
    let mut chart = chart();
    plugin
        .run_update_cycle(handle, &mut chart, &options, UpdateArgs::new(UpdateMode::None, 0.0))
        .expect("update cycle");

    let mut x = 0.0;
    c.bench_function("hover_routing_1k", |b| {
        b.iter(|| {
            x = (x + 7.0) % 1920.0;
            let _ = plugin
                .before_event(handle, &ChartEvent::mouse_move(black_box(x), 150.0, 0.0))
                .expect("event");
        })
    });
}

criterion_group!(
    benches,
    bench_update_cycle_1k,
    bench_draw_all_hooks_1k,
    bench_hover_routing_1k
);
criterion_main!(benches);
