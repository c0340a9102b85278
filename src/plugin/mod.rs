//! Plugin facade: per-chart state plus the host lifecycle hooks.

mod draw;
mod events;
mod reconcile;
mod scale_range;
mod state;
mod update;

use std::rc::Rc;

use tracing::{debug, trace};

use crate::core::{AnnotationScale, ScaleKind};
use crate::elements::{Shape, ShapeRegistry};
use crate::error::{AnnotationError, AnnotationResult};
use crate::host::{ChartView, ElementTypeRegistry, HeadlessChart, UpdateArgs};
use crate::options::{AnnotationPluginOptions, DrawTime, resolve_annotations};
use crate::render::AnnotationCanvas;

pub use events::{ChartEvent, ChartEventKind};
pub use reconcile::resync_elements;
pub use scale_range::{adjust_scale_range, scale_limits};
pub use state::{ChartHandle, ChartState, ChartStateRegistry, HoveredElement};

pub const PLUGIN_ID: &str = "annotation";

/// Annotation plugin instance shared by every chart of one host.
#[derive(Debug, Default)]
pub struct AnnotationPlugin {
    shapes: ShapeRegistry,
    states: ChartStateRegistry,
}

impl AnnotationPlugin {
    /// Plugin with the built-in `box`, `line`, `ellipse` and `point` shapes.
    #[must_use]
    pub fn new() -> Self {
        Self {
            shapes: ShapeRegistry::with_builtin_shapes(),
            states: ChartStateRegistry::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        PLUGIN_ID
    }

    #[must_use]
    pub fn shapes(&self) -> &ShapeRegistry {
        &self.shapes
    }

    /// Adds a custom shape kind. Takes effect from the next update cycle.
    pub fn register_shape(&mut self, shape: Rc<dyn Shape>) -> AnnotationResult<()> {
        self.shapes.register(shape)
    }

    /// Publishes every shape tag to the host type registry.
    pub fn after_register(&self, host: &mut dyn ElementTypeRegistry) {
        for kind in self.shapes.kinds() {
            host.register_element_type(kind);
        }
        debug!(shapes = self.shapes.len(), "annotation shapes registered");
    }

    pub fn after_unregister(&self, host: &mut dyn ElementTypeRegistry) {
        for kind in self.shapes.kinds() {
            host.unregister_element_type(kind);
        }
    }

    /// Creates the state record of a new chart.
    pub fn before_init(&mut self) -> AnnotationResult<ChartHandle> {
        let handle = self.states.insert(ChartState::default())?;
        debug!(index = handle.index(), generation = handle.generation(), "annotation state created");
        Ok(handle)
    }

    #[must_use]
    pub fn state(&self, handle: ChartHandle) -> Option<&ChartState> {
        self.states.get(handle)
    }

    #[must_use]
    pub fn chart_count(&self) -> usize {
        self.states.len()
    }

    fn state_mut(&mut self, handle: ChartHandle) -> AnnotationResult<&mut ChartState> {
        self.states
            .get_mut(handle)
            .ok_or_else(|| unknown_chart(handle))
    }

    fn state_ref(&self, handle: ChartHandle) -> AnnotationResult<&ChartState> {
        self.states.get(handle).ok_or_else(|| unknown_chart(handle))
    }

    /// Stores a private copy of `options` and resolves its annotations.
    pub fn before_update(
        &mut self,
        handle: ChartHandle,
        chart: &dyn ChartView,
        options: &AnnotationPluginOptions,
    ) -> AnnotationResult<()> {
        let state = self
            .states
            .get_mut(handle)
            .ok_or_else(|| unknown_chart(handle))?;
        state.options = options.clone();
        state.scales.clear();
        state.annotations = resolve_annotations(chart, &self.shapes, &state.options.annotations);
        Ok(())
    }

    /// Lets displayed annotations widen `scale`. Returns `true` when the range changed.
    pub fn after_data_limits(
        &mut self,
        handle: ChartHandle,
        scale: &mut dyn AnnotationScale,
    ) -> AnnotationResult<bool> {
        let state = self.state_mut(handle)?;
        if scale.kind() == ScaleKind::Category {
            return Ok(false);
        }
        if !state.scales.insert(scale.id().to_owned()) {
            trace!(scale = %scale.id(), "scale already adjusted this cycle");
            return Ok(false);
        }
        Ok(adjust_scale_range(scale, &state.annotations))
    }

    pub fn after_update(
        &mut self,
        handle: ChartHandle,
        chart: &dyn ChartView,
        args: UpdateArgs,
    ) -> AnnotationResult<()> {
        let state = self
            .states
            .get_mut(handle)
            .ok_or_else(|| unknown_chart(handle))?;
        events::update_listeners(state);
        update::update_elements(chart, &self.shapes, state, args);
        Ok(())
    }

    /// Runs `before_update`, `after_data_limits` for every scale, then `after_update`.
    pub fn run_update_cycle(
        &mut self,
        handle: ChartHandle,
        chart: &mut HeadlessChart,
        options: &AnnotationPluginOptions,
        args: UpdateArgs,
    ) -> AnnotationResult<()> {
        self.before_update(handle, &*chart, options)?;
        for scale in chart.scales_mut() {
            self.after_data_limits(handle, scale)?;
        }
        self.after_update(handle, &*chart, args)
    }

    pub fn draw(
        &self,
        handle: ChartHandle,
        chart: &dyn ChartView,
        hook: DrawTime,
        canvas: &mut dyn AnnotationCanvas,
    ) -> AnnotationResult<()> {
        let state = self.state_ref(handle)?;
        draw::draw_annotations(chart.chart_area(), state, hook, canvas);
        Ok(())
    }

    pub fn before_draw(
        &self,
        handle: ChartHandle,
        chart: &dyn ChartView,
        canvas: &mut dyn AnnotationCanvas,
    ) -> AnnotationResult<()> {
        self.draw(handle, chart, DrawTime::BeforeDraw, canvas)
    }

    pub fn before_datasets_draw(
        &self,
        handle: ChartHandle,
        chart: &dyn ChartView,
        canvas: &mut dyn AnnotationCanvas,
    ) -> AnnotationResult<()> {
        self.draw(handle, chart, DrawTime::BeforeDatasetsDraw, canvas)
    }

    pub fn after_datasets_draw(
        &self,
        handle: ChartHandle,
        chart: &dyn ChartView,
        canvas: &mut dyn AnnotationCanvas,
    ) -> AnnotationResult<()> {
        self.draw(handle, chart, DrawTime::AfterDatasetsDraw, canvas)
    }

    pub fn after_draw(
        &self,
        handle: ChartHandle,
        chart: &dyn ChartView,
        canvas: &mut dyn AnnotationCanvas,
    ) -> AnnotationResult<()> {
        self.draw(handle, chart, DrawTime::AfterDraw, canvas)
    }

    /// Routes a pointer event. Returns `true` when a listener ran and the
    /// chart should redraw.
    pub fn before_event(&mut self, handle: ChartHandle, event: &ChartEvent) -> AnnotationResult<bool> {
        let state = self.state_mut(handle)?;
        Ok(events::handle_event(state, event))
    }

    /// Advances running transitions and flushes expired deferred clicks.
    ///
    /// Returns `true` when something moved or a listener ran, so the chart
    /// should redraw.
    pub fn tick(&mut self, handle: ChartHandle, now_ms: f64) -> AnnotationResult<bool> {
        let state = self.state_mut(handle)?;
        let mut moved = false;
        for element in state.elements.iter_mut().flatten() {
            if element.is_animating() {
                element.advance(now_ms);
                moved = true;
            }
        }
        let clicked = events::flush_pending_clicks(state, now_ms);
        Ok(moved || clicked)
    }

    /// Drops the chart's state. Returns `true` when a state was removed.
    pub fn destroy(&mut self, handle: ChartHandle) -> bool {
        let removed = self.states.remove(handle).is_some();
        if removed {
            debug!(index = handle.index(), "annotation state destroyed");
        }
        removed
    }
}

fn unknown_chart(handle: ChartHandle) -> AnnotationError {
    AnnotationError::UnknownChart {
        index: handle.index(),
        generation: handle.generation(),
    }
}
