use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::animation::Transition;
use crate::core::{ChartArea, Point};
use crate::elements::{Geometry, Shape};
use crate::options::ResolvedAnnotation;
use crate::plugin::ChartEvent;
use crate::render::AnnotationCanvas;

/// Per-chart stamp given to every constructed element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(u64);

impl ElementId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Output of one geometry resolution, tagged with the options it came from.
#[derive(Debug, Clone)]
pub struct ElementProperties {
    pub geometry: Option<Geometry>,
    pub options: ResolvedAnnotation,
}

/// Instantiated annotation of one shape kind.
pub struct AnnotationElement {
    id: ElementId,
    shape: Rc<dyn Shape>,
    geometry: Option<Geometry>,
    options: Option<ResolvedAnnotation>,
    transition: Option<Transition>,
    pending_click: Option<ChartEvent>,
}

impl AnnotationElement {
    #[must_use]
    pub fn new(id: ElementId, shape: Rc<dyn Shape>) -> Self {
        Self {
            id,
            shape,
            geometry: None,
            options: None,
            transition: None,
            pending_click: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> ElementId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> &str {
        self.shape.kind()
    }

    /// Current (possibly mid-transition) geometry.
    #[must_use]
    pub fn geometry(&self) -> Option<Geometry> {
        self.geometry
    }

    /// Geometry the element is heading to, equal to `geometry()` when idle.
    #[must_use]
    pub fn target_geometry(&self) -> Option<Geometry> {
        self.transition
            .as_ref()
            .map(Transition::target)
            .or(self.geometry)
    }

    #[must_use]
    pub fn options(&self) -> Option<&ResolvedAnnotation> {
        self.options.as_ref()
    }

    #[must_use]
    pub fn is_displayed(&self) -> bool {
        self.options.as_ref().is_some_and(|options| options.display)
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    #[must_use]
    pub fn supports_label(&self) -> bool {
        self.shape.supports_label()
    }

    pub(crate) fn assign(&mut self, properties: ElementProperties) {
        self.geometry = properties.geometry;
        self.options = Some(properties.options);
        self.transition = None;
    }

    pub(crate) fn retarget(&mut self, options: ResolvedAnnotation, transition: Transition) {
        self.options = Some(options);
        self.transition = Some(transition);
    }

    /// Samples the running transition. Returns `true` while still animating.
    pub(crate) fn advance(&mut self, now_ms: f64) -> bool {
        let Some(transition) = &self.transition else {
            return false;
        };
        let (geometry, finished) = transition.sample(now_ms);
        self.geometry = Some(geometry);
        if finished {
            self.transition = None;
        }
        !finished
    }

    /// Click held back while waiting to see whether a second one follows.
    #[must_use]
    pub fn pending_click(&self) -> Option<&ChartEvent> {
        self.pending_click.as_ref()
    }

    pub(crate) fn set_pending_click(&mut self, event: ChartEvent) {
        self.pending_click = Some(event);
    }

    pub(crate) fn take_pending_click(&mut self) -> Option<ChartEvent> {
        self.pending_click.take()
    }

    #[must_use]
    pub fn in_range(&self, point: Point) -> bool {
        match (&self.geometry, &self.options) {
            (Some(geometry), Some(options)) => self.shape.in_range(geometry, options, point),
            _ => false,
        }
    }

    #[must_use]
    pub fn center_point(&self) -> Option<Point> {
        self.geometry
            .as_ref()
            .map(|geometry| self.shape.center_point(geometry))
    }

    pub fn draw(&self, canvas: &mut dyn AnnotationCanvas) {
        if let (Some(geometry), Some(options)) = (&self.geometry, &self.options) {
            self.shape.draw(geometry, options, canvas);
        }
    }

    pub fn draw_label(&self, canvas: &mut dyn AnnotationCanvas, chart_area: ChartArea) {
        if let (Some(geometry), Some(options)) = (&self.geometry, &self.options) {
            self.shape.draw_label(geometry, options, canvas, chart_area);
        }
    }
}

impl fmt::Debug for AnnotationElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnnotationElement")
            .field("id", &self.id)
            .field("kind", &self.kind())
            .field("geometry", &self.geometry)
            .field("animating", &self.transition.is_some())
            .finish_non_exhaustive()
    }
}
