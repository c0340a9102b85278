//! Capabilities consumed from the host chart engine, plus a headless host.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{AnnotationScale, ChartArea, DataScale};
use crate::options::{AnimationOptions, AnnotationOptions};

/// Read-only view of the host chart used while resolving and drawing annotations.
pub trait ChartView {
    fn chart_area(&self) -> ChartArea;

    fn scale(&self, id: &str) -> Option<&dyn AnnotationScale>;

    /// Chart-level defaults for one shape kind (the host's `options.elements[kind]`).
    fn element_defaults(&self, _kind: &str) -> Option<&AnnotationOptions> {
        None
    }

    /// Chart-wide animation config; `None` when animations are disabled.
    fn animation(&self) -> Option<&AnimationOptions> {
        None
    }
}

/// Host type registry that annotation shape tags are published to.
pub trait ElementTypeRegistry {
    fn register_element_type(&mut self, kind: &str);
    fn unregister_element_type(&mut self, kind: &str);
}

/// Reason the host is running an update cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UpdateMode {
    #[default]
    Default,
    Active,
    Hide,
    Show,
    Reset,
    None,
    Resize,
}

impl UpdateMode {
    /// Modes that refresh without animating.
    #[must_use]
    pub const fn is_instant(self) -> bool {
        matches!(self, Self::Reset | Self::None | Self::Resize)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct UpdateArgs {
    pub mode: UpdateMode,
    /// Host clock at the start of the cycle, used as the animation start time.
    pub now_ms: f64,
}

impl UpdateArgs {
    #[must_use]
    pub const fn new(mode: UpdateMode, now_ms: f64) -> Self {
        Self { mode, now_ms }
    }
}

/// In-memory host chart for headless usage, benches and tests.
#[derive(Debug, Clone)]
pub struct HeadlessChart {
    chart_area: ChartArea,
    scales: IndexMap<String, DataScale>,
    element_defaults: HashMap<String, AnnotationOptions>,
    animation: Option<AnimationOptions>,
}

impl HeadlessChart {
    /// Chart with animations enabled using default settings.
    #[must_use]
    pub fn new(chart_area: ChartArea) -> Self {
        Self {
            chart_area,
            scales: IndexMap::new(),
            element_defaults: HashMap::new(),
            animation: Some(AnimationOptions::default()),
        }
    }

    #[must_use]
    pub fn with_scale(mut self, scale: DataScale) -> Self {
        self.scales.insert(scale.id().to_owned(), scale);
        self
    }

    #[must_use]
    pub fn with_element_defaults(mut self, kind: impl Into<String>, defaults: AnnotationOptions) -> Self {
        self.element_defaults.insert(kind.into(), defaults);
        self
    }

    #[must_use]
    pub fn with_animation(mut self, animation: Option<AnimationOptions>) -> Self {
        self.animation = animation;
        self
    }

    pub fn set_chart_area(&mut self, chart_area: ChartArea) {
        self.chart_area = chart_area;
    }

    #[must_use]
    pub fn data_scale(&self, id: &str) -> Option<&DataScale> {
        self.scales.get(id)
    }

    pub fn scale_mut(&mut self, id: &str) -> Option<&mut DataScale> {
        self.scales.get_mut(id)
    }

    pub fn scales_mut(&mut self) -> impl Iterator<Item = &mut DataScale> {
        self.scales.values_mut()
    }
}

impl ChartView for HeadlessChart {
    fn chart_area(&self) -> ChartArea {
        self.chart_area
    }

    fn scale(&self, id: &str) -> Option<&dyn AnnotationScale> {
        self.scales
            .get(id)
            .map(|scale| scale as &dyn AnnotationScale)
    }

    fn element_defaults(&self, kind: &str) -> Option<&AnnotationOptions> {
        self.element_defaults.get(kind)
    }

    fn animation(&self) -> Option<&AnimationOptions> {
        self.animation.as_ref()
    }
}

/// Records the shape tags published by the plugin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeRegistryLog {
    pub registered: Vec<String>,
}

impl ElementTypeRegistry for TypeRegistryLog {
    fn register_element_type(&mut self, kind: &str) {
        if !self.registered.iter().any(|entry| entry == kind) {
            self.registered.push(kind.to_owned());
        }
    }

    fn unregister_element_type(&mut self, kind: &str) {
        self.registered.retain(|entry| entry != kind);
    }
}
