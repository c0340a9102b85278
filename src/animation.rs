//! Update strategies that push resolved element properties onto elements.
//!
//! The host owns the frame clock: animated updates only record transitions,
//! and `AnnotationPlugin::tick` samples them.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::elements::{AnnotationElement, ElementProperties, Geometry};
use crate::host::UpdateMode;
use crate::options::{AnimationOptions, GeometryProperty};

pub const DEFAULT_ANIMATION_DURATION_MS: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    Linear,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseOutCubic,
    #[default]
    EaseOutQuart,
}

impl Easing {
    /// Maps linear progress in `[0, 1]` onto eased progress.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseInQuad => t * t,
            Self::EaseOutQuad => -t * (t - 2.0),
            Self::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -2.0 * t * t + 4.0 * t - 1.0
                }
            }
            Self::EaseOutCubic => {
                let u = t - 1.0;
                u * u * u + 1.0
            }
            Self::EaseOutQuart => {
                let u = t - 1.0;
                -(u * u * u * u - 1.0)
            }
        }
    }
}

/// Animation settings after merging chart-wide and plugin-level options.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationConfig {
    pub duration_ms: f64,
    pub easing: Easing,
    pub properties: SmallVec<[GeometryProperty; 6]>,
}

impl AnimationConfig {
    #[must_use]
    pub fn from_options(options: &AnimationOptions) -> Self {
        let duration_ms = options
            .duration
            .filter(|duration| duration.is_finite() && *duration >= 0.0)
            .unwrap_or(DEFAULT_ANIMATION_DURATION_MS);
        let properties = options
            .properties
            .as_deref()
            .map_or_else(|| GeometryProperty::ALL.iter().copied().collect(), |list| {
                list.iter().copied().collect()
            });
        Self {
            duration_ms,
            easing: options.easing.unwrap_or_default(),
            properties,
        }
    }

    #[must_use]
    pub fn is_instant(&self) -> bool {
        self.duration_ms <= 0.0 || self.properties.is_empty()
    }
}

/// In-flight interpolation of an element's geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    from: Geometry,
    to: Geometry,
    start_ms: f64,
    duration_ms: f64,
    easing: Easing,
    properties: SmallVec<[GeometryProperty; 6]>,
}

impl Transition {
    #[must_use]
    pub fn new(from: Geometry, to: Geometry, start_ms: f64, config: &AnimationConfig) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms: config.duration_ms,
            easing: config.easing,
            properties: config.properties.clone(),
        }
    }

    #[must_use]
    pub fn target(&self) -> Geometry {
        self.to
    }

    /// Geometry at `now_ms` and whether the transition has completed.
    #[must_use]
    pub fn sample(&self, now_ms: f64) -> (Geometry, bool) {
        let elapsed = now_ms - self.start_ms;
        if self.duration_ms <= 0.0 || elapsed >= self.duration_ms {
            return (self.to, true);
        }
        let factor = self.easing.apply(elapsed.max(0.0) / self.duration_ms);

        // Properties that are not animated jump straight to the target.
        let mut geometry = self.to;
        for property in &self.properties {
            let from = self.from.get(*property);
            let to = self.to.get(*property);
            geometry.set(*property, from + (to - from) * factor);
        }
        (geometry, false)
    }
}

/// Strategy applying freshly resolved properties to an element.
pub trait PropertyUpdater {
    fn update(&self, element: &mut AnnotationElement, properties: ElementProperties);
}

/// Synchronous assignment, used for reset/none/resize updates.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectUpdater;

impl PropertyUpdater for DirectUpdater {
    fn update(&self, element: &mut AnnotationElement, properties: ElementProperties) {
        element.assign(properties);
    }
}

/// Schedules interpolated geometry transitions starting at `now_ms`.
#[derive(Debug, Clone)]
pub struct AnimatedUpdater {
    config: AnimationConfig,
    now_ms: f64,
}

impl AnimatedUpdater {
    #[must_use]
    pub fn new(config: AnimationConfig, now_ms: f64) -> Self {
        Self { config, now_ms }
    }

    #[must_use]
    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }
}

impl PropertyUpdater for AnimatedUpdater {
    fn update(&self, element: &mut AnnotationElement, properties: ElementProperties) {
        let ElementProperties { geometry, options } = properties;
        match (element.geometry(), geometry) {
            (Some(from), Some(to)) if from != to && from.is_finite() => {
                let transition = Transition::new(from, to, self.now_ms, &self.config);
                element.retarget(options, transition);
            }
            (_, geometry) => element.assign(ElementProperties { geometry, options }),
        }
    }
}

/// Picks the update strategy for one cycle.
///
/// `chart_animation` is `None` when the host disabled animations.
#[must_use]
pub fn resolve_updater(
    chart_animation: Option<&AnimationOptions>,
    plugin_animation: &AnimationOptions,
    mode: UpdateMode,
    now_ms: f64,
) -> Box<dyn PropertyUpdater> {
    if mode.is_instant() {
        return Box::new(DirectUpdater);
    }
    let Some(chart_animation) = chart_animation else {
        return Box::new(DirectUpdater);
    };
    let config = AnimationConfig::from_options(&chart_animation.merged(plugin_animation));
    if config.is_instant() {
        return Box::new(DirectUpdater);
    }
    Box::new(AnimatedUpdater::new(config, now_ms))
}
