use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::animation::Easing;
use crate::error::{AnnotationError, AnnotationResult};
use crate::options::{AnnotationOptions, DrawTime, Listener, ListenerHook, ListenerTable};

pub const DEFAULT_DRAW_TIME: DrawTime = DrawTime::AfterDatasetsDraw;
pub const DEFAULT_DBL_CLICK_SPEED_MS: f64 = 350.0;

/// Numeric element properties the animated update strategy can interpolate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryProperty {
    X,
    Y,
    X2,
    Y2,
    Width,
    Height,
}

impl GeometryProperty {
    pub const ALL: [Self; 6] = [
        Self::X,
        Self::Y,
        Self::X2,
        Self::Y2,
        Self::Width,
        Self::Height,
    ];
}

/// Animation settings, used both for the chart-wide config and the plugin override.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationOptions {
    /// Duration in milliseconds.
    pub duration: Option<f64>,
    pub easing: Option<Easing>,
    pub properties: Option<Vec<GeometryProperty>>,
}

impl AnimationOptions {
    #[must_use]
    pub fn with_duration(mut self, duration_ms: f64) -> Self {
        self.duration = Some(duration_ms);
        self
    }

    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = Some(easing);
        self
    }

    #[must_use]
    pub fn with_properties(mut self, properties: Vec<GeometryProperty>) -> Self {
        self.properties = Some(properties);
        self
    }

    #[must_use]
    pub fn merged(&self, overrides: &Self) -> Self {
        Self {
            duration: overrides.duration.or(self.duration),
            easing: overrides.easing.or(self.easing),
            properties: overrides
                .properties
                .clone()
                .or_else(|| self.properties.clone()),
        }
    }
}

fn default_plugin_animation() -> AnimationOptions {
    AnimationOptions::default().with_properties(GeometryProperty::ALL.to_vec())
}

/// Raw `annotations` value: a keyed map, a sequence, or nothing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "serde_json::Value")]
pub enum AnnotationList {
    Keyed(IndexMap<String, AnnotationOptions>),
    Ordered(Vec<AnnotationOptions>),
    #[default]
    Empty,
}

impl AnnotationList {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Keyed(map) => map.len(),
            Self::Ordered(list) => list.len(),
            Self::Empty => 0,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn parse_entry(key: &str, value: serde_json::Value) -> Option<AnnotationOptions> {
    if !value.is_object() {
        warn!(key, "skipping annotation entry that is not an object");
        return None;
    }
    match serde_json::from_value::<AnnotationOptions>(value) {
        Ok(options) => Some(options),
        Err(err) => {
            warn!(key, error = %err, "skipping malformed annotation entry");
            None
        }
    }
}

impl From<serde_json::Value> for AnnotationList {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Object(map) => Self::Keyed(
                map.into_iter()
                    .filter_map(|(key, entry)| parse_entry(&key, entry).map(|options| (key, options)))
                    .collect(),
            ),
            serde_json::Value::Array(entries) => Self::Ordered(
                entries
                    .into_iter()
                    .enumerate()
                    .filter_map(|(index, entry)| parse_entry(&index.to_string(), entry))
                    .collect(),
            ),
            _ => Self::Empty,
        }
    }
}

impl From<Vec<AnnotationOptions>> for AnnotationList {
    fn from(entries: Vec<AnnotationOptions>) -> Self {
        Self::Ordered(entries)
    }
}

impl From<IndexMap<String, AnnotationOptions>> for AnnotationList {
    fn from(entries: IndexMap<String, AnnotationOptions>) -> Self {
        Self::Keyed(entries)
    }
}

/// Plugin-level configuration for one chart.
///
/// Hosts typically keep one value per chart and hand it to `before_update`
/// on every cycle; the plugin stores its own clone.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationPluginOptions {
    #[serde(default = "default_draw_time")]
    pub draw_time: Option<DrawTime>,
    #[serde(default = "default_dbl_click_speed_ms", rename = "dblClickSpeed")]
    pub dbl_click_speed_ms: f64,
    #[serde(default)]
    pub annotations: AnnotationList,
    #[serde(default = "default_plugin_animation")]
    pub animation: AnimationOptions,
    #[serde(skip)]
    pub listeners: ListenerTable,
}

fn default_draw_time() -> Option<DrawTime> {
    Some(DEFAULT_DRAW_TIME)
}

fn default_dbl_click_speed_ms() -> f64 {
    DEFAULT_DBL_CLICK_SPEED_MS
}

impl Default for AnnotationPluginOptions {
    fn default() -> Self {
        Self {
            draw_time: default_draw_time(),
            dbl_click_speed_ms: default_dbl_click_speed_ms(),
            annotations: AnnotationList::Empty,
            animation: default_plugin_animation(),
            listeners: ListenerTable::default(),
        }
    }
}

impl AnnotationPluginOptions {
    #[must_use]
    pub fn new(annotations: impl Into<AnnotationList>) -> Self {
        Self {
            annotations: annotations.into(),
            ..Self::default()
        }
    }

    /// Parses plugin options from JSON text.
    ///
    /// Callbacks cannot be expressed in JSON; attach them with
    /// [`AnnotationPluginOptions::with_listener`] afterwards.
    pub fn from_json_str(input: &str) -> AnnotationResult<Self> {
        let options: Self = serde_json::from_str(input).map_err(|e| {
            AnnotationError::InvalidConfig(format!("failed to parse annotation options: {e}"))
        })?;
        options.validate()
    }

    pub fn validate(self) -> AnnotationResult<Self> {
        if !self.dbl_click_speed_ms.is_finite() || self.dbl_click_speed_ms < 0.0 {
            return Err(AnnotationError::InvalidConfig(
                "`dblClickSpeed` must be finite and >= 0".to_owned(),
            ));
        }
        if self
            .animation
            .duration
            .is_some_and(|duration| !duration.is_finite() || duration < 0.0)
        {
            return Err(AnnotationError::InvalidConfig(
                "animation `duration` must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }

    #[must_use]
    pub fn with_draw_time(mut self, draw_time: Option<DrawTime>) -> Self {
        self.draw_time = draw_time;
        self
    }

    #[must_use]
    pub fn with_dbl_click_speed_ms(mut self, speed_ms: f64) -> Self {
        self.dbl_click_speed_ms = speed_ms;
        self
    }

    #[must_use]
    pub fn with_animation(mut self, animation: AnimationOptions) -> Self {
        self.animation = animation;
        self
    }

    #[must_use]
    pub fn with_listener(mut self, hook: ListenerHook, listener: Listener) -> Self {
        self.listeners.set(hook, Some(listener));
        self
    }
}
