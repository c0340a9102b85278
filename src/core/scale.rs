use serde::{Deserialize, Serialize};

use crate::core::types::Axis;
use crate::error::{AnnotationError, AnnotationResult};

/// Raw annotation coordinate before the owning axis parses it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScaleValue {
    Number(f64),
    Text(String),
}

impl From<f64> for ScaleValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for ScaleValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleKind {
    Linear,
    Logarithmic,
    Time,
    Category,
}

/// Bounds the user configured explicitly on a scale.
///
/// Annotation auto-ranging never touches a bound that is set here.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleBounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub suggested_min: Option<f64>,
    pub suggested_max: Option<f64>,
}

impl ScaleBounds {
    #[must_use]
    pub fn locks_min(self) -> bool {
        self.min.is_some() || self.suggested_min.is_some()
    }

    #[must_use]
    pub fn locks_max(self) -> bool {
        self.max.is_some() || self.suggested_max.is_some()
    }
}

/// Scale capabilities the annotation layer consumes from the host.
pub trait AnnotationScale {
    fn id(&self) -> &str;
    fn axis(&self) -> Axis;
    fn kind(&self) -> ScaleKind;

    /// Current effective minimum, `None` while the host has not computed one.
    fn min(&self) -> Option<f64>;
    fn max(&self) -> Option<f64>;
    fn set_min(&mut self, min: f64);
    fn set_max(&mut self, max: f64);

    fn bounds(&self) -> ScaleBounds;

    /// Parses a raw annotation value; unparseable input yields `NaN`.
    fn parse(&self, value: &ScaleValue) -> f64;

    fn pixel_for_value(&self, value: f64) -> f64;

    fn is_horizontal(&self) -> bool {
        self.axis() == Axis::X
    }

    /// Recomputes tick ranges after the bounds moved. No-op for scales without ticks.
    fn handle_tick_range_options(&mut self) {}
}

/// Headless cartesian scale mapping a data range onto a pixel span.
#[derive(Debug, Clone, PartialEq)]
pub struct DataScale {
    id: String,
    axis: Axis,
    kind: ScaleKind,
    min: Option<f64>,
    max: Option<f64>,
    bounds: ScaleBounds,
    pixel_start: f64,
    pixel_end: f64,
    labels: Vec<String>,
    tick_range_updates: usize,
}

impl DataScale {
    /// Creates a linear scale spanning `pixel_start..pixel_end`.
    ///
    /// Vertical scales usually pass the bottom edge as `pixel_start`.
    pub fn new(
        id: impl Into<String>,
        axis: Axis,
        pixel_start: f64,
        pixel_end: f64,
    ) -> AnnotationResult<Self> {
        if !pixel_start.is_finite() || !pixel_end.is_finite() || pixel_start == pixel_end {
            return Err(AnnotationError::InvalidData(
                "scale pixel span must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            id: id.into(),
            axis,
            kind: ScaleKind::Linear,
            min: None,
            max: None,
            bounds: ScaleBounds::default(),
            pixel_start,
            pixel_end,
            labels: Vec::new(),
            tick_range_updates: 0,
        })
    }

    pub fn with_range(mut self, min: f64, max: f64) -> AnnotationResult<Self> {
        if !min.is_finite() || !max.is_finite() || min == max {
            return Err(AnnotationError::InvalidData(
                "scale range must be finite and non-zero".to_owned(),
            ));
        }
        self.min = Some(min);
        self.max = Some(max);
        Ok(self)
    }

    #[must_use]
    pub fn with_bounds(mut self, bounds: ScaleBounds) -> Self {
        self.bounds = bounds;
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: ScaleKind) -> Self {
        self.kind = kind;
        self
    }

    /// Turns the scale into a category axis indexed by `labels`.
    #[must_use]
    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.kind = ScaleKind::Category;
        self.labels = labels;
        self
    }

    /// Number of times the tick range was recomputed after auto-ranging.
    #[must_use]
    pub fn tick_range_updates(&self) -> usize {
        self.tick_range_updates
    }
}

impl AnnotationScale for DataScale {
    fn id(&self) -> &str {
        &self.id
    }

    fn axis(&self) -> Axis {
        self.axis
    }

    fn kind(&self) -> ScaleKind {
        self.kind
    }

    fn min(&self) -> Option<f64> {
        self.min
    }

    fn max(&self) -> Option<f64> {
        self.max
    }

    fn set_min(&mut self, min: f64) {
        self.min = Some(min);
    }

    fn set_max(&mut self, max: f64) {
        self.max = Some(max);
    }

    fn bounds(&self) -> ScaleBounds {
        self.bounds
    }

    fn parse(&self, value: &ScaleValue) -> f64 {
        match value {
            ScaleValue::Number(number) => *number,
            ScaleValue::Text(text) => {
                if let Some(index) = self.labels.iter().position(|label| label == text) {
                    return index as f64;
                }
                text.trim().parse::<f64>().unwrap_or(f64::NAN)
            }
        }
    }

    fn pixel_for_value(&self, value: f64) -> f64 {
        let (Some(min), Some(max)) = (self.min, self.max) else {
            return f64::NAN;
        };
        let span = max - min;
        if span == 0.0 {
            return self.pixel_start;
        }
        let normalized = (value - min) / span;
        self.pixel_start + normalized * (self.pixel_end - self.pixel_start)
    }

    fn handle_tick_range_options(&mut self) {
        self.tick_range_updates += 1;
    }
}
