use serde::{Deserialize, Serialize};

use crate::core::{Axis, ScaleValue};
use crate::options::{Listener, ListenerHook, ListenerTable, Scriptable};
use crate::render::Color;

/// Named phase of the host render cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DrawTime {
    BeforeDraw,
    BeforeDatasetsDraw,
    AfterDatasetsDraw,
    AfterDraw,
}

impl DrawTime {
    /// Hooks in the order the host fires them within one frame.
    pub const ALL: [Self; 4] = [
        Self::BeforeDraw,
        Self::BeforeDatasetsDraw,
        Self::AfterDatasetsDraw,
        Self::AfterDraw,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LabelPosition {
    Start,
    #[default]
    Center,
    End,
}

impl LabelPosition {
    /// Fraction of the way from the start to the end of the owning shape.
    #[must_use]
    pub const fn ratio(self) -> f64 {
        match self {
            Self::Start => 0.0,
            Self::Center => 0.5,
            Self::End => 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelOptions {
    pub enabled: Option<bool>,
    pub content: Option<String>,
    pub draw_time: Option<DrawTime>,
    pub position: Option<LabelPosition>,
    pub x_adjust: Option<f64>,
    pub y_adjust: Option<f64>,
    pub font_size: Option<f64>,
    pub color: Option<Color>,
    pub background_color: Option<Color>,
    pub padding: Option<f64>,
}

impl LabelOptions {
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            enabled: Some(true),
            content: Some(content.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_draw_time(mut self, draw_time: DrawTime) -> Self {
        self.draw_time = Some(draw_time);
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: LabelPosition) -> Self {
        self.position = Some(position);
        self
    }

    /// Enabled and carrying non-empty content.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(false) && self.content.as_deref().is_some_and(|c| !c.is_empty())
    }

    #[must_use]
    pub fn merged(&self, overrides: &Self) -> Self {
        Self {
            enabled: overrides.enabled.or(self.enabled),
            content: overrides.content.clone().or_else(|| self.content.clone()),
            draw_time: overrides.draw_time.or(self.draw_time),
            position: overrides.position.or(self.position),
            x_adjust: overrides.x_adjust.or(self.x_adjust),
            y_adjust: overrides.y_adjust.or(self.y_adjust),
            font_size: overrides.font_size.or(self.font_size),
            color: overrides.color.or(self.color),
            background_color: overrides.background_color.or(self.background_color),
            padding: overrides.padding.or(self.padding),
        }
    }
}

/// Per-annotation configuration.
///
/// Every field is optional so shape defaults, chart-level element defaults and
/// user entries can be layered with [`AnnotationOptions::merged`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationOptions {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub display: Option<Scriptable<bool>>,
    pub draw_time: Option<DrawTime>,
    #[serde(rename = "scaleID")]
    pub scale_id: Option<String>,
    #[serde(rename = "xScaleID")]
    pub x_scale_id: Option<String>,
    #[serde(rename = "yScaleID")]
    pub y_scale_id: Option<String>,
    pub value: Option<ScaleValue>,
    pub end_value: Option<ScaleValue>,
    pub x_min: Option<ScaleValue>,
    pub x_max: Option<ScaleValue>,
    pub y_min: Option<ScaleValue>,
    pub y_max: Option<ScaleValue>,
    pub x_value: Option<ScaleValue>,
    pub y_value: Option<ScaleValue>,
    pub radius: Option<f64>,
    pub border_width: Option<f64>,
    pub border_color: Option<Color>,
    pub background_color: Option<Color>,
    pub label: Option<LabelOptions>,
    #[serde(skip)]
    pub listeners: ListenerTable,
}

impl AnnotationOptions {
    #[must_use]
    pub fn of_kind(kind: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_display(mut self, display: bool) -> Self {
        self.display = Some(Scriptable::Literal(display));
        self
    }

    #[must_use]
    pub fn with_display_fn(mut self, display: Scriptable<bool>) -> Self {
        self.display = Some(display);
        self
    }

    #[must_use]
    pub fn with_draw_time(mut self, draw_time: DrawTime) -> Self {
        self.draw_time = Some(draw_time);
        self
    }

    #[must_use]
    pub fn with_scale_id(mut self, scale_id: impl Into<String>) -> Self {
        self.scale_id = Some(scale_id.into());
        self
    }

    #[must_use]
    pub fn with_axis_scale_id(mut self, axis: Axis, scale_id: impl Into<String>) -> Self {
        match axis {
            Axis::X => self.x_scale_id = Some(scale_id.into()),
            Axis::Y => self.y_scale_id = Some(scale_id.into()),
        }
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<ScaleValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_end_value(mut self, end_value: impl Into<ScaleValue>) -> Self {
        self.end_value = Some(end_value.into());
        self
    }

    #[must_use]
    pub fn with_x_range(mut self, min: impl Into<ScaleValue>, max: impl Into<ScaleValue>) -> Self {
        self.x_min = Some(min.into());
        self.x_max = Some(max.into());
        self
    }

    #[must_use]
    pub fn with_y_range(mut self, min: impl Into<ScaleValue>, max: impl Into<ScaleValue>) -> Self {
        self.y_min = Some(min.into());
        self.y_max = Some(max.into());
        self
    }

    #[must_use]
    pub fn with_point(mut self, x: impl Into<ScaleValue>, y: impl Into<ScaleValue>) -> Self {
        self.x_value = Some(x.into());
        self.y_value = Some(y.into());
        self
    }

    #[must_use]
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    #[must_use]
    pub fn with_border(mut self, width: f64, color: Color) -> Self {
        self.border_width = Some(width);
        self.border_color = Some(color);
        self
    }

    #[must_use]
    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_color = Some(color);
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: LabelOptions) -> Self {
        self.label = Some(label);
        self
    }

    #[must_use]
    pub fn with_listener(mut self, hook: ListenerHook, listener: Listener) -> Self {
        self.listeners.set(hook, Some(listener));
        self
    }

    /// `<axis>ScaleID` for the given axis.
    #[must_use]
    pub fn axis_scale_id(&self, axis: Axis) -> Option<&str> {
        match axis {
            Axis::X => self.x_scale_id.as_deref(),
            Axis::Y => self.y_scale_id.as_deref(),
        }
    }

    /// `<axis>Min`, `<axis>Max` and `<axis>Value` for the given axis.
    #[must_use]
    pub fn axis_values(&self, axis: Axis) -> [Option<&ScaleValue>; 3] {
        match axis {
            Axis::X => [
                self.x_min.as_ref(),
                self.x_max.as_ref(),
                self.x_value.as_ref(),
            ],
            Axis::Y => [
                self.y_min.as_ref(),
                self.y_max.as_ref(),
                self.y_value.as_ref(),
            ],
        }
    }

    /// Returns a new value with `overrides` layered on top of `self`.
    ///
    /// Neither input is modified; nested label options merge field by field.
    #[must_use]
    pub fn merged(&self, overrides: &Self) -> Self {
        let label = match (&self.label, &overrides.label) {
            (Some(base), Some(top)) => Some(base.merged(top)),
            (base, top) => top.clone().or_else(|| base.clone()),
        };

        Self {
            kind: overrides.kind.clone().or_else(|| self.kind.clone()),
            display: overrides.display.clone().or_else(|| self.display.clone()),
            draw_time: overrides.draw_time.or(self.draw_time),
            scale_id: overrides.scale_id.clone().or_else(|| self.scale_id.clone()),
            x_scale_id: overrides
                .x_scale_id
                .clone()
                .or_else(|| self.x_scale_id.clone()),
            y_scale_id: overrides
                .y_scale_id
                .clone()
                .or_else(|| self.y_scale_id.clone()),
            value: overrides.value.clone().or_else(|| self.value.clone()),
            end_value: overrides
                .end_value
                .clone()
                .or_else(|| self.end_value.clone()),
            x_min: overrides.x_min.clone().or_else(|| self.x_min.clone()),
            x_max: overrides.x_max.clone().or_else(|| self.x_max.clone()),
            y_min: overrides.y_min.clone().or_else(|| self.y_min.clone()),
            y_max: overrides.y_max.clone().or_else(|| self.y_max.clone()),
            x_value: overrides.x_value.clone().or_else(|| self.x_value.clone()),
            y_value: overrides.y_value.clone().or_else(|| self.y_value.clone()),
            radius: overrides.radius.or(self.radius),
            border_width: overrides.border_width.or(self.border_width),
            border_color: overrides.border_color.or(self.border_color),
            background_color: overrides.background_color.or(self.background_color),
            label,
            listeners: self.listeners.merged(&overrides.listeners),
        }
    }
}
