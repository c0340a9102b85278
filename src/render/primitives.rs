use serde::{Deserialize, Serialize};

use crate::core::Point;
use crate::error::{AnnotationError, AnnotationResult};

/// Straight RGBA color; every channel lives in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    #[must_use]
    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    #[must_use]
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    #[must_use]
    pub const fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    #[must_use]
    pub fn is_transparent(self) -> bool {
        self.a <= 0.0
    }

    pub fn validate(self) -> AnnotationResult<()> {
        let in_unit = |channel: f64| channel.is_finite() && (0.0..=1.0).contains(&channel);
        if [self.r, self.g, self.b, self.a].into_iter().all(in_unit) {
            return Ok(());
        }
        Err(invalid(format!("color {self:?} has a channel outside 0..=1")))
    }
}

fn invalid(message: impl Into<String>) -> AnnotationError {
    AnnotationError::InvalidData(message.into())
}

fn check_point(point: Point, what: &str) -> AnnotationResult<()> {
    if point.x.is_finite() && point.y.is_finite() {
        Ok(())
    } else {
        Err(invalid(format!("{what} is not a finite position")))
    }
}

fn check_extent(value: f64, what: &str) -> AnnotationResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{what} must be a finite, non-negative length")))
    }
}

/// Outline pen shared by every stroked primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub width: f64,
    pub color: Color,
}

impl Stroke {
    #[must_use]
    pub const fn new(width: f64, color: Color) -> Self {
        Self { width, color }
    }

    fn validate(self) -> AnnotationResult<()> {
        check_extent(self.width, "stroke width")?;
        self.color.validate()
    }
}

/// Segment between two pixel positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePrimitive {
    pub from: Point,
    pub to: Point,
    pub stroke: Stroke,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64, width: f64, color: Color) -> Self {
        Self {
            from: Point::new(x1, y1),
            to: Point::new(x2, y2),
            stroke: Stroke::new(width, color),
        }
    }

    pub fn validate(self) -> AnnotationResult<()> {
        check_point(self.from, "line start")?;
        check_point(self.to, "line end")?;
        if self.stroke.width <= 0.0 {
            return Err(invalid("line needs a positive stroke width"));
        }
        self.stroke.validate()
    }
}

/// Axis-aligned box anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectPrimitive {
    pub origin: Point,
    pub width: f64,
    pub height: f64,
    pub fill: Color,
    pub stroke: Option<Stroke>,
}

impl RectPrimitive {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64, fill: Color) -> Self {
        Self {
            origin: Point::new(x, y),
            width,
            height,
            fill,
            stroke: None,
        }
    }

    #[must_use]
    pub const fn with_border(mut self, width: f64, color: Color) -> Self {
        self.stroke = Some(Stroke::new(width, color));
        self
    }

    pub fn validate(self) -> AnnotationResult<()> {
        check_point(self.origin, "rect origin")?;
        check_extent(self.width, "rect width")?;
        check_extent(self.height, "rect height")?;
        self.fill.validate()?;
        self.stroke.map_or(Ok(()), Stroke::validate)
    }
}

/// Ellipse given by its center and both semi-axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipsePrimitive {
    pub center: Point,
    pub radius_x: f64,
    pub radius_y: f64,
    pub fill: Color,
    pub stroke: Option<Stroke>,
}

impl EllipsePrimitive {
    #[must_use]
    pub const fn new(center: Point, radius_x: f64, radius_y: f64, fill: Color) -> Self {
        Self {
            center,
            radius_x,
            radius_y,
            fill,
            stroke: None,
        }
    }

    #[must_use]
    pub const fn circle(center: Point, radius: f64, fill: Color) -> Self {
        Self::new(center, radius, radius, fill)
    }

    #[must_use]
    pub const fn with_border(mut self, width: f64, color: Color) -> Self {
        self.stroke = Some(Stroke::new(width, color));
        self
    }

    pub fn validate(self) -> AnnotationResult<()> {
        check_point(self.center, "ellipse center")?;
        check_extent(self.radius_x, "ellipse x radius")?;
        check_extent(self.radius_y, "ellipse y radius")?;
        self.fill.validate()?;
        self.stroke.map_or(Ok(()), Stroke::validate)
    }
}

/// One run of label text centered on `anchor` in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub text: String,
    pub anchor: Point,
    pub font_size: f64,
    pub color: Color,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(text: impl Into<String>, anchor: Point, font_size: f64, color: Color) -> Self {
        Self {
            text: text.into(),
            anchor,
            font_size,
            color,
        }
    }

    pub fn validate(&self) -> AnnotationResult<()> {
        if self.text.is_empty() {
            return Err(invalid("text run is empty"));
        }
        check_point(self.anchor, "text anchor")?;
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(invalid(format!("font size {} is not positive", self.font_size)));
        }
        self.color.validate()
    }
}
