use serde::{Deserialize, Serialize};

use crate::core::Point;
use crate::options::GeometryProperty;

/// Pixel-space bounding geometry shared by every annotation element.
///
/// Lines keep the signed delta in `width`/`height`; area shapes keep
/// `x <= x2` and `y <= y2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub x2: f64,
    pub y2: f64,
    pub width: f64,
    pub height: f64,
}

impl Geometry {
    #[must_use]
    pub fn from_corners(x: f64, y: f64, x2: f64, y2: f64) -> Self {
        Self {
            x,
            y,
            x2,
            y2,
            width: x2 - x,
            height: y2 - y,
        }
    }

    /// Axis-aligned box spanning both corners, normalized so `x <= x2`, `y <= y2`.
    #[must_use]
    pub fn normalized_box(x: f64, y: f64, x2: f64, y2: f64) -> Self {
        Self::from_corners(x.min(x2), y.min(y2), x.max(x2), y.max(y2))
    }

    #[must_use]
    pub fn centered(center: Point, radius: f64) -> Self {
        Self::from_corners(
            center.x - radius,
            center.y - radius,
            center.x + radius,
            center.y + radius,
        )
    }

    #[must_use]
    pub fn center(self) -> Point {
        Point::new((self.x + self.x2) * 0.5, (self.y + self.y2) * 0.5)
    }

    #[must_use]
    pub fn get(self, property: GeometryProperty) -> f64 {
        match property {
            GeometryProperty::X => self.x,
            GeometryProperty::Y => self.y,
            GeometryProperty::X2 => self.x2,
            GeometryProperty::Y2 => self.y2,
            GeometryProperty::Width => self.width,
            GeometryProperty::Height => self.height,
        }
    }

    pub fn set(&mut self, property: GeometryProperty, value: f64) {
        let slot = match property {
            GeometryProperty::X => &mut self.x,
            GeometryProperty::Y => &mut self.y,
            GeometryProperty::X2 => &mut self.x2,
            GeometryProperty::Y2 => &mut self.y2,
            GeometryProperty::Width => &mut self.width,
            GeometryProperty::Height => &mut self.height,
        };
        *slot = value;
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        GeometryProperty::ALL
            .iter()
            .all(|property| self.get(*property).is_finite())
    }
}
