//! Annotation elements and the pluggable shapes behind them.

mod box_shape;
mod element;
mod ellipse;
mod geometry;
mod label;
mod line;
mod point;
mod registry;
mod shape;

pub use box_shape::{BOX_KIND, BoxShape};
pub use element::{AnnotationElement, ElementId, ElementProperties};
pub use ellipse::{ELLIPSE_KIND, EllipseShape};
pub use geometry::Geometry;
pub use line::{LINE_KIND, LineShape};
pub use point::{POINT_KIND, PointShape};
pub use registry::ShapeRegistry;
pub use shape::Shape;
