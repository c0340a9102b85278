pub mod scale;
pub mod types;

pub use scale::{AnnotationScale, DataScale, ScaleBounds, ScaleKind, ScaleValue};
pub use types::{Axis, ChartArea, Point};
