mod frame;
mod primitives;

pub use frame::{DrawCommand, RenderFrame};
pub use primitives::{
    Color, EllipsePrimitive, LinePrimitive, RectPrimitive, Stroke, TextPrimitive,
};

use crate::core::ChartArea;

/// Drawing context the host lends to the annotation layer during a draw hook.
///
/// Shapes only emit primitives; backends decide how to rasterize them.
pub trait AnnotationCanvas {
    fn clip_area(&mut self, area: ChartArea);
    fn unclip_area(&mut self);
    fn draw_line(&mut self, line: LinePrimitive);
    fn draw_rect(&mut self, rect: RectPrimitive);
    fn draw_ellipse(&mut self, ellipse: EllipsePrimitive);
    fn draw_text(&mut self, text: TextPrimitive);

    /// Whether a clip region is currently active.
    fn is_clipped(&self) -> bool;
}
