use crate::core::ChartArea;
use crate::error::{AnnotationError, AnnotationResult};
use crate::render::{
    AnnotationCanvas, EllipsePrimitive, LinePrimitive, RectPrimitive, TextPrimitive,
};

/// One recorded canvas call, in submission order.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clip(ChartArea),
    Unclip,
    Line(LinePrimitive),
    Rect(RectPrimitive),
    Ellipse(EllipsePrimitive),
    Text(TextPrimitive),
}

/// Backend-agnostic recording of one or more annotation draw passes.
///
/// Hosts replay the commands onto their own drawing context; tests inspect
/// them directly.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderFrame {
    pub commands: Vec<DrawCommand>,
    clip_depth: usize,
}

impl RenderFrame {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.clip_depth = 0;
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Shape commands (everything except clip bookkeeping) recorded so far.
    #[must_use]
    pub fn shape_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| !matches!(command, DrawCommand::Clip(_) | DrawCommand::Unclip))
            .count()
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextPrimitive> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text(text) => Some(text),
            _ => None,
        })
    }

    pub fn validate(&self) -> AnnotationResult<()> {
        let mut depth = 0usize;
        for command in &self.commands {
            match command {
                DrawCommand::Clip(area) => {
                    if !area.is_valid() {
                        return Err(AnnotationError::InvalidData(
                            "clip area must be finite and non-empty".to_owned(),
                        ));
                    }
                    depth += 1;
                }
                DrawCommand::Unclip => {
                    depth = depth.checked_sub(1).ok_or_else(|| {
                        AnnotationError::InvalidData("unclip without matching clip".to_owned())
                    })?;
                }
                DrawCommand::Line(line) => line.validate()?,
                DrawCommand::Rect(rect) => rect.validate()?,
                DrawCommand::Ellipse(ellipse) => ellipse.validate()?,
                DrawCommand::Text(text) => text.validate()?,
            }
        }
        if depth != 0 {
            return Err(AnnotationError::InvalidData(format!(
                "{depth} clip region(s) left open"
            )));
        }
        Ok(())
    }
}

impl AnnotationCanvas for RenderFrame {
    fn clip_area(&mut self, area: ChartArea) {
        self.clip_depth += 1;
        self.commands.push(DrawCommand::Clip(area));
    }

    fn unclip_area(&mut self) {
        self.clip_depth = self.clip_depth.saturating_sub(1);
        self.commands.push(DrawCommand::Unclip);
    }

    fn draw_line(&mut self, line: LinePrimitive) {
        self.commands.push(DrawCommand::Line(line));
    }

    fn draw_rect(&mut self, rect: RectPrimitive) {
        self.commands.push(DrawCommand::Rect(rect));
    }

    fn draw_ellipse(&mut self, ellipse: EllipsePrimitive) {
        self.commands.push(DrawCommand::Ellipse(ellipse));
    }

    fn draw_text(&mut self, text: TextPrimitive) {
        self.commands.push(DrawCommand::Text(text));
    }

    fn is_clipped(&self) -> bool {
        self.clip_depth > 0
    }
}
