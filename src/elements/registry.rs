use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use tracing::debug;

use crate::elements::{
    BOX_KIND, BoxShape, ELLIPSE_KIND, EllipseShape, LINE_KIND, LineShape, POINT_KIND, PointShape,
    Shape,
};
use crate::error::{AnnotationError, AnnotationResult};

/// Tag → shape table. Unknown tags resolve to the `line` shape.
pub struct ShapeRegistry {
    shapes: IndexMap<String, Rc<dyn Shape>>,
    fallback: Rc<dyn Shape>,
}

impl ShapeRegistry {
    /// Registry holding `box`, `line`, `ellipse` and `point`.
    #[must_use]
    pub fn with_builtin_shapes() -> Self {
        let fallback: Rc<dyn Shape> = Rc::new(LineShape);
        let mut shapes: IndexMap<String, Rc<dyn Shape>> = IndexMap::new();
        shapes.insert(BOX_KIND.to_owned(), Rc::new(BoxShape));
        shapes.insert(LINE_KIND.to_owned(), Rc::clone(&fallback));
        shapes.insert(ELLIPSE_KIND.to_owned(), Rc::new(EllipseShape));
        shapes.insert(POINT_KIND.to_owned(), Rc::new(PointShape));
        Self { shapes, fallback }
    }

    /// Registers a shape under its own tag.
    pub fn register(&mut self, shape: Rc<dyn Shape>) -> AnnotationResult<()> {
        let kind = shape.kind().to_owned();
        if kind.is_empty() {
            return Err(AnnotationError::InvalidShape(
                "shape kind must not be empty".to_owned(),
            ));
        }
        if self.contains(&kind) {
            return Err(AnnotationError::InvalidShape(format!(
                "shape `{kind}` is already registered"
            )));
        }
        debug!(kind = %kind, "register annotation shape");
        self.shapes.insert(kind, shape);
        Ok(())
    }

    /// Unregisters a custom shape. Returns `true` when removed.
    ///
    /// The fallback `line` shape cannot be removed.
    pub fn unregister(&mut self, kind: &str) -> bool {
        if kind == LINE_KIND {
            return false;
        }
        self.shapes.shift_remove(kind).is_some()
    }

    #[must_use]
    pub fn contains(&self, kind: &str) -> bool {
        self.shapes.contains_key(kind)
    }

    /// Shape for `kind`, falling back to `line` for missing or unknown tags.
    #[must_use]
    pub fn resolve(&self, kind: Option<&str>) -> &Rc<dyn Shape> {
        kind.and_then(|kind| self.shapes.get(kind))
            .unwrap_or(&self.fallback)
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.shapes.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

impl Default for ShapeRegistry {
    fn default() -> Self {
        Self::with_builtin_shapes()
    }
}

impl fmt::Debug for ShapeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShapeRegistry")
            .field("kinds", &self.shapes.keys().collect::<Vec<_>>())
            .finish()
    }
}
