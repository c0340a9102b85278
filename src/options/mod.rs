//! Annotation configuration: raw options, layered merging and per-cycle resolution.

mod annotation;
mod listener;
mod plugin_options;
mod resolver;
mod scriptable;

pub use annotation::{AnnotationOptions, DrawTime, LabelOptions, LabelPosition};
pub use listener::{Listener, ListenerContext, ListenerHook, ListenerTable};
pub use plugin_options::{
    AnimationOptions, AnnotationList, AnnotationPluginOptions, DEFAULT_DBL_CLICK_SPEED_MS,
    DEFAULT_DRAW_TIME, GeometryProperty,
};
pub use resolver::{ResolvedAnnotation, resolve_annotation_options, resolve_annotations};
pub use scriptable::{DisplayContext, Scriptable};
