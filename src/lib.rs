//! chart-annotations: annotation layer for chart engines.
//!
//! Keeps boxes, lines, ellipses and points anchored to data-scale coordinates
//! in sync with the host chart: it resolves layered configuration, reconciles
//! elements across updates, animates geometry changes, widens auto-ranged
//! scales and routes pointer events to per-annotation listeners.
//!
//! The host drives everything through [`AnnotationPlugin`] hooks and lends an
//! [`render::AnnotationCanvas`] while drawing.

pub mod animation;
pub mod core;
pub mod elements;
pub mod error;
pub mod host;
pub mod options;
pub mod plugin;
pub mod render;
pub mod telemetry;

pub use error::{AnnotationError, AnnotationResult};
pub use host::{ChartView, HeadlessChart, UpdateArgs, UpdateMode};
pub use options::{AnnotationOptions, AnnotationPluginOptions, DrawTime};
pub use plugin::{AnnotationPlugin, ChartEvent, ChartHandle, PLUGIN_ID};
