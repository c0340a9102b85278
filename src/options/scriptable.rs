use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Deserializer};

use crate::host::ChartView;
use crate::options::AnnotationOptions;

/// Context handed to computed option values.
pub struct DisplayContext<'a> {
    pub chart: &'a dyn ChartView,
    pub options: &'a AnnotationOptions,
}

/// Option value that is either a literal or computed from the chart and the
/// merged annotation options once per update cycle.
pub enum Scriptable<T> {
    Literal(T),
    Computed(Rc<dyn Fn(&DisplayContext<'_>) -> T>),
}

impl<T: Clone> Scriptable<T> {
    #[must_use]
    pub fn computed(resolver: impl Fn(&DisplayContext<'_>) -> T + 'static) -> Self {
        Self::Computed(Rc::new(resolver))
    }

    #[must_use]
    pub fn resolve(&self, context: &DisplayContext<'_>) -> T {
        match self {
            Self::Literal(value) => value.clone(),
            Self::Computed(resolver) => resolver(context),
        }
    }
}

impl<T: Clone> Clone for Scriptable<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Literal(value) => Self::Literal(value.clone()),
            Self::Computed(resolver) => Self::Computed(Rc::clone(resolver)),
        }
    }
}

impl<T> From<T> for Scriptable<T> {
    fn from(value: T) -> Self {
        Self::Literal(value)
    }
}

impl<T: fmt::Debug> fmt::Debug for Scriptable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

// Only literals exist in serialized config.
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Scriptable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::deserialize(deserializer).map(Self::Literal)
    }
}
