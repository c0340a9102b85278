use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::elements::ElementId;
use crate::options::ResolvedAnnotation;
use crate::plugin::ChartEvent;

/// Interaction hooks an annotation (or the whole chart) can listen to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListenerHook {
    Enter,
    Leave,
    Click,
    #[serde(rename = "dblclick")]
    DblClick,
}

impl ListenerHook {
    pub const CLICK_HOOKS: [Self; 2] = [Self::Click, Self::DblClick];
    pub const MOVE_HOOKS: [Self; 2] = [Self::Enter, Self::Leave];
    pub const ALL: [Self; 4] = [Self::Click, Self::DblClick, Self::Enter, Self::Leave];
}

/// What a listener receives when it fires.
#[derive(Debug)]
pub struct ListenerContext<'a> {
    pub hook: ListenerHook,
    pub index: usize,
    pub element: ElementId,
    pub annotation: &'a ResolvedAnnotation,
    pub event: &'a ChartEvent,
}

#[derive(Clone)]
pub struct Listener(Rc<dyn Fn(&ListenerContext<'_>)>);

impl Listener {
    #[must_use]
    pub fn new(handler: impl Fn(&ListenerContext<'_>) + 'static) -> Self {
        Self(Rc::new(handler))
    }

    pub fn call(&self, context: &ListenerContext<'_>) {
        (self.0)(context);
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Listener(..)")
    }
}

/// One optional handler per hook.
#[derive(Debug, Clone, Default)]
pub struct ListenerTable {
    pub enter: Option<Listener>,
    pub leave: Option<Listener>,
    pub click: Option<Listener>,
    pub dblclick: Option<Listener>,
}

impl ListenerTable {
    #[must_use]
    pub fn get(&self, hook: ListenerHook) -> Option<&Listener> {
        match hook {
            ListenerHook::Enter => self.enter.as_ref(),
            ListenerHook::Leave => self.leave.as_ref(),
            ListenerHook::Click => self.click.as_ref(),
            ListenerHook::DblClick => self.dblclick.as_ref(),
        }
    }

    pub fn set(&mut self, hook: ListenerHook, listener: Option<Listener>) {
        let slot = match hook {
            ListenerHook::Enter => &mut self.enter,
            ListenerHook::Leave => &mut self.leave,
            ListenerHook::Click => &mut self.click,
            ListenerHook::DblClick => &mut self.dblclick,
        };
        *slot = listener;
    }

    #[must_use]
    pub fn has_any(&self, hooks: &[ListenerHook]) -> bool {
        hooks.iter().any(|hook| self.get(*hook).is_some())
    }

    /// Field-wise merge where `overrides` wins.
    #[must_use]
    pub fn merged(&self, overrides: &Self) -> Self {
        Self {
            enter: overrides.enter.clone().or_else(|| self.enter.clone()),
            leave: overrides.leave.clone().or_else(|| self.leave.clone()),
            click: overrides.click.clone().or_else(|| self.click.clone()),
            dblclick: overrides.dblclick.clone().or_else(|| self.dblclick.clone()),
        }
    }
}
