use std::collections::HashSet;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::elements::{AnnotationElement, ElementId, Shape};
use crate::error::{AnnotationError, AnnotationResult};
use crate::options::{AnnotationPluginOptions, ListenerTable, ResolvedAnnotation};

/// Element currently under the pointer, with the options it was hovered with.
#[derive(Debug, Clone)]
pub struct HoveredElement {
    pub id: ElementId,
    pub index: usize,
    pub annotation: ResolvedAnnotation,
}

/// Annotation state owned by one chart.
#[derive(Debug, Default)]
pub struct ChartState {
    pub(crate) elements: Vec<Option<AnnotationElement>>,
    pub(crate) options: AnnotationPluginOptions,
    pub(crate) annotations: Vec<ResolvedAnnotation>,
    pub(crate) listeners: ListenerTable,
    pub(crate) listened: bool,
    pub(crate) move_listened: bool,
    pub(crate) scales: HashSet<String>,
    pub(crate) hovered: Option<HoveredElement>,
    next_element_id: u64,
}

impl ChartState {
    #[must_use]
    pub fn elements(&self) -> &[Option<AnnotationElement>] {
        &self.elements
    }

    #[must_use]
    pub fn element(&self, index: usize) -> Option<&AnnotationElement> {
        self.elements.get(index).and_then(Option::as_ref)
    }

    #[must_use]
    pub fn annotations(&self) -> &[ResolvedAnnotation] {
        &self.annotations
    }

    #[must_use]
    pub fn options(&self) -> &AnnotationPluginOptions {
        &self.options
    }

    #[must_use]
    pub fn listeners(&self) -> &ListenerTable {
        &self.listeners
    }

    #[must_use]
    pub fn listened(&self) -> bool {
        self.listened
    }

    #[must_use]
    pub fn move_listened(&self) -> bool {
        self.move_listened
    }

    /// Whether `scale_id` was already auto-ranged in the current update cycle.
    #[must_use]
    pub fn scale_adjusted(&self, scale_id: &str) -> bool {
        self.scales.contains(scale_id)
    }

    #[must_use]
    pub fn hovered(&self) -> Option<&HoveredElement> {
        self.hovered.as_ref()
    }

    pub(crate) fn create_element(&mut self, shape: Rc<dyn Shape>) -> AnnotationElement {
        let id = ElementId::new(self.next_element_id);
        self.next_element_id += 1;
        AnnotationElement::new(id, shape)
    }
}

/// Generational handle identifying one registered chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChartHandle {
    index: u32,
    generation: u32,
}

impl ChartHandle {
    #[must_use]
    pub const fn index(self) -> u32 {
        self.index
    }

    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    state: Option<ChartState>,
}

/// Arena of per-chart states.
///
/// Removing a state bumps its slot generation, so handles of destroyed charts
/// never resolve again, even after the slot is reused.
#[derive(Debug, Default)]
pub struct ChartStateRegistry {
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
}

impl ChartStateRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `state` in a free slot, or a new one.
    ///
    /// Fails once every `u32` slot index is taken by a live chart.
    pub fn insert(&mut self, state: ChartState) -> AnnotationResult<ChartHandle> {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.state = Some(state);
            self.len += 1;
            return Ok(ChartHandle {
                index,
                generation: slot.generation,
            });
        }

        let index = next_slot_index(self.slots.len())?;
        self.slots.push(Slot {
            generation: 0,
            state: Some(state),
        });
        self.len += 1;
        Ok(ChartHandle {
            index,
            generation: 0,
        })
    }

    fn slot(&self, handle: ChartHandle) -> Option<&Slot> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
    }

    #[must_use]
    pub fn get(&self, handle: ChartHandle) -> Option<&ChartState> {
        self.slot(handle).and_then(|slot| slot.state.as_ref())
    }

    pub fn get_mut(&mut self, handle: ChartHandle) -> Option<&mut ChartState> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.state.as_mut())
    }

    pub fn remove(&mut self, handle: ChartHandle) -> Option<ChartState> {
        let slot = self
            .slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)?;
        let state = slot.state.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.len -= 1;
        Some(state)
    }

    #[must_use]
    pub fn contains(&self, handle: ChartHandle) -> bool {
        self.get(handle).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

fn next_slot_index(slot_count: usize) -> AnnotationResult<u32> {
    u32::try_from(slot_count).map_err(|_| AnnotationError::RegistryFull {
        capacity: slot_count,
    })
}
