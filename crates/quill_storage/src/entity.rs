//! Entity allocation with generational indices.

// Slot numbers are stored as u64 in ids but index a Vec.
#![allow(clippy::cast_possible_truncation)]

use quill_foundation::{EntityId, Error, Result};

/// One position in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    /// Generation of the most recent id handed out for this slot.
    generation: u32,
    /// Whether that id is still alive.
    occupied: bool,
}

/// Hands out entity ids and remembers which are still alive.
///
/// Each slot counts how many times it has been handed out. A freed slot is
/// reused with the next generation, so an id captured before a despawn never
/// matches the slot's new occupant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityStore {
    slots: Vec<Slot>,
    vacant: Vec<u64>,
}

impl EntityStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a new entity id, reusing a freed slot when one is available.
    pub fn spawn(&mut self) -> EntityId {
        let reused = self
            .vacant
            .pop()
            .and_then(|index| Some((index, self.slots.get_mut(index as usize)?)));

        match reused {
            Some((index, slot)) => {
                slot.generation += 1;
                slot.occupied = true;
                EntityId::new(index, slot.generation)
            }
            None => {
                let index = self.slots.len() as u64;
                self.slots.push(Slot {
                    generation: 1,
                    occupied: true,
                });
                EntityId::new(index, 1)
            }
        }
    }

    /// Frees an entity's slot.
    ///
    /// # Errors
    /// Returns an error if the id is stale or was never allocated.
    pub fn despawn(&mut self, id: EntityId) -> Result<()> {
        let slot = self.slot_mut(id)?;
        slot.occupied = false;
        self.vacant.push(id.index);
        Ok(())
    }

    /// Returns true if the id refers to a live entity.
    #[must_use]
    pub fn exists(&self, id: EntityId) -> bool {
        self.slots
            .get(id.index as usize)
            .is_some_and(|slot| slot.occupied && slot.generation == id.generation)
    }

    /// Checks that the id refers to a live entity.
    ///
    /// # Errors
    /// `StaleEntity` if the id was handed out once but has since been
    /// despawned, `EntityNotFound` if this store never issued it.
    pub fn validate(&self, id: EntityId) -> Result<()> {
        let Some(slot) = self.slots.get(id.index as usize) else {
            return Err(Error::entity_not_found(id));
        };
        Self::check(slot, id)
    }

    fn slot_mut(&mut self, id: EntityId) -> Result<&mut Slot> {
        let slot = self
            .slots
            .get_mut(id.index as usize)
            .ok_or_else(|| Error::entity_not_found(id))?;
        Self::check(slot, id)?;
        Ok(slot)
    }

    fn check(slot: &Slot, id: EntityId) -> Result<()> {
        match (slot.occupied, id.generation) {
            (true, generation) if generation == slot.generation => Ok(()),
            (_, 0) => Err(Error::entity_not_found(id)),
            (_, generation) if generation <= slot.generation => Err(Error::stale_entity(id)),
            _ => Err(Error::entity_not_found(id)),
        }
    }

    /// Number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len() - self.vacant.len()
    }

    /// Returns true if no entity is alive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over live ids in slot order.
    pub fn iter(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.occupied)
            .map(|(index, slot)| EntityId::new(index as u64, slot.generation))
    }
}
