//! Entity identifiers.

use std::fmt;

/// Identifier for anything the world owns: players, rooms, props.
///
/// The `generation` distinguishes a despawned entity from a later entity that
/// reuses its slot, so a parser holding an old id never resolves to the new
/// occupant.
///
/// Ids order by `(index, generation)`. The vocabulary relies on this to pick a
/// deterministic winner when two entities share a name.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct EntityId {
    /// Slot in the world's entity table.
    pub index: u64,
    /// Reuse counter for the slot.
    pub generation: u32,
}

impl EntityId {
    /// Creates an entity id from its slot and generation.
    #[must_use]
    pub const fn new(index: u64, generation: u32) -> Self {
        Self { index, generation }
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({}v{})", self.index, self.generation)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}
