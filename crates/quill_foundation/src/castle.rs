//! Interfaces the parser and rule engine consume from the game world.
//!
//! The core never owns world state. It reads names through [`Lexicon`],
//! consults rooms and actors through [`Castle`], and mutates only through
//! [`Castle::relocate`] (or whatever a registered state change calls) after
//! every rule for a command has passed.

use im::OrdMap;

use crate::entity::EntityId;
use crate::error::Result;

/// A room as the rules see it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Room {
    /// Text shown when the room is looked at.
    pub description: String,
    /// Dark rooms cannot be looked at.
    pub dark: bool,
    /// Direction -> destination room.
    pub paths: OrdMap<String, EntityId>,
}

impl Room {
    /// Creates a lit room with no exits.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            dark: false,
            paths: OrdMap::new(),
        }
    }

    /// Marks the room dark or lit.
    #[must_use]
    pub fn with_dark(mut self, dark: bool) -> Self {
        self.dark = dark;
        self
    }

    /// Adds an exit.
    #[must_use]
    pub fn with_path(mut self, direction: impl Into<String>, destination: EntityId) -> Self {
        self.paths.insert(direction.into(), destination);
        self
    }

    /// Returns the destination for a direction, if there is a way out that
    /// way.
    #[must_use]
    pub fn exit(&self, direction: &str) -> Option<EntityId> {
        self.paths.get(direction).copied()
    }

    /// Returns true if the room has an exit in the given direction.
    #[must_use]
    pub fn has_path(&self, direction: &str) -> bool {
        self.paths.contains_key(direction)
    }

    /// Iterates over exit directions in sorted order.
    pub fn directions(&self) -> impl Iterator<Item = &str> {
        self.paths.keys().map(String::as_str)
    }
}

/// The live set of named entities.
///
/// Names may contain spaces ("cotton candy"). The vocabulary is rebuilt from
/// this on every parse, so spawning, despawning or renaming an entity is
/// visible to the very next command.
pub trait Lexicon {
    /// Iterates over every entity that currently has a name.
    fn names(&self) -> impl Iterator<Item = (&str, EntityId)>;
}

/// Everything the rule engine needs to validate and carry out a command.
pub trait Castle: Lexicon {
    /// Returns the room the actor is currently in.
    fn locate(&self, actor: EntityId) -> Option<EntityId>;

    /// Returns the room with the given id.
    fn room(&self, room: EntityId) -> Option<&Room>;

    /// Returns false while the actor is incapacitated.
    fn can_act(&self, actor: EntityId) -> bool;

    /// Renders a room for the player.
    fn look(&self, room: EntityId) -> String;

    /// Returns an entity's description, if it has one.
    fn describe(&self, entity: EntityId) -> Option<String>;

    /// Moves the actor into a room.
    ///
    /// # Errors
    /// Returns an error if either entity does not exist.
    fn relocate(&mut self, actor: EntityId, room: EntityId) -> Result<()>;

    /// Convenience: the room the actor is standing in.
    fn current_room(&self, actor: EntityId) -> Option<&Room> {
        self.locate(actor).and_then(|id| self.room(id))
    }
}
