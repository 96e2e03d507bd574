//! The reference world.
//!
//! Every table is a persistent `im` map, so cloning a `World` is cheap and a
//! clone taken before a command is a faithful snapshot of the state the
//! command started from.

use im::{HashMap, HashSet, OrdMap};
use tracing::trace;

use quill_foundation::{Castle, EntityId, Error, ErrorKind, Lexicon, Result, Room};

use crate::entity::EntityStore;

/// Text rendered for a dark room.
pub const DARKNESS: &str = "It is pitch black.";

/// What a freshly spawned entity carries.
#[derive(Clone, Debug, Default)]
pub struct Attributes {
    name: Option<String>,
    description: Option<String>,
    room: Option<Room>,
    location: Option<EntityId>,
    in_limbo: bool,
}

impl Attributes {
    /// An entity with no attributes at all.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An entity the parser can refer to by name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::new().with_name(name)
    }

    /// Sets the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the description returned by `examine`.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Makes the entity a room.
    #[must_use]
    pub fn with_room(mut self, room: Room) -> Self {
        self.room = Some(room);
        self
    }

    /// Places the entity in a room.
    #[must_use]
    pub fn located_in(mut self, room: EntityId) -> Self {
        self.location = Some(room);
        self
    }

    /// Spawns the entity unable to act.
    #[must_use]
    pub fn in_limbo(mut self, in_limbo: bool) -> Self {
        self.in_limbo = in_limbo;
        self
    }
}

/// Entities, their names, rooms and actor state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct World {
    entities: EntityStore,
    names: OrdMap<EntityId, String>,
    descriptions: HashMap<EntityId, String>,
    rooms: HashMap<EntityId, Room>,
    locations: HashMap<EntityId, EntityId>,
    in_limbo: HashSet<EntityId>,
}

impl World {
    /// Creates an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Checks if an entity exists.
    #[must_use]
    pub fn exists(&self, entity: EntityId) -> bool {
        self.entities.exists(entity)
    }

    /// Iterates all live entity ids.
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.iter()
    }

    // --- Entity Operations ---

    /// Spawns a new entity.
    ///
    /// # Errors
    /// Returns an error if the requested location is not a live room.
    pub fn spawn(&mut self, attributes: Attributes) -> Result<EntityId> {
        if let Some(room) = attributes.location {
            self.validate_room(room)?;
        }

        let id = self.entities.spawn();
        if let Some(name) = attributes.name {
            self.names.insert(id, name);
        }
        if let Some(description) = attributes.description {
            self.descriptions.insert(id, description);
        }
        if let Some(room) = attributes.room {
            self.rooms.insert(id, room);
        }
        if let Some(room) = attributes.location {
            self.locations.insert(id, room);
        }
        if attributes.in_limbo {
            self.in_limbo.insert(id);
        }

        trace!(entity = %id, "spawned entity");
        Ok(id)
    }

    /// Removes an entity and everything attached to it.
    ///
    /// Entities that were inside a despawned room are left without a
    /// location.
    ///
    /// # Errors
    /// Returns an error if the entity is stale or does not exist.
    pub fn despawn(&mut self, entity: EntityId) -> Result<()> {
        self.entities.despawn(entity)?;

        self.names.remove(&entity);
        self.descriptions.remove(&entity);
        self.rooms.remove(&entity);
        self.locations.remove(&entity);
        self.in_limbo.remove(&entity);
        self.locations.retain(|_, room| *room != entity);

        let entrances: Vec<EntityId> = self
            .rooms
            .iter()
            .filter(|(_, room)| room.paths.values().any(|destination| *destination == entity))
            .map(|(id, _)| *id)
            .collect();
        for id in entrances {
            if let Some(room) = self.rooms.get_mut(&id) {
                room.paths = room
                    .paths
                    .iter()
                    .filter(|(_, destination)| **destination != entity)
                    .map(|(direction, destination)| (direction.clone(), *destination))
                    .collect();
                trace!(room = %id, gone = %entity, "closed exits to despawned room");
            }
        }

        trace!(entity = %entity, "despawned entity");
        Ok(())
    }

    /// Gives an entity a new name.
    ///
    /// # Errors
    /// Returns an error if the entity is stale or does not exist.
    pub fn rename(&mut self, entity: EntityId, name: impl Into<String>) -> Result<()> {
        self.entities.validate(entity)?;
        self.names.insert(entity, name.into());
        Ok(())
    }

    /// Returns an entity's name.
    #[must_use]
    pub fn name(&self, entity: EntityId) -> Option<&str> {
        self.names.get(&entity).map(String::as_str)
    }

    /// Returns the room an entity is in.
    #[must_use]
    pub fn location(&self, entity: EntityId) -> Option<EntityId> {
        self.locations.get(&entity).copied()
    }

    /// Moves an entity into a room.
    ///
    /// # Errors
    /// Returns an error if the entity does not exist or the target is not a
    /// live room.
    pub fn set_location(&mut self, entity: EntityId, room: EntityId) -> Result<()> {
        self.entities.validate(entity)?;
        self.validate_room(room)?;
        self.locations.insert(entity, room);
        Ok(())
    }

    /// Marks an actor as unable (or able again) to act.
    ///
    /// # Errors
    /// Returns an error if the entity is stale or does not exist.
    pub fn set_in_limbo(&mut self, entity: EntityId, in_limbo: bool) -> Result<()> {
        self.entities.validate(entity)?;
        if in_limbo {
            self.in_limbo.insert(entity);
        } else {
            self.in_limbo.remove(&entity);
        }
        Ok(())
    }

    /// Turns a room's lights off or on.
    ///
    /// # Errors
    /// Returns an error if the entity is not a live room.
    pub fn set_dark(&mut self, room: EntityId, dark: bool) -> Result<()> {
        self.room_mut(room)?.dark = dark;
        Ok(())
    }

    /// Adds (or redirects) an exit.
    ///
    /// # Errors
    /// Returns an error if either end is not a live room.
    pub fn add_path(
        &mut self,
        room: EntityId,
        direction: impl Into<String>,
        destination: EntityId,
    ) -> Result<()> {
        self.validate_room(destination)?;
        self.room_mut(room)?
            .paths
            .insert(direction.into(), destination);
        Ok(())
    }

    fn validate_room(&self, room: EntityId) -> Result<()> {
        self.entities.validate(room)?;
        if self.rooms.contains_key(&room) {
            Ok(())
        } else {
            Err(Error::new(ErrorKind::Internal(format!(
                "{room:?} is not a room"
            ))))
        }
    }

    fn room_mut(&mut self, room: EntityId) -> Result<&mut Room> {
        self.validate_room(room)?;
        self.rooms
            .get_mut(&room)
            .ok_or_else(|| Error::entity_not_found(room))
    }
}

impl Lexicon for World {
    fn names(&self) -> impl Iterator<Item = (&str, EntityId)> {
        self.names.iter().map(|(id, name)| (name.as_str(), *id))
    }
}

impl Castle for World {
    fn locate(&self, actor: EntityId) -> Option<EntityId> {
        self.location(actor)
    }

    fn room(&self, room: EntityId) -> Option<&Room> {
        self.rooms.get(&room)
    }

    fn can_act(&self, actor: EntityId) -> bool {
        self.exists(actor) && !self.in_limbo.contains(&actor)
    }

    fn look(&self, room: EntityId) -> String {
        match self.rooms.get(&room) {
            Some(room) if room.dark => DARKNESS.to_string(),
            Some(room) => room.description.clone(),
            None => String::new(),
        }
    }

    fn describe(&self, entity: EntityId) -> Option<String> {
        self.descriptions.get(&entity).cloned()
    }

    fn relocate(&mut self, actor: EntityId, room: EntityId) -> Result<()> {
        self.set_location(actor, room)?;
        trace!(actor = %actor, room = %room, "relocated actor");
        Ok(())
    }
}
