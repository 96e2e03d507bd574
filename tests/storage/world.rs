//! World tests.

use quill_foundation::{Castle, EntityId, Lexicon, Room};
use quill_storage::world::DARKNESS;
use quill_storage::{Attributes, World};

fn names(world: &World) -> Vec<(String, EntityId)> {
    world
        .names()
        .map(|(name, id)| (name.to_string(), id))
        .collect()
}

#[test]
fn spawned_names_are_listed() {
    let mut world = World::new();
    let wand = world.spawn(Attributes::named("wand")).unwrap();
    let candy = world.spawn(Attributes::named("cotton candy")).unwrap();
    world.spawn(Attributes::new()).unwrap();

    let listed = names(&world);
    assert_eq!(listed.len(), 2);
    assert!(listed.contains(&("wand".to_string(), wand)));
    assert!(listed.contains(&("cotton candy".to_string(), candy)));
}

#[test]
fn despawned_and_renamed_entities_update_the_lexicon() {
    let mut world = World::new();
    let wand = world.spawn(Attributes::named("wand")).unwrap();
    let owl = world.spawn(Attributes::named("owl")).unwrap();

    world.despawn(wand).unwrap();
    world.rename(owl, "hedwig").unwrap();

    assert_eq!(names(&world), vec![("hedwig".to_string(), owl)]);
    assert!(world.rename(wand, "stick").is_err());
}

#[test]
fn look_renders_description_or_darkness() {
    let mut world = World::new();
    let hall = world
        .spawn(Attributes::new().with_room(Room::new("The great hall.")))
        .unwrap();
    assert_eq!(world.look(hall), "The great hall.");

    world.set_dark(hall, true).unwrap();
    assert_eq!(world.look(hall), DARKNESS);
}

#[test]
fn actors_in_limbo_cannot_act() {
    let mut world = World::new();
    let you = world.spawn(Attributes::named("you")).unwrap();
    let frozen = world
        .spawn(Attributes::named("statue").in_limbo(true))
        .unwrap();

    assert!(world.can_act(you));
    assert!(!world.can_act(frozen));

    world.set_in_limbo(you, true).unwrap();
    assert!(!world.can_act(you));
}

#[test]
fn relocate_requires_a_room() {
    let mut world = World::new();
    let hall = world
        .spawn(Attributes::new().with_room(Room::new("The great hall.")))
        .unwrap();
    let you = world.spawn(Attributes::named("you")).unwrap();
    let rock = world.spawn(Attributes::named("rock")).unwrap();

    assert!(world.relocate(you, rock).is_err());
    world.relocate(you, hall).unwrap();
    assert_eq!(world.locate(you), Some(hall));
    assert_eq!(world.current_room(you).map(|r| r.description.as_str()), Some("The great hall."));
}

#[test]
fn despawning_a_room_unplaces_its_occupants() {
    let mut world = World::new();
    let hall = world
        .spawn(Attributes::new().with_room(Room::new("The great hall.")))
        .unwrap();
    let you = world
        .spawn(Attributes::named("you").located_in(hall))
        .unwrap();

    world.despawn(hall).unwrap();

    assert_eq!(world.locate(you), None);
    assert!(world.current_room(you).is_none());
}

#[test]
fn clones_are_snapshots() {
    let mut world = World::new();
    let hall = world
        .spawn(Attributes::new().with_room(Room::new("The great hall.")))
        .unwrap();
    let tower = world
        .spawn(Attributes::new().with_room(Room::new("A drafty tower.")))
        .unwrap();
    let you = world
        .spawn(Attributes::named("you").located_in(hall))
        .unwrap();
    let before = world.clone();

    world.relocate(you, tower).unwrap();

    assert_ne!(before, world);
    assert_eq!(before.locate(you), Some(hall));
}
