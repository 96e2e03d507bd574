//! Shared test world.

use std::sync::Arc;

use quill_engine::{Command, CommandRegistry, stdlib};
use quill_foundation::{EntityId, Room};
use quill_parser::Parser;
use quill_storage::{Attributes, World};

pub struct Fixture {
    pub world: World,
    pub parser: Parser<World>,
    pub hall: EntityId,
    pub you: EntityId,
    pub wand: EntityId,
    pub candy: EntityId,
}

/// A hall with a wand and some cotton candy, the standard commands, and a
/// `take` command (also `get`) that congratulates the player.
pub fn fixture() -> Fixture {
    let mut world = World::new();
    let hall = world
        .spawn(Attributes::new().with_room(Room::new("The great hall.")))
        .unwrap();
    let you = world
        .spawn(Attributes::named("you").located_in(hall))
        .unwrap();
    let wand = world
        .spawn(
            Attributes::named("wand")
                .with_description("Eleven inches, holly.")
                .located_in(hall),
        )
        .unwrap();
    let candy = world
        .spawn(Attributes::named("cotton candy").located_in(hall))
        .unwrap();

    let mut commands: CommandRegistry<World> = stdlib::rule_book()
        .declare_all(&stdlib::commands())
        .unwrap();
    let take = commands.register(Command::new("take").with_response(|_, args| {
        match args.first() {
            Some(thing) => format!("Congratulations you took your {}", thing.word()),
            None => "Take what?".to_string(),
        }
    }));
    commands.insert("get", take);

    Fixture {
        world,
        parser: Parser::new(Arc::new(commands), you),
        hall,
        you,
        wand,
        candy,
    }
}

pub fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| (*w).to_string()).collect()
}
