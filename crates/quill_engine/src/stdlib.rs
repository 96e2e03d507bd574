//! Standard rules, state changes, queries and commands for adventure games.

use quill_foundation::{Castle, EntityId, Error, ErrorKind, Result};

use crate::command::{Argument, CommandSpec, ResolvedCommand};
use crate::rule::RuleBook;

/// Rule: the actor's room has an exit in the requested direction.
pub const PATH_EXISTS: &str = "path_exists";
/// Rule: the actor is not incapacitated.
pub const ACTOR_CAN_ACT: &str = "actor_can_act";
/// Rule: the actor's room is lit.
pub const CAN_SEE: &str = "can_see";
/// Rule: the command names something to act on.
pub const HAS_OBJECT: &str = "has_object";

/// State change: walk through the exit named by the first argument.
pub const MOVE_ACTOR: &str = "move_actor";

/// Query: the first argument's description.
pub const DESCRIBE: &str = "describe";
/// Query: the exits out of the actor's room.
pub const EXITS: &str = "exits";

/// Direction words the `go` command understands.
pub const DIRECTIONS: &[&str] = &[
    "north",
    "south",
    "east",
    "west",
    "northeast",
    "northwest",
    "southeast",
    "southwest",
    "up",
    "down",
    "in",
    "out",
];

// =============================================================================
// Rules
// =============================================================================

/// Is the requested direction a way out of the actor's current room?
pub fn path_exists<C: Castle>(castle: &C, actor: EntityId, command: &ResolvedCommand) -> bool {
    match (castle.current_room(actor), command.object()) {
        (Some(room), Some(direction)) => room.has_path(direction),
        _ => false,
    }
}

/// Can the actor act at all?
pub fn actor_can_act<C: Castle>(castle: &C, actor: EntityId, _command: &ResolvedCommand) -> bool {
    castle.can_act(actor)
}

/// Is there enough light to see by?
pub fn can_see<C: Castle>(castle: &C, actor: EntityId, _command: &ResolvedCommand) -> bool {
    castle.current_room(actor).is_some_and(|room| !room.dark)
}

/// Did the player say what to act on?
pub fn has_object<C: Castle>(_castle: &C, _actor: EntityId, command: &ResolvedCommand) -> bool {
    !command.args.is_empty()
}

// =============================================================================
// State Changes
// =============================================================================

/// Moves the actor through the exit named by the first argument.
///
/// # Errors
/// Fails if the actor is nowhere, or the direction leads nowhere. Both mean
/// the command was declared without the rules that rule them out.
pub fn move_actor<C: Castle>(castle: &mut C, actor: EntityId, args: &[Argument]) -> Result<()> {
    let direction = args.first().map(Argument::word).ok_or_else(|| {
        Error::new(ErrorKind::Internal(format!("{MOVE_ACTOR} needs a direction")))
    })?;
    let destination = castle
        .current_room(actor)
        .ok_or_else(|| Error::unplaced(actor))?
        .exit(direction)
        .ok_or_else(|| {
            Error::new(ErrorKind::Internal(format!(
                "no path {direction} from the room {actor} is in"
            )))
        })?;

    castle.relocate(actor, destination)
}

// =============================================================================
// Queries
// =============================================================================

/// Describes the first argument.
///
/// # Errors
/// Fails if there is no argument.
pub fn describe<C: Castle>(castle: &C, _actor: EntityId, args: &[Argument]) -> Result<String> {
    let target = args.first().ok_or_else(|| {
        Error::new(ErrorKind::Internal(format!("{DESCRIBE} needs something to describe")))
    })?;

    let description = target.entity().and_then(|id| castle.describe(id));
    Ok(description.unwrap_or_else(|| format!("You see nothing special about the {}.", target.word())))
}

/// Lists the exits out of the actor's room.
///
/// # Errors
/// Fails if the actor is nowhere.
pub fn exits<C: Castle>(castle: &C, actor: EntityId, _args: &[Argument]) -> Result<String> {
    let room = castle
        .current_room(actor)
        .ok_or_else(|| Error::unplaced(actor))?;

    let directions: Vec<&str> = room.directions().collect();
    if directions.is_empty() {
        Ok("There is no obvious way out.".to_string())
    } else {
        Ok(format!("Exits: {}.", directions.join(", ")))
    }
}

// =============================================================================
// Registration
// =============================================================================

/// A rule book with every standard rule, state change and query.
#[must_use]
pub fn rule_book<C: Castle + 'static>() -> RuleBook<C> {
    let mut book = RuleBook::new();

    book.rule(PATH_EXISTS, "You can't go that way.", path_exists::<C>);
    book.rule(ACTOR_CAN_ACT, "You can't move right now.", actor_can_act::<C>);
    book.rule(CAN_SEE, "You can't see a thing.", can_see::<C>);
    book.rule(HAS_OBJECT, "What do you want to do that to?", has_object::<C>);

    book.register_effect(MOVE_ACTOR, move_actor::<C>);

    book.register_query(DESCRIBE, describe::<C>);
    book.register_query(EXITS, exits::<C>);

    book
}

/// Declarations for the standard verbs.
#[must_use]
pub fn commands() -> Vec<CommandSpec> {
    vec![
        CommandSpec::new("go")
            .with_alias("walk")
            .with_keywords(DIRECTIONS.iter().copied())
            .with_rule(PATH_EXISTS)
            .with_rule(ACTOR_CAN_ACT)
            .with_state_change(MOVE_ACTOR),
        CommandSpec::new("look").with_alias("l").with_rule(CAN_SEE),
        CommandSpec::new("examine")
            .with_alias("x")
            .with_rule(HAS_OBJECT)
            .with_rule(CAN_SEE)
            .with_query(DESCRIBE),
        CommandSpec::new("exits")
            .with_rule(CAN_SEE)
            .with_query(EXITS),
        CommandSpec::new("wait").with_alias("z").radio_silence(),
    ]
}
