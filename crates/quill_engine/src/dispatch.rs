//! Rule-validated command dispatch.
//!
//! One call runs one command to completion: look it up, check every rule,
//! apply state changes, report. The world is only touched in the apply step,
//! and only after the last rule has passed.

use tracing::{debug, trace};

use quill_foundation::{Castle, EntityId, Error, Result};

use crate::command::{Command, CommandRegistry, Report, ResolvedCommand};

/// Validates and carries out resolved commands.
pub struct RuleEngine;

impl RuleEngine {
    /// Runs a resolved command for an actor and returns the response text.
    ///
    /// # Errors
    /// - `RuleViolation` carrying the first failing rule's message. Nothing
    ///   has been changed when this is returned.
    /// - `UnknownCommand` if the verb is not registered. This means the
    ///   tokenizer and the registry disagree.
    /// - Anything a state change or query reports, annotated with the
    ///   command name.
    pub fn handle_command<C: Castle>(
        commands: &CommandRegistry<C>,
        castle: &mut C,
        actor: EntityId,
        command: &ResolvedCommand,
    ) -> Result<String> {
        let definition = commands
            .get(&command.verb)
            .ok_or_else(|| Error::unknown_command(&command.verb))?;

        debug!(command = %command, actor = %actor, "handling command");

        Self::validate(definition, castle, actor, command)?;
        Self::apply(definition, castle, actor, command)?;
        Self::respond(definition, castle, actor, command)
    }

    /// Checks the command's rules in order, stopping at the first failure.
    ///
    /// # Errors
    /// `RuleViolation` for the first rule whose predicate returns false.
    pub fn validate<C: Castle>(
        definition: &Command<C>,
        castle: &C,
        actor: EntityId,
        command: &ResolvedCommand,
    ) -> Result<()> {
        for rule in definition.rules() {
            let passed = rule.check(castle, actor, command);
            trace!(rule = rule.id(), passed, "evaluated rule");
            if !passed {
                debug!(rule = rule.id(), command = %command, "rule refused command");
                return Err(rule.violation());
            }
        }
        Ok(())
    }

    fn apply<C: Castle>(
        definition: &Command<C>,
        castle: &mut C,
        actor: EntityId,
        command: &ResolvedCommand,
    ) -> Result<()> {
        let Some(changes) = definition.state_changes() else {
            return Ok(());
        };

        for change in changes {
            trace!(state_change = change.id(), "applying state change");
            change
                .apply(castle, actor, &command.args)
                .map_err(|err| annotate(err, command, &format!("state change {}", change.id())))?;
        }
        Ok(())
    }

    fn respond<C: Castle>(
        definition: &Command<C>,
        castle: &C,
        actor: EntityId,
        command: &ResolvedCommand,
    ) -> Result<String> {
        match definition.query() {
            Some(Report::Query(query)) => query
                .run(castle, actor, &command.args)
                .map_err(|err| annotate(err, command, &format!("query {}", query.id()))),
            Some(Report::RadioSilence) => Ok(String::new()),
            None => match definition.response() {
                Some(response) => Ok(response(actor, &command.args)),
                None => {
                    let room = castle
                        .locate(actor)
                        .ok_or_else(|| annotate(Error::unplaced(actor), command, "look"))?;
                    Ok(castle.look(room))
                }
            },
        }
    }
}

fn annotate(err: Error, command: &ResolvedCommand, frame: &str) -> Error {
    err.during(&command.verb, frame)
}
