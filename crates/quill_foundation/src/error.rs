//! Error types for the Quill system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//!
//! Errors come in two flavours. User-facing kinds ([`ErrorKind::Gobbledegook`],
//! [`ErrorKind::UnknownVerb`], [`ErrorKind::UnknownToken`],
//! [`ErrorKind::RuleViolation`]) are ordinary outcomes of a turn and are
//! rendered back to the player. Everything else means the command tables or
//! the world were set up wrong.

use std::fmt;

use thiserror::Error;

use crate::entity::EntityId;

/// Result alias used throughout Quill.
pub type Result<T> = std::result::Result<T, Error>;

/// A failed parse, rule check or state change.
///
/// Displays as its kind alone, which for a rule violation is exactly the
/// text the player sees.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// What went wrong.
    pub kind: ErrorKind,
    /// Which command was running, for internal failures.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Wraps a kind with no command attached.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Replaces the attached context.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Records the command and stage an internal failure happened in.
    ///
    /// User-facing errors pass through untouched. The first stage to see an
    /// internal error claims it; later stages leave the context alone.
    #[must_use]
    pub fn during(self, verb: &str, stage: &str) -> Self {
        if self.is_user_facing() || self.context.is_some() {
            return self;
        }
        self.with_context(ErrorContext::new().with_source(verb).with_frame(stage))
    }

    /// Nothing in the input was a known word.
    #[must_use]
    pub fn gobbledegook() -> Self {
        Self::new(ErrorKind::Gobbledegook)
    }

    /// The verb position held a word that is not a command.
    #[must_use]
    pub fn unknown_verb(word: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownVerb(word.into()))
    }

    /// A word after the verb could not be resolved.
    #[must_use]
    pub fn unknown_token(word: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownToken(word.into()))
    }

    /// A rule refused the command.
    #[must_use]
    pub fn rule_violation(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RuleViolation {
            rule: rule.into(),
            message: message.into(),
        })
    }

    /// A resolved command named a verb the registry does not hold.
    #[must_use]
    pub fn unknown_command(verb: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownCommand(verb.into()))
    }

    /// A command declaration referenced an unregistered rule.
    #[must_use]
    pub fn unknown_rule(id: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownRule(id.into()))
    }

    /// A rule has a predicate but no error message to report.
    #[must_use]
    pub fn missing_rule_message(id: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingRuleMessage(id.into()))
    }

    /// A command declaration referenced an unregistered state change.
    #[must_use]
    pub fn unknown_effect(id: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownEffect(id.into()))
    }

    /// A command declaration referenced an unregistered query.
    #[must_use]
    pub fn unknown_query(id: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownQuery(id.into()))
    }

    /// Creates an entity not found error.
    #[must_use]
    pub fn entity_not_found(id: EntityId) -> Self {
        Self::new(ErrorKind::EntityNotFound(id))
    }

    /// Creates a stale entity reference error.
    #[must_use]
    pub fn stale_entity(id: EntityId) -> Self {
        Self::new(ErrorKind::StaleEntity(id))
    }

    /// The actor has no location, so there is no room to look at.
    #[must_use]
    pub fn unplaced(actor: EntityId) -> Self {
        Self::new(ErrorKind::Unplaced(actor))
    }

    /// Returns true for outcomes that should be shown to the player rather
    /// than treated as a fault.
    #[must_use]
    pub fn is_user_facing(&self) -> bool {
        self.kind.is_user_facing()
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// Normalization left no recognizable words.
    #[error("no recognizable words in input")]
    Gobbledegook,

    /// The first word did not resolve to a command.
    #[error("unknown verb: {0}")]
    UnknownVerb(String),

    /// A word after the verb did not resolve to anything.
    #[error("unknown word: {0}")]
    UnknownToken(String),

    /// A rule predicate failed.
    #[error("{message}")]
    RuleViolation {
        /// Identifier of the rule that failed.
        rule: String,
        /// The configured explanation for the player.
        message: String,
    },

    /// A verb reached the rule engine without a registered command.
    #[error("no command registered for verb: {0}")]
    UnknownCommand(String),

    /// A declaration named a rule that was never registered.
    #[error("unknown rule: {0}")]
    UnknownRule(String),

    /// A rule has no configured error message.
    #[error("rule has no error message: {0}")]
    MissingRuleMessage(String),

    /// A declaration named a state change that was never registered.
    #[error("unknown state change: {0}")]
    UnknownEffect(String),

    /// A declaration named a query that was never registered.
    #[error("unknown query: {0}")]
    UnknownQuery(String),

    /// Entity was not found in storage.
    #[error("entity not found: {0:?}")]
    EntityNotFound(EntityId),

    /// Entity reference is stale (generation mismatch).
    #[error("stale entity reference: {0:?}")]
    StaleEntity(EntityId),

    /// The actor is not in any room.
    #[error("actor {0:?} is not in a room")]
    Unplaced(EntityId),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

impl ErrorKind {
    /// See [`Error::is_user_facing`].
    #[must_use]
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::Gobbledegook
                | Self::UnknownVerb(_)
                | Self::UnknownToken(_)
                | Self::RuleViolation { .. }
        )
    }
}

/// The command an internal error came from, and the stages it crossed.
///
/// Renders as `in go` followed by one `  during <stage>` line per stage.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Verb (or declaration) being processed.
    pub source: Option<String>,
    /// Pipeline stages, innermost first.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// A context naming nothing yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Names the verb or declaration.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Appends a stage.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "in {source}")?;
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  during {frame}")?;
            }
        }
        Ok(())
    }
}
