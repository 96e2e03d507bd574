//! Word-to-meaning resolution.
//!
//! Maps each normalized word or phrase to the command, entity or keyword it
//! stands for, in order. Nothing is skipped: a word with no meaning is an
//! error.

use std::fmt;
use std::sync::Arc;

use quill_engine::Command;
use quill_foundation::{EntityId, Error, Result};

use crate::vocabulary::{Meaning, Vocabulary};

/// A resolved word.
pub enum Token<C> {
    /// A verb.
    Command(Arc<Command<C>>),
    /// A named entity, with the phrase that named it.
    Entity {
        /// The entity.
        id: EntityId,
        /// The normalized phrase.
        name: String,
    },
    /// A syntax keyword.
    Keyword(String),
}

impl<C> Token<C> {
    /// The command, if this token is one.
    #[must_use]
    pub fn command(&self) -> Option<&Arc<Command<C>>> {
        match self {
            Self::Command(command) => Some(command),
            _ => None,
        }
    }
}

impl<C> Clone for Token<C> {
    fn clone(&self) -> Self {
        match self {
            Self::Command(command) => Self::Command(Arc::clone(command)),
            Self::Entity { id, name } => Self::Entity {
                id: *id,
                name: name.clone(),
            },
            Self::Keyword(word) => Self::Keyword(word.clone()),
        }
    }
}

// Commands compare by name; two registrations of the same verb are the same
// token.
impl<C> PartialEq for Token<C> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Command(a), Self::Command(b)) => a.name() == b.name(),
            (Self::Entity { id: a, name: x }, Self::Entity { id: b, name: y }) => a == b && x == y,
            (Self::Keyword(a), Self::Keyword(b)) => a == b,
            _ => false,
        }
    }
}

impl<C> fmt::Debug for Token<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Command(command) => f.debug_tuple("Command").field(&command.name()).finish(),
            Self::Entity { id, name } => f
                .debug_struct("Entity")
                .field("id", id)
                .field("name", name)
                .finish(),
            Self::Keyword(word) => f.debug_tuple("Keyword").field(word).finish(),
        }
    }
}

/// Resolves normalized words against a vocabulary.
pub struct Tokenizer;

impl Tokenizer {
    /// Resolves each word or phrase, preserving order.
    ///
    /// # Errors
    /// `UnknownVerb` if the first word means nothing, `UnknownToken` for any
    /// later word that means nothing.
    pub fn tokenize<C>(vocabulary: &Vocabulary<C>, words: &[String]) -> Result<Vec<Token<C>>> {
        words
            .iter()
            .enumerate()
            .map(|(position, word)| match vocabulary.lookup(word) {
                Some(Meaning::Command(command)) => Ok(Token::Command(Arc::clone(command))),
                Some(Meaning::Entity(id)) => Ok(Token::Entity {
                    id: *id,
                    name: word.clone(),
                }),
                Some(Meaning::Keyword(keyword)) => Ok(Token::Keyword(keyword.clone())),
                None if position == 0 => Err(Error::unknown_verb(word.as_str())),
                None => Err(Error::unknown_token(word.as_str())),
            })
            .collect()
    }
}
