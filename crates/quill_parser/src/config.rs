//! Parser configuration.

use quill_foundation::ErrorKind;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default response texts.
pub mod messages {
    /// Nothing the player typed was a known word.
    pub const GOBBLEDEGOOK: &str = "That's just gobbledegook to me.";
    /// The first word was not a verb. `{}` is the word.
    pub const UNKNOWN_VERB: &str = "I don't know how to \"{}\".";
    /// A later word meant nothing. `{}` is the word.
    pub const UNKNOWN_TOKEN: &str = "I don't know what \"{}\" is.";
}

/// What the player is told when input cannot be understood.
///
/// Templates replace the first `{}` with the offending word.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Messages {
    /// Response when no word was recognized.
    pub gobbledegook: String,
    /// Template for an unknown verb.
    pub unknown_verb: String,
    /// Template for an unknown word after the verb.
    pub unknown_token: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            gobbledegook: messages::GOBBLEDEGOOK.to_string(),
            unknown_verb: messages::UNKNOWN_VERB.to_string(),
            unknown_token: messages::UNKNOWN_TOKEN.to_string(),
        }
    }
}

impl Messages {
    /// Text for an unknown verb.
    #[must_use]
    pub fn unknown_verb(&self, word: &str) -> String {
        self.unknown_verb.replacen("{}", word, 1)
    }

    /// Text for an unknown word.
    #[must_use]
    pub fn unknown_token(&self, word: &str) -> String {
        self.unknown_token.replacen("{}", word, 1)
    }

    /// Renders a user-facing error as response text.
    ///
    /// Rule violations already carry their own message. Other kinds fall back
    /// to their `Display` text.
    #[must_use]
    pub fn render(&self, kind: &ErrorKind) -> String {
        match kind {
            ErrorKind::Gobbledegook => self.gobbledegook.clone(),
            ErrorKind::UnknownVerb(word) => self.unknown_verb(word),
            ErrorKind::UnknownToken(word) => self.unknown_token(word),
            ErrorKind::RuleViolation { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Configuration for the parser.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParserConfig {
    /// Response texts.
    pub messages: Messages,

    /// Longest phrase, in words, the normalizer tries to match. `None` uses
    /// the longest name in the vocabulary.
    pub max_phrase_words: Option<usize>,
}

impl ParserConfig {
    /// Builder method to set the response texts.
    #[must_use]
    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    /// Builder method to cap phrase lookahead.
    #[must_use]
    pub fn with_max_phrase_words(mut self, words: usize) -> Self {
        self.max_phrase_words = Some(words);
        self
    }
}
