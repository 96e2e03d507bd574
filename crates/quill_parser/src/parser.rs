//! The parser facade.
//!
//! Composes the normalizer, tokenizer and rule engine into a single
//! `execute` call: raw text in, response text out.

use std::sync::Arc;

use tracing::{debug, warn};

use quill_engine::{Argument, CommandRegistry, ResolvedCommand, RuleEngine};
use quill_foundation::{Castle, EntityId, Error, Lexicon, Result};

use crate::config::ParserConfig;
use crate::normalizer::Normalizer;
use crate::tokenizer::{Token, Tokenizer};
use crate::vocabulary::Vocabulary;

/// Parses and runs player input on behalf of one actor.
///
/// The parser holds no copy of the world. Every call takes the castle it
/// should read (and, for [`execute`](Self::execute), change), and rebuilds
/// its vocabulary from it.
pub struct Parser<C> {
    commands: Arc<CommandRegistry<C>>,
    actor: EntityId,
    config: ParserConfig,
}

impl<C> Parser<C> {
    /// Creates a parser for an actor with default configuration.
    #[must_use]
    pub fn new(commands: Arc<CommandRegistry<C>>, actor: EntityId) -> Self {
        Self {
            commands,
            actor,
            config: ParserConfig::default(),
        }
    }

    /// Builder method to set the configuration.
    #[must_use]
    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    /// The actor commands are run for.
    #[must_use]
    pub fn actor(&self) -> EntityId {
        self.actor
    }

    /// Changes the actor, for games where the player switches bodies.
    pub fn set_actor(&mut self, actor: EntityId) {
        self.actor = actor;
    }

    /// The command registry.
    #[must_use]
    pub fn commands(&self) -> &CommandRegistry<C> {
        &self.commands
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Builds the vocabulary for the current entity set.
    #[must_use]
    pub fn vocabulary<L: Lexicon>(&self, lexicon: &L) -> Vocabulary<C> {
        Vocabulary::build(self.commands(), lexicon)
    }

    /// Reduces raw input to known words and phrases.
    ///
    /// # Errors
    /// `Gobbledegook` if no word is known.
    pub fn normalize<L: Lexicon>(&self, lexicon: &L, raw: &str) -> Result<Vec<String>> {
        Normalizer::normalize(&self.vocabulary(lexicon), raw, self.config.max_phrase_words)
    }

    /// Re-checks already normalized words without merging them again.
    ///
    /// # Errors
    /// `Gobbledegook` if no word is still known.
    pub fn normalize_words<L: Lexicon>(&self, lexicon: &L, words: &[String]) -> Result<Vec<String>> {
        Normalizer::normalize_words(&self.vocabulary(lexicon), words)
    }

    /// Resolves normalized words.
    ///
    /// # Errors
    /// `UnknownVerb` or `UnknownToken` for words with no meaning.
    pub fn tokenize<L: Lexicon>(&self, lexicon: &L, words: &[String]) -> Result<Vec<Token<C>>> {
        Tokenizer::tokenize(&self.vocabulary(lexicon), words)
    }

    /// Turns raw input into a resolved command without running it.
    ///
    /// # Errors
    /// Any normalizer or tokenizer error, or `UnknownVerb` when the first
    /// word is known but is not a verb.
    pub fn resolve<L: Lexicon>(&self, lexicon: &L, raw: &str) -> Result<ResolvedCommand> {
        let vocabulary = self.vocabulary(lexicon);
        let words = Normalizer::normalize(&vocabulary, raw, self.config.max_phrase_words)?;
        debug!(input = raw, words = ?words, "normalized input");

        let mut tokens = Tokenizer::tokenize(&vocabulary, &words)?.into_iter();
        let verb = match tokens.next() {
            Some(Token::Command(command)) => command.name().to_string(),
            _ => return Err(Error::unknown_verb(words[0].as_str())),
        };

        let args = tokens
            .map(|token| match token {
                Token::Entity { id, name } => Argument::Entity { id, name },
                Token::Keyword(word) => Argument::Keyword(word),
                Token::Command(command) => Argument::Keyword(command.name().to_string()),
            })
            .collect();

        let resolved = ResolvedCommand::new(verb, args);
        debug!(command = %resolved, "resolved command");
        Ok(resolved)
    }
}

impl<C: Castle> Parser<C> {
    /// Parses and runs input, returning every error as-is.
    ///
    /// # Errors
    /// Both user-facing outcomes (unknown words, rule violations) and
    /// internal failures.
    pub fn try_execute(&self, castle: &mut C, raw: &str) -> Result<String> {
        let command = self.resolve(&*castle, raw)?;
        RuleEngine::handle_command(self.commands(), castle, self.actor, &command)
    }

    /// Parses and runs input, returning the text to show the player.
    ///
    /// Unknown words and rule violations are ordinary responses here.
    ///
    /// # Errors
    /// Only internal failures, such as a command declared without the rules
    /// its state changes rely on.
    pub fn execute(&self, castle: &mut C, raw: &str) -> Result<String> {
        match self.try_execute(castle, raw) {
            Ok(response) => {
                debug!(input = raw, "command succeeded");
                Ok(response)
            }
            Err(err) if err.is_user_facing() => {
                debug!(input = raw, outcome = %err.kind, "command refused");
                Ok(self.config.messages.render(&err.kind))
            }
            Err(err) => {
                warn!(input = raw, error = %err, "internal error while executing command");
                Err(err)
            }
        }
    }
}

impl<C> std::fmt::Debug for Parser<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("commands", &self.commands)
            .field("actor", &self.actor)
            .field("config", &self.config)
            .finish()
    }
}
