//! The words the parser currently knows.
//!
//! A [`Vocabulary`] is derived, never stored: it is rebuilt from the command
//! registry and the world's named entities each time input is parsed, so it
//! cannot fall behind a spawn, despawn or rename.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use quill_engine::{Command, CommandRegistry};
use quill_foundation::{EntityId, Lexicon};

use crate::normalizer::Normalizer;

/// What a word or phrase stands for.
pub enum Meaning<C> {
    /// A verb.
    Command(Arc<Command<C>>),
    /// An argument word from some command's syntax.
    Keyword(String),
    /// A named entity.
    Entity(EntityId),
}

impl<C> Clone for Meaning<C> {
    fn clone(&self) -> Self {
        match self {
            Self::Command(command) => Self::Command(Arc::clone(command)),
            Self::Keyword(word) => Self::Keyword(word.clone()),
            Self::Entity(id) => Self::Entity(*id),
        }
    }
}

impl<C> fmt::Debug for Meaning<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Command(command) => f.debug_tuple("Command").field(&command.name()).finish(),
            Self::Keyword(word) => f.debug_tuple("Keyword").field(word).finish(),
            Self::Entity(id) => f.debug_tuple("Entity").field(id).finish(),
        }
    }
}

/// Surface word or phrase to meaning.
///
/// When a word means several things, verbs win over keywords and keywords
/// over entities. Among entities sharing a name the lowest id wins.
///
/// The single words inside multi-word phrases are tracked separately. They
/// mean nothing alone but are not fluff either.
pub struct Vocabulary<C> {
    entries: HashMap<String, Meaning<C>>,
    phrase_parts: HashSet<String>,
    longest_phrase: usize,
}

impl<C> Vocabulary<C> {
    /// Builds the vocabulary from the live command registry and entity set.
    pub fn build<L: Lexicon>(commands: &CommandRegistry<C>, lexicon: &L) -> Self {
        let mut vocabulary = Self {
            entries: HashMap::new(),
            phrase_parts: HashSet::new(),
            longest_phrase: 0,
        };

        for (name, id) in lexicon.names() {
            let Some(phrase) = canonical_phrase(name) else {
                continue;
            };
            let taken = matches!(
                vocabulary.entries.get(&phrase),
                Some(Meaning::Entity(existing)) if *existing <= id
            );
            if !taken {
                vocabulary.insert(phrase, Meaning::Entity(id));
            }
        }

        for (_, command) in commands.iter() {
            for keyword in command.keywords() {
                if let Some(phrase) = canonical_phrase(keyword) {
                    vocabulary.insert(phrase.clone(), Meaning::Keyword(phrase));
                }
            }
        }

        for (verb, command) in commands.iter() {
            if let Some(phrase) = canonical_phrase(verb) {
                vocabulary.insert(phrase, Meaning::Command(Arc::clone(command)));
            }
        }

        vocabulary
    }

    fn insert(&mut self, phrase: String, meaning: Meaning<C>) {
        let words: Vec<&str> = phrase.split(' ').collect();
        self.longest_phrase = self.longest_phrase.max(words.len());
        if words.len() > 1 {
            self.phrase_parts.extend(words.iter().map(|word| (*word).to_string()));
        }
        self.entries.insert(phrase, meaning);
    }

    /// Looks up a normalized word or phrase.
    #[must_use]
    pub fn lookup(&self, phrase: &str) -> Option<&Meaning<C>> {
        self.entries.get(phrase)
    }

    /// Returns true if the word or phrase is known.
    #[must_use]
    pub fn contains(&self, phrase: &str) -> bool {
        self.entries.contains_key(phrase)
    }

    /// Returns true if the word appears inside some known multi-word phrase.
    ///
    /// "candy" is a phrase part while "cotton candy" names something, even
    /// though "candy" alone has no meaning.
    #[must_use]
    pub fn is_phrase_part(&self, word: &str) -> bool {
        self.phrase_parts.contains(word)
    }

    /// Word count of the longest known phrase.
    #[must_use]
    pub fn longest_phrase(&self) -> usize {
        self.longest_phrase
    }

    /// Number of known words and phrases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<C> fmt::Debug for Vocabulary<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vocabulary")
            .field("entries", &self.entries)
            .field("phrase_parts", &self.phrase_parts)
            .field("longest_phrase", &self.longest_phrase)
            .finish()
    }
}

/// Cleans a registered name the same way player input is cleaned, so "Cotton
/// Candy" and "cotton  candy!" key the same entry.
fn canonical_phrase(name: &str) -> Option<String> {
    let words = Normalizer::clean(name);
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}
