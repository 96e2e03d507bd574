//! Input normalization.
//!
//! Turns raw player input into the words and phrases the vocabulary knows,
//! dropping everything else.

use tracing::trace;

use quill_foundation::{Error, Result};

use crate::vocabulary::Vocabulary;

/// Cleans and filters player input.
pub struct Normalizer;

impl Normalizer {
    /// Lowercases a word and strips every non-alphanumeric character.
    ///
    /// `"*Ta@ke*"` becomes `"take"`.
    #[must_use]
    pub fn clean_word(word: &str) -> String {
        word.chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(char::to_lowercase)
            .collect()
    }

    /// Splits on whitespace and cleans each word, discarding any that come
    /// out empty.
    #[must_use]
    pub fn clean(raw: &str) -> Vec<String> {
        raw.split_whitespace()
            .map(Self::clean_word)
            .filter(|word| !word.is_empty())
            .collect()
    }

    /// Reduces raw input to known words and phrases.
    ///
    /// Scans left to right, at each position taking the longest run of words
    /// (up to `max_phrase_words`, or the vocabulary's longest phrase when
    /// `None`) that the vocabulary knows. A word that starts no known phrase
    /// is kept on its own if it is part of some longer name, so the
    /// tokenizer can report it. Anything else is fluff and is dropped.
    ///
    /// # Errors
    /// `Gobbledegook` if nothing survives.
    pub fn normalize<C>(
        vocabulary: &Vocabulary<C>,
        raw: &str,
        max_phrase_words: Option<usize>,
    ) -> Result<Vec<String>> {
        let words = Self::clean(raw);
        let longest = vocabulary.longest_phrase();
        let window = max_phrase_words.map_or(longest, |max| max.min(longest)).max(1);

        let mut kept = Vec::new();
        let mut i = 0;
        while i < words.len() {
            let widest = window.min(words.len() - i);
            let matched = (1..=widest).rev().find_map(|len| {
                let phrase = words[i..i + len].join(" ");
                vocabulary.contains(&phrase).then_some((phrase, len))
            });

            match matched {
                Some((phrase, len)) => {
                    kept.push(phrase);
                    i += len;
                }
                None if vocabulary.is_phrase_part(&words[i]) => {
                    trace!(word = %words[i], "kept part of a longer name");
                    kept.push(words[i].clone());
                    i += 1;
                }
                None => {
                    trace!(word = %words[i], "dropped fluff word");
                    i += 1;
                }
            }
        }

        if kept.is_empty() {
            return Err(Error::gobbledegook());
        }
        Ok(kept)
    }

    /// Re-checks words that have already been normalized.
    ///
    /// Each entry is taken as one unit, so phrases already merged stay
    /// merged and separate words are never joined. Entries that are no
    /// longer known are dropped as fluff. Feeding the output of
    /// [`normalize`](Self::normalize) through here returns it unchanged.
    ///
    /// # Errors
    /// `Gobbledegook` if nothing survives.
    pub fn normalize_words<C>(vocabulary: &Vocabulary<C>, words: &[String]) -> Result<Vec<String>> {
        let kept: Vec<String> = words
            .iter()
            .filter_map(|entry| {
                let phrase = Self::clean(entry).join(" ");
                if vocabulary.contains(&phrase) || vocabulary.is_phrase_part(&phrase) {
                    Some(phrase)
                } else {
                    trace!(word = %entry, "dropped fluff word");
                    None
                }
            })
            .collect();

        if kept.is_empty() {
            return Err(Error::gobbledegook());
        }
        Ok(kept)
    }
}
