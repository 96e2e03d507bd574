//! Natural-language front end for text adventure games.
//!
//! This crate turns player input like "take the cotton candy!" into a
//! [`ResolvedCommand`](quill_engine::ResolvedCommand) and hands it to the
//! [`RuleEngine`](quill_engine::RuleEngine).
//!
//! # Architecture
//!
//! ```text
//! "*Take* the dratted cotton candy!"
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   NORMALIZER    │  → ["take", "cotton candy"]
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   TOKENIZER     │  → [Command(take), Entity(cotton candy)]
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ RESOLVED        │  → ["take", cotton candy#4]
//! │ COMMAND         │
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ RULE ENGINE     │  → "You took the cotton candy."
//! └─────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`vocabulary`] - Known words, rebuilt from commands and entities per parse
//! - [`normalizer`] - Punctuation stripping, fluff dropping, phrase merging
//! - [`tokenizer`] - Words to commands, entities and keywords
//! - [`parser`] - The `execute` pipeline
//! - [`config`] - Response messages and lookahead limits

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod normalizer;
pub mod parser;
pub mod tokenizer;
pub mod vocabulary;

// Re-export main types for convenience
pub use config::{Messages, ParserConfig};
pub use normalizer::Normalizer;
pub use parser::Parser;
pub use tokenizer::{Token, Tokenizer};
pub use vocabulary::{Meaning, Vocabulary};
