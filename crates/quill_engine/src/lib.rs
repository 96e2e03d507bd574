//! Command definitions, rule book, and rule-validated dispatch for Quill.
//!
//! This crate provides:
//! - [`Command`] and [`CommandSpec`] - What a verb checks, changes and reports
//! - [`CommandRegistry`] - Verb words (names and aliases) to commands
//! - [`RuleBook`] - Named rules, state changes and queries, resolved when a
//!   command is declared
//! - [`RuleEngine`] - Validate, apply, respond
//! - [`stdlib`] - Built-in rules, effects, queries and commands
//!
//! ```text
//! ResolvedCommand ["go", "north"]
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ LOOKUP          │  → Command "go"
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ VALIDATE        │  → path_exists ✓  actor_can_act ✓   (first ✗ aborts)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ APPLY           │  → move_actor
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ RESPOND         │  → query │ radio silence │ response │ look
//! └─────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod command;
pub mod dispatch;
pub mod rule;
pub mod stdlib;

pub use command::{
    Argument, Command, CommandRegistry, CommandSpec, QuerySpec, Report, ResolvedCommand,
    Responder, SyntaxElement,
};
pub use dispatch::RuleEngine;
pub use rule::{NamedQuery, Rule, RuleBook, StateChange};
