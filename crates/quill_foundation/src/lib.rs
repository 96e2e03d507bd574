//! Core identifiers, errors, and collaborator interfaces for Quill.
//!
//! This crate provides:
//! - [`EntityId`] - Generational entity identifiers
//! - [`Room`] - The room view rules and looks are evaluated against
//! - [`Castle`] and [`Lexicon`] - What the parser and rule engine need from a world
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod castle;
pub mod entity;
pub mod error;

pub use castle::{Castle, Lexicon, Room};
pub use entity::EntityId;
pub use error::{Error, ErrorContext, ErrorKind, Result};
