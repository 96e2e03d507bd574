//! Quill - Natural-language front end for interactive fiction
//!
//! This crate re-exports all layers of the Quill system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: quill_parser     - Vocabulary, normalizer, tokenizer, execute
//! Layer 2: quill_engine     - Commands, rule book, rule engine, stdlib
//! Layer 1: quill_storage    - Reference world: entities, names, rooms
//! Layer 0: quill_foundation - Core types (EntityId, Room, Error, Castle)
//! ```

pub use quill_engine as engine;
pub use quill_foundation as foundation;
pub use quill_parser as parser;
pub use quill_storage as storage;
