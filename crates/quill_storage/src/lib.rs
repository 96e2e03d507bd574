//! Reference world collaborator for Quill.
//!
//! This crate provides:
//! - [`EntityStore`] - Generational entity allocation
//! - [`Attributes`] - What a freshly spawned entity carries
//! - [`World`] - Entities, names, rooms and actors behind the
//!   [`Castle`](quill_foundation::Castle) and [`Lexicon`](quill_foundation::Lexicon) traits

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod entity;
pub mod world;

pub use entity::EntityStore;
pub use world::{Attributes, World};
