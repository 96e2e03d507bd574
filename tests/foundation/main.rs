//! Integration tests for the quill_foundation crate.
//!
//! Tests for core types:
//! - Entity ids
//! - Errors and error context
//! - Rooms

mod rooms;
