//! Core parsing module
//!
//! This module contains the line parser, leaves first:
//! - `markup` - Renderer tags and entities
//! - `classifier` - Predicates deciding what a line is
//! - `extract` - Field extractors turning a line into a typed value
//! - `assembler` - State machine building entries from the line sequence
//! - `entry_store` - Ordered collection of finalized entries

pub mod assembler;
pub mod classifier;
pub mod entry_store;
pub mod extract;
pub mod markup;

pub use assembler::{Assembler, ParserState};
pub use entry_store::EntryStore;
