//! core
//!
//! Core domain types and the assembly graph.
//!
//! # Modules
//!
//! - [`types`] - Strong types: PartName, Quantity, PartKind, Fingerprint
//! - [`part`] - A single part and its weighted children
//! - [`graph`] - Assembly graph: cycle detection, aggregation, cleanup
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - A part's kind is computed, never stored
//! - All traversal and rendering order is deterministic

pub mod config;
pub mod graph;
pub mod part;
pub mod types;
