//! Blueprintz - An interactive bill-of-materials shell
//!
//! Blueprintz keeps a directed acyclic graph of parts. Assemblies are built
//! from quantities of other parts, components are the leaves. Commands add
//! and remove assemblies and parts, print an assembly's direct children, and
//! roll an assembly up into the total number of sub-assemblies or components
//! it needs.
//!
//! # Architecture
//!
//! The codebase follows a strict layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args and command lines, delegates to engine)
//! - [`engine`] - Stage → Edit → Verify → Commit lifecycle for every mutation
//! - [`core`] - Domain types, the part graph and its algorithms, configuration
//! - [`ui`] - Response and diagnostic output
//!
//! # Correctness Invariants
//!
//! Blueprintz maintains the following invariants:
//!
//! 1. The committed graph never contains a cycle
//! 2. Every child referenced by an assembly exists as a part
//! 3. A rejected command leaves the graph exactly as it was
//! 4. Quantities on a single edge stay within 1..=1000 when entered

pub mod cli;
pub mod core;
pub mod engine;
pub mod ui;
