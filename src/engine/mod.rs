//! engine
//!
//! Transactional operations over the committed assembly graph.
//!
//! # Architecture
//!
//! The engine owns exactly one committed [`PartGraph`] inside a
//! [`GraphManager`]. Every mutation follows the same lifecycle:
//!
//! ```text
//! Stage -> Edit -> Verify -> Commit
//! ```
//!
//! 1. **Stage**: copy the committed graph (structurally shared)
//! 2. **Edit**: apply the requested change to the staged copy
//! 3. **Verify**: confirm the staged copy is still acyclic
//! 4. **Commit**: replace the committed graph with the staged copy
//!
//! Any failure along the way drops the staged copy, so the committed graph
//! is untouched whenever an error is returned.
//!
//! # Invariants
//!
//! - The committed graph is always acyclic
//! - Every child name in the committed graph resolves to a part
//! - Mutations never touch the committed graph directly
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use blueprintz::core::types::PartName;
//! use blueprintz::engine::GraphManager;
//!
//! let n = |s: &str| PartName::new(s).unwrap();
//! let mut manager = GraphManager::new();
//! manager
//!     .add_assembly(n("Bike"), BTreeMap::from([(n("Wheel"), 2), (n("Frame"), 1)]))
//!     .unwrap();
//! assert_eq!(manager.get_components(&n("Bike")).unwrap(), "Wheel:2;Frame:1");
//! ```
//!
//! [`PartGraph`]: crate::core::graph::PartGraph

pub mod listing;
pub mod manager;
pub mod request;

pub use listing::Listing;
pub use manager::GraphManager;
pub use request::{Request, Response};

use crate::core::types::{PartName, MAX_QUANTITY, MIN_QUANTITY};

/// Errors from engine operations.
///
/// Every variant carries the offending name or amount so the caller can
/// build a message. The committed graph is unchanged whenever one of these
/// is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// An assembly with this name already exists.
    #[error("assembly '{0}' already exists")]
    AssemblyAlreadyExists(PartName),

    /// The change would make a part contain itself.
    #[error("part '{0}' would contain itself")]
    NotAcyclic(PartName),

    /// No part with this name exists.
    #[error("part '{0}' does not exist")]
    PartDoesNotExist(PartName),

    /// The part is a component where an assembly was required.
    #[error("part '{0}' is a component, not an assembly")]
    PartIsComponent(PartName),

    /// The part is an assembly where a component was required.
    #[error("part '{0}' is an assembly, not a component")]
    PartIsAssembly(PartName),

    /// Fewer parts are present than the removal asked for.
    #[error("not enough parts to remove {0}")]
    InsufficientQuantity(u64),

    /// An amount outside the accepted range reached the engine.
    #[error("number {0} is not in range {MIN_QUANTITY}..={MAX_QUANTITY}")]
    NumberNotInRange(u64),
}
