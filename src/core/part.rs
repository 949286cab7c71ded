//! core::part
//!
//! A single node of the assembly graph.
//!
//! # Invariants
//!
//! - Every stored multiplicity is at least 1; an entry that would drop to
//!   zero is removed instead
//! - The kind is derived from the children map and never stored

use std::collections::BTreeMap;

use serde::Serialize;

use super::types::{PartKind, PartName};

/// A named part and the parts it directly contains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Part {
    id: PartName,
    children: BTreeMap<PartName, u64>,
}

impl Part {
    /// Create a part without children (a component).
    pub fn new(id: PartName) -> Self {
        Self {
            id,
            children: BTreeMap::new(),
        }
    }

    /// Create a part with the given children.
    ///
    /// Zero amounts are dropped so the multiplicity invariant holds.
    pub fn with_children(id: PartName, children: BTreeMap<PartName, u64>) -> Self {
        let mut part = Self::new(id);
        part.add_children(children);
        part
    }

    /// The part's identifier.
    pub fn id(&self) -> &PartName {
        &self.id
    }

    /// Direct children and their multiplicities.
    pub fn children(&self) -> &BTreeMap<PartName, u64> {
        &self.children
    }

    /// Multiplicity of a direct child, if present.
    pub fn amount_of(&self, child: &PartName) -> Option<u64> {
        self.children.get(child).copied()
    }

    /// Whether this part is an assembly or a component.
    ///
    /// # Example
    ///
    /// ```
    /// use blueprintz::core::part::Part;
    /// use blueprintz::core::types::{PartKind, PartName};
    ///
    /// let mut bike = Part::new(PartName::new("Bike").unwrap());
    /// assert_eq!(bike.kind(), PartKind::Component);
    ///
    /// bike.add_child(PartName::new("Wheel").unwrap(), 2);
    /// assert_eq!(bike.kind(), PartKind::Assembly);
    ///
    /// bike.remove_all_children();
    /// assert_eq!(bike.kind(), PartKind::Component);
    /// ```
    pub fn kind(&self) -> PartKind {
        if self.children.is_empty() {
            PartKind::Component
        } else {
            PartKind::Assembly
        }
    }

    /// Shorthand for `kind() == PartKind::Assembly`.
    pub fn is_assembly(&self) -> bool {
        self.kind() == PartKind::Assembly
    }

    /// Add `amount` of `child`, increasing an existing entry.
    ///
    /// The caller guarantees `amount >= 1`; a zero amount is ignored.
    pub fn add_child(&mut self, child: PartName, amount: u64) {
        if amount == 0 {
            return;
        }
        let entry = self.children.entry(child).or_insert(0);
        *entry = entry.saturating_add(amount);
    }

    /// Merge every entry of `children` into this part.
    pub fn add_children(&mut self, children: impl IntoIterator<Item = (PartName, u64)>) {
        for (child, amount) in children {
            self.add_child(child, amount);
        }
    }

    /// Remove `amount` of `child`.
    ///
    /// Returns `false` and leaves the part untouched if the child is absent
    /// or present fewer than `amount` times. An entry that reaches zero is
    /// deleted.
    #[must_use]
    pub fn remove_child(&mut self, child: &PartName, amount: u64) -> bool {
        let Some(current) = self.children.get_mut(child) else {
            return false;
        };

        if *current < amount {
            return false;
        }

        if *current == amount {
            self.children.remove(child);
        } else {
            *current -= amount;
        }
        true
    }

    /// Drop every child, demoting the part to a component.
    pub fn remove_all_children(&mut self) {
        self.children.clear();
    }
}
