//! core::graph
//!
//! Assembly graph representation and operations.
//!
//! # Architecture
//!
//! The part graph is a weighted DAG where:
//! - Nodes are parts, keyed by name
//! - An edge `A -> B` with weight `w` means "A directly contains w of B"
//! - Roots are parts no other part references
//!
//! Parts are held behind `Arc` so cloning a graph to stage a mutation copies
//! one pointer per part. A part's children map is duplicated only when the
//! staged copy writes to it (`Arc::make_mut`).
//!
//! # Invariants
//!
//! - Graph must be acyclic (checked by callers before committing)
//! - Every child name resolves to a part in the graph

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use super::part::Part;
use super::types::{Fingerprint, PartKind, PartName};

/// The assembly graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartGraph {
    parts: BTreeMap<PartName, Arc<Part>>,
}

impl PartGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of parts in the graph.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Whether the graph has no parts.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Look up a part by name.
    pub fn find(&self, id: &PartName) -> Option<&Part> {
        self.parts.get(id).map(Arc::as_ref)
    }

    /// Look up a part for mutation, detaching it from any shared copy.
    pub fn find_mut(&mut self, id: &PartName) -> Option<&mut Part> {
        self.parts.get_mut(id).map(Arc::make_mut)
    }

    /// Check whether a part exists.
    pub fn contains(&self, id: &PartName) -> bool {
        self.parts.contains_key(id)
    }

    /// Insert a part, replacing any part with the same name.
    pub fn add_part(&mut self, part: Part) {
        self.parts.insert(part.id().clone(), Arc::new(part));
    }

    /// Remove a part by name.
    ///
    /// Edges pointing at the part are left alone; callers only remove
    /// parts that nothing references.
    pub fn remove_part(&mut self, id: &PartName) -> Option<Part> {
        self.parts
            .remove(id)
            .map(|part| Arc::try_unwrap(part).unwrap_or_else(|shared| (*shared).clone()))
    }

    /// Insert an empty component for every name not yet in the graph.
    pub fn ensure_present<'a>(&mut self, ids: impl IntoIterator<Item = &'a PartName>) {
        for id in ids {
            if !self.contains(id) {
                self.add_part(Part::new(id.clone()));
            }
        }
    }

    /// Iterate over all parts in name order.
    pub fn parts(&self) -> impl Iterator<Item = &Part> {
        self.parts.values().map(Arc::as_ref)
    }

    /// Check whether any part references `id` as a child.
    pub fn has_parents(&self, id: &PartName) -> bool {
        self.parts
            .values()
            .any(|part| part.children().contains_key(id))
    }

    /// Names of parts that no other part references.
    pub fn roots(&self) -> BTreeSet<PartName> {
        let referenced = self.referenced();
        self.parts
            .keys()
            .filter(|id| !referenced.contains(id))
            .cloned()
            .collect()
    }

    fn referenced(&self) -> BTreeSet<&PartName> {
        self.parts
            .values()
            .flat_map(|part| part.children().keys())
            .collect()
    }

    /// Check if the graph contains cycles.
    ///
    /// Returns `Some(part)` naming a part found on its own containment path.
    /// Every part is tried as a starting point, in name order.
    pub fn find_cycle(&self) -> Option<PartName> {
        let mut visited = BTreeSet::new();
        let mut path = Vec::new();

        self.parts
            .keys()
            .find_map(|id| self.cycle_from(id, &mut visited, &mut path))
    }

    /// Depth-first walk from `id`.
    ///
    /// `path` holds the ancestors on the current walk only. `visited` holds
    /// parts whose whole subgraph was already walked without finding a
    /// cycle; reaching one again through another path is not a cycle.
    fn cycle_from<'a>(
        &'a self,
        id: &'a PartName,
        visited: &mut BTreeSet<&'a PartName>,
        path: &mut Vec<&'a PartName>,
    ) -> Option<PartName> {
        if path.contains(&id) {
            return Some(id.clone());
        }
        if visited.contains(id) {
            return None;
        }

        path.push(id);
        if let Some(part) = self.parts.get(id) {
            for child in part.children().keys() {
                if let Some(witness) = self.cycle_from(child, visited, path) {
                    return Some(witness);
                }
            }
        }
        path.pop();

        visited.insert(id);
        None
    }

    /// Total multiplicity of every part of `kind` reachable from `root`.
    ///
    /// Amounts multiply along a path and add up across distinct paths:
    /// if A holds 2 B and B holds 3 C, A holds 6 C. `root` itself is never
    /// part of the result. Must only be called on an acyclic graph.
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use blueprintz::core::graph::PartGraph;
    /// use blueprintz::core::part::Part;
    /// use blueprintz::core::types::{PartKind, PartName};
    ///
    /// let n = |s: &str| PartName::new(s).unwrap();
    /// let mut graph = PartGraph::new();
    /// graph.add_part(Part::with_children(n("A"), BTreeMap::from([(n("B"), 2)])));
    /// graph.add_part(Part::with_children(n("B"), BTreeMap::from([(n("C"), 3)])));
    /// graph.ensure_present([&n("C")]);
    ///
    /// let totals = graph.weighted_transitive_children(&n("A"), PartKind::Component);
    /// assert_eq!(totals.get(&n("C")), Some(&6));
    /// ```
    pub fn weighted_transitive_children(
        &self,
        root: &PartName,
        kind: PartKind,
    ) -> BTreeMap<PartName, u64> {
        let mut memo = HashMap::new();
        self.aggregate(root, kind, &mut memo)
    }

    fn aggregate<'a>(
        &'a self,
        id: &'a PartName,
        kind: PartKind,
        memo: &mut HashMap<&'a PartName, BTreeMap<PartName, u64>>,
    ) -> BTreeMap<PartName, u64> {
        if let Some(done) = memo.get(id) {
            return done.clone();
        }

        let mut totals: BTreeMap<PartName, u64> = BTreeMap::new();
        let Some(part) = self.parts.get(id) else {
            return totals;
        };

        for (child_id, &amount) in part.children() {
            let child_kind = self
                .find(child_id)
                .map_or(PartKind::Component, Part::kind);

            if child_kind == kind {
                let entry = totals.entry(child_id.clone()).or_insert(0);
                *entry = entry.saturating_add(amount);
            }

            if child_kind == PartKind::Assembly {
                for (nested, nested_amount) in self.aggregate(child_id, kind, memo) {
                    let entry = totals.entry(nested).or_insert(0);
                    *entry = entry.saturating_add(nested_amount.saturating_mul(amount));
                }
            }
        }

        memo.insert(id, totals.clone());
        totals
    }

    /// Remove parts left dangling by a mutation.
    ///
    /// A part is removed when it has no children, nothing references it,
    /// and it is not in `roots` (the parentless parts from before the
    /// mutation). Passes repeat until one removes nothing. Returns the
    /// removed names in removal order.
    pub fn cleanup_orphans(&mut self, roots: &BTreeSet<PartName>) -> Vec<PartName> {
        let mut removed = Vec::new();

        loop {
            let referenced = self.referenced();
            let doomed: Vec<PartName> = self
                .parts
                .values()
                .filter(|part| part.kind() == PartKind::Component)
                .map(|part| part.id())
                .filter(|id| !referenced.contains(id) && !roots.contains(*id))
                .cloned()
                .collect();

            if doomed.is_empty() {
                break;
            }

            for id in doomed {
                self.parts.remove(&id);
                removed.push(id);
            }
        }

        removed
    }

    /// Hash of every part and weighted edge in the graph.
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::compute(self.parts().flat_map(|part| {
            let id = part.id();
            let edges: Vec<_> = if part.children().is_empty() {
                vec![(id, None)]
            } else {
                part.children()
                    .iter()
                    .map(|(child, &amount)| (id, Some((child, amount))))
                    .collect()
            };
            edges
        }))
    }
}
