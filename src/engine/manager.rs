//! engine::manager
//!
//! The single owner of the committed assembly graph.
//!
//! # Transaction Contract
//!
//! Every mutating operation:
//! 1. Checks amounts before touching anything
//! 2. Stages a copy of the committed graph
//! 3. Applies its edit to the staged copy
//! 4. Verifies the staged copy is acyclic
//! 5. Commits by replacing the committed graph
//!
//! Removals additionally collect parts orphaned by the edit before the
//! verify step. Failures drop the staged copy; there is no rollback code
//! because nothing committed was ever touched.

use std::collections::BTreeMap;

use super::listing::{Listing, COMPONENT_MARKER};
use super::GraphError;
use crate::core::graph::PartGraph;
use crate::core::part::Part;
use crate::core::types::{Fingerprint, PartKind, PartName};

/// Owner of the committed [`PartGraph`].
///
/// Mutations take `&mut self`, so no caller can observe a half-applied
/// transaction.
#[derive(Debug, Clone, Default)]
pub struct GraphManager {
    graph: PartGraph,
}

impl GraphManager {
    /// Create a manager with an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// The committed graph.
    pub fn graph(&self) -> &PartGraph {
        &self.graph
    }

    /// Fingerprint of the committed graph.
    pub fn fingerprint(&self) -> Fingerprint {
        self.graph.fingerprint()
    }

    /// Run `edit` against a staged copy and commit it if it stays acyclic.
    fn transact<F>(&mut self, edit: F) -> Result<(), GraphError>
    where
        F: FnOnce(&mut PartGraph) -> Result<(), GraphError>,
    {
        let mut stage = self.graph.clone();
        edit(&mut stage)?;

        if let Some(witness) = stage.find_cycle() {
            return Err(GraphError::NotAcyclic(witness));
        }

        self.graph = stage;
        Ok(())
    }

    /// Add an assembly, or turn an existing component into one.
    ///
    /// Children are merged into an existing component's (empty) children.
    /// Child names not yet in the graph are created as components.
    ///
    /// # Errors
    ///
    /// - `NumberNotInRange` if any amount is zero
    /// - `AssemblyAlreadyExists` if `id` is already an assembly
    /// - `NotAcyclic` if the new edges would close a cycle
    pub fn add_assembly(
        &mut self,
        id: PartName,
        children: BTreeMap<PartName, u64>,
    ) -> Result<(), GraphError> {
        check_amounts(children.values().copied())?;

        if self.graph.find(&id).is_some_and(Part::is_assembly) {
            return Err(GraphError::AssemblyAlreadyExists(id));
        }

        self.transact(|stage| {
            let child_ids: Vec<PartName> = children.keys().cloned().collect();
            match stage.find_mut(&id) {
                Some(existing) => existing.add_children(children),
                None => stage.add_part(Part::with_children(id.clone(), children)),
            }
            stage.ensure_present(&child_ids);
            Ok(())
        })
    }

    /// Remove an assembly.
    ///
    /// An assembly still used by another assembly keeps its name and
    /// becomes a component; otherwise it is deleted. Parts that lose their
    /// last parent in the process are removed.
    ///
    /// # Errors
    ///
    /// - `PartDoesNotExist` if `id` is unknown
    /// - `PartIsComponent` if `id` is a component
    pub fn remove_assembly(&mut self, id: &PartName) -> Result<(), GraphError> {
        assembly(&self.graph, id)?;

        self.transact(|stage| {
            let roots = stage.roots();
            if stage.has_parents(id) {
                assembly_mut(stage, id)?.remove_all_children();
            } else {
                stage.remove_part(id);
            }
            stage.cleanup_orphans(&roots);
            Ok(())
        })
    }

    /// Add `amount` of `child` to the assembly `to`.
    ///
    /// # Errors
    ///
    /// - `NumberNotInRange` if `amount` is zero
    /// - `PartDoesNotExist` / `PartIsComponent` if `to` is not an assembly
    /// - `NotAcyclic` if the new edge would close a cycle
    pub fn add_part(
        &mut self,
        to: &PartName,
        child: &PartName,
        amount: u64,
    ) -> Result<(), GraphError> {
        check_amounts([amount])?;

        self.transact(|stage| {
            assembly_mut(stage, to)?.add_child(child.clone(), amount);
            stage.ensure_present([child]);
            Ok(())
        })
    }

    /// Remove `amount` of `child` from the assembly `from`.
    ///
    /// Removing the last child turns `from` into a component. Parts that
    /// lose their last parent are removed.
    ///
    /// # Errors
    ///
    /// - `NumberNotInRange` if `amount` is zero
    /// - `PartDoesNotExist` / `PartIsComponent` if `from` is not an assembly
    /// - `InsufficientQuantity` if `from` holds fewer than `amount` of `child`
    pub fn remove_part(
        &mut self,
        from: &PartName,
        child: &PartName,
        amount: u64,
    ) -> Result<(), GraphError> {
        check_amounts([amount])?;

        self.transact(|stage| {
            let roots = stage.roots();
            if !assembly_mut(stage, from)?.remove_child(child, amount) {
                return Err(GraphError::InsufficientQuantity(amount));
            }
            stage.cleanup_orphans(&roots);
            Ok(())
        })
    }

    /// Render the direct children of `id`, or `COMPONENT` for a component.
    ///
    /// # Errors
    ///
    /// `PartDoesNotExist` if `id` is unknown.
    pub fn print_assembly(&self, id: &PartName) -> Result<String, GraphError> {
        let part = self
            .graph
            .find(id)
            .ok_or_else(|| GraphError::PartDoesNotExist(id.clone()))?;

        Ok(match part.kind() {
            PartKind::Component => COMPONENT_MARKER.to_string(),
            PartKind::Assembly => Listing::by_name(part.children()).to_string(),
        })
    }

    /// Render every assembly reachable from `id` with compounded amounts.
    ///
    /// # Errors
    ///
    /// `PartDoesNotExist` / `PartIsComponent` if `id` is not an assembly.
    pub fn get_assemblies(&self, id: &PartName) -> Result<String, GraphError> {
        self.aggregate(id, PartKind::Assembly)
    }

    /// Render every component reachable from `id` with compounded amounts.
    ///
    /// # Errors
    ///
    /// `PartDoesNotExist` / `PartIsComponent` if `id` is not an assembly.
    pub fn get_components(&self, id: &PartName) -> Result<String, GraphError> {
        self.aggregate(id, PartKind::Component)
    }

    fn aggregate(&self, id: &PartName, kind: PartKind) -> Result<String, GraphError> {
        assembly(&self.graph, id)?;
        let totals = self.graph.weighted_transitive_children(id, kind);
        Ok(Listing::by_amount(totals).to_string())
    }
}

/// Reject zero amounts.
fn check_amounts(amounts: impl IntoIterator<Item = u64>) -> Result<(), GraphError> {
    match amounts.into_iter().find(|&amount| amount == 0) {
        Some(amount) => Err(GraphError::NumberNotInRange(amount)),
        None => Ok(()),
    }
}

/// Resolve `id` as an assembly.
fn assembly<'g>(graph: &'g PartGraph, id: &PartName) -> Result<&'g Part, GraphError> {
    let part = graph
        .find(id)
        .ok_or_else(|| GraphError::PartDoesNotExist(id.clone()))?;
    if !part.is_assembly() {
        return Err(GraphError::PartIsComponent(id.clone()));
    }
    Ok(part)
}

fn assembly_mut<'g>(graph: &'g mut PartGraph, id: &PartName) -> Result<&'g mut Part, GraphError> {
    let part = graph
        .find_mut(id)
        .ok_or_else(|| GraphError::PartDoesNotExist(id.clone()))?;
    if !part.is_assembly() {
        return Err(GraphError::PartIsComponent(id.clone()));
    }
    Ok(part)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> PartName {
        PartName::new(s).unwrap()
    }

    fn children(entries: &[(&str, u64)]) -> BTreeMap<PartName, u64> {
        entries
            .iter()
            .map(|&(child, amount)| (name(child), amount))
            .collect()
    }

    fn bike() -> GraphManager {
        let mut manager = GraphManager::new();
        manager
            .add_assembly(name("Bike"), children(&[("Wheel", 2), ("Frame", 1)]))
            .unwrap();
        manager
    }

    mod add_assembly {
        use super::*;

        #[test]
        fn creates_assembly_and_components() {
            let manager = bike();
            let graph = manager.graph();
            assert_eq!(graph.len(), 3);
            assert!(graph.find(&name("Bike")).unwrap().is_assembly());
            assert_eq!(
                graph.find(&name("Wheel")).unwrap().kind(),
                PartKind::Component
            );
        }

        #[test]
        fn rejects_existing_assembly() {
            let mut manager = bike();
            let before = manager.fingerprint();
            let err = manager
                .add_assembly(name("Bike"), children(&[("Bell", 1)]))
                .unwrap_err();
            assert_eq!(err, GraphError::AssemblyAlreadyExists(name("Bike")));
            assert_eq!(manager.fingerprint(), before);
        }

        #[test]
        fn promotes_existing_component() {
            let mut manager = bike();
            manager
                .add_assembly(name("Wheel"), children(&[("Spoke", 32), ("Rim", 1)]))
                .unwrap();
            assert_eq!(manager.print_assembly(&name("Wheel")).unwrap(), "Rim:1;Spoke:32");
            assert_eq!(
                manager.get_components(&name("Bike")).unwrap(),
                "Spoke:64;Rim:2;Frame:1"
            );
        }

        #[test]
        fn rejects_cycle_and_keeps_graph() {
            let mut manager = bike();
            let before = manager.fingerprint();
            let err = manager
                .add_assembly(name("Wheel"), children(&[("Bike", 1)]))
                .unwrap_err();
            assert!(matches!(err, GraphError::NotAcyclic(ref w) if w == &name("Bike") || w == &name("Wheel")));
            assert_eq!(manager.fingerprint(), before);
            assert_eq!(manager.print_assembly(&name("Wheel")).unwrap(), "COMPONENT");
        }

        #[test]
        fn rejects_self_reference() {
            let mut manager = GraphManager::new();
            let err = manager
                .add_assembly(name("Loop"), children(&[("Loop", 1)]))
                .unwrap_err();
            assert_eq!(err, GraphError::NotAcyclic(name("Loop")));
            assert!(manager.graph().is_empty());
        }

        #[test]
        fn rejects_zero_amount() {
            let mut manager = GraphManager::new();
            let err = manager
                .add_assembly(name("A"), children(&[("B", 0)]))
                .unwrap_err();
            assert_eq!(err, GraphError::NumberNotInRange(0));
            assert!(manager.graph().is_empty());
        }

        #[test]
        fn substring_names_are_not_cycles() {
            let mut manager = GraphManager::new();
            manager
                .add_assembly(name("AB"), children(&[("A", 1)]))
                .unwrap();
            manager
                .add_assembly(name("A"), children(&[("B", 1)]))
                .unwrap();
            manager
                .add_assembly(name("BA"), children(&[("AB", 2)]))
                .unwrap();
            assert_eq!(manager.get_components(&name("BA")).unwrap(), "B:2");
        }
    }

    mod remove_assembly {
        use super::*;

        #[test]
        fn root_is_deleted_with_its_orphans() {
            let mut manager = bike();
            manager.remove_assembly(&name("Bike")).unwrap();
            assert!(manager.graph().is_empty());
        }

        #[test]
        fn referenced_assembly_becomes_component() {
            let mut manager = bike();
            manager
                .add_assembly(name("Wheel"), children(&[("Spoke", 32)]))
                .unwrap();
            manager.remove_assembly(&name("Wheel")).unwrap();

            assert_eq!(manager.print_assembly(&name("Wheel")).unwrap(), "COMPONENT");
            assert!(!manager.graph().contains(&name("Spoke")));
            assert_eq!(
                manager.get_components(&name("Bike")).unwrap(),
                "Wheel:2;Frame:1"
            );
        }

        #[test]
        fn shared_components_survive() {
            let mut manager = bike();
            manager
                .add_assembly(name("Car"), children(&[("Wheel", 4)]))
                .unwrap();
            manager.remove_assembly(&name("Bike")).unwrap();

            assert!(!manager.graph().contains(&name("Bike")));
            assert!(!manager.graph().contains(&name("Frame")));
            assert!(manager.graph().contains(&name("Wheel")));
        }

        #[test]
        fn unknown_part() {
            let mut manager = bike();
            assert_eq!(
                manager.remove_assembly(&name("Boat")),
                Err(GraphError::PartDoesNotExist(name("Boat")))
            );
        }

        #[test]
        fn component_rejected() {
            let mut manager = bike();
            let before = manager.fingerprint();
            assert_eq!(
                manager.remove_assembly(&name("Frame")),
                Err(GraphError::PartIsComponent(name("Frame")))
            );
            assert_eq!(manager.fingerprint(), before);
        }
    }

    mod add_part {
        use super::*;

        #[test]
        fn increments_existing_child() {
            let mut manager = bike();
            manager.add_part(&name("Bike"), &name("Wheel"), 3).unwrap();
            assert_eq!(manager.print_assembly(&name("Bike")).unwrap(), "Frame:1;Wheel:5");
        }

        #[test]
        fn creates_new_child() {
            let mut manager = bike();
            manager.add_part(&name("Bike"), &name("Bell"), 1).unwrap();
            assert_eq!(
                manager.print_assembly(&name("Bike")).unwrap(),
                "Bell:1;Frame:1;Wheel:2"
            );
            assert!(manager.graph().contains(&name("Bell")));
        }

        #[test]
        fn target_must_be_assembly() {
            let mut manager = bike();
            assert_eq!(
                manager.add_part(&name("Frame"), &name("Bolt"), 1),
                Err(GraphError::PartIsComponent(name("Frame")))
            );
            assert_eq!(
                manager.add_part(&name("Boat"), &name("Bolt"), 1),
                Err(GraphError::PartDoesNotExist(name("Boat")))
            );
            assert!(!manager.graph().contains(&name("Bolt")));
        }

        #[test]
        fn rejects_cycle() {
            let mut manager = bike();
            manager
                .add_assembly(name("Wheel"), children(&[("Hub", 1)]))
                .unwrap();
            let before = manager.fingerprint();
            let err = manager.add_part(&name("Wheel"), &name("Bike"), 1).unwrap_err();
            assert!(matches!(err, GraphError::NotAcyclic(_)));
            assert_eq!(manager.fingerprint(), before);
        }

        #[test]
        fn rejects_zero_amount() {
            let mut manager = bike();
            assert_eq!(
                manager.add_part(&name("Bike"), &name("Wheel"), 0),
                Err(GraphError::NumberNotInRange(0))
            );
        }
    }

    mod remove_part {
        use super::*;

        #[test]
        fn decrements_child() {
            let mut manager = bike();
            manager.remove_part(&name("Bike"), &name("Wheel"), 1).unwrap();
            assert_eq!(manager.print_assembly(&name("Bike")).unwrap(), "Frame:1;Wheel:1");
        }

        #[test]
        fn insufficient_quantity() {
            let mut manager = bike();
            let before = manager.fingerprint();
            assert_eq!(
                manager.remove_part(&name("Bike"), &name("Wheel"), 3),
                Err(GraphError::InsufficientQuantity(3))
            );
            assert_eq!(
                manager.remove_part(&name("Bike"), &name("Bell"), 1),
                Err(GraphError::InsufficientQuantity(1))
            );
            assert_eq!(manager.fingerprint(), before);
        }

        #[test]
        fn removed_child_is_collected() {
            let mut manager = bike();
            manager.remove_part(&name("Bike"), &name("Wheel"), 2).unwrap();
            assert!(!manager.graph().contains(&name("Wheel")));
        }

        #[test]
        fn last_child_demotes_assembly() {
            let mut manager = bike();
            manager.remove_part(&name("Bike"), &name("Wheel"), 2).unwrap();
            manager.remove_part(&name("Bike"), &name("Frame"), 1).unwrap();
            assert_eq!(manager.print_assembly(&name("Bike")).unwrap(), "COMPONENT");
            assert_eq!(manager.graph().len(), 1);
        }

        #[test]
        fn orphaned_subassembly_survives() {
            let mut manager = GraphManager::new();
            manager
                .add_assembly(name("Car"), children(&[("Engine", 1), ("Seat", 4)]))
                .unwrap();
            manager
                .add_assembly(name("Engine"), children(&[("Piston", 4)]))
                .unwrap();
            manager.remove_part(&name("Car"), &name("Engine"), 1).unwrap();

            assert_eq!(manager.print_assembly(&name("Engine")).unwrap(), "Piston:4");
            assert_eq!(manager.get_components(&name("Car")).unwrap(), "Seat:4");
        }
    }

    mod queries {
        use super::*;

        #[test]
        fn multiplicative_compounding() {
            let mut manager = GraphManager::new();
            manager.add_assembly(name("A"), children(&[("B", 2)])).unwrap();
            manager.add_assembly(name("B"), children(&[("C", 3)])).unwrap();
            assert_eq!(manager.get_components(&name("A")).unwrap(), "C:6");
            assert_eq!(manager.get_assemblies(&name("A")).unwrap(), "B:2");
        }

        #[test]
        fn no_subassemblies_is_empty() {
            let manager = bike();
            assert_eq!(manager.get_assemblies(&name("Bike")).unwrap(), "EMPTY");
        }

        #[test]
        fn merge_semantics() {
            let mut manager = bike();
            manager
                .add_assembly(name("Wheel"), children(&[("Spoke", 2)]))
                .unwrap();
            manager.add_part(&name("Wheel"), &name("Spoke"), 3).unwrap();
            assert_eq!(manager.print_assembly(&name("Wheel")).unwrap(), "Spoke:5");
        }

        #[test]
        fn aggregation_requires_assembly() {
            let manager = bike();
            assert_eq!(
                manager.get_components(&name("Wheel")),
                Err(GraphError::PartIsComponent(name("Wheel")))
            );
            assert_eq!(
                manager.get_assemblies(&name("Boat")),
                Err(GraphError::PartDoesNotExist(name("Boat")))
            );
        }

        #[test]
        fn print_unknown_part() {
            let manager = bike();
            assert_eq!(
                manager.print_assembly(&name("Boat")),
                Err(GraphError::PartDoesNotExist(name("Boat")))
            );
        }
    }

    #[test]
    fn bike_scenario() {
        let mut manager = bike();
        assert_eq!(manager.get_components(&name("Bike")).unwrap(), "Wheel:2;Frame:1");

        let before = manager.fingerprint();
        assert!(matches!(
            manager.add_assembly(name("Wheel"), children(&[("Bike", 1)])),
            Err(GraphError::NotAcyclic(_))
        ));
        assert_eq!(manager.fingerprint(), before);

        manager.remove_part(&name("Bike"), &name("Wheel"), 2).unwrap();
        assert_eq!(manager.print_assembly(&name("Bike")).unwrap(), "Frame:1");

        manager.remove_part(&name("Bike"), &name("Frame"), 1).unwrap();
        assert_eq!(manager.print_assembly(&name("Bike")).unwrap(), "COMPONENT");
    }

    #[test]
    fn names_are_opaque() {
        let mut manager = GraphManager::new();
        manager
            .add_assembly(name("front wheel"), children(&[("spoke 2", 36), ("A", 1)]))
            .unwrap();
        assert_eq!(
            manager.get_components(&name("front wheel")).unwrap(),
            "spoke 2:36;A:1"
        );
        assert_eq!(manager.print_assembly(&name("front wheel")).unwrap(), "A:1;spoke 2:36");
    }
}
