//! engine::request
//!
//! Typed requests accepted by the engine and the responses it produces.
//!
//! The text front end builds a [`Request`] from a command line and renders
//! the [`Response`]; the engine never sees raw text.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{GraphError, GraphManager};
use crate::core::types::{PartName, Quantity};

/// A parsed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Declare an assembly with `(amount, child)` entries in input order.
    AddAssembly {
        id: PartName,
        children: Vec<(Quantity, PartName)>,
    },
    /// Remove an assembly.
    RemoveAssembly { id: PartName },
    /// Show the direct children of a part.
    PrintAssembly { id: PartName },
    /// Aggregate the assemblies reachable from an assembly.
    GetAssemblies { id: PartName },
    /// Aggregate the components reachable from an assembly.
    GetComponents { id: PartName },
    /// Add parts to an assembly.
    AddPart {
        to: PartName,
        id: PartName,
        amount: Quantity,
    },
    /// Remove parts from an assembly.
    RemovePart {
        from: PartName,
        id: PartName,
        amount: Quantity,
    },
    /// End the session.
    Quit,
}

impl Request {
    /// Whether handling this request may change the graph.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Request::AddAssembly { .. }
                | Request::RemoveAssembly { .. }
                | Request::AddPart { .. }
                | Request::RemovePart { .. }
        )
    }
}

/// Result of a successfully handled request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "output", rename_all = "lowercase")]
pub enum Response {
    /// A mutation was committed.
    Done,
    /// A query produced text.
    Text(String),
    /// The session should end.
    Quit,
}

impl GraphManager {
    /// Handle one request.
    ///
    /// Repeated names in an `AddAssembly` request are merged by summing
    /// their amounts before the engine sees them.
    pub fn handle(&mut self, request: Request) -> Result<Response, GraphError> {
        match request {
            Request::AddAssembly { id, children } => {
                self.add_assembly(id, merge_children(children))?;
                Ok(Response::Done)
            }
            Request::RemoveAssembly { id } => {
                self.remove_assembly(&id)?;
                Ok(Response::Done)
            }
            Request::PrintAssembly { id } => self.print_assembly(&id).map(Response::Text),
            Request::GetAssemblies { id } => self.get_assemblies(&id).map(Response::Text),
            Request::GetComponents { id } => self.get_components(&id).map(Response::Text),
            Request::AddPart { to, id, amount } => {
                self.add_part(&to, &id, amount.get())?;
                Ok(Response::Done)
            }
            Request::RemovePart { from, id, amount } => {
                self.remove_part(&from, &id, amount.get())?;
                Ok(Response::Done)
            }
            Request::Quit => Ok(Response::Quit),
        }
    }
}

fn merge_children(children: Vec<(Quantity, PartName)>) -> BTreeMap<PartName, u64> {
    let mut merged: BTreeMap<PartName, u64> = BTreeMap::new();
    for (amount, child) in children {
        let entry = merged.entry(child).or_insert(0);
        *entry = entry.saturating_add(amount.get());
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> PartName {
        PartName::new(s).unwrap()
    }

    fn qty(n: u64) -> Quantity {
        Quantity::new(n).unwrap()
    }

    #[test]
    fn duplicate_children_are_summed() {
        let mut manager = GraphManager::new();
        let response = manager
            .handle(Request::AddAssembly {
                id: name("A"),
                children: vec![(qty(2), name("B")), (qty(3), name("B"))],
            })
            .unwrap();
        assert_eq!(response, Response::Done);

        let printed = manager
            .handle(Request::PrintAssembly { id: name("A") })
            .unwrap();
        assert_eq!(printed, Response::Text("B:5".to_string()));
    }

    #[test]
    fn quit_is_not_an_error() {
        let mut manager = GraphManager::new();
        assert_eq!(manager.handle(Request::Quit), Ok(Response::Quit));
    }

    #[test]
    fn part_requests_roundtrip() {
        let mut manager = GraphManager::new();
        manager
            .handle(Request::AddAssembly {
                id: name("Bike"),
                children: vec![(qty(2), name("Wheel"))],
            })
            .unwrap();
        manager
            .handle(Request::AddPart {
                to: name("Bike"),
                id: name("Bell"),
                amount: qty(1),
            })
            .unwrap();
        manager
            .handle(Request::RemovePart {
                from: name("Bike"),
                id: name("Wheel"),
                amount: qty(1),
            })
            .unwrap();

        let components = manager
            .handle(Request::GetComponents { id: name("Bike") })
            .unwrap();
        assert_eq!(components, Response::Text("Bell:1;Wheel:1".to_string()));

        let assemblies = manager
            .handle(Request::GetAssemblies { id: name("Bike") })
            .unwrap();
        assert_eq!(assemblies, Response::Text("EMPTY".to_string()));
    }

    #[test]
    fn errors_propagate() {
        let mut manager = GraphManager::new();
        assert_eq!(
            manager.handle(Request::RemoveAssembly { id: name("Ghost") }),
            Err(GraphError::PartDoesNotExist(name("Ghost")))
        );
    }

    #[test]
    fn mutation_classification() {
        assert!(Request::RemoveAssembly { id: name("A") }.is_mutation());
        assert!(!Request::PrintAssembly { id: name("A") }.is_mutation());
        assert!(!Request::Quit.is_mutation());
    }

    #[test]
    fn response_json_shape() {
        let json = serde_json::to_string(&Response::Text("EMPTY".into())).unwrap();
        assert_eq!(json, r#"{"kind":"text","output":"EMPTY"}"#);
        let json = serde_json::to_string(&Response::Done).unwrap();
        assert_eq!(json, r#"{"kind":"done"}"#);
    }
}
