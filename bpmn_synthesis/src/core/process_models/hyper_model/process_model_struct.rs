use itertools::Itertools;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use uuid::Uuid;

use crate::conversion::{
    hyper_model_to_bpmn::{convert, ConversionError},
    InvalidModelError,
};
use crate::core::process_models::bpmn::Diagram;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
/// Node (i.e., an activity) in a [`ProcessModel`]
pub struct ProcessNode {
    id: Uuid,
    /// Display name of the node
    pub name: String,
    /// Whether an execution may start with this node
    #[serde(default)]
    pub is_start: bool,
    /// Whether an execution may end with this node
    #[serde(default)]
    pub is_final: bool,
}

impl ProcessNode {
    /// Get the [`NodeID`] of this node
    pub fn id(&self) -> NodeID {
        NodeID(self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
/// Hyper-transition in a [`ProcessModel`]
///
/// Connects a set of source nodes with a set of target nodes.
/// A single source and a single target denote an ordinary sequence,
/// several sources (or targets) denote a concurrent join (or split).
pub struct Transition {
    id: Uuid,
    /// Source nodes of the transition
    pub sources: BTreeSet<NodeID>,
    /// Target nodes of the transition
    pub targets: BTreeSet<NodeID>,
}

impl Transition {
    /// Get the [`TransitionID`] of this transition
    pub fn id(&self) -> TransitionID {
        TransitionID(self.id)
    }
}

#[derive(
    Debug, PartialEq, Clone, Copy, Serialize, Deserialize, Hash, Eq, PartialOrd, Ord, JsonSchema,
)]
/// Node ID
pub struct NodeID(pub Uuid);
impl NodeID {
    /// Get UUID
    pub fn get_uuid(self) -> Uuid {
        self.0
    }
}
impl From<&ProcessNode> for NodeID {
    fn from(value: &ProcessNode) -> Self {
        NodeID(value.id)
    }
}
impl std::fmt::Display for NodeID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(
    Debug, PartialEq, Clone, Copy, Serialize, Deserialize, Hash, Eq, PartialOrd, Ord, JsonSchema,
)]
/// Transition ID
pub struct TransitionID(pub Uuid);
impl From<&Transition> for TransitionID {
    fn from(value: &Transition) -> Self {
        TransitionID(value.id)
    }
}
impl TransitionID {
    /// Get UUID
    pub fn get_uuid(self) -> Uuid {
        self.0
    }
}
impl std::fmt::Display for TransitionID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
///
/// A discovered process model of [`ProcessNode`]s and hyper-[`Transition`]s
///
/// Nodes flagged with `is_start`/`is_final` may begin/end an execution.
/// Transitions may fan out to (or fan in from) several nodes at once, representing concurrency.
pub struct ProcessModel {
    /// Nodes
    pub nodes: HashMap<Uuid, ProcessNode>,
    /// Transitions
    pub transitions: HashMap<Uuid, Transition>,
}

impl ProcessModel {
    /// Create new [`ProcessModel`] with no nodes or transitions
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            transitions: HashMap::new(),
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Add a node (with an optional passed UUID)
    ///
    /// If no ID is passed, a new UUID will be generated
    pub fn add_node<S: Into<String>>(
        &mut self,
        name: S,
        is_start: bool,
        is_final: bool,
        node_id: Option<Uuid>,
    ) -> NodeID {
        let node_id = node_id.unwrap_or_else(Uuid::new_v4);
        let node = ProcessNode {
            id: node_id,
            name: name.into(),
            is_start,
            is_final,
        };
        self.nodes.insert(node_id, node);
        NodeID(node_id)
    }

    /// Add a hyper-transition from `sources` to `targets` (with an optional passed UUID)
    ///
    /// If no ID is passed, a new UUID will be generated.
    /// Referenced nodes are not checked here, see [`ProcessModel::validate`].
    pub fn add_transition<I, J>(
        &mut self,
        sources: I,
        targets: J,
        transition_id: Option<Uuid>,
    ) -> TransitionID
    where
        I: IntoIterator<Item = NodeID>,
        J: IntoIterator<Item = NodeID>,
    {
        let transition_id = transition_id.unwrap_or_else(Uuid::new_v4);
        let transition = Transition {
            id: transition_id,
            sources: sources.into_iter().collect(),
            targets: targets.into_iter().collect(),
        };
        self.transitions.insert(transition_id, transition);
        TransitionID(transition_id)
    }

    /// Get the node referred to by the passed id
    pub fn node(&self, id: NodeID) -> Option<&ProcessNode> {
        self.nodes.get(&id.0)
    }

    /// Get the transition referred to by the passed id
    pub fn transition(&self, id: TransitionID) -> Option<&Transition> {
        self.transitions.get(&id.0)
    }

    /// Iterate over all nodes, ordered by their ID
    pub fn sorted_nodes(&self) -> impl Iterator<Item = &ProcessNode> {
        self.nodes
            .iter()
            .sorted_by_key(|(id, _)| **id)
            .map(|(_, n)| n)
    }

    /// Iterate over all transitions, ordered by their ID
    pub fn sorted_transitions(&self) -> impl Iterator<Item = &Transition> {
        self.transitions
            .iter()
            .sorted_by_key(|(id, _)| **id)
            .map(|(_, t)| t)
    }

    /// Get all transitions having the passed node as a source
    pub fn out_transitions(&self, node: NodeID) -> Vec<TransitionID> {
        self.sorted_transitions()
            .filter(|t| t.sources.contains(&node))
            .map(Transition::id)
            .collect()
    }

    /// Get all transitions having the passed node as a target
    pub fn in_transitions(&self, node: NodeID) -> Vec<TransitionID> {
        self.sorted_transitions()
            .filter(|t| t.targets.contains(&node))
            .map(Transition::id)
            .collect()
    }

    /// Number of distinct transitions having the passed node as a source
    pub fn out_degree(&self, node: NodeID) -> usize {
        self.transitions
            .values()
            .filter(|t| t.sources.contains(&node))
            .count()
    }

    /// Number of distinct transitions having the passed node as a target
    pub fn in_degree(&self, node: NodeID) -> usize {
        self.transitions
            .values()
            .filter(|t| t.targets.contains(&node))
            .count()
    }

    /// Nodes that may start an execution
    pub fn start_nodes(&self) -> Vec<NodeID> {
        self.sorted_nodes()
            .filter(|n| n.is_start)
            .map(ProcessNode::id)
            .collect()
    }

    /// Nodes that may end an execution
    pub fn final_nodes(&self) -> Vec<NodeID> {
        self.sorted_nodes()
            .filter(|n| n.is_final)
            .map(ProcessNode::id)
            .collect()
    }

    /// Check that nodes and transitions are stored under their own IDs,
    /// that every transition has non-empty source and target sets
    /// and only references nodes of this model
    ///
    /// Nodes are checked before transitions, both in key order. The first violation is returned.
    pub fn validate(&self) -> Result<(), InvalidModelError> {
        for (key, node) in self.nodes.iter().sorted_by_key(|(key, _)| **key) {
            let node = NodeID::from(node);
            if node.get_uuid() != *key {
                return Err(InvalidModelError::NodeIdMismatch {
                    key: NodeID(*key),
                    node,
                });
            }
        }
        for (key, t) in self.transitions.iter().sorted_by_key(|(key, _)| **key) {
            let transition = TransitionID::from(t);
            if transition.get_uuid() != *key {
                return Err(InvalidModelError::TransitionIdMismatch {
                    key: TransitionID(*key),
                    transition,
                });
            }
            if t.sources.is_empty() {
                return Err(InvalidModelError::EmptySources { transition });
            }
            if t.targets.is_empty() {
                return Err(InvalidModelError::EmptyTargets { transition });
            }
            if let Some(missing) = t
                .sources
                .iter()
                .chain(t.targets.iter())
                .find(|n| !self.nodes.contains_key(&n.get_uuid()))
            {
                return Err(InvalidModelError::UnknownNode {
                    transition,
                    node: *missing,
                });
            }
        }
        Ok(())
    }

    /// Convert this model into a BPMN [`Diagram`]
    ///
    /// Shorthand for [`convert`]
    pub fn to_bpmn(&self) -> Result<Diagram, ConversionError> {
        convert(self)
    }
}
