//! Conversion of hyper-transition [`ProcessModel`](crate::ProcessModel)s into BPMN [`Diagram`](crate::Diagram)s

use crate::core::process_models::hyper_model::{NodeID, TransitionID};

/// Gateway synthesis: two-phase anchor computation and transition wiring
pub mod hyper_model_to_bpmn;


#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
/// Reasons for a [`ProcessModel`](crate::ProcessModel) to be rejected
pub enum InvalidModelError {
    /// A node stored under a key that differs from its own ID
    #[error("node {node} is stored under key {key}")]
    NodeIdMismatch {
        /// Key of the node in [`ProcessModel::nodes`](crate::ProcessModel::nodes)
        key: NodeID,
        /// ID of the node itself
        node: NodeID,
    },
    /// A transition stored under a key that differs from its own ID
    #[error("transition {transition} is stored under key {key}")]
    TransitionIdMismatch {
        /// Key of the transition in [`ProcessModel::transitions`](crate::ProcessModel::transitions)
        key: TransitionID,
        /// ID of the transition itself
        transition: TransitionID,
    },
    /// A transition without source nodes
    #[error("transition {transition} has no source nodes")]
    EmptySources {
        /// Offending transition
        transition: TransitionID,
    },
    /// A transition without target nodes
    #[error("transition {transition} has no target nodes")]
    EmptyTargets {
        /// Offending transition
        transition: TransitionID,
    },
    /// A transition referencing a node that is not part of the model
    #[error("transition {transition} references unknown node {node}")]
    UnknownNode {
        /// Offending transition
        transition: TransitionID,
        /// Missing node
        node: NodeID,
    },
}
