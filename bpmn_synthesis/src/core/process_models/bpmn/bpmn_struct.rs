use petgraph::graph::NodeIndex;
use petgraph::{Directed, Graph};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Type of a BPMN event
pub enum EventType {
    /// Start event (the single entry point of a [`Diagram`])
    Start,
    /// End event (the single exit point of a [`Diagram`])
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Routing kind of a BPMN gateway
pub enum GatewayType {
    /// Exclusive (XOR, data-based) choice between alternative paths
    Exclusive,
    /// Parallel (AND) split or join of concurrent paths
    Parallel,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Node of a BPMN [`Diagram`]
pub enum DiagramNode {
    /// Start or end event
    Event(EventType),
    /// Activity with a display label
    Activity {
        /// Activity label
        label: String,
    },
    /// Routing gateway
    Gateway(GatewayType),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Flat discriminant of a [`DiagramNode`]
///
/// Used for comparing [`Diagram`]s structurally, see [`Diagram::is_isomorphic`].
pub enum DiagramNodeKind {
    /// Start event
    StartEvent,
    /// End event
    EndEvent,
    /// Activity with its label
    Activity(String),
    /// Exclusive gateway
    ExclusiveGateway,
    /// Parallel gateway
    ParallelGateway,
}

impl DiagramNode {
    /// Get the flat [`DiagramNodeKind`] of this node
    pub fn kind(&self) -> DiagramNodeKind {
        match self {
            DiagramNode::Event(EventType::Start) => DiagramNodeKind::StartEvent,
            DiagramNode::Event(EventType::End) => DiagramNodeKind::EndEvent,
            DiagramNode::Activity { label } => DiagramNodeKind::Activity(label.clone()),
            DiagramNode::Gateway(GatewayType::Exclusive) => DiagramNodeKind::ExclusiveGateway,
            DiagramNode::Gateway(GatewayType::Parallel) => DiagramNodeKind::ParallelGateway,
        }
    }

    /// Label of this node, if it is an activity
    pub fn label(&self) -> Option<&str> {
        match self {
            DiagramNode::Activity { label } => Some(label),
            _ => None,
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy, Hash, Eq, PartialOrd, Ord)]
/// Diagram node ID
///
/// Stable handle into the node arena of the [`Diagram`] that created it.
pub struct DiagramNodeID(usize);
impl DiagramNodeID {
    /// Get the index into the node arena
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Directed sequence flow connecting two nodes of a [`Diagram`]
pub struct Flow {
    /// Source node
    pub source: DiagramNodeID,
    /// Target node
    pub target: DiagramNodeID,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
/// Errors of the [`Diagram`] assembly API
pub enum DiagramError {
    /// The referenced node does not belong to this diagram
    #[error("node {0:?} does not exist in this diagram")]
    UnknownNode(DiagramNodeID),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
///
/// A BPMN control-flow diagram
///
/// Nodes live in an append-only arena and are referred to by [`DiagramNodeID`]s.
/// Nodes and [`Flow`]s can only be added, never removed or re-wired.
pub struct Diagram {
    label: String,
    nodes: Vec<DiagramNode>,
    flows: Vec<Flow>,
}

impl Diagram {
    /// Create new, empty [`Diagram`] with the passed label
    pub fn new<S: Into<String>>(label: S) -> Self {
        Self {
            label: label.into(),
            nodes: Vec::new(),
            flows: Vec::new(),
        }
    }

    fn add_node(&mut self, node: DiagramNode) -> DiagramNodeID {
        self.nodes.push(node);
        DiagramNodeID(self.nodes.len() - 1)
    }

    /// Add an event
    pub fn add_event(&mut self, event_type: EventType) -> DiagramNodeID {
        self.add_node(DiagramNode::Event(event_type))
    }

    /// Add an activity with a label
    pub fn add_activity<S: Into<String>>(&mut self, label: S) -> DiagramNodeID {
        self.add_node(DiagramNode::Activity {
            label: label.into(),
        })
    }

    /// Add a gateway
    pub fn add_gateway(&mut self, gateway_type: GatewayType) -> DiagramNodeID {
        self.add_node(DiagramNode::Gateway(gateway_type))
    }

    /// Add a flow between two existing nodes
    pub fn add_flow(
        &mut self,
        source: DiagramNodeID,
        target: DiagramNodeID,
    ) -> Result<(), DiagramError> {
        for id in [source, target] {
            if id.0 >= self.nodes.len() {
                return Err(DiagramError::UnknownNode(id));
            }
        }
        self.flows.push(Flow { source, target });
        Ok(())
    }

    /// Add a flow between two nodes previously returned by this diagram
    pub(crate) fn connect(&mut self, source: DiagramNodeID, target: DiagramNodeID) {
        debug_assert!(source.0 < self.nodes.len() && target.0 < self.nodes.len());
        self.flows.push(Flow { source, target });
    }

    /// Label of the diagram
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Get the node referred to by the passed id
    pub fn node(&self, id: DiagramNodeID) -> Option<&DiagramNode> {
        self.nodes.get(id.0)
    }

    /// All nodes, in creation order
    pub fn nodes(&self) -> impl Iterator<Item = (DiagramNodeID, &DiagramNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (DiagramNodeID(i), n))
    }

    /// All flows, in creation order
    pub fn flows(&self) -> &[Flow] {
        &self.flows
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// All events with their [`EventType`]
    pub fn events(&self) -> Vec<(DiagramNodeID, EventType)> {
        self.nodes()
            .filter_map(|(id, n)| match n {
                DiagramNode::Event(t) => Some((id, *t)),
                _ => None,
            })
            .collect()
    }

    /// All activities with their label
    pub fn activities(&self) -> Vec<(DiagramNodeID, &str)> {
        self.nodes()
            .filter_map(|(id, n)| n.label().map(|l| (id, l)))
            .collect()
    }

    /// All gateways with their [`GatewayType`]
    pub fn gateways(&self) -> Vec<(DiagramNodeID, GatewayType)> {
        self.nodes()
            .filter_map(|(id, n)| match n {
                DiagramNode::Gateway(t) => Some((id, *t)),
                _ => None,
            })
            .collect()
    }

    /// The first start event of the diagram (if any)
    pub fn start_event(&self) -> Option<DiagramNodeID> {
        self.events()
            .into_iter()
            .find(|(_, t)| *t == EventType::Start)
            .map(|(id, _)| id)
    }

    /// The first end event of the diagram (if any)
    pub fn end_event(&self) -> Option<DiagramNodeID> {
        self.events()
            .into_iter()
            .find(|(_, t)| *t == EventType::End)
            .map(|(id, _)| id)
    }

    /// Get the sources of all flows entering the passed node
    pub fn incoming(&self, id: DiagramNodeID) -> Vec<DiagramNodeID> {
        self.flows
            .iter()
            .filter(|f| f.target == id)
            .map(|f| f.source)
            .collect()
    }

    /// Get the targets of all flows leaving the passed node
    pub fn outgoing(&self, id: DiagramNodeID) -> Vec<DiagramNodeID> {
        self.flows
            .iter()
            .filter(|f| f.source == id)
            .map(|f| f.target)
            .collect()
    }

    /// Check if the diagram contains a flow from `source` to `target`
    pub fn has_flow(&self, source: DiagramNodeID, target: DiagramNodeID) -> bool {
        self.flows.contains(&Flow { source, target })
    }

    /// Creates a [`Graph`] from the [`Diagram`], weighted by [`DiagramNodeKind`]
    ///
    /// Node indices of the graph coincide with [`DiagramNodeID::index`].
    pub fn to_graph(&self) -> Graph<DiagramNodeKind, ()> {
        let mut graph: Graph<DiagramNodeKind, (), Directed> = Graph::new();
        let index: HashMap<DiagramNodeID, NodeIndex> = self
            .nodes()
            .map(|(id, n)| (id, graph.add_node(n.kind())))
            .collect();
        for f in &self.flows {
            graph.add_edge(index[&f.source], index[&f.target], ());
        }
        graph
    }

    /// Checks whether two diagrams have the same structure, up to renaming of node IDs
    ///
    /// Nodes are only matched with nodes of the same [`DiagramNodeKind`] (including activity labels).
    pub fn is_isomorphic(&self, other: &Diagram) -> bool {
        let graph = self.to_graph();
        let other_graph = other.to_graph();

        petgraph::algo::is_isomorphic_matching(&graph, &other_graph, |a, b| a == b, |_, _| true)
    }

    #[cfg(feature = "graphviz-export")]
    /// Export BPMN diagram as a PNG image
    ///
    /// The PNG file is written to the specified filepath
    ///
    /// _Note_: This is an export method for __visualizing__ the diagram.
    ///
    /// Only available with the `graphviz-export` feature.
    pub fn export_png<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), std::io::Error> {
        super::image_export::export_bpmn_image_png(self, path)
    }

    #[cfg(feature = "graphviz-export")]
    /// Export BPMN diagram as a SVG image
    ///
    /// The SVG file is written to the specified filepath
    ///
    /// _Note_: This is an export method for __visualizing__ the diagram.
    ///
    /// Only available with the `graphviz-export` feature.
    pub fn export_svg<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), std::io::Error> {
        super::image_export::export_bpmn_image_svg(self, path)
    }
}
