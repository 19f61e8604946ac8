use std::collections::HashMap;

use tracing::{debug, trace};

use crate::conversion::InvalidModelError;
use crate::core::process_models::bpmn::{Diagram, DiagramNodeID, EventType, GatewayType};
use crate::core::process_models::hyper_model::{NodeID, ProcessModel, Transition};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
/// Error returned by [`convert`] and [`convert_with_options`]
///
/// Conversion is all-or-nothing: on error no diagram is produced.
pub enum ConversionError {
    /// The input model is malformed
    #[error("invalid process model: {0}")]
    InvalidModel(#[from] InvalidModelError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Options for converting a [`ProcessModel`] to a [`Diagram`]
pub struct ConversionOptions {
    /// Label of the produced diagram (empty by default)
    pub diagram_label: String,
}

impl ConversionOptions {
    /// Set the label of the produced diagram
    pub fn diagram_label<S: Into<String>>(mut self, label: S) -> Self {
        self.diagram_label = label.into();
        self
    }
}

///
/// Attachment points of the [`ProcessModel`] nodes in the [`Diagram`]
///
/// Outgoing transitions of a node attach to its source anchor,
/// incoming transitions to its target anchor.
/// Computed once for all nodes before any transition is wired.
///
#[derive(Debug)]
struct Anchors {
    source: HashMap<NodeID, DiagramNodeID>,
    target: HashMap<NodeID, DiagramNodeID>,
}

impl Anchors {
    /// In a validated model every node is keyed by its own ID and has an anchor
    fn source_of(&self, node: NodeID) -> DiagramNodeID {
        self.source[&node]
    }

    fn target_of(&self, node: NodeID) -> DiagramNodeID {
        self.target[&node]
    }
}

///
/// Convert a [`ProcessModel`] into a BPMN [`Diagram`]
///
/// Uses [`ConversionOptions::default`], see [`convert_with_options`].
///
pub fn convert(model: &ProcessModel) -> Result<Diagram, ConversionError> {
    convert_with_options(model, &ConversionOptions::default())
}

///
/// Convert a [`ProcessModel`] into a BPMN [`Diagram`]
///
/// Every node becomes an activity. Nodes with more than one outgoing (incoming) transition
/// get a single exclusive gateway behind (in front of) their activity.
/// Every transition with several sources and/or targets is routed through parallel gateways.
/// Start and final nodes are connected to the single start and end event.
///
/// Nodes and transitions are processed in ID order, so converting the same model twice
/// yields identical diagrams.
///
/// Fails with [`ConversionError::InvalidModel`] if a transition has an empty source or target set,
/// or references a node not contained in the model.
///
pub fn convert_with_options(
    model: &ProcessModel,
    options: &ConversionOptions,
) -> Result<Diagram, ConversionError> {
    debug!(
        nodes = model.nodes.len(),
        transitions = model.transitions.len(),
        "Converting process model to BPMN"
    );
    if let Err(e) = model.validate() {
        debug!(error = %e, "Rejecting process model");
        return Err(e.into());
    }

    let mut diagram = Diagram::new(options.diagram_label.clone());
    let anchors = compute_anchors(model, &mut diagram);
    for t in model.sorted_transitions() {
        wire_transition(t, &anchors, &mut diagram);
    }

    debug!(
        diagram_nodes = diagram.node_count(),
        gateways = diagram.gateways().len(),
        flows = diagram.flows().len(),
        "Converted process model to BPMN"
    );
    Ok(diagram)
}

/// Add start/end events and one activity per node, synthesizing exclusive gateways
/// for nodes with more than one outgoing or incoming transition
fn compute_anchors(model: &ProcessModel, diagram: &mut Diagram) -> Anchors {
    let start_event = diagram.add_event(EventType::Start);
    let end_event = diagram.add_event(EventType::End);

    let mut out_degrees: HashMap<NodeID, usize> = HashMap::new();
    let mut in_degrees: HashMap<NodeID, usize> = HashMap::new();
    for t in model.transitions.values() {
        for s in &t.sources {
            *out_degrees.entry(*s).or_default() += 1;
        }
        for n in &t.targets {
            *in_degrees.entry(*n).or_default() += 1;
        }
    }

    let mut anchors = Anchors {
        source: HashMap::with_capacity(model.nodes.len()),
        target: HashMap::with_capacity(model.nodes.len()),
    };
    for node in model.sorted_nodes() {
        let id = NodeID::from(node);
        let activity = diagram.add_activity(node.name.clone());

        let source_anchor = if out_degrees.get(&id).copied().unwrap_or_default() > 1 {
            let gateway = diagram.add_gateway(GatewayType::Exclusive);
            diagram.connect(activity, gateway);
            trace!(node = %id, name = %node.name, "Synthesized exclusive split");
            gateway
        } else {
            activity
        };
        let target_anchor = if in_degrees.get(&id).copied().unwrap_or_default() > 1 {
            let gateway = diagram.add_gateway(GatewayType::Exclusive);
            diagram.connect(gateway, activity);
            trace!(node = %id, name = %node.name, "Synthesized exclusive join");
            gateway
        } else {
            activity
        };

        if node.is_start {
            diagram.connect(start_event, activity);
        }
        if node.is_final {
            diagram.connect(activity, end_event);
        }

        anchors.source.insert(id, source_anchor);
        anchors.target.insert(id, target_anchor);
    }
    anchors
}

/// Connect the source anchors of a transition with its target anchors
fn wire_transition(transition: &Transition, anchors: &Anchors, diagram: &mut Diagram) {
    let sources: Vec<DiagramNodeID> = transition
        .sources
        .iter()
        .map(|n| anchors.source_of(*n))
        .collect();
    let targets: Vec<DiagramNodeID> = transition
        .targets
        .iter()
        .map(|n| anchors.target_of(*n))
        .collect();

    match (sources.as_slice(), targets.as_slice()) {
        // sequence flow (possibly through exclusive gateways of the anchors)
        ([source], [target]) => diagram.connect(*source, *target),
        // parallel split
        ([source], targets) => {
            let gateway = diagram.add_gateway(GatewayType::Parallel);
            diagram.connect(*source, gateway);
            for target in targets {
                diagram.connect(gateway, *target);
            }
            trace!(transition = %transition.id(), "Synthesized parallel split");
        }
        // parallel join
        (sources, [target]) => {
            let gateway = diagram.add_gateway(GatewayType::Parallel);
            for source in sources {
                diagram.connect(*source, gateway);
            }
            diagram.connect(gateway, *target);
            trace!(transition = %transition.id(), "Synthesized parallel join");
        }
        // parallel join followed by parallel split
        (sources, targets) => {
            let join = diagram.add_gateway(GatewayType::Parallel);
            let split = diagram.add_gateway(GatewayType::Parallel);
            diagram.connect(join, split);
            for source in sources {
                diagram.connect(*source, join);
            }
            for target in targets {
                diagram.connect(split, *target);
            }
            trace!(transition = %transition.id(), "Synthesized parallel join and split");
        }
    }
}
