//! Graphviz export of BPMN diagrams
use std::{fs::File, io::Write};

use graphviz_rust::{
    cmd::Format,
    dot_generator::{attr, edge, id, node, node_id, stmt},
    dot_structures::*,
    printer::{DotPrinter, PrinterContext},
};
use uuid::Uuid;

use super::bpmn_struct::{Diagram, DiagramNode, DiagramNodeID, EventType, GatewayType};

///
/// Export the image of a BPMN [`Diagram`]
///
/// Also see [`export_bpmn_image_svg`] and [`export_bpmn_image_png`]
///
pub fn export_bpmn_image<P: AsRef<std::path::Path>>(
    diagram: &Diagram,
    path: P,
    format: Format,
    dpi_factor: Option<f32>,
) -> Result<(), std::io::Error> {
    let g = export_bpmn_to_dot_graph(diagram, dpi_factor);

    let out = graphviz_rust::exec(g, &mut PrinterContext::default(), vec![format.into()])?;

    let mut f = File::create(path)?;
    f.write_all(&out)?;
    Ok(())
}

fn dot_node_name(id: DiagramNodeID) -> String {
    format!("n{}", id.index())
}

///
/// Export a BPMN [`Diagram`] to a DOT graph (used in Graphviz)
///
/// Activities are drawn as rounded boxes, events as small circles (the start event with a bold border)
/// and gateways as diamonds marked with `×` (exclusive) or `+` (parallel).
///
/// Also see [`export_bpmn_image`], as well as [`export_bpmn_image_svg`] and [`export_bpmn_image_png`]
///
pub fn export_bpmn_to_dot_graph(diagram: &Diagram, dpi_factor: Option<f32>) -> Graph {
    let nodes: Vec<Stmt> = diagram
        .nodes()
        .map(|(id, n)| {
            let name = dot_node_name(id);
            match n {
                DiagramNode::Activity { label } => {
                    stmt!(node!(esc name; attr!("label", esc label), attr!("shape","box"), attr!("style","\"rounded,filled\""), attr!("fillcolor","\"#FFFFCC\""), attr!("fontname","Arial"), attr!("fontsize",8)))
                }
                DiagramNode::Event(event_type) => {
                    let pen_width = if *event_type == EventType::Start { 3 } else { 1 };
                    stmt!(node!(esc name; attr!("label", esc ""), attr!("shape","circle"), attr!("style","filled"), attr!("fillcolor","white"), attr!("fixedsize",true), attr!("width",0.3), attr!("height",0.3), attr!("penwidth",pen_width)))
                }
                DiagramNode::Gateway(gateway_type) => {
                    let symbol = match gateway_type {
                        GatewayType::Exclusive => "×",
                        GatewayType::Parallel => "+",
                    };
                    stmt!(node!(esc name; attr!("label", esc symbol), attr!("shape","diamond"), attr!("style","filled"), attr!("fillcolor","white"), attr!("fontname","Arial"), attr!("fontsize",20), attr!("fixedsize",true), attr!("width",0.4), attr!("height",0.4)))
                }
            }
        })
        .collect();

    let flows: Vec<Stmt> = diagram
        .flows()
        .iter()
        .map(|f| {
            stmt!(edge!(node_id!(esc dot_node_name(f.source)) => node_id!(esc dot_node_name(f.target)), vec![attr!("tailclip", "false")]))
        })
        .collect();

    let mut global_graph_options = vec![
        stmt!(attr!("rankdir", "LR")),
        stmt!(attr!("outputorder", "edgesfirst")),
    ];
    if let Some(dpi_fac) = dpi_factor {
        global_graph_options.push(stmt!(attr!("dpi", (dpi_fac * 96.0))))
    }

    // Not strict: parallel flows between the same two nodes are all drawn
    Graph::DiGraph {
        id: id!(esc Uuid::new_v4()),
        strict: false,
        stmts: vec![global_graph_options, nodes, flows]
            .into_iter()
            .flatten()
            .collect(),
    }
}

///
/// Convert a DOT graph to a String containing the DOT source
///
pub fn graph_to_dot(g: &Graph) -> String {
    g.print(&mut PrinterContext::default())
}

///
/// Export the image of a BPMN [`Diagram`] as a SVG file
///
/// Also consider using [`Diagram::export_svg`] for convenience.
pub fn export_bpmn_image_svg<P: AsRef<std::path::Path>>(
    diagram: &Diagram,
    path: P,
) -> Result<(), std::io::Error> {
    export_bpmn_image(diagram, path, Format::Svg, None)
}

///
/// Export the image of a BPMN [`Diagram`] as a PNG file
///
/// Also consider using [`Diagram::export_png`] for convenience.
pub fn export_bpmn_image_png<P: AsRef<std::path::Path>>(
    diagram: &Diagram,
    path: P,
) -> Result<(), std::io::Error> {
    export_bpmn_image(diagram, path, Format::Png, Some(2.0))
}
