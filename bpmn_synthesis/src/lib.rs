#![warn(
    clippy::doc_markdown,
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs
)]
#![allow(clippy::needless_doctest_main)]
#![doc = include_str!("../README.md")]

///
/// Core data structures ([`ProcessModel`] input, [`Diagram`] output) and IO traits
///
pub mod core;

///
/// Conversion of [`ProcessModel`]s into BPMN [`Diagram`]s (gateway synthesis)
///
pub mod conversion;


#[doc(inline)]
pub use crate::core::process_models::hyper_model::ProcessModel;

#[doc(inline)]
pub use crate::core::process_models::hyper_model::{NodeID, ProcessNode, Transition, TransitionID};

#[doc(inline)]
pub use crate::core::process_models::bpmn::Diagram;

#[doc(inline)]
pub use crate::core::process_models::bpmn::{
    DiagramError, DiagramNode, DiagramNodeID, DiagramNodeKind, EventType, Flow, GatewayType,
};

#[doc(inline)]
pub use conversion::hyper_model_to_bpmn::{
    convert, convert_with_options, ConversionError, ConversionOptions,
};

#[doc(inline)]
pub use conversion::InvalidModelError;

#[doc(inline)]
pub use crate::core::io::{Exportable, Importable};

#[cfg(feature = "graphviz-export")]
#[doc(inline)]
pub use crate::core::process_models::bpmn::image_export::export_bpmn_image_png;

#[cfg(feature = "graphviz-export")]
#[doc(inline)]
pub use crate::core::process_models::bpmn::image_export::export_bpmn_image_svg;
