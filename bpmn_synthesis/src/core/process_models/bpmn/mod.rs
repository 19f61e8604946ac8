//! BPMN control-flow diagrams
#[cfg(feature = "graphviz-export")]
pub mod image_export;
pub(crate) mod bpmn_struct;
pub use bpmn_struct::*;
