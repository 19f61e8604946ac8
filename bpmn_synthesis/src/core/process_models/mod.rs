//! Process model structs: input [`ProcessModel`](hyper_model::ProcessModel)s and output [`Diagram`](bpmn::Diagram)s

pub mod bpmn;
pub mod hyper_model;
