//! Core modules: data structures and IO

/// IO Traits
pub mod io;

pub mod process_models;

pub use process_models::bpmn::Diagram;
pub use process_models::hyper_model::ProcessModel;
