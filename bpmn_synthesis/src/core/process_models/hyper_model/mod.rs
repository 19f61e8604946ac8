//! Hyper-transition process models (as discovered by the mining procedure)
pub(crate) mod process_model_struct;
pub use process_model_struct::*;
pub mod io;
pub mod macros;
