//! IO implementations for `ProcessModel`

use std::io::{Read, Write};

use crate::core::io::{Exportable, Importable};
use crate::core::process_models::hyper_model::ProcessModel;

/// Error type for `ProcessModel` IO operations
#[derive(Debug, thiserror::Error)]
pub enum ProcessModelIOError {
    /// IO Error
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON (de-)serialization Error
    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),
    /// Unsupported Format
    #[error("Unsupported Format: {0}")]
    UnsupportedFormat(String),
}

fn is_json(format: &str) -> bool {
    format == "json" || format.ends_with(".json")
}

impl Importable for ProcessModel {
    type Error = ProcessModelIOError;

    fn import_from_reader<R: Read>(reader: R, format: &str) -> Result<Self, Self::Error> {
        if is_json(format) {
            let reader = std::io::BufReader::new(reader);
            Ok(serde_json::from_reader(reader)?)
        } else {
            Err(ProcessModelIOError::UnsupportedFormat(format.to_string()))
        }
    }
}

impl Exportable for ProcessModel {
    type Error = ProcessModelIOError;

    fn export_to_writer<W: Write>(&self, writer: W, format: &str) -> Result<(), Self::Error> {
        if is_json(format) {
            Ok(serde_json::to_writer(writer, self)?)
        } else {
            Err(ProcessModelIOError::UnsupportedFormat(format.to_string()))
        }
    }
}
