use thiserror::Error;

use crate::state::model::ModelId;

/// Errors from the outer layers: scene files, settings and the command protocol.
/// The picking core itself never fails.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("no model with id {0}")]
    UnknownModel(ModelId),
    #[error("no model selected")]
    NothingSelected,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
