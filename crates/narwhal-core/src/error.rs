use crate::address::Address;
use crate::model::{GraphKind, Side};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("No node at address {address} on the {side} side")]
    NotFound { side: Side, address: Address },

    #[error("No edge {source_address} -> {target_address} on the {side} side")]
    EdgeNotFound {
        side: Side,
        source_address: Address,
        target_address: Address,
    },

    #[error("Unknown {what} index {index} in the {view} view")]
    UnknownElement {
        view: GraphKind,
        what: &'static str,
        index: usize,
    },

    #[error("Invalid diff dataset: {message}")]
    InvalidDataset { message: String },

    #[error("Invalid graph settings: {message}")]
    InvalidSettings { message: String },

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Failure reported by an external layout engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Graph layout failed: {message}")]
pub struct LayoutError {
    pub message: String,
}

impl LayoutError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
