use thiserror::Error;

/// Errors raised while loading a caller-supplied substitution weight table.
///
/// Distance computations themselves never fail.
#[derive(Debug, Error)]
pub enum WeightTableError {
    #[error("weight table is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("'{unit}' is not a single comparison unit")]
    InvalidUnit { unit: String },
}
