use crate::tree::TreeFormatError;

/// Failure of a minimax evaluation, raised before or while nodes are entered.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MinimaxError {
    #[error(transparent)]
    TreeFormat(#[from] TreeFormatError),

    #[error("invalid search window (alpha={alpha}, beta={beta}): bounds must be ordered and not NaN")]
    InvalidWindow { alpha: f64, beta: f64 },
}
