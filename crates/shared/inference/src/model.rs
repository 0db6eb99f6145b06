//! The capability contract every fitted model satisfies.

use crate::error::PredictionError;
use std::borrow::Cow;
use std::fmt::Debug;
use std::sync::Arc;

/// A fitted model that maps rows of numeric features to one scalar per row.
///
/// Implementations must be immutable after construction: they are shared across all
/// request handlers without locking.
pub trait Model: Debug + Send + Sync {
    /// Predicts one value per input row.
    ///
    /// # Errors
    /// Returns [`PredictionError::Inference`] when a row cannot be evaluated
    /// (wrong width, invalid parameters).
    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, PredictionError>;

    /// Ordered feature names the model was fitted with, when the artifact records them.
    fn feature_names(&self) -> Option<&[String]> {
        None
    }

    /// Number of input features, when known.
    fn n_features(&self) -> Option<usize> {
        self.feature_names().map(<[String]>::len)
    }
}

/// Shared handle to a loaded model.
pub type ModelHandle = Arc<dyn Model>;

/// A pipeline component that either loaded successfully or is reported as unavailable.
#[derive(Debug)]
pub enum ModelSlot<T> {
    Ready(T),
    Unavailable(Cow<'static, str>),
}

impl<T> ModelSlot<T> {
    /// # Errors
    /// Returns [`PredictionError::Unavailable`] with the load failure as message.
    pub fn ready(&self) -> Result<&T, PredictionError> {
        match self {
            Self::Ready(inner) => Ok(inner),
            Self::Unavailable(reason) => {
                Err(PredictionError::Unavailable { message: reason.clone(), context: None })
            },
        }
    }

    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}
