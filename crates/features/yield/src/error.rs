use agri_inference::PredictionError;
use std::borrow::Cow;

/// Startup failures of the yield slice.
#[agri_derive::agri_error]
pub enum YieldError {
    /// The regression model could not be loaded and is required.
    #[error("Yield model error{}: {source}", format_context(.context))]
    Model { source: PredictionError, context: Option<Cow<'static, str>> },
}
