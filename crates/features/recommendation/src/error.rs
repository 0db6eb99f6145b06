use agri_inference::PredictionError;
use std::borrow::Cow;

/// Startup failures of the recommendation slice.
#[agri_derive::agri_error]
pub enum RecommendationError {
    /// The classification model could not be loaded and is required.
    #[error("Recommendation model error{}: {source}", format_context(.context))]
    Model { source: PredictionError, context: Option<Cow<'static, str>> },
}
