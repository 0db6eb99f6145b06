//! Crop recommendation feature slice: classifies a soil and climate sample into the
//! crop that suits it best.

mod error;
#[cfg(feature = "server")]
mod server;

pub use crate::error::{RecommendationError, RecommendationErrorExt};
#[cfg(feature = "server")]
pub use crate::server::router;

use agri_domain::config::ModelsConfig;
use agri_domain::sample::AgronomicSample;
use agri_inference::{
    CropClassifier, Decoded, FormFields, LabelCodec, ModelHandle, ModelSlot, PipelineStats,
    PredictionError, Report, StatsSnapshot, collect_sample, load_model,
};
use agri_kernel::domain::registry::InitializedSlice;
use std::borrow::Cow;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Name used in logs and counters.
pub const PIPELINE: &str = "recommendation";

/// Recommendation feature state
#[agri_derive::agri_slice]
pub struct Recommendation {
    classifier: ModelSlot<CropClassifier>,
    stats: Arc<PipelineStats>,
}

impl Recommendation {
    /// Serves predictions from `model`.
    #[must_use]
    pub fn from_model(model: ModelHandle, codec: Arc<LabelCodec>) -> Self {
        let stats = Arc::new(PipelineStats::new(PIPELINE));
        let classifier = CropClassifier::new(model, codec, Arc::clone(&stats));
        Self::new(RecommendationInner { classifier: ModelSlot::Ready(classifier), stats })
    }

    /// Answers every request with a "model unavailable" error.
    #[must_use]
    pub fn unavailable(reason: impl Into<Cow<'static, str>>) -> Self {
        Self::new(RecommendationInner {
            classifier: ModelSlot::Unavailable(reason.into()),
            stats: Arc::new(PipelineStats::new(PIPELINE)),
        })
    }

    /// Runs the whole pipeline and renders the outcome; failures are reported inline.
    #[must_use]
    pub fn recommend(&self, form: &FormFields) -> Report {
        self.stats.record_request();
        match self.try_recommend(form) {
            Ok((crop, sample)) => {
                debug!(crop = crop.name(), "Crop recommended");
                Report::recommendation(crop, &sample)
            },
            Err(err) => {
                self.stats.record_error(&err);
                warn!(pipeline = PIPELINE, kind = err.kind(), error = %err, "Recommendation failed");
                Report::error(&err)
            },
        }
    }

    /// # Errors
    /// [`PredictionError::Unavailable`] without a model, otherwise whatever input
    /// collection or classification reports.
    pub fn try_recommend(
        &self,
        form: &FormFields,
    ) -> Result<(Decoded, AgronomicSample), PredictionError> {
        let classifier = self.classifier.ready()?;
        let sample = collect_sample(form)?;
        let crop = classifier.classify(&sample)?;
        Ok((crop, sample))
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.classifier.is_ready()
    }

    #[must_use]
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }
}

/// Loads the classification model and builds the slice.
///
/// # Errors
/// Returns [`RecommendationError::Model`] if the model cannot be loaded and
/// `config.required` is set; otherwise the slice starts unavailable.
pub fn init(
    config: &ModelsConfig,
    codec: Arc<LabelCodec>,
) -> Result<InitializedSlice, RecommendationError> {
    let slice = match load_model(&config.classification) {
        Ok(model) => Recommendation::from_model(model, codec),
        Err(err) if config.required => {
            return Err(err).context("Loading the crop classification model");
        },
        Err(err) => {
            warn!(error = %err, "Classification model unavailable; recommendations disabled");
            Recommendation::unavailable(err.to_string())
        },
    };

    info!(ready = slice.is_ready(), "Recommendation slice initialized");
    Ok(InitializedSlice::new(slice))
}
