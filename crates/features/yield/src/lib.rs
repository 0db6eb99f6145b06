//! Yield estimation feature slice: predicts kg/acre for a requested crop under a soil
//! and climate sample.
//!
//! The regression model either declares its feature names (one-hot `label_<crop>`
//! columns included) or is assumed to take the seven measurements followed by the
//! crop's table index.

mod error;
#[cfg(feature = "server")]
mod server;

pub use crate::error::{YieldError, YieldErrorExt};
#[cfg(feature = "server")]
pub use crate::server::router;

use agri_domain::config::ModelsConfig;
use agri_inference::{
    FormFields, LabelCodec, ModelHandle, ModelSlot, PipelineStats, PredictionError, Report,
    StatsSnapshot, YieldEstimate, YieldRegressor, collect_crop, collect_sample, load_model,
};
use agri_kernel::domain::registry::InitializedSlice;
use std::borrow::Cow;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Name used in logs and counters.
pub const PIPELINE: &str = "yield";

/// Yield feature state
#[agri_derive::agri_slice]
pub struct Yield {
    regressor: ModelSlot<YieldRegressor>,
    stats: Arc<PipelineStats>,
}

impl Yield {
    /// Serves estimates from `model`; its feature schema is resolved here, once.
    #[must_use]
    pub fn from_model(model: ModelHandle, codec: Arc<LabelCodec>) -> Self {
        let stats = Arc::new(PipelineStats::new(PIPELINE));
        let regressor = YieldRegressor::new(model, codec, Arc::clone(&stats));
        Self::new(YieldInner { regressor: ModelSlot::Ready(regressor), stats })
    }

    /// Answers every request with a "model unavailable" error.
    #[must_use]
    pub fn unavailable(reason: impl Into<Cow<'static, str>>) -> Self {
        Self::new(YieldInner {
            regressor: ModelSlot::Unavailable(reason.into()),
            stats: Arc::new(PipelineStats::new(PIPELINE)),
        })
    }

    /// Runs the whole pipeline and renders the outcome; failures are reported inline.
    ///
    /// On success the raw form is echoed back unchanged.
    #[must_use]
    pub fn estimate(&self, form: &FormFields) -> Report {
        self.stats.record_request();
        match self.try_estimate(form) {
            Ok(estimate) => {
                debug!(kg_per_acre = estimate.kg_per_acre(), "Yield estimated");
                Report::yield_estimate(estimate, form)
            },
            Err(err) => {
                self.stats.record_error(&err);
                warn!(pipeline = PIPELINE, kind = err.kind(), error = %err, "Yield estimation failed");
                Report::error(&err)
            },
        }
    }

    /// # Errors
    /// [`PredictionError::Unavailable`] without a model, otherwise whatever input
    /// collection or estimation reports.
    pub fn try_estimate(&self, form: &FormFields) -> Result<YieldEstimate, PredictionError> {
        let regressor = self.regressor.ready()?;
        let sample = collect_sample(form)?;
        let crop = collect_crop(form)?;
        regressor.estimate(&sample, &crop)
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.regressor.is_ready()
    }

    #[must_use]
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }
}

/// Loads the regression model and builds the slice.
///
/// # Errors
/// Returns [`YieldError::Model`] if the model cannot be loaded and `config.required`
/// is set; otherwise the slice starts unavailable.
pub fn init(config: &ModelsConfig, codec: Arc<LabelCodec>) -> Result<InitializedSlice, YieldError> {
    let slice = match load_model(&config.regression) {
        Ok(model) => Yield::from_model(model, codec),
        Err(err) if config.required => {
            return Err(err).context("Loading the yield regression model");
        },
        Err(err) => {
            warn!(error = %err, "Regression model unavailable; yield estimation disabled");
            Yield::unavailable(err.to_string())
        },
    };

    info!(ready = slice.is_ready(), "Yield slice initialized");
    Ok(InitializedSlice::new(slice))
}
