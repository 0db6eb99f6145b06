//! # Inference Dispatch
//!
//! Assembles the vector, guards its width, calls the model and interprets the raw
//! scalar. Both dispatchers are immutable after construction and shared by reference
//! across request handlers.

use crate::builder::{Degradation, FeatureVector, FeatureVectorBuilder};
use crate::codec::{Decoded, LabelCodec};
use crate::error::PredictionError;
use crate::model::ModelHandle;
use crate::schema::FeatureSchema;
use crate::telemetry::PipelineStats;
use agri_domain::crop::CropQuery;
use agri_domain::sample::AgronomicSample;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// Crop recommendation over the seven canonical measurements.
#[derive(Debug)]
pub struct CropClassifier {
    model: ModelHandle,
    builder: FeatureVectorBuilder,
    codec: Arc<LabelCodec>,
    stats: Arc<PipelineStats>,
}

impl CropClassifier {
    #[must_use]
    pub fn new(model: ModelHandle, codec: Arc<LabelCodec>, stats: Arc<PipelineStats>) -> Self {
        let builder = FeatureVectorBuilder::classification();
        check_width(&stats, &builder, &model);
        Self { model, builder, codec, stats }
    }

    /// Predicts a crop for `sample`.
    ///
    /// An index outside the label table is not an error: it decodes as
    /// [`Decoded::Unknown`] and is counted as a degradation.
    ///
    /// # Errors
    /// [`PredictionError::SchemaMismatch`] if the model expects another width,
    /// [`PredictionError::Inference`] if the call fails or returns nothing usable.
    pub fn classify(&self, sample: &AgronomicSample) -> Result<Decoded, PredictionError> {
        let vector = self.builder.assemble(sample, None, &self.codec);
        self.stats.record_degradations(&vector.degradations);

        let raw = invoke(&self.model, &vector)?;
        let decoded = self.codec.decode(raw.trunc() as i64);
        if let Decoded::Unknown(index) = decoded {
            self.stats.record_degradation(&Degradation::UnknownClass { index });
        }
        Ok(decoded)
    }

    #[must_use]
    pub const fn stats(&self) -> &Arc<PipelineStats> {
        &self.stats
    }
}

/// Yield estimation for a sample and a requested crop.
#[derive(Debug)]
pub struct YieldRegressor {
    model: ModelHandle,
    builder: FeatureVectorBuilder,
    codec: Arc<LabelCodec>,
    stats: Arc<PipelineStats>,
}

impl YieldRegressor {
    /// Resolves the feature schema from the model once.
    #[must_use]
    pub fn new(model: ModelHandle, codec: Arc<LabelCodec>, stats: Arc<PipelineStats>) -> Self {
        let builder = FeatureVectorBuilder::regression(model.as_ref());

        match builder.schema() {
            FeatureSchema::Declared(names) => {
                info!(pipeline = stats.pipeline(), width = names.len(), "Using declared feature schema");
                for slot in builder.unrecognized_slots() {
                    warn!(pipeline = stats.pipeline(), slot, "Declared feature will always be 0");
                }
            },
            FeatureSchema::Fixed(names) => warn!(
                pipeline = stats.pipeline(),
                layout = ?names,
                "Model declares no feature names; assuming numeric features followed by crop \
                 index, which is not verified against training"
            ),
        }

        check_width(&stats, &builder, &model);
        Self { model, builder, codec, stats }
    }

    /// Estimates the yield of `crop` under `sample`.
    ///
    /// # Errors
    /// [`PredictionError::SchemaMismatch`] if the model expects another width,
    /// [`PredictionError::Inference`] if the call fails or returns nothing usable.
    pub fn estimate(
        &self,
        sample: &AgronomicSample,
        crop: &CropQuery,
    ) -> Result<YieldEstimate, PredictionError> {
        let vector = self.builder.assemble(sample, Some(crop), &self.codec);
        self.stats.record_degradations(&vector.degradations);

        invoke(&self.model, &vector).map(YieldEstimate::from_raw)
    }

    #[must_use]
    pub const fn schema(&self) -> &FeatureSchema {
        self.builder.schema()
    }

    #[must_use]
    pub const fn stats(&self) -> &Arc<PipelineStats> {
        &self.stats
    }
}

/// Non-negative yield in kg/acre, rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct YieldEstimate(f64);

impl YieldEstimate {
    /// Rounds to two decimals, then clamps at zero.
    ///
    /// Rounding goes through the correctly rounded decimal rendering, so exact binary
    /// ties go to the even cent (`0.125` → `0.12`) and huge finite values stay finite.
    #[must_use]
    pub fn from_raw(raw: f64) -> Self {
        let rounded = format!("{raw:.2}").parse::<f64>().unwrap_or(raw);
        Self(if rounded > 0.0 { rounded } else { 0.0 })
    }

    #[must_use]
    pub const fn kg_per_acre(self) -> f64 {
        self.0
    }

    #[must_use]
    pub fn is_clamped(self) -> bool {
        self.0 <= 0.0
    }
}

/// Prints like a float literal (`1234.57`, `1200.0`, `1e+16`); a zero estimate prints `0`.
impl fmt::Display for YieldEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_clamped() {
            return f.write_str("0");
        }

        let shortest = format!("{:?}", self.0);
        match shortest.split_once('e') {
            Some((mantissa, exponent)) => {
                let (sign, digits) = exponent
                    .strip_prefix('-')
                    .map_or(("+", exponent), |digits| ("-", digits));
                write!(f, "{mantissa}e{sign}{digits:0>2}")
            },
            None => f.write_str(&shortest),
        }
    }
}

fn invoke(model: &ModelHandle, vector: &FeatureVector) -> Result<f64, PredictionError> {
    if let Some(expected) = model.n_features()
        && expected != vector.len()
    {
        return Err(PredictionError::SchemaMismatch {
            expected,
            actual: vector.len(),
            context: None,
        });
    }

    let output = model.predict(std::slice::from_ref(&vector.values))?;
    let raw = output
        .first()
        .copied()
        .ok_or_else(|| PredictionError::inference("Model returned no prediction"))?;

    if !raw.is_finite() {
        return Err(PredictionError::inference(format!("Model returned a non-finite value ({raw})")));
    }
    Ok(raw)
}

fn check_width(stats: &PipelineStats, builder: &FeatureVectorBuilder, model: &ModelHandle) {
    if let Some(expected) = model.n_features()
        && expected != builder.width()
    {
        warn!(
            pipeline = stats.pipeline(),
            expected,
            actual = builder.width(),
            "Model width disagrees with the feature schema; every request will fail"
        );
    }
}
