//! # Prediction Pipelines
//!
//! Shared core of the recommendation and yield slices:
//! form fields are collected into an [`AgronomicSample`](agri_domain::sample::AgronomicSample),
//! laid out along the model's [`FeatureSchema`], dispatched to a [`Model`] and rendered
//! into a [`Report`].
//!
//! ```rust
//! use agri_inference::{FeatureVectorBuilder, LabelCodec};
//! use agri_domain::sample::AgronomicSample;
//!
//! let sample = AgronomicSample {
//!     nitrogen: 90.0, phosphorus: 42.0, potassium: 43.0,
//!     temperature: 20.8, humidity: 82.0, ph: 6.5, rainfall: 202.9,
//! };
//! let vector = FeatureVectorBuilder::classification().assemble(&sample, None, &LabelCodec::new());
//! assert_eq!(vector.values, sample.to_canonical());
//! ```

pub mod artifact;
pub mod builder;
pub mod codec;
pub mod collector;
pub mod dispatch;
pub mod error;
pub mod model;
pub mod report;
pub mod schema;
pub mod telemetry;

pub use artifact::{ModelArtifact, load_model};
pub use builder::{Degradation, FeatureVector, FeatureVectorBuilder};
pub use codec::{Decoded, Encoded, LabelCodec};
pub use collector::{FormFields, collect_crop, collect_sample};
pub use dispatch::{CropClassifier, YieldEstimate, YieldRegressor};
pub use error::{PredictionError, PredictionErrorExt};
pub use model::{Model, ModelHandle, ModelSlot};
pub use report::Report;
pub use schema::{FeatureSchema, Slot};
pub use telemetry::{PipelineStats, StatsSnapshot};
