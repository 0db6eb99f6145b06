//! Per-pipeline request and degradation counters.

use crate::builder::Degradation;
use crate::error::PredictionError;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::warn;

/// Counters shared by every request of one pipeline.
///
/// Relaxed ordering throughout: the numbers are diagnostics and never feed back into a
/// prediction.
#[derive(Debug)]
pub struct PipelineStats {
    pipeline: &'static str,
    requests: AtomicU64,
    validation_failures: AtomicU64,
    schema_mismatches: AtomicU64,
    inference_failures: AtomicU64,
    unavailable: AtomicU64,
    unrecognized_slots: AtomicU64,
    unknown_labels: AtomicU64,
    unknown_classes: AtomicU64,
}

#[agri_derive::api_model]
#[derive(Clone, Copy, PartialEq, Eq)]
/// Point-in-time copy of [`PipelineStats`].
pub struct StatsSnapshot {
    pub requests: u64,
    pub validation_failures: u64,
    pub schema_mismatches: u64,
    pub inference_failures: u64,
    pub unavailable: u64,
    pub unrecognized_slots: u64,
    pub unknown_labels: u64,
    pub unknown_classes: u64,
}

impl PipelineStats {
    #[must_use]
    pub const fn new(pipeline: &'static str) -> Self {
        Self {
            pipeline,
            requests: AtomicU64::new(0),
            validation_failures: AtomicU64::new(0),
            schema_mismatches: AtomicU64::new(0),
            inference_failures: AtomicU64::new(0),
            unavailable: AtomicU64::new(0),
            unrecognized_slots: AtomicU64::new(0),
            unknown_labels: AtomicU64::new(0),
            unknown_classes: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub const fn pipeline(&self) -> &'static str {
        self.pipeline
    }

    pub fn record_request(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts a request-fatal error by kind.
    pub fn record_error(&self, err: &PredictionError) {
        let counter = match err {
            PredictionError::Validation { .. } => &self.validation_failures,
            PredictionError::SchemaMismatch { .. } => &self.schema_mismatches,
            PredictionError::Unavailable { .. } => &self.unavailable,
            PredictionError::Inference { .. }
            | PredictionError::Artifact { .. }
            | PredictionError::Io { .. }
            | PredictionError::Internal { .. } => &self.inference_failures,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Logs and counts a soft substitution.
    pub fn record_degradation(&self, degradation: &Degradation) {
        let pipeline = self.pipeline;
        match degradation {
            Degradation::UnrecognizedSlot { slot } => {
                self.unrecognized_slots.fetch_add(1, Ordering::Relaxed);
                warn!(pipeline, slot = %slot, "Unrecognized feature slot filled with 0");
            },
            Degradation::UnknownLabel { label } => {
                self.unknown_labels.fetch_add(1, Ordering::Relaxed);
                warn!(pipeline, label = %label, "Unknown crop label encoded as index 0");
            },
            Degradation::UnknownClass { index } => {
                self.unknown_classes.fetch_add(1, Ordering::Relaxed);
                warn!(pipeline, class_index = *index, "Predicted class outside the label table");
            },
        }
    }

    pub fn record_degradations<'a>(&self, degradations: impl IntoIterator<Item = &'a Degradation>) {
        for degradation in degradations {
            self.record_degradation(degradation);
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        let load = |counter: &AtomicU64| counter.load(Ordering::Relaxed);
        StatsSnapshot {
            requests: load(&self.requests),
            validation_failures: load(&self.validation_failures),
            schema_mismatches: load(&self.schema_mismatches),
            inference_failures: load(&self.inference_failures),
            unavailable: load(&self.unavailable),
            unrecognized_slots: load(&self.unrecognized_slots),
            unknown_labels: load(&self.unknown_labels),
            unknown_classes: load(&self.unknown_classes),
        }
    }
}
