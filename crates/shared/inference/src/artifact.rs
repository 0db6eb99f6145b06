//! # Model Artifacts
//!
//! A JSON exchange format for fitted linear models, so the service can run without a
//! foreign runtime. The pipelines only ever see the [`Model`] trait; any other model
//! family can be plugged in by implementing it.
//!
//! ```json
//! { "kind": "linear_regressor", "coefficients": [1.5, -0.2], "intercept": 3.0,
//!   "feature_names": ["N", "P"] }
//! ```

use crate::error::{PredictionError, PredictionErrorExt};
use crate::model::{Model, ModelHandle};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// A serialized model, discriminated by its `kind` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    LinearRegressor(LinearRegressor),
    LinearClassifier(LinearClassifier),
}

impl ModelArtifact {
    /// # Errors
    /// Returns [`PredictionError::Artifact`] if the JSON does not describe a known model.
    pub fn from_json(json: &str) -> Result<Self, PredictionError> {
        serde_json::from_str(json).context("Decoding model artifact")
    }

    /// # Errors
    /// Returns [`PredictionError::Io`] if the file cannot be read and
    /// [`PredictionError::Artifact`] if it cannot be decoded.
    pub fn from_path(path: &Path) -> Result<Self, PredictionError> {
        let raw = std::fs::read_to_string(path)
            .context(format!("Reading model artifact {}", path.display()))?;
        Self::from_json(&raw).context(format!("Decoding model artifact {}", path.display()))
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::LinearRegressor(_) => "linear_regressor",
            Self::LinearClassifier(_) => "linear_classifier",
        }
    }

    /// Checks internal consistency and turns the artifact into a shareable model.
    ///
    /// # Errors
    /// Returns [`PredictionError::Internal`] if the parameter shapes disagree.
    pub fn into_model(self) -> Result<ModelHandle, PredictionError> {
        match self {
            Self::LinearRegressor(model) => {
                model.validate()?;
                Ok(Arc::new(model))
            },
            Self::LinearClassifier(model) => {
                model.validate()?;
                Ok(Arc::new(model))
            },
        }
    }
}

/// Reads, validates and wraps the artifact at `path`.
///
/// # Errors
/// Propagates read, decode and shape errors from [`ModelArtifact`].
pub fn load_model(path: &Path) -> Result<ModelHandle, PredictionError> {
    let artifact = ModelArtifact::from_path(path)?;
    let kind = artifact.kind();
    let model = artifact.into_model().context(format!("Validating {}", path.display()))?;

    info!(
        path = %path.display(),
        kind,
        n_features = model.n_features(),
        declared_schema = model.feature_names().is_some(),
        "Model artifact loaded"
    );
    Ok(model)
}

/// Ordinary least squares style model: `intercept + coefficients · x`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearRegressor {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
}

impl LinearRegressor {
    fn validate(&self) -> Result<(), PredictionError> {
        if self.coefficients.is_empty() {
            return Err("Linear regressor has no coefficients".into());
        }
        check_names(self.feature_names.as_deref(), self.coefficients.len())
    }
}

impl Model for LinearRegressor {
    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, PredictionError> {
        rows.iter()
            .map(|row| dot(&self.coefficients, row).map(|score| score + self.intercept))
            .collect()
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    fn n_features(&self) -> Option<usize> {
        Some(self.coefficients.len())
    }
}

/// One-vs-rest linear classifier: predicts the class whose score is highest.
///
/// Without explicit `classes`, the row position of the winning coefficient vector is
/// the class index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearClassifier {
    pub coefficients: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classes: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
}

impl LinearClassifier {
    fn validate(&self) -> Result<(), PredictionError> {
        let Some(width) = self.coefficients.first().map(Vec::len) else {
            return Err("Linear classifier has no classes".into());
        };
        if width == 0 || self.coefficients.iter().any(|row| row.len() != width) {
            return Err("Linear classifier coefficient rows must share a non-zero width".into());
        }
        if self.intercepts.len() != self.coefficients.len() {
            return Err(format!(
                "Linear classifier has {} coefficient rows but {} intercepts",
                self.coefficients.len(),
                self.intercepts.len()
            )
            .into());
        }
        if let Some(classes) = &self.classes
            && classes.len() != self.coefficients.len()
        {
            return Err(format!(
                "Linear classifier has {} coefficient rows but {} class labels",
                self.coefficients.len(),
                classes.len()
            )
            .into());
        }
        check_names(self.feature_names.as_deref(), width)
    }

    fn classify(&self, row: &[f64]) -> Result<f64, PredictionError> {
        let mut best: Option<(usize, f64)> = None;
        for (position, (weights, intercept)) in
            self.coefficients.iter().zip(&self.intercepts).enumerate()
        {
            let score = dot(weights, row)? + intercept;
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((position, score));
            }
        }

        let (position, _) = best.ok_or_else(|| PredictionError::inference("No class scores"))?;
        let class = self.classes.as_ref().map_or(position as i64, |classes| classes[position]);
        Ok(class as f64)
    }
}

impl Model for LinearClassifier {
    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, PredictionError> {
        rows.iter().map(|row| self.classify(row)).collect()
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    fn n_features(&self) -> Option<usize> {
        self.coefficients.first().map(Vec::len)
    }
}

fn dot(weights: &[f64], row: &[f64]) -> Result<f64, PredictionError> {
    if weights.len() != row.len() {
        return Err(PredictionError::inference(format!(
            "X has {} features, but the model is expecting {} features as input",
            row.len(),
            weights.len()
        )));
    }
    Ok(weights.iter().zip(row).map(|(w, x)| w * x).sum())
}

fn check_names(names: Option<&[String]>, width: usize) -> Result<(), PredictionError> {
    match names {
        Some(names) if names.len() != width => Err(format!(
            "Artifact declares {} feature names for {width} coefficients",
            names.len()
        )
        .into()),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regressor_applies_intercept_and_weights() {
        let model = LinearRegressor {
            coefficients: vec![2.0, -1.0],
            intercept: 10.0,
            feature_names: None,
        };
        let out = model.predict(&[vec![3.0, 4.0], vec![0.0, 0.0]]).unwrap();
        assert_eq!(out, vec![12.0, 10.0]);
        assert_eq!(model.n_features(), Some(2));
        assert!(model.feature_names().is_none());
    }

    #[test]
    fn regressor_rejects_wrong_width() {
        let model =
            LinearRegressor { coefficients: vec![1.0; 3], intercept: 0.0, feature_names: None };
        let err = model.predict(&[vec![1.0; 2]]).unwrap_err();
        assert!(matches!(err, PredictionError::Inference { .. }));
    }

    #[test]
    fn classifier_picks_highest_score_and_maps_classes() {
        let model = LinearClassifier {
            coefficients: vec![vec![1.0, 0.0], vec![0.0, 1.0]],
            intercepts: vec![0.0, 0.0],
            classes: Some(vec![7, 3]),
            feature_names: None,
        };
        assert_eq!(model.predict(&[vec![5.0, 1.0], vec![1.0, 5.0]]).unwrap(), vec![7.0, 3.0]);
    }

    #[test]
    fn classifier_ties_resolve_to_first_class() {
        let model = LinearClassifier {
            coefficients: vec![vec![1.0], vec![1.0]],
            intercepts: vec![0.0, 0.0],
            classes: None,
            feature_names: None,
        };
        assert_eq!(model.predict(&[vec![2.0]]).unwrap(), vec![0.0]);
    }

    #[test]
    fn artifact_validation_catches_shape_errors() {
        let artifact = ModelArtifact::from_json(
            r#"{"kind":"linear_classifier","coefficients":[[1.0,2.0],[1.0]],"intercepts":[0.0,0.0]}"#,
        )
        .unwrap();
        assert!(matches!(artifact.into_model(), Err(PredictionError::Internal { .. })));

        let artifact = ModelArtifact::from_json(
            r#"{"kind":"linear_regressor","coefficients":[1.0],"intercept":0.0,"feature_names":["N","P"]}"#,
        )
        .unwrap();
        assert!(artifact.into_model().is_err());
    }

    #[test]
    fn unknown_kind_is_an_artifact_error() {
        let err = ModelArtifact::from_json(r#"{"kind":"random_forest"}"#).unwrap_err();
        assert!(matches!(err, PredictionError::Artifact { context: Some(_), .. }));
    }
}
