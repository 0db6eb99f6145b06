//! # Feature Schemas
//!
//! A schema is the ordered list of feature names a model consumes. It comes either from
//! the model artifact itself ([`FeatureSchema::Declared`]) or from a layout compiled
//! into the service ([`FeatureSchema::Fixed`]). Both are compiled into [`Slot`]s once,
//! so request handling never compares strings.

use crate::model::Model;
use agri_domain::constants::{CROP_INDEX_FEATURE, ONE_HOT_PREFIX};
use agri_domain::sample::NumericField;
use std::str::FromStr;
use std::sync::Arc;

/// The seven numeric measurements in canonical order.
pub const CLASSIFICATION_FEATURES: &[&str] =
    &["N", "P", "K", "temperature", "humidity", "ph", "rainfall"];

/// Layout assumed for a regression model that does not declare its features: the
/// classification features followed by the crop's table index.
pub const POSITIONAL_YIELD_FEATURES: &[&str] =
    &["N", "P", "K", "temperature", "humidity", "ph", "rainfall", CROP_INDEX_FEATURE];

/// Ordered feature names a model expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureSchema {
    /// Names recorded in the model artifact.
    Declared(Arc<[String]>),
    /// A built-in layout, used when the model records nothing.
    Fixed(&'static [&'static str]),
}

/// One compiled position of a feature vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    Numeric(NumericField),
    /// `1.0` when the requested crop equals this name, otherwise `0.0`.
    OneHot(String),
    /// Table index of the requested crop; only produced by fixed layouts.
    CropIndex,
    /// A declared name the service cannot fill; always `0.0`.
    Unrecognized(String),
}

impl FeatureSchema {
    /// Picks the model's declared names when it has any, `fallback` otherwise.
    #[must_use]
    pub fn resolve(model: &dyn Model, fallback: &'static [&'static str]) -> Self {
        model
            .feature_names()
            .filter(|names| !names.is_empty())
            .map_or(Self::Fixed(fallback), |names| Self::Declared(names.into()))
    }

    #[must_use]
    pub const fn is_declared(&self) -> bool {
        matches!(self, Self::Declared(_))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Declared(names) => names.len(),
            Self::Fixed(names) => names.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        let (declared, fixed) = match self {
            Self::Declared(names) => (Some(names.iter().map(String::as_str)), None),
            Self::Fixed(names) => (None, Some(names.iter().copied())),
        };
        declared.into_iter().flatten().chain(fixed.into_iter().flatten())
    }

    /// Compiles every name into a [`Slot`].
    ///
    /// Declared schemas may use one-hot crop columns; fixed layouts may use the crop
    /// index column. Anything else that is not a numeric field is unrecognized.
    #[must_use]
    pub fn compile(&self) -> Vec<Slot> {
        let declared = self.is_declared();
        self.names().map(|name| compile_slot(name, declared)).collect()
    }
}

fn compile_slot(name: &str, declared: bool) -> Slot {
    if let Ok(field) = NumericField::from_str(name) {
        return Slot::Numeric(field);
    }
    if declared {
        if let Some(crop) = name.strip_prefix(ONE_HOT_PREFIX) {
            return Slot::OneHot(crop.to_owned());
        }
    } else if name == CROP_INDEX_FEATURE {
        return Slot::CropIndex;
    }
    Slot::Unrecognized(name.to_owned())
}
