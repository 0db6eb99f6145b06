//! Feature vector assembly over a compiled schema.

use crate::codec::{Encoded, LabelCodec};
use crate::model::Model;
use crate::schema::{CLASSIFICATION_FEATURES, FeatureSchema, POSITIONAL_YIELD_FEATURES, Slot};
use agri_domain::crop::CropQuery;
use agri_domain::sample::AgronomicSample;
use std::fmt;

/// A non-fatal substitution made while assembling a vector or decoding a prediction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Degradation {
    /// A declared feature name nothing maps to; filled with `0.0`.
    UnrecognizedSlot { slot: String },
    /// The requested crop is not in the label table.
    UnknownLabel { label: String },
    /// The classifier predicted an index outside the label table.
    UnknownClass { index: i64 },
}

impl fmt::Display for Degradation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnrecognizedSlot { slot } => write!(f, "unrecognized feature slot '{slot}'"),
            Self::UnknownLabel { label } => write!(f, "unknown crop label '{label}'"),
            Self::UnknownClass { index } => write!(f, "unknown class index {index}"),
        }
    }
}

/// An assembled model input plus whatever had to be substituted to build it.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    pub values: Vec<f64>,
    pub degradations: Vec<Degradation>,
}

impl FeatureVector {
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Maps typed input onto a model's ordered feature schema.
#[derive(Debug, Clone)]
pub struct FeatureVectorBuilder {
    schema: FeatureSchema,
    slots: Vec<Slot>,
}

impl FeatureVectorBuilder {
    #[must_use]
    pub fn new(schema: FeatureSchema) -> Self {
        let slots = schema.compile();
        Self { schema, slots }
    }

    /// The seven numeric fields, in canonical order.
    #[must_use]
    pub fn classification() -> Self {
        Self::new(FeatureSchema::Fixed(CLASSIFICATION_FEATURES))
    }

    /// The model's declared schema, or the positional crop-index layout.
    #[must_use]
    pub fn regression(model: &dyn Model) -> Self {
        Self::new(FeatureSchema::resolve(model, POSITIONAL_YIELD_FEATURES))
    }

    #[must_use]
    pub const fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.slots.len()
    }

    /// Declared names that will always be filled with `0.0`.
    pub fn unrecognized_slots(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().filter_map(|slot| match slot {
            Slot::Unrecognized(name) => Some(name.as_str()),
            _ => None,
        })
    }

    /// Builds one vector; its length always equals the schema length.
    ///
    /// Crop-dependent slots read `crop`; without one they fill as for an unknown crop,
    /// although no [`Degradation::UnknownLabel`] is recorded then.
    #[must_use]
    pub fn assemble(
        &self,
        sample: &AgronomicSample,
        crop: Option<&CropQuery>,
        codec: &LabelCodec,
    ) -> FeatureVector {
        let mut degradations = Vec::new();

        let encoded = crop.map(|query| {
            let encoded = codec.encode(query.as_str());
            if !encoded.is_known() {
                degradations.push(Degradation::UnknownLabel { label: query.as_str().to_owned() });
            }
            encoded
        });

        let values = self
            .slots
            .iter()
            .map(|slot| match slot {
                Slot::Numeric(field) => sample.get(*field),
                Slot::OneHot(name) => indicator(crop.is_some_and(|q| q.as_str() == name)),
                Slot::CropIndex => encoded.map_or(0, Encoded::index) as f64,
                Slot::Unrecognized(name) => {
                    degradations.push(Degradation::UnrecognizedSlot { slot: name.clone() });
                    0.0
                },
            })
            .collect();

        FeatureVector { values, degradations }
    }
}

const fn indicator(hit: bool) -> f64 {
    if hit { 1.0 } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn sample() -> AgronomicSample {
        AgronomicSample {
            nitrogen: 90.0,
            phosphorus: 42.0,
            potassium: 43.0,
            temperature: 20.879_744,
            humidity: 82.002_744,
            ph: 6.502_985,
            rainfall: 202.935_536,
        }
    }

    fn declared(names: &[&str]) -> FeatureSchema {
        FeatureSchema::Declared(names.iter().map(|s| (*s).to_owned()).collect::<Vec<_>>().into())
    }

    #[test]
    fn classification_copies_values_bit_for_bit() {
        let vector = FeatureVectorBuilder::classification().assemble(
            &sample(),
            None,
            &LabelCodec::new(),
        );
        let expected = sample().to_canonical();
        assert_eq!(vector.len(), 7);
        for (got, want) in vector.values.iter().zip(expected) {
            assert_eq!(got.to_bits(), want.to_bits());
        }
        assert!(vector.degradations.is_empty());
    }

    #[test]
    fn one_hot_columns_follow_the_crop() {
        let builder =
            FeatureVectorBuilder::new(declared(&["label_maize", "N", "label_rice", "rainfall"]));
        let rice = CropQuery::normalize("Rice");
        let vector = builder.assemble(&sample(), Some(&rice), &LabelCodec::new());
        assert_eq!(vector.values, [0.0, 90.0, 1.0, 202.935_536]);
        assert!(vector.degradations.is_empty());
    }

    #[test]
    fn unknown_crop_zeroes_crop_slots_and_is_reported() {
        let codec = LabelCodec::new();
        let query = CropQuery::normalize("dragonfruit");

        let positional = FeatureVectorBuilder::new(FeatureSchema::Fixed(POSITIONAL_YIELD_FEATURES));
        let vector = positional.assemble(&sample(), Some(&query), &codec);
        assert_eq!(vector.values[7], 0.0);
        assert_eq!(
            vector.degradations,
            [Degradation::UnknownLabel { label: "dragonfruit".to_owned() }]
        );

        let one_hot = FeatureVectorBuilder::new(declared(&["label_rice", "label_maize"]));
        let vector = one_hot.assemble(&sample(), Some(&query), &codec);
        assert_eq!(vector.values, [0.0, 0.0]);
        assert_eq!(vector.degradations.len(), 1);
    }

    #[test]
    fn unrecognized_slots_are_zero_and_recorded() {
        let builder = FeatureVectorBuilder::new(declared(&["N", "soil_type", "elevation"]));
        assert_eq!(builder.unrecognized_slots().collect::<Vec<_>>(), ["soil_type", "elevation"]);

        let vector = builder.assemble(&sample(), None, &LabelCodec::new());
        assert_eq!(vector.values, [90.0, 0.0, 0.0]);
        assert_eq!(
            vector.degradations,
            [
                Degradation::UnrecognizedSlot { slot: "soil_type".to_owned() },
                Degradation::UnrecognizedSlot { slot: "elevation".to_owned() },
            ]
        );
    }

    #[test]
    fn regression_builder_resolves_from_the_model() {
        #[derive(Debug)]
        struct Anonymous;
        impl Model for Anonymous {
            fn predict(
                &self,
                rows: &[Vec<f64>],
            ) -> Result<Vec<f64>, crate::error::PredictionError> {
                Ok(vec![0.0; rows.len()])
            }
        }

        let model: Arc<dyn Model> = Arc::new(Anonymous);
        let builder = FeatureVectorBuilder::regression(model.as_ref());
        assert_eq!(builder.schema(), &FeatureSchema::Fixed(POSITIONAL_YIELD_FEATURES));
        assert_eq!(builder.width(), 8);
    }
}
