use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

/// One of the seven numeric measurements of an [`AgronomicSample`].
///
/// The serialized names are the form field names and the feature names models are
/// fitted with; declaration order is the canonical feature order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    AsRefStr,
    Display,
    EnumCount,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
pub enum NumericField {
    #[strum(serialize = "N")]
    Nitrogen,
    #[strum(serialize = "P")]
    Phosphorus,
    #[strum(serialize = "K")]
    Potassium,
    #[strum(serialize = "temperature")]
    Temperature,
    #[strum(serialize = "humidity")]
    Humidity,
    #[strum(serialize = "ph")]
    Ph,
    #[strum(serialize = "rainfall")]
    Rainfall,
}

impl NumericField {
    pub const CANONICAL: [Self; 7] = [
        Self::Nitrogen,
        Self::Phosphorus,
        Self::Potassium,
        Self::Temperature,
        Self::Humidity,
        Self::Ph,
        Self::Rainfall,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// Soil and climate readings for one field.
///
/// Values are finite but otherwise unchecked: readings outside the training
/// distribution are accepted as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgronomicSample {
    #[serde(rename = "N")]
    pub nitrogen: f64,
    #[serde(rename = "P")]
    pub phosphorus: f64,
    #[serde(rename = "K")]
    pub potassium: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub ph: f64,
    pub rainfall: f64,
}

impl AgronomicSample {
    #[must_use]
    pub const fn get(&self, field: NumericField) -> f64 {
        match field {
            NumericField::Nitrogen => self.nitrogen,
            NumericField::Phosphorus => self.phosphorus,
            NumericField::Potassium => self.potassium,
            NumericField::Temperature => self.temperature,
            NumericField::Humidity => self.humidity,
            NumericField::Ph => self.ph,
            NumericField::Rainfall => self.rainfall,
        }
    }

    /// Values in canonical feature order.
    #[must_use]
    pub fn to_canonical(&self) -> [f64; 7] {
        NumericField::CANONICAL.map(|field| self.get(field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn field_names_are_wire_names() {
        let names: Vec<_> = NumericField::CANONICAL.iter().map(|f| f.name()).collect();
        assert_eq!(names, ["N", "P", "K", "temperature", "humidity", "ph", "rainfall"]);
        assert_eq!(NumericField::from_str("ph").ok(), Some(NumericField::Ph));
        assert!(NumericField::from_str("pH").is_err());
    }

    #[test]
    fn canonical_order_follows_the_fields() {
        let sample = AgronomicSample {
            nitrogen: 0.5,
            phosphorus: 1.5,
            potassium: 2.5,
            temperature: 3.5,
            humidity: 4.5,
            ph: 5.5,
            rainfall: 6.5,
        };
        assert_eq!(sample.get(NumericField::Ph), 5.5);
        assert_eq!(sample.to_canonical(), [0.5, 1.5, 2.5, 3.5, 4.5, 5.5, 6.5]);
    }
}
