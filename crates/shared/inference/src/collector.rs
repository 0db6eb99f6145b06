//! Input collection: raw form strings in, typed sample out, or a validation error.

use crate::error::PredictionError;
use agri_domain::constants::LABEL_FIELD;
use agri_domain::crop::CropQuery;
use agri_domain::sample::{AgronomicSample, NumericField};
use std::collections::BTreeMap;

/// Submitted form fields, keyed by field name.
pub type FormFields = BTreeMap<String, String>;

/// Parses the seven numeric fields.
///
/// Fields are checked in canonical order and the first failure aborts collection, so a
/// partially filled sample never leaves this function.
///
/// # Errors
/// Returns [`PredictionError::Validation`] naming the first missing, unparseable or
/// non-finite field.
pub fn collect_sample(form: &FormFields) -> Result<AgronomicSample, PredictionError> {
    let mut values = [0.0; 7];
    for (value, field) in values.iter_mut().zip(NumericField::CANONICAL) {
        *value = parse_number(form, field)?;
    }

    let [nitrogen, phosphorus, potassium, temperature, humidity, ph, rainfall] = values;
    Ok(AgronomicSample { nitrogen, phosphorus, potassium, temperature, humidity, ph, rainfall })
}

/// Reads and normalizes the `label` field of a yield request.
///
/// # Errors
/// Returns [`PredictionError::Validation`] if the field is absent.
pub fn collect_crop(form: &FormFields) -> Result<CropQuery, PredictionError> {
    form.get(LABEL_FIELD)
        .map(|raw| CropQuery::normalize(raw))
        .ok_or_else(|| missing(LABEL_FIELD))
}

fn parse_number(form: &FormFields, field: NumericField) -> Result<f64, PredictionError> {
    let name = field.name();
    let raw = form.get(name).ok_or_else(|| missing(name))?;

    let value: f64 = raw.trim().parse().map_err(|_| PredictionError::Validation {
        field: name.into(),
        message: format!("field '{name}' must be a number, got '{raw}'").into(),
        context: None,
    })?;

    if !value.is_finite() {
        return Err(PredictionError::Validation {
            field: name.into(),
            message: format!("field '{name}' must be a finite number, got '{raw}'").into(),
            context: None,
        });
    }
    Ok(value)
}

fn missing(name: &'static str) -> PredictionError {
    PredictionError::Validation {
        field: name.into(),
        message: format!("missing required field '{name}'").into(),
        context: None,
    }
}
