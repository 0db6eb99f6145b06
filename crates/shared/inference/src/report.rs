use crate::codec::Decoded;
use crate::collector::FormFields;
use crate::dispatch::YieldEstimate;
use agri_domain::crop::capitalize;
use agri_domain::sample::AgronomicSample;
use std::fmt::Display;

#[agri_derive::api_model]
#[derive(Clone, PartialEq)]
/// Response body of both prediction endpoints.
///
/// Errors are reported inline in `result`; the submitted data is echoed only on success.
pub struct Report {
    /// Human-readable outcome
    pub result: String,
    /// Echo of the submitted input
    #[cfg_attr(feature = "server", schema(value_type = Option<Object>))]
    pub form_data: Option<serde_json::Value>,
}

impl Report {
    #[must_use]
    pub fn recommendation(crop: Decoded, sample: &AgronomicSample) -> Self {
        Self {
            result: format!("🌱 Recommended Crop: {}", capitalize(crop.name())),
            form_data: serde_json::to_value(sample).ok(),
        }
    }

    #[must_use]
    pub fn yield_estimate(estimate: YieldEstimate, form: &FormFields) -> Self {
        Self {
            result: format!("🌾 Estimated Yield: {estimate} kg/acre"),
            form_data: serde_json::to_value(form).ok(),
        }
    }

    /// Inline failure: the message replaces the result and nothing is echoed.
    #[must_use]
    pub fn error(err: &impl Display) -> Self {
        Self { result: format!("⚠️ Error: {err}"), form_data: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PredictionError;
    use agri_domain::crop::CropLabel;

    #[test]
    fn recommendation_capitalizes_and_echoes_sample() {
        let sample = AgronomicSample {
            nitrogen: 90.0,
            phosphorus: 42.0,
            potassium: 43.0,
            temperature: 20.8,
            humidity: 82.0,
            ph: 6.5,
            rainfall: 202.9,
        };
        let report = Report::recommendation(Decoded::Known(CropLabel::KidneyBeans), &sample);
        assert_eq!(report.result, "🌱 Recommended Crop: Kidneybeans");
        assert_eq!(report.form_data.as_ref().map(|v| v["N"].clone()), Some(90.0.into()));

        let unknown = Report::recommendation(Decoded::Unknown(99), &sample);
        assert_eq!(unknown.result, "🌱 Recommended Crop: Unknown crop");
    }

    #[test]
    fn yield_echoes_raw_form() {
        let form: FormFields = [("label".to_owned(), "Rice ".to_owned())].into();
        let report = Report::yield_estimate(YieldEstimate::from_raw(1200.0), &form);
        assert_eq!(report.result, "🌾 Estimated Yield: 1200.0 kg/acre");
        assert_eq!(report.form_data, Some(serde_json::json!({ "label": "Rice " })));
    }

    #[test]
    fn errors_carry_no_form_data() {
        let report = Report::error(&PredictionError::Unavailable {
            message: "not loaded".into(),
            context: None,
        });
        assert_eq!(report.result, "⚠️ Error: Model unavailable: not loaded");
        assert!(report.form_data.is_none());

        let json = serde_json::to_value(&report).unwrap();
        assert!(json["formData"].is_null());
    }
}
