use agri_domain::config::ModelsConfig;
use agri_inference::{FormFields, LabelCodec, Model, PredictionError};
use agri_yield::{Yield, YieldError, init};
use std::io::Write;
use std::sync::{Arc, Mutex};

/// Returns a constant and remembers the last row it saw.
#[derive(Debug)]
struct Probe {
    output: f64,
    names: Option<Vec<String>>,
    last: Mutex<Option<Vec<f64>>>,
}

impl Probe {
    fn new(output: f64) -> Arc<Self> {
        Arc::new(Self { output, names: None, last: Mutex::new(None) })
    }

    fn last(&self) -> Option<Vec<f64>> {
        self.last.lock().unwrap().clone()
    }
}

impl Model for Probe {
    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, PredictionError> {
        *self.last.lock().unwrap() = rows.last().cloned();
        Ok(vec![self.output; rows.len()])
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.names.as_deref()
    }
}

fn form(label: &str) -> FormFields {
    [
        ("N", "90"),
        ("P", "42"),
        ("K", "43"),
        ("temperature", "20.8"),
        ("humidity", "82"),
        ("ph", "6.5"),
        ("rainfall", "202.9"),
        ("label", label),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_owned(), v.to_owned()))
    .collect()
}

fn slice(probe: &Arc<Probe>) -> Yield {
    Yield::from_model(probe.clone(), Arc::new(LabelCodec::new()))
}

#[test]
fn estimate_is_rounded_and_echoes_the_raw_form() {
    let probe = Probe::new(1234.5678);
    let report = slice(&probe).estimate(&form(" Maize "));

    assert_eq!(report.result, "🌾 Estimated Yield: 1234.57 kg/acre");
    assert_eq!(report.form_data.unwrap()["label"], " Maize ");
    assert_eq!(probe.last().unwrap()[7], 1.0);
}

#[test]
fn negative_predictions_clamp_to_zero() {
    let report = slice(&Probe::new(-87.2)).estimate(&form("rice"));
    assert_eq!(report.result, "🌾 Estimated Yield: 0 kg/acre");
}

#[test]
fn unknown_crop_is_a_counted_degradation() {
    let probe = Probe::new(500.0);
    let slice = slice(&probe);

    let report = slice.estimate(&form("dragonfruit"));

    assert_eq!(report.result, "🌾 Estimated Yield: 500.0 kg/acre");
    assert_eq!(probe.last().unwrap()[7], 0.0);
    assert_eq!(slice.stats().unknown_labels, 1);
}

#[test]
fn missing_label_never_reaches_the_model() {
    let probe = Probe::new(500.0);
    let slice = slice(&probe);
    let mut fields = form("rice");
    fields.remove("label");

    let report = slice.estimate(&fields);

    assert_eq!(report.result, "⚠️ Error: Invalid input: missing required field 'label'");
    assert!(probe.last().is_none());
}

#[test]
fn non_finite_prediction_is_an_inline_error() {
    let slice = slice(&Probe::new(f64::NAN));
    let report = slice.estimate(&form("rice"));
    assert!(report.result.starts_with("⚠️ Error: Inference failed"), "{}", report.result);
    assert_eq!(slice.stats().inference_failures, 1);
}

#[test]
fn init_without_required_model_starts_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let config = ModelsConfig {
        regression: dir.path().join("missing.json"),
        required: false,
        ..ModelsConfig::default()
    };

    let initialized = init(&config, Arc::new(LabelCodec::new())).unwrap();
    let slice = initialized.downcast_ref::<Yield>().unwrap();
    assert!(slice.estimate(&form("rice")).result.starts_with("⚠️ Error: Model unavailable"));

    let required = ModelsConfig { required: true, ..config };
    assert!(matches!(init(&required, Arc::new(LabelCodec::new())), Err(YieldError::Model { .. })));
}

#[test]
fn init_loads_a_declared_schema_artifact() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"kind":"linear_regressor",
            "coefficients":[0,0,0,0,0,0,5,300,-300],
            "intercept":0.5,
            "feature_names":["N","P","K","temperature","humidity","ph","rainfall","label_rice","label_maize"]}}"#
    )
    .unwrap();

    let config = ModelsConfig { regression: file.path().to_path_buf(), ..ModelsConfig::default() };
    let initialized = init(&config, Arc::new(LabelCodec::new())).unwrap();
    let slice = initialized.downcast_ref::<Yield>().unwrap();

    assert_eq!(slice.estimate(&form("rice")).result, "🌾 Estimated Yield: 1315.0 kg/acre");
}
