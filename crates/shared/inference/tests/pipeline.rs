use agri_domain::crop::CropQuery;
use agri_domain::sample::AgronomicSample;
use agri_inference::{
    FeatureSchema, FormFields, LabelCodec, Model, ModelHandle, PipelineStats, PredictionError,
    YieldRegressor, collect_sample, load_model,
};
use std::io::Write;
use std::sync::{Arc, Mutex};

/// Remembers every row it was asked to predict and answers with a constant.
#[derive(Debug, Default)]
struct Recording {
    names: Option<Vec<String>>,
    output: f64,
    rows: Mutex<Vec<Vec<f64>>>,
}

impl Recording {
    fn declaring(names: &[&str]) -> Self {
        Self { names: Some(names.iter().map(|s| (*s).to_owned()).collect()), ..Self::default() }
    }

    fn last_row(&self) -> Vec<f64> {
        self.rows.lock().unwrap().last().cloned().unwrap()
    }

    fn calls(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

impl Model for Recording {
    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, PredictionError> {
        self.rows.lock().unwrap().extend(rows.iter().cloned());
        Ok(vec![self.output; rows.len()])
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.names.as_deref()
    }
}

fn sample() -> AgronomicSample {
    AgronomicSample {
        nitrogen: 90.0,
        phosphorus: 42.0,
        potassium: 43.0,
        temperature: 20.8,
        humidity: 82.0,
        ph: 6.5,
        rainfall: 202.9,
    }
}

fn regressor(model: &Arc<Recording>) -> YieldRegressor {
    let handle: ModelHandle = model.clone();
    YieldRegressor::new(handle, Arc::new(LabelCodec::new()), Arc::new(PipelineStats::new("yield")))
}

#[test]
fn declared_one_hot_schema_marks_the_requested_crop() {
    let model = Arc::new(Recording::declaring(&[
        "N",
        "P",
        "K",
        "temperature",
        "humidity",
        "ph",
        "rainfall",
        "label_rice",
        "label_maize",
    ]));
    let regressor = regressor(&model);
    assert!(regressor.schema().is_declared());

    regressor.estimate(&sample(), &CropQuery::normalize("rice")).unwrap();

    let row = model.last_row();
    assert_eq!(row[..7], sample().to_canonical());
    assert_eq!(row[7], 1.0);
    assert_eq!(row[8], 0.0);
}

#[test]
fn positional_layout_appends_the_crop_index() {
    let model = Arc::new(Recording::default());
    let regressor = regressor(&model);
    assert!(matches!(regressor.schema(), FeatureSchema::Fixed(_)));

    regressor.estimate(&sample(), &CropQuery::normalize(" Maize")).unwrap();

    let row = model.last_row();
    assert_eq!(row.len(), 8);
    assert_eq!(row[7], 1.0);
}

#[test]
fn unknown_crop_uses_index_zero_and_is_counted() {
    let model = Arc::new(Recording { output: 950.0, ..Recording::default() });
    let regressor = regressor(&model);

    let estimate = regressor.estimate(&sample(), &CropQuery::normalize("dragonfruit")).unwrap();

    assert_eq!(estimate.kg_per_acre(), 950.0);
    assert_eq!(model.last_row()[7], 0.0);
    assert_eq!(regressor.stats().snapshot().unknown_labels, 1);
}

#[test]
fn unrecognized_declared_slot_is_zero_and_counted() {
    let model = Arc::new(Recording::declaring(&["N", "soil_type", "rainfall"]));
    let regressor = regressor(&model);

    regressor.estimate(&sample(), &CropQuery::normalize("rice")).unwrap();

    assert_eq!(model.last_row(), [90.0, 0.0, 202.9]);
    assert_eq!(regressor.stats().snapshot().unrecognized_slots, 1);
}

#[test]
fn missing_rainfall_never_reaches_the_model() {
    let model = Arc::new(Recording::default());
    let regressor = regressor(&model);

    let mut form: FormFields = [
        ("N", "90"),
        ("P", "42"),
        ("K", "43"),
        ("temperature", "20.8"),
        ("humidity", "82"),
        ("ph", "6.5"),
        ("label", "rice"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_owned(), v.to_owned()))
    .collect();

    let outcome = collect_sample(&form)
        .and_then(|sample| regressor.estimate(&sample, &CropQuery::normalize("rice")));
    assert!(
        matches!(outcome, Err(PredictionError::Validation { ref field, .. }) if field == "rainfall")
    );
    assert_eq!(model.calls(), 0);

    form.insert("rainfall".to_owned(), "202.9".to_owned());
    let sample = collect_sample(&form).unwrap();
    regressor.estimate(&sample, &CropQuery::normalize("rice")).unwrap();
    assert_eq!(model.calls(), 1);
}

#[test]
fn width_disagreement_is_a_schema_mismatch() {
    #[derive(Debug)]
    struct Narrow;
    impl Model for Narrow {
        fn predict(&self, _rows: &[Vec<f64>]) -> Result<Vec<f64>, PredictionError> {
            panic!("must not be called with a mismatched vector")
        }

        fn n_features(&self) -> Option<usize> {
            Some(5)
        }
    }

    let regressor = YieldRegressor::new(
        Arc::new(Narrow),
        Arc::new(LabelCodec::new()),
        Arc::new(PipelineStats::new("yield")),
    );
    let err = regressor.estimate(&sample(), &CropQuery::normalize("rice")).unwrap_err();
    assert!(matches!(err, PredictionError::SchemaMismatch { expected: 5, actual: 8, .. }));
}

#[test]
fn json_artifact_drives_the_regressor() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "kind": "linear_regressor",
            "coefficients": [1, 0, 0, 0, 0, 0, 10, 500, 250],
            "intercept": -100.0,
            "feature_names": ["N","P","K","temperature","humidity","ph","rainfall","label_rice","label_maize"]
        }}"#
    )
    .unwrap();

    let model = load_model(file.path()).unwrap();
    let regressor = YieldRegressor::new(
        model,
        Arc::new(LabelCodec::new()),
        Arc::new(PipelineStats::new("yield")),
    );

    let estimate = regressor.estimate(&sample(), &CropQuery::normalize("maize")).unwrap();
    assert_eq!(estimate.to_string(), "2269.0");
}

#[test]
fn missing_artifact_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_model(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, PredictionError::Io { context: Some(_), .. }));
}
