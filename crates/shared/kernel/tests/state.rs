use agri_kernel::domain::config::ApiConfig;
use agri_kernel::domain::registry::{FeatureSlice, InitializedSlice};
use agri_kernel::server::{ApiState, ApiStateError};
use std::any::Any;

#[derive(Debug, PartialEq, Eq)]
struct Counter(u32);

impl FeatureSlice for Counter {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug)]
struct Unregistered;

impl FeatureSlice for Unregistered {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[test]
fn registered_slices_are_found_by_type() {
    let state = ApiState::builder()
        .config(ApiConfig::default())
        .register_slices([InitializedSlice::new(Counter(7))])
        .build()
        .unwrap();

    assert_eq!(state.get_slice::<Counter>(), Some(&Counter(7)));
    assert!(state.slice_names().any(|name| name.ends_with("Counter")));

    let err = state.try_get_slice::<Unregistered>().unwrap_err();
    assert!(matches!(err, ApiStateError::MissingSlice { .. }));
}

#[test]
fn config_is_required() {
    let err = ApiState::builder().build().unwrap_err();
    assert_eq!(err.to_string(), "State validation error: ApiConfig not provided");
}
