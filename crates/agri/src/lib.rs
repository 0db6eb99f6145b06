//! Facade crate for the `AgriAdvisor` prediction slices and shared modules.
//! Re-exports domain/kernel/inference primitives and aggregates slice initialization.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Add `agri` with the `server` feature for the HTTP surface.
//! - Call [`init`] once at startup to load both models and build the slices.

use agri_domain::config::ApiConfig;
use agri_domain::registry::InitializedSlice;
pub use agri_domain as domain;
pub use agri_inference as inference;
use agri_inference::LabelCodec;
pub use agri_kernel as kernel;
use std::borrow::Cow;
use std::sync::Arc;
use tracing::info;

#[cfg(feature = "server")]
pub mod server {
    use agri_kernel::server::ApiState;
    use utoipa_axum::router::OpenApiRouter;

    pub use agri_kernel::server::system_router;

    /// Health plus every prediction endpoint, ready to be given a state.
    #[must_use]
    pub fn router() -> OpenApiRouter<ApiState> {
        system_router()
            .merge(crate::features::recommendation::router())
            .merge(crate::features::yields::router())
    }
}

/// Feature registry for runtime introspection.
pub mod features {
    pub use agri_recommendation as recommendation;
    pub use agri_yield as yields;

    /// Slices compiled into this build (plus `server` when the HTTP surface is).
    pub const ENABLED: &[&str] = &[
        #[cfg(feature = "server")]
        "server",
        "recommendation",
        "yield",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

#[agri_derive::agri_error]
pub enum BootstrapError {
    #[error("Recommendation bootstrap failed{}: {source}", format_context(.context))]
    Recommendation {
        source: features::recommendation::RecommendationError,
        context: Option<Cow<'static, str>>,
    },
    #[error("Yield bootstrap failed{}: {source}", format_context(.context))]
    Yield { source: features::yields::YieldError, context: Option<Cow<'static, str>> },
}

/// Initialize every prediction slice.
///
/// Both pipelines share one crop table.
///
/// # Errors
/// Returns an error if a model fails to load while `models.required` is set.
pub fn init(config: &ApiConfig) -> Result<Vec<InitializedSlice>, BootstrapError> {
    let codec = Arc::new(LabelCodec::new());

    let slices = vec![
        features::recommendation::init(&config.models, Arc::clone(&codec))?,
        features::yields::init(&config.models, codec)?,
    ];

    info!(slices = slices.len(), enabled = ?features::ENABLED, "Feature slices initialized");
    Ok(slices)
}
