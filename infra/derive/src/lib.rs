#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by every crate in the workspace.
//!
//! * [`macro@agri_error`] turns an enum into a context-aware `thiserror` error type.
//! * [`macro@agri_slice`] turns a struct into an `Arc`-backed feature slice handle.
//! * [`macro@api_model`] and [`macro@api_handler`] keep DTOs and handlers consistent and
//!   attach `utoipa` documentation only when the consuming crate enables `server`.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! agri-derive.workspace = true
//! thiserror.workspace = true
//! ```

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, ItemStruct, parse_macro_input};

/// Attribute macro for defining domain-specific error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]` unless already present.
/// * **Context Support**: Generates a companion `...Ext` trait that adds `.context()`
///   to `Result<T, ErrorName>` and to `Result<T, Source>` for every wrapped source type.
/// * **Standard Conversions**: Implements `From<Source>` for variants holding a `source`
///   field (or a field marked `#[source]`/`#[from]`), so `?` works on upstream errors.
/// * **Internal Fallback**: Implements `From<&'static str>` and `From<String>` when an
///   `Internal { message, context }` variant exists.
/// * **Formatting Helper**: Emits a module-level `format_context` function for use in
///   `#[error(...)]` strings.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum** with named-field variants only.
/// 2. A `context` field, when present, must be `Option<Cow<'static, str>>`.
/// 3. Variants with a source must also carry a `context` field.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[agri_derive::agri_error]
/// pub enum ArtifactError {
///     #[error("Artifact I/O error{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal artifact error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn read(path: &str) -> Result<String, ArtifactError> {
///     std::fs::read_to_string(path).context("Reading model artifact")
/// }
/// ```
#[proc_macro_attribute]
pub fn agri_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand(input).into()
}

/// Attribute macro to define a vertical slice handle.
///
/// The annotated struct becomes `<Name>Inner`; `<Name>` is generated as a cheap-to-clone
/// `Arc` wrapper that derefs to the inner state and implements
/// `agri_kernel::domain::registry::FeatureSlice` for registration in the server state.
///
/// # Example
/// ```rust,ignore
/// #[agri_derive::agri_slice]
/// pub struct Recommendation {
///     pub stats: PipelineStats,
/// }
///
/// let slice = Recommendation::new(RecommendationInner { stats: PipelineStats::default() });
/// ```
#[proc_macro_attribute]
pub fn agri_slice(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::slice::expand(input).into()
}

/// Attribute macro for request and response models.
///
/// * **Derives**: adds `Debug`, `Serialize` and `Deserialize` when missing.
/// * **`OpenAPI`**: adds `utoipa::ToSchema` behind the consuming crate's `server` feature.
/// * **Serde policy**: `rename_all = "camelCase"` and `deny_unknown_fields` unless
///   overridden through the macro arguments.
///
/// # Example
/// ```rust,ignore
/// #[agri_derive::api_model(deny_unknown_fields = false)]
/// pub struct HealthResponse {
///     pub status: &'static str,
///     pub uptime: u64,
/// }
/// ```
#[proc_macro_attribute]
pub fn api_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::api::expand_api_model(attr.into(), input).into()
}

/// Attribute macro for axum handlers.
///
/// Accepts the arguments of `utoipa::path` (`post`, `path = "..."`, `responses(...)`,
/// `tag = ...`) and applies them only when the `server` feature is enabled.
///
/// # Example
/// ```rust,ignore
/// #[agri_derive::api_handler(
///     get,
///     path = "/health",
///     responses((status = OK, body = HealthResponse)),
///     tag = SYSTEM_TAG,
/// )]
/// pub async fn health_handler() -> impl IntoResponse { /* ... */ }
/// ```
#[proc_macro_attribute]
pub fn api_handler(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::api::expand_api_handler(args.into(), input).into()
}
