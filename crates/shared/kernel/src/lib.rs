//! Kernel utilities shared across slices.
//! Keep this crate lightweight: configuration loading and, behind `server`, the shared
//! axum state and system routes.
//!
//! ## Config loading
//! ```rust,no_run
//! use agri_kernel::config::load_config;
//! use agri_kernel::domain::config::ApiConfig;
//!
//! let cfg: ApiConfig = load_config(Some("server")).unwrap_or_default();
//! assert!(cfg.server.port > 0);
//! ```
pub mod config;
#[cfg(feature = "server")]
pub mod server;

pub use agri_domain as domain;
