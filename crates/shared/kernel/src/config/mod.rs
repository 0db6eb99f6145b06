use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Prefix of environment overrides (`AGRI__SERVER__PORT=8080`).
pub const ENV_PREFIX: &str = "AGRI";

#[agri_derive::agri_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads a configuration file and overlays environment variables on top of it.
///
/// 1. **Base file**: `path` (extension optional, e.g. `server` finds `server.toml`),
///    defaulting to `server` in the working directory.
/// 2. **Environment**: variables prefixed with `AGRI__`; nested keys are separated with
///    a double underscore (`AGRI__MODELS__REQUIRED=false` sets `models.required`).
///
/// # Errors
/// Returns [`ConfigError::Config`] if the file is missing or the merged values do not
/// deserialize into `T`.
///
/// # Example
/// ```rust,no_run
/// use agri_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    load_layered(path, None)
}

/// Like [`load_config`], but reads the `AGRI__` overrides from `vars` instead of the
/// process environment.
///
/// # Errors
/// Same as [`load_config`].
pub fn load_config_with_env<T, I>(path: Option<impl AsRef<Path>>, vars: I) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
    I: IntoIterator<Item = (String, String)>,
{
    load_layered(path, Some(vars.into_iter().collect()))
}

fn load_layered<T>(
    path: Option<impl AsRef<Path>>,
    vars: Option<config::Map<String, String>>,
) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path = path.map_or_else(|| PathBuf::from("server"), |p| p.as_ref().to_path_buf());

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(true))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .convert_case(config::Case::Snake)
                .source(vars),
        );

    info!(path = %effective_path.display(), "Loading config");

    builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")
}
