use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{ApiSettings, DatabaseSettings, ServerSettings, Settings};

/// The configuration file looked up in the working directory. It is optional.
pub const CONFIG_FILE: &str = "config.toml";

/// Loads the application settings.
///
/// Sources are layered from lowest to highest priority: built-in defaults,
/// the optional `config.toml`, `KANIU__*` environment variables and finally the
/// bare `DATABASE_URL` variable (also read from a `.env` file when present).
/// The result is validated, so a missing database URL fails here at startup.
pub fn load_settings() -> Result<Settings, ConfigError> {
    let settings = read_settings()?;
    settings.validate()?;
    Ok(settings)
}

/// Same layering as [`load_settings`] without validation, for reporting the
/// effective configuration even when it is incomplete.
pub fn read_settings() -> Result<Settings, ConfigError> {
    dotenvy::dotenv().ok();
    read_settings_from(Path::new(CONFIG_FILE), false)
}

/// Loads and validates settings from an explicit file path. `required`
/// controls whether a missing file is an error or silently skipped.
pub fn load_settings_from(path: &Path, required: bool) -> Result<Settings, ConfigError> {
    let settings = read_settings_from(path, required)?;
    settings.validate()?;
    Ok(settings)
}

/// Layers defaults, the file at `path` and the environment into `Settings`.
pub fn read_settings_from(path: &Path, required: bool) -> Result<Settings, ConfigError> {
    let builder = settings::with_defaults(config::Config::builder())?
        .add_source(config::File::from(path).required(required))
        .add_source(
            config::Environment::with_prefix("KANIU")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("server.cors_origins")
                .try_parsing(true),
        )
        .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
        .build()?;

    let settings = builder.try_deserialize::<Settings>()?;
    tracing::debug!(path = %path.display(), "Configuration loaded.");
    Ok(settings)
}

/// Parses settings from TOML text layered over the defaults, ignoring the
/// process environment.
pub fn settings_from_toml(toml: &str) -> Result<Settings, ConfigError> {
    let settings = settings::with_defaults(config::Config::builder())?
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?
        .try_deserialize::<Settings>()?;
    settings.validate()?;
    Ok(settings)
}
