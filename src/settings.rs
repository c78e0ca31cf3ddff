pub use model::*;

mod model;

use std::path::PathBuf;

use clap::Parser;
use config::{Config, Environment, File};

use crate::error::SettingsError;

/// Layers, lowest precedence first: built-in defaults, the `--config` file, `APP_` prefixed
/// environment variables, then command line overrides.
pub fn get_settings(options: &CliOptions) -> Result<Settings, SettingsError> {
    load_settings(options, app_environment())
}

/// Environment variables with a prefix of APP and '__' as separator.
/// E.g. `APP_HISTORY__RECENT_LIMIT=30` would set `Settings.history.recent_limit`
pub fn app_environment() -> Environment {
    Environment::with_prefix("APP").prefix_separator("_").separator("__")
}

#[tracing::instrument(level = "info", skip(environment))]
pub fn load_settings(options: &CliOptions, environment: Environment) -> Result<Settings, SettingsError> {
    let mut builder = Config::builder();

    if let Some(config_path) = &options.config {
        builder = builder.add_source(File::from(config_path.as_path()).required(true));
    }

    builder = builder.add_source(environment);

    if let Some(build_path) = &options.build_path {
        builder = builder.set_override("build.path", build_path.to_string_lossy().to_string())?;
    }

    if options.release {
        builder = builder.set_override("build.mode", BuildMode::Release.to_string())?;
    }

    let settings: Settings = builder.build()?.try_deserialize()?;
    settings.validate()?;
    tracing::info!(?settings, "settings loaded.");
    Ok(settings)
}

#[derive(Debug, Default, Clone, Parser)]
#[command(version, about)]
pub struct CliOptions {
    /// load configuration from this file, layered over the built-in defaults.
    /// Format is taken from the file extension (toml, yaml, json, ...).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// build output directory holding the benchmark result file. Overrides `build.root` and
    /// `build.mode`.
    #[arg(short, long)]
    pub build_path: Option<PathBuf>,

    /// look for the benchmark result under the release build directory.
    #[arg(long)]
    pub release: bool,
}
