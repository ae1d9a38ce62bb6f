use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Environment, File, FileFormat};
use folio_models::delivery::DeliveryCredentials;
use serde::Deserialize;
use url::Url;

pub use duration::Duration;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Environment variable holding a colon separated list of config files.
pub const CONFIG_PATHS_VAR: &str = "FOLIO_CONFIG";

const ENV_PREFIX: &str = "FOLIO";

/// Loads the config files listed in `FOLIO_CONFIG`, or the default config if
/// the variable is not set, and applies `FOLIO_*` environment overrides.
pub fn load() -> anyhow::Result<Config> {
    let paths = match std::env::var_os(CONFIG_PATHS_VAR) {
        Some(paths) => std::env::split_paths(&paths).collect(),
        None => vec![PathBuf::from(DEFAULT_CONFIG_PATH)],
    };

    build(&paths, &[], Some(environment()))
}

/// Loads the given config files in order, then the TOML snippets in
/// `overrides`. Later sources win. The environment is not consulted.
pub fn load_with_override(
    paths: &[impl AsRef<Path>],
    overrides: &[&str],
) -> anyhow::Result<Config> {
    build(paths, overrides, None)
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}

fn build(
    paths: &[impl AsRef<Path>],
    overrides: &[&str],
    environment: Option<Environment>,
) -> anyhow::Result<Config> {
    let builder = paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?;

    let builder = overrides.iter().fold(builder, |builder, snippet| {
        builder.add_source(File::from_str(snippet, FileFormat::Toml))
    });

    match environment {
        Some(environment) => builder.add_source(environment),
        None => builder,
    }
    .build()?
    .try_deserialize()
    .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub email: EmailConfig,
    pub contact: ContactConfig,
}

#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    pub endpoint: Url,
    pub service_id: Option<String>,
    pub template_id: Option<String>,
    pub public_key: Option<String>,
}

impl EmailConfig {
    /// Returns the delivery credentials, or `None` if any part is missing.
    pub fn credentials(&self) -> Option<DeliveryCredentials> {
        DeliveryCredentials::from_parts(
            self.service_id.clone(),
            self.template_id.clone(),
            self.public_key.clone(),
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    pub success_dismiss: Duration,
}
