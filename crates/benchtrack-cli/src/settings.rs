use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Layered defaults for the ingestion step: an optional `benchtrack.toml`,
/// overridden by `BENCHTRACK_*` environment variables, overridden in turn
/// by CLI flags.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    #[serde(default = "default_suite")]
    pub suite: String,

    #[serde(default = "default_tool")]
    pub tool: String,

    #[serde(default)]
    pub repo_url: Option<String>,

    #[serde(default)]
    pub max_entries: Option<usize>,
}

impl Settings {
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        builder = match config_path {
            Some(path) => builder.add_source(File::from(path)),
            None => builder.add_source(File::with_name("benchtrack").required(false)),
        };

        builder = builder.add_source(Environment::with_prefix("BENCHTRACK").try_parsing(true));

        let settings = builder.build()?.try_deserialize()?;
        Ok(settings)
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from("dev/bench/data.js")
}

fn default_suite() -> String {
    "Benchmarks".to_string()
}

fn default_tool() -> String {
    "pytest".to_string()
}
