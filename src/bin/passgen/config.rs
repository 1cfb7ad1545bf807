//! Default generator settings, read from a YAML file.
//!
//! The file is only ever read; choices made at the prompts are not written back.

use std::env;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::Context;

use passgen::GeneratorConfig;

use crate::ProgError;

/// Load settings from `config_path`, or from the default location if that is `None`.
///
/// An explicitly given file must exist; a missing default file just means built-in defaults.
pub(crate) fn load(config_path: Option<PathBuf>) -> Result<GeneratorConfig, ProgError> {
    let (path, required) = match config_path {
        Some(p) => (p, true),
        None => match default_config_path() {
            Some(p) => (p, false),
            None => {
                tracing::debug!("HOME is not set; using built-in defaults");
                return Ok(GeneratorConfig::default());
            }
        },
    };

    let file = match File::open(&path) {
        Ok(f) => f,
        Err(err) if err.kind() == io::ErrorKind::NotFound && !required => {
            tracing::debug!(path = %path.display(), "no config file; using built-in defaults");
            return Ok(GeneratorConfig::default());
        }
        Err(err) => {
            return Err(anyhow::Error::new(err)
                .context(format!("failed to open config file {}", path.display()))
                .into())
        }
    };
    let config = parse(file).map_err(|err| ProgError::InvalidConfig(path.clone(), err))?;
    tracing::debug!(path = %path.display(), ?config, "loaded config file");
    Ok(config)
}

fn parse(rdr: impl Read) -> anyhow::Result<GeneratorConfig> {
    let config: GeneratorConfig =
        serde_yaml::from_reader(rdr).context("failed to parse YAML")?;
    GeneratorConfig::check_length(config.length)?;
    Ok(config)
}

fn default_config_path() -> Option<PathBuf> {
    let home = env::var_os("HOME")?;
    Some(config_path_under(Path::new(&home)))
}

fn config_path_under(home: &Path) -> PathBuf {
    let mut p = home.to_path_buf();
    p.push(".passgen");
    p.push("config.yaml");
    p
}
