//! Start-up configuration: built-in defaults, then an optional TOML file,
//! then explicit command-line flags.
//!
//! ```toml
//! supply_voltage = 5.0
//! pull_down_ohms = 30000
//! ldr_ohms       = 20000
//!
//! [sweep]
//! min_ohms = 1000
//! max_ohms = 1000000
//! samples  = 120
//! ```
//!
//! Every key is optional; missing keys keep their default.

use std::fs;
use std::path::{Path, PathBuf};

use ldrsim_engine::BenchConfig;
use thiserror::Error;

/// Environment variable naming a config file when `--config` is absent.
pub const CONFIG_ENV: &str = "LDRSIM_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Parse a config document.
///
/// # Errors
/// The TOML error if the text is not a valid bench config.
pub fn from_toml_str(text: &str) -> Result<BenchConfig, toml::de::Error> {
    toml::from_str(text)
}

/// Load `path`, or the defaults when no file is given.
///
/// # Errors
/// [`ConfigError`] if the file cannot be read or parsed.
pub fn load(path: Option<&Path>) -> Result<BenchConfig, ConfigError> {
    let Some(path) = path else {
        log::debug!("no config file; using built-in defaults");
        return Ok(BenchConfig::default());
    };

    log::info!("loading config from {}", path.display());
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    from_toml_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
