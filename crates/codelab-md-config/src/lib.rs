use codelab_md_engine::ParseOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Parser settings persisted as TOML.
///
/// ```toml
/// pass_metadata = ["source", "owner"]
/// frame_domains = ["codepen.io", "example.org"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Extra metadata keys copied into the document.
    pub pass_metadata: Vec<String>,
    /// Replaces the built-in frame allow-list when set.
    pub frame_domains: Option<Vec<String>>,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;
        config.normalize();

        Ok(Some(config))
    }

    /// Options for a parse, falling back to the built-in frame allow-list.
    pub fn parse_options(&self) -> ParseOptions {
        let opts = ParseOptions::default().with_pass_metadata(&self.pass_metadata);
        match &self.frame_domains {
            Some(domains) => opts.with_frame_domains(domains),
            None => opts,
        }
    }

    // Keys and domains are matched lowercase.
    fn normalize(&mut self) {
        for key in &mut self.pass_metadata {
            *key = key.trim().to_lowercase();
        }
        self.pass_metadata.retain(|k| !k.is_empty());
        if let Some(domains) = &mut self.frame_domains {
            for domain in domains.iter_mut() {
                *domain = domain.trim().to_lowercase();
            }
            domains.retain(|d| !d.is_empty());
        }
    }
}
