//! File configuration and its merge with command-line flags.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use imgprobe_fetch::{ClientSetting, ProbeOptions};
use imgprobe_fs::DEFAULT_FILE_MODE;
use imgprobe_source::DEFAULT_LENGTH;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::cli::Cli;

pub const DEFAULT_OUTPUT_DIR: &str = "build/images";
pub const DEFAULT_DELAY_SECS: u64 = 1;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Read {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path:   PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Contents of the optional TOML file. Every key may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub output_dir:    Option<PathBuf>,
    /// Unix permission bits of saved images, e.g. `0o644`.
    pub file_mode:     Option<u32>,
    pub delay_secs:    Option<u64>,
    pub random_length: Option<usize>,
    /// Icon shown with hit notifications.
    pub notify_icon:   Option<String>,
    pub fetch:         FetchConfig,
    pub client:        ClientConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FetchConfig {
    pub base_url:     Option<String>,
    pub suffix:       Option<String>,
    pub removed_path: Option<String>,
    /// Replaces the built-in browser profile when present.
    pub headers:      Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    pub timeout_secs:         Option<u64>,
    pub connect_timeout_secs: Option<u64>,
    pub max_redirects:        Option<usize>,
    pub proxies:              Vec<Url>,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> { toml::from_str(text) }

    pub fn probe_options(&self) -> ProbeOptions {
        let mut options = ProbeOptions::default();
        let fetch = &self.fetch;

        if let Some(base_url) = &fetch.base_url {
            options = options.base_url(base_url);
        }
        if let Some(suffix) = &fetch.suffix {
            options = options.suffix(suffix);
        }
        if let Some(removed_path) = &fetch.removed_path {
            options = options.removed_path(removed_path);
        }
        if let Some(headers) = &fetch.headers {
            options = options.headers(
                headers
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
            );
        }

        options
    }

    pub fn client_setting(&self) -> ClientSetting {
        let mut setting = ClientSetting::default();
        let client = &self.client;

        if let Some(secs) = client.timeout_secs {
            setting.timeout = Some(Duration::from_secs(secs));
        }
        if let Some(secs) = client.connect_timeout_secs {
            setting.connect_timeout = Some(Duration::from_secs(secs));
        }
        if let Some(max) = client.max_redirects {
            setting.max_redirects = max;
        }
        setting.proxies = client.proxies.clone();

        setting
    }
}

/// Everything a run needs, with flags taking precedence over the file.
#[derive(Debug, Clone)]
pub struct Settings {
    pub delay:         Duration,
    pub identifiers:   Vec<String>,
    pub files:         Vec<PathBuf>,
    pub notify:        bool,
    pub print:         bool,
    pub output_dir:    PathBuf,
    pub file_mode:     u32,
    pub notify_icon:   Option<String>,
    pub random_length: usize,
    pub probe:         ProbeOptions,
    pub client:        ClientSetting,
}

impl Settings {
    pub fn resolve(cli: Cli, config: Config) -> Self {
        let delay_secs = cli
            .delay
            .or(config.delay_secs)
            .unwrap_or(DEFAULT_DELAY_SECS);

        Self {
            delay:         Duration::from_secs(delay_secs),
            identifiers:   cli.inputs,
            files:         cli.files,
            notify:        !cli.no_notify,
            print:         !cli.no_stdout,
            output_dir:    cli
                .output
                .or_else(|| config.output_dir.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            file_mode:     config.file_mode.unwrap_or(DEFAULT_FILE_MODE),
            notify_icon:   config.notify_icon.clone(),
            random_length: config.random_length.unwrap_or(DEFAULT_LENGTH),
            probe:         config.probe_options(),
            client:        config.client_setting(),
        }
    }
}
