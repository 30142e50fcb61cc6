// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


use crate::error::{CoffeebarError, Result};
use crate::paths::{home, install};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://api.adoptium.net";
const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 10;
const DEFAULT_INSTALL_TIMEOUT_SECS: u64 = 120;
const ENV_PREFIX: &str = "COFFEEBAR";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CoffeebarConfig {
    #[serde(skip)]
    coffeebar_home: PathBuf,

    #[serde(default)]
    pub discovery: DiscoveryConfig,

    #[serde(default)]
    pub install: InstallConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub shell: ShellConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiscoveryConfig {
    /// Directories scanned in addition to the platform defaults.
    #[serde(default)]
    pub extra_roots: Vec<PathBuf>,

    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            extra_roots: Vec::new(),
            probe_timeout_secs: DEFAULT_PROBE_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InstallConfig {
    /// Install root; `~/.jdks` when unset.
    #[serde(default)]
    pub root: Option<PathBuf>,

    /// Adoptium OS name override (`linux`, `mac`, `windows`, ...).
    #[serde(default)]
    pub os: Option<String>,

    /// Adoptium architecture override (`x64`, `aarch64`, ...).
    #[serde(default)]
    pub architecture: Option<String>,

    #[serde(default = "default_install_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            root: None,
            os: None,
            architecture: None,
            timeout_secs: DEFAULT_INSTALL_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_base_url")]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ShellConfig {
    /// Fragment file written by the shell store; `$COFFEEBAR_HOME/env` when unset.
    #[serde(default)]
    pub env_file: Option<PathBuf>,

    /// Startup file that sources the fragment; derived from `$SHELL` when unset.
    #[serde(default)]
    pub rc_file: Option<PathBuf>,
}

fn default_probe_timeout_secs() -> u64 {
    DEFAULT_PROBE_TIMEOUT_SECS
}

fn default_install_timeout_secs() -> u64 {
    DEFAULT_INSTALL_TIMEOUT_SECS
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

/// Load the configuration rooted at the resolved coffeebar home.
pub fn new_coffeebar_config() -> Result<CoffeebarConfig> {
    let coffeebar_home = home::resolve_coffeebar_home()?;
    CoffeebarConfig::new(coffeebar_home)
}

impl CoffeebarConfig {
    /// Layer defaults, `config.toml` under `coffeebar_home`, then `COFFEEBAR_*` variables.
    pub fn new(coffeebar_home: PathBuf) -> Result<Self> {
        let config_path = home::config_file(&coffeebar_home);
        log::debug!("Loading config from {config_path:?}");

        let settings = Config::builder()
            .add_source(File::from(config_path.as_path()).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("discovery.extra_roots")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| CoffeebarError::ConfigError(format!("Failed to load config: {e}")))?;

        let mut config: CoffeebarConfig = settings
            .try_deserialize()
            .map_err(|e| CoffeebarError::ConfigError(format!("Invalid configuration: {e}")))?;
        config.coffeebar_home = coffeebar_home;
        Ok(config)
    }

    pub fn coffeebar_home(&self) -> &Path {
        &self.coffeebar_home
    }

    pub fn install_root(&self) -> Result<PathBuf> {
        match &self.install.root {
            Some(root) => Ok(root.clone()),
            None => Ok(install::default_install_root(&home::user_home()?)),
        }
    }

    pub fn env_file(&self) -> PathBuf {
        self.shell
            .env_file
            .clone()
            .unwrap_or_else(|| home::env_file(&self.coffeebar_home))
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.discovery.probe_timeout_secs.max(1))
    }

    pub fn install_timeout(&self) -> Duration {
        Duration::from_secs(self.install.timeout_secs.max(1))
    }
}
