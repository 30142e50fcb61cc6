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
use crate::paths::shared::ensure_directory;
use std::env;
use std::path::{Path, PathBuf};

pub const HOME_ENV_VAR: &str = "COFFEEBAR_HOME";
pub const HOME_DIR_NAME: &str = ".coffeebar";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const ENV_FILE_NAME: &str = "env";

/// Resolve the coffeebar home, honouring `COFFEEBAR_HOME` before `~/.coffeebar`.
pub fn resolve_coffeebar_home() -> Result<PathBuf> {
    if let Ok(home) = env::var(HOME_ENV_VAR)
        && !home.trim().is_empty()
    {
        return Ok(PathBuf::from(home));
    }

    user_home().map(|home| home.join(HOME_DIR_NAME))
}

pub fn user_home() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| {
        CoffeebarError::ConfigError("Unable to determine the user's home directory".to_string())
    })
}

pub fn config_file(coffeebar_home: &Path) -> PathBuf {
    coffeebar_home.join(CONFIG_FILE_NAME)
}

/// Shell fragment owned by coffeebar and sourced from the user's startup file.
pub fn env_file(coffeebar_home: &Path) -> PathBuf {
    coffeebar_home.join(ENV_FILE_NAME)
}

pub fn ensure_coffeebar_home(coffeebar_home: &Path) -> Result<PathBuf> {
    ensure_directory(coffeebar_home.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn layout_helpers_join_expected_paths() {
        let home = Path::new("/tmp/coffeebar");
        assert_eq!(
            config_file(home),
            PathBuf::from("/tmp/coffeebar/config.toml")
        );
        assert_eq!(env_file(home), PathBuf::from("/tmp/coffeebar/env"));
    }

    #[test]
    #[serial]
    fn resolve_home_prefers_environment_override() {
        let temp = TempDir::new().unwrap();
        let original = env::var(HOME_ENV_VAR).ok();
        unsafe {
            env::set_var(HOME_ENV_VAR, temp.path());
        }

        let resolved = resolve_coffeebar_home().unwrap();

        unsafe {
            match original {
                Some(value) => env::set_var(HOME_ENV_VAR, value),
                None => env::remove_var(HOME_ENV_VAR),
            }
        }
        assert_eq!(resolved, temp.path());
    }

    #[test]
    fn ensure_home_creates_directory() {
        let temp = TempDir::new().unwrap();
        let home = temp.path().join("nested").join(".coffeebar");

        let created = ensure_coffeebar_home(&home).unwrap();
        assert!(created.is_dir());
    }
}
