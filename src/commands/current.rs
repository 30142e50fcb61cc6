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


use crate::commands::discover;
use crate::config::CoffeebarConfig;
use crate::discovery::{JdkRecord, get_current};
use crate::env_store::{EnvironmentStore, JAVA_HOME, default_store};
use crate::error::Result;
use crate::platform::filesystem::path_str_equal;
use serde::Serialize;
use std::env;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, PartialEq)]
struct CurrentOutput {
    /// Persisted `JAVA_HOME`.
    java_home: Option<String>,
    jdk: Option<JdkRecord>,
    /// `JAVA_HOME` of this process, only when it differs from the persisted one.
    session_java_home: Option<String>,
    store: String,
}

pub struct CurrentCommand<'a> {
    config: &'a CoffeebarConfig,
    store: Box<dyn EnvironmentStore>,
}

impl<'a> CurrentCommand<'a> {
    pub fn new(config: &'a CoffeebarConfig) -> Result<Self> {
        Ok(Self::with_store(config, default_store(config)?))
    }

    pub fn with_store(config: &'a CoffeebarConfig, store: Box<dyn EnvironmentStore>) -> Self {
        Self { config, store }
    }

    pub fn execute(&self, extra_roots: &[PathBuf], json: bool) -> Result<()> {
        let jdks = discover(self.config, extra_roots);
        let output = self.collect(&jdks, env::var(JAVA_HOME).ok())?;

        if json {
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            print_standard_output(&output);
        }
        Ok(())
    }

    fn collect(&self, jdks: &[JdkRecord], session_java_home: Option<String>) -> Result<CurrentOutput> {
        let java_home = self.store.get(JAVA_HOME)?;
        let jdk = get_current(self.store.as_ref(), jdks)?.cloned();

        let session_java_home = session_java_home.filter(|session| {
            !session.is_empty()
                && !java_home
                    .as_deref()
                    .is_some_and(|persisted| path_str_equal(persisted, Path::new(session)))
        });

        Ok(CurrentOutput {
            java_home,
            jdk,
            session_java_home,
            store: self.store.describe(),
        })
    }
}

fn print_standard_output(output: &CurrentOutput) {
    match (&output.java_home, &output.jdk) {
        (None, _) => {
            println!("No JDK is active");
            println!("Hint: run 'coffeebar use <NAME>' to activate one");
        }
        (Some(_), Some(jdk)) => {
            println!("{} ({})", jdk.name, jdk.version);
            println!("  {}", jdk.path.display());
        }
        (Some(java_home), None) => {
            println!("{java_home} (not among the discovered JDKs)");
        }
    }

    if let Some(session) = &output.session_java_home {
        println!("This shell still uses JAVA_HOME={session}; open a new one to switch.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env_store::MemoryStore;
    use crate::test::fixtures::create_test_record;
    use serial_test::serial;
    use tempfile::TempDir;

    fn command_with<'a>(
        config: &'a CoffeebarConfig,
        java_home: Option<&str>,
    ) -> CurrentCommand<'a> {
        let store = match java_home {
            Some(home) => MemoryStore::with_values([(JAVA_HOME, home)]),
            None => MemoryStore::new(),
        };
        CurrentCommand::with_store(config, Box::new(store))
    }

    #[test]
    #[serial]
    fn test_collect_matches_discovered_record() {
        let temp_dir = TempDir::new().unwrap();
        let config = CoffeebarConfig::new(temp_dir.path().to_path_buf()).unwrap();
        let jdks = vec![create_test_record("temurin-21", "/opt/temurin-21", "21")];
        let command = command_with(&config, Some("/opt/temurin-21"));

        let output = command
            .collect(&jdks, Some("/opt/temurin-21".to_string()))
            .unwrap();
        assert_eq!(output.jdk.as_ref().unwrap().name, "temurin-21");
        assert_eq!(output.session_java_home, None);
    }

    #[test]
    #[serial]
    fn test_collect_reports_stale_session() {
        let temp_dir = TempDir::new().unwrap();
        let config = CoffeebarConfig::new(temp_dir.path().to_path_buf()).unwrap();
        let command = command_with(&config, Some("/opt/temurin-21"));

        let output = command
            .collect(&[], Some("/opt/temurin-17".to_string()))
            .unwrap();
        assert_eq!(output.java_home.as_deref(), Some("/opt/temurin-21"));
        assert!(output.jdk.is_none());
        assert_eq!(output.session_java_home.as_deref(), Some("/opt/temurin-17"));
    }

    #[test]
    #[serial]
    fn test_collect_nothing_active() {
        let temp_dir = TempDir::new().unwrap();
        let config = CoffeebarConfig::new(temp_dir.path().to_path_buf()).unwrap();
        let command = command_with(&config, None);

        let output = command.collect(&[], None).unwrap();
        assert_eq!(output.java_home, None);
        assert_eq!(output.store, "in-memory store");

        let json = serde_json::to_value(&output).unwrap();
        assert!(json["java_home"].is_null());
    }
}
