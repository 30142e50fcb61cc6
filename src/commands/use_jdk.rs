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


use crate::activation::{activate, resolve};
use crate::commands::{discover, new_sessions_note};
use crate::config::CoffeebarConfig;
use crate::env_store::{EnvironmentStore, default_store};
use crate::error::Result;
use colored::Colorize;
use std::path::PathBuf;

/// `coffeebar use`: resolve a name or path and make it the persistent JDK.
pub struct UseCommand<'a> {
    config: &'a CoffeebarConfig,
    store: Box<dyn EnvironmentStore>,
}

impl<'a> UseCommand<'a> {
    pub fn new(config: &'a CoffeebarConfig) -> Result<Self> {
        Ok(Self::with_store(config, default_store(config)?))
    }

    pub fn with_store(config: &'a CoffeebarConfig, store: Box<dyn EnvironmentStore>) -> Self {
        Self { config, store }
    }

    pub fn execute(&self, query: &str, extra_roots: &[PathBuf]) -> Result<()> {
        let jdks = discover(self.config, extra_roots);
        let jdk = resolve(query, &jdks).into_result(query)?;
        log::debug!("Resolved '{query}' to {}", jdk.path.display());

        let activation = activate(self.store.as_ref(), &jdk.path)?;

        println!(
            "{} Now using {} ({})",
            "✓".green().bold(),
            jdk.name,
            jdk.version
        );
        if activation.newly_added {
            println!("  Added {} to PATH", activation.path_entry);
        }
        println!("  {}", new_sessions_note(self.store.as_ref()));
        Ok(())
    }
}
