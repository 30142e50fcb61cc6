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


use crate::commands::new_sessions_note;
use crate::config::CoffeebarConfig;
use crate::env_store::{EnvironmentStore, default_store};
use crate::error::{CoffeebarError, Result};
use crate::platform::filesystem::absolute_path;
use colored::Colorize;
use std::env;
use std::path::{Path, PathBuf};

/// `coffeebar register`: put a directory (by default coffeebar's own) on the persistent PATH.
pub struct RegisterCommand {
    store: Box<dyn EnvironmentStore>,
}

impl RegisterCommand {
    pub fn new(config: &CoffeebarConfig) -> Result<Self> {
        Ok(Self::with_store(default_store(config)?))
    }

    pub fn with_store(store: Box<dyn EnvironmentStore>) -> Self {
        Self { store }
    }

    pub fn execute(&self, dir: Option<&Path>) -> Result<bool> {
        let dir = match dir {
            Some(dir) => absolute_path(dir)?,
            None => executable_dir()?,
        };

        if !dir.is_dir() {
            return Err(CoffeebarError::ValidationError(format!(
                "{} is not a directory",
                dir.display()
            )));
        }

        let entry = dir.to_string_lossy();
        let added = self.store.append_to_path(&entry)?;
        if added {
            println!("{} Added {entry} to PATH", "✓".green().bold());
            println!("  {}", new_sessions_note(self.store.as_ref()));
        } else {
            println!("{entry} is already on PATH");
        }
        Ok(added)
    }
}

fn executable_dir() -> Result<PathBuf> {
    let exe = env::current_exe()?;
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        CoffeebarError::SystemError(format!(
            "Cannot determine the directory of {}",
            exe.display()
        ))
    })
}
