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


pub mod current;
pub mod install;
pub mod list;
pub mod register;
pub mod use_jdk;
pub mod versions;

use crate::config::CoffeebarConfig;
use crate::discovery::{JdkRecord, find_jdks_with_timeout, search_roots};
use crate::env_store::EnvironmentStore;
use std::path::PathBuf;

/// Discover JDKs under the configured roots plus `extra_roots`.
pub(crate) fn discover(config: &CoffeebarConfig, extra_roots: &[PathBuf]) -> Vec<JdkRecord> {
    let roots = search_roots(config, extra_roots);
    log::debug!("Searching {} roots for JDKs", roots.len());
    find_jdks_with_timeout(&roots, config.probe_timeout())
}

/// Persisted changes are invisible to shells and terminals that are already open.
pub(crate) fn new_sessions_note(store: &dyn EnvironmentStore) -> String {
    if cfg!(windows) {
        format!(
            "Saved to {}. Open a new terminal to pick up the change.",
            store.describe()
        )
    } else {
        format!(
            "Saved to {}. Open a new shell to pick up the change.",
            store.describe()
        )
    }
}
