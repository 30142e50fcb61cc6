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


//! Persistent user environment: where `JAVA_HOME` and the managed PATH live.
//!
//! Writes are visible to new shells only. The running process environment
//! is never modified.

mod memory;
#[cfg(windows)]
mod registry;
mod shell_file;

pub use memory::MemoryStore;
#[cfg(windows)]
pub use registry::RegistryStore;
pub use shell_file::ShellFileStore;

use crate::config::CoffeebarConfig;
use crate::error::Result;
use std::sync::Arc;

pub const JAVA_HOME: &str = "JAVA_HOME";

/// Persistent key/value store for user environment variables.
pub trait EnvironmentStore: Send + Sync {
    /// Read a persisted variable. A missing key is `Ok(None)`.
    fn get(&self, name: &str) -> Result<Option<String>>;

    /// Persist a variable so that new sessions observe it.
    fn set(&self, name: &str, value: &str) -> Result<()>;

    /// Append `entry` to the persisted PATH unless a segment already matches it
    /// case-insensitively. Returns whether the entry was added.
    fn append_to_path(&self, entry: &str) -> Result<bool>;

    /// PATH entry that points at `$JAVA_HOME/bin` in this store's own syntax.
    fn java_home_bin_entry(&self) -> String;

    /// Human readable location of the persisted values.
    fn describe(&self) -> String;
}

impl<S: EnvironmentStore + ?Sized> EnvironmentStore for Arc<S> {
    fn get(&self, name: &str) -> Result<Option<String>> {
        (**self).get(name)
    }

    fn set(&self, name: &str, value: &str) -> Result<()> {
        (**self).set(name, value)
    }

    fn append_to_path(&self, entry: &str) -> Result<bool> {
        (**self).append_to_path(entry)
    }

    fn java_home_bin_entry(&self) -> String {
        (**self).java_home_bin_entry()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Pick the store for the current platform.
pub fn default_store(config: &CoffeebarConfig) -> Result<Box<dyn EnvironmentStore>> {
    #[cfg(windows)]
    {
        let _ = config;
        Ok(Box::new(RegistryStore::new()))
    }

    #[cfg(not(windows))]
    {
        Ok(Box::new(ShellFileStore::from_config(config)?))
    }
}

/// Whether a PATH-like value already has a segment equal to `entry` (case-insensitive, trimmed).
pub fn path_contains(current: &str, entry: &str, separator: char) -> bool {
    let wanted = normalize_segment(entry);
    !wanted.is_empty()
        && current
            .split(separator)
            .any(|segment| normalize_segment(segment) == wanted)
}

/// Append `entry` to a PATH-like value, keeping existing segments verbatim.
/// Returns `None` when the entry is already present.
pub fn merge_path_entry(current: &str, entry: &str, separator: char) -> Option<String> {
    if path_contains(current, entry, separator) {
        return None;
    }

    let trimmed = current.trim_end_matches(separator);
    if trimmed.trim().is_empty() {
        Some(entry.to_string())
    } else {
        Some(format!("{trimmed}{separator}{entry}"))
    }
}

fn normalize_segment(segment: &str) -> String {
    segment
        .trim()
        .trim_end_matches(['/', '\\'])
        .to_lowercase()
}
