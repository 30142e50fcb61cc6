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


use super::{EnvironmentStore, merge_path_entry};
use crate::error::Result;
use crate::platform::path_separator;
use std::collections::HashMap;
use std::sync::Mutex;

const PATH_KEY: &str = "PATH";

/// Store that keeps everything in memory. Used for dry runs and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let store = Self::new();
        if let Ok(mut map) = store.values.lock() {
            map.extend(values.into_iter().map(|(k, v)| (k.into(), v.into())));
        }
        store
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.values
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl EnvironmentStore for MemoryStore {
    fn get(&self, name: &str) -> Result<Option<String>> {
        Ok(self.lock().get(name).cloned())
    }

    fn set(&self, name: &str, value: &str) -> Result<()> {
        self.lock().insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn append_to_path(&self, entry: &str) -> Result<bool> {
        let mut values = self.lock();
        let current = values.get(PATH_KEY).cloned().unwrap_or_default();
        match merge_path_entry(&current, entry, path_separator()) {
            Some(merged) => {
                values.insert(PATH_KEY.to_string(), merged);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn java_home_bin_entry(&self) -> String {
        if cfg!(windows) {
            r"%JAVA_HOME%\bin".to_string()
        } else {
            "$JAVA_HOME/bin".to_string()
        }
    }

    fn describe(&self) -> String {
        "in-memory store".to_string()
    }
}
