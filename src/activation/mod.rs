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


//! Picks a JDK from a user query and makes it the persistent `JAVA_HOME`.

use crate::discovery::{JdkRecord, get_jdk_version, is_valid_jdk};
use crate::env_store::{EnvironmentStore, JAVA_HOME};
use crate::error::{CoffeebarError, Result};
use crate::platform::filesystem::{paths_equal, strip_verbatim_prefix};
use std::path::{Path, PathBuf};

/// Outcome of matching a query against the discovered JDKs.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Found(JdkRecord),
    /// Several JDKs match. One label per candidate; names shared by more
    /// than one candidate carry the path.
    Ambiguous(Vec<String>),
    NotFound,
}

impl Resolution {
    pub fn into_result(self, query: &str) -> Result<JdkRecord> {
        match self {
            Resolution::Found(record) => Ok(record),
            Resolution::Ambiguous(candidates) => Err(CoffeebarError::AmbiguousJdk {
                query: query.to_string(),
                candidates,
            }),
            Resolution::NotFound => Err(CoffeebarError::JdkNotFound(query.to_string())),
        }
    }
}

/// Match `query` by exact path, exact name, then unique substring of the name.
///
/// All comparisons ignore case. A name found under several roots is
/// ambiguous. When nothing matches and `query` is itself a JDK home on disk,
/// it is returned as an ad-hoc record.
pub fn resolve(query: &str, discovered: &[JdkRecord]) -> Resolution {
    let query = query.trim();
    if query.is_empty() {
        return Resolution::NotFound;
    }

    let query_path = Path::new(query);
    if let Some(record) = discovered
        .iter()
        .find(|jdk| paths_equal(&jdk.path, query_path) || path_text_eq(&jdk.path, query))
    {
        return Resolution::Found(record.clone());
    }

    let exact: Vec<&JdkRecord> = discovered
        .iter()
        .filter(|jdk| jdk.name.eq_ignore_ascii_case(query))
        .collect();
    if let Some(resolution) = pick_one(query, &exact) {
        return resolution;
    }

    let needle = query.to_lowercase();
    let matches: Vec<&JdkRecord> = discovered
        .iter()
        .filter(|jdk| jdk.name.to_lowercase().contains(&needle))
        .collect();
    if let Some(resolution) = pick_one(query, &matches) {
        return resolution;
    }

    if is_valid_jdk(query_path) {
        log::debug!("Using '{query}' as an ad-hoc JDK home");
        return Resolution::Found(ad_hoc_record(query_path));
    }

    Resolution::NotFound
}

fn pick_one(query: &str, matches: &[&JdkRecord]) -> Option<Resolution> {
    match matches {
        [] => None,
        [single] => Some(Resolution::Found((*single).clone())),
        many => {
            let labels = candidate_labels(many);
            log::debug!("Query '{query}' is ambiguous: {labels:?}");
            Some(Resolution::Ambiguous(labels))
        }
    }
}

fn candidate_labels(candidates: &[&JdkRecord]) -> Vec<String> {
    candidates
        .iter()
        .map(|jdk| {
            let shared = candidates
                .iter()
                .filter(|other| other.name.eq_ignore_ascii_case(&jdk.name))
                .count()
                > 1;
            if shared {
                format!("{} ({})", jdk.name, jdk.path.display())
            } else {
                jdk.name.clone()
            }
        })
        .collect()
}

fn path_text_eq(path: &Path, query: &str) -> bool {
    path.to_string_lossy().eq_ignore_ascii_case(query)
}

fn ad_hoc_record(path: &Path) -> JdkRecord {
    let home = path
        .canonicalize()
        .map(strip_verbatim_prefix)
        .unwrap_or_else(|_| path.to_path_buf());
    let name = home
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| home.display().to_string());

    JdkRecord {
        name,
        version: get_jdk_version(&home),
        path: home,
    }
}

/// What an activation changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    pub java_home: PathBuf,
    /// PATH entry referencing `JAVA_HOME`, in the store's syntax.
    pub path_entry: String,
    /// False when the entry was already on PATH.
    pub newly_added: bool,
}

/// Persist `java_home` as `JAVA_HOME` and make sure PATH references its `bin`.
///
/// Re-activating the same home is a no-op apart from rewriting the same value.
pub fn activate(store: &dyn EnvironmentStore, java_home: &Path) -> Result<Activation> {
    let value = java_home.to_string_lossy();
    store.set(JAVA_HOME, &value)?;

    let path_entry = store.java_home_bin_entry();
    let newly_added = store.append_to_path(&path_entry)?;

    log::info!(
        "Activated {} in {}{}",
        java_home.display(),
        store.describe(),
        if newly_added { " (PATH updated)" } else { "" }
    );

    Ok(Activation {
        java_home: java_home.to_path_buf(),
        path_entry,
        newly_added,
    })
}
