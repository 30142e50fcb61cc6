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


//! Finds JDK homes under a set of root directories and reads their versions.

use crate::config::CoffeebarConfig;
use crate::env_store::{EnvironmentStore, JAVA_HOME};
use crate::error::Result;
use crate::platform::filesystem::{absolute_path, normalize_for_comparison, path_str_equal};
use crate::platform::{java_executable_name, process};
use serde::Serialize;
use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

pub const UNKNOWN_VERSION: &str = "Unknown";
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// A JDK home found on disk. Built fresh on every scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JdkRecord {
    /// Directory name, used as the display label. Not unique across roots.
    pub name: String,
    pub path: PathBuf,
    /// First line of `java -version`, or `Unknown`.
    pub version: String,
}

impl JdkRecord {
    /// Java feature release parsed from the version line (`1.8.0_392` is 8, `17.0.9` is 17).
    pub fn major_version(&self) -> Option<u32> {
        parse_major_version(&self.version)
    }
}

/// Scan the immediate children of every root using the default probe timeout.
pub fn find_jdks(search_roots: &[PathBuf]) -> Vec<JdkRecord> {
    find_jdks_with_timeout(search_roots, DEFAULT_PROBE_TIMEOUT)
}

pub fn find_jdks_with_timeout(search_roots: &[PathBuf], probe_timeout: Duration) -> Vec<JdkRecord> {
    let mut records = Vec::new();

    for root in search_roots {
        let root = match absolute_path(root) {
            Ok(root) => root,
            Err(e) => {
                log::debug!("Cannot resolve search root {}: {e}", root.display());
                continue;
            }
        };
        if !root.is_dir() {
            log::trace!("Skipping missing search root {}", root.display());
            continue;
        }

        let entries = match fs::read_dir(&root) {
            Ok(entries) => entries,
            Err(e) => {
                log::debug!("Cannot read {}: {e}", root.display());
                continue;
            }
        };

        let mut found = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::debug!("Skipping unreadable entry in {}: {e}", root.display());
                    continue;
                }
            };

            let candidate = entry.path();
            if !candidate.is_dir() {
                continue;
            }

            let Some(java_home) = resolve_java_home(&candidate) else {
                continue;
            };

            let name = entry.file_name().to_string_lossy().to_string();
            let version = get_jdk_version_with_timeout(&java_home, probe_timeout);
            log::debug!("Found JDK {name} at {} ({version})", java_home.display());
            found.push(JdkRecord {
                name,
                path: java_home,
                version,
            });
        }

        found.sort_by(|a, b| a.name.cmp(&b.name));
        records.extend(found);
    }

    records
}

/// The JDK home for a candidate directory, following the macOS bundle layout.
fn resolve_java_home(candidate: &Path) -> Option<PathBuf> {
    if is_valid_jdk(candidate) {
        return Some(candidate.to_path_buf());
    }

    let bundle_home = candidate.join("Contents").join("Home");
    if is_valid_jdk(&bundle_home) {
        return Some(bundle_home);
    }

    None
}

/// Structural check: `bin/java` (with the platform extension) exists.
pub fn is_valid_jdk(path: &Path) -> bool {
    path.join("bin").join(java_executable_name()).is_file()
}

pub fn get_jdk_version(path: &Path) -> String {
    get_jdk_version_with_timeout(path, DEFAULT_PROBE_TIMEOUT)
}

/// First non-empty line of `java -version`, preferring stderr. Any failure yields `Unknown`.
pub fn get_jdk_version_with_timeout(path: &Path, timeout: Duration) -> String {
    let java = path.join("bin").join(java_executable_name());
    let mut command = Command::new(&java);
    command.arg("-version");

    let output = match process::run_with_timeout(command, timeout) {
        Ok(output) => output,
        Err(e) => {
            log::debug!("Version probe failed for {}: {e}", java.display());
            return UNKNOWN_VERSION.to_string();
        }
    };

    first_line(&output.stderr)
        .or_else(|| first_line(&output.stdout))
        .unwrap_or_else(|| UNKNOWN_VERSION.to_string())
}

fn first_line(bytes: &[u8]) -> Option<String> {
    String::from_utf8_lossy(bytes)
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}

/// The discovered record matching the persisted `JAVA_HOME`, if any.
pub fn get_current<'a>(
    store: &dyn EnvironmentStore,
    jdks: &'a [JdkRecord],
) -> Result<Option<&'a JdkRecord>> {
    let Some(java_home) = store.get(JAVA_HOME)? else {
        return Ok(None);
    };

    Ok(jdks.iter().find(|jdk| path_str_equal(&java_home, &jdk.path)))
}

/// Roots scanned by default: platform locations, the install root, configured extras.
pub fn default_search_roots(config: &CoffeebarConfig) -> Vec<PathBuf> {
    let mut roots = platform_search_roots();
    roots.extend(java_root_on_path(std::env::var_os("PATH")));

    match config.install_root() {
        Ok(root) => roots.push(root),
        Err(e) => log::debug!("No install root available: {e}"),
    }

    roots.extend(config.discovery.extra_roots.iter().cloned());
    dedup_roots(roots)
}

/// Default roots followed by `extra`, with duplicates removed.
pub fn search_roots(config: &CoffeebarConfig, extra: &[PathBuf]) -> Vec<PathBuf> {
    let mut roots = default_search_roots(config);
    roots.extend(extra.iter().cloned());
    dedup_roots(roots)
}

#[cfg(windows)]
fn platform_search_roots() -> Vec<PathBuf> {
    let mut roots = Vec::new();
    if let Ok(program_files) = std::env::var("ProgramFiles") {
        roots.push(PathBuf::from(&program_files).join("Java"));
        roots.push(PathBuf::from(&program_files).join("Eclipse Adoptium"));
    }
    if let Ok(program_files_x86) = std::env::var("ProgramFiles(x86)") {
        roots.push(PathBuf::from(program_files_x86).join("Java"));
    }
    roots
}

#[cfg(target_os = "macos")]
fn platform_search_roots() -> Vec<PathBuf> {
    let mut roots = vec![PathBuf::from("/Library/Java/JavaVirtualMachines")];
    if let Some(home) = dirs::home_dir() {
        roots.push(home.join("Library/Java/JavaVirtualMachines"));
    }
    roots
}

#[cfg(not(any(windows, target_os = "macos")))]
fn platform_search_roots() -> Vec<PathBuf> {
    vec![
        PathBuf::from("/usr/lib/jvm"),
        PathBuf::from("/usr/java"),
        PathBuf::from("/opt/java"),
    ]
}

/// Directory holding the JDK whose launcher comes first on `path_var`.
///
/// `/usr/lib/jvm/temurin-21/bin/java` yields `/usr/lib/jvm`; macOS bundles
/// (`X.jdk/Contents/Home/bin/java`) yield the directory holding `X.jdk`.
fn java_root_on_path(path_var: Option<OsString>) -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let launcher = which::which_in(java_executable_name(), path_var, cwd).ok()?;
    let launcher = fs::canonicalize(&launcher).unwrap_or(launcher);

    let mut home = launcher.parent()?.parent()?;
    if home.ends_with("Contents/Home") {
        home = home.parent()?.parent()?;
    }
    let root = home.parent()?.to_path_buf();
    log::trace!("java on PATH resolves to {}, adding root {}", launcher.display(), root.display());
    Some(root)
}

fn dedup_roots(roots: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    roots
        .into_iter()
        .map(|root| absolute_path(&root).unwrap_or(root))
        .filter(|root| seen.insert(normalize_for_comparison(root)))
        .collect()
}

fn parse_major_version(version_line: &str) -> Option<u32> {
    let token = version_line
        .split('"')
        .nth(1)
        .or_else(|| {
            version_line
                .split_whitespace()
                .find(|t| t.starts_with(|c: char| c.is_ascii_digit()))
        })?;

    let mut parts = token.split(|c: char| !c.is_ascii_digit());
    let first: u32 = parts.next()?.parse().ok()?;
    if first == 1 {
        parts.next()?.parse().ok()
    } else {
        Some(first)
    }
}

#[cfg(test)]
mod tests;
