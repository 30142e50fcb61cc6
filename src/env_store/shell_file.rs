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
use crate::config::CoffeebarConfig;
use crate::error::{CoffeebarError, Result};
use crate::paths::{home, shared};
use crate::platform::shell::{self, detect_shell};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const PATH_KEY: &str = "PATH";
const PATH_SUFFIX: &str = ":$PATH";
const FRAGMENT_HEADER: &str = "# Managed by coffeebar. Changes may be overwritten.";
const SOURCE_COMMENT: &str = "# coffeebar";

/// Unix store: a fragment of `export` lines sourced from the shell startup file.
///
/// Plain variables are exported in the order they were first set and the
/// managed `PATH` line is always kept last, so `$JAVA_HOME` is defined by the
/// time the PATH entry is expanded.
#[derive(Debug, Clone)]
pub struct ShellFileStore {
    env_file: PathBuf,
    rc_file: PathBuf,
}

impl ShellFileStore {
    pub fn new(env_file: PathBuf, rc_file: PathBuf) -> Self {
        Self { env_file, rc_file }
    }

    pub fn from_config(config: &CoffeebarConfig) -> Result<Self> {
        let rc_file = match &config.shell.rc_file {
            Some(rc_file) => rc_file.clone(),
            None => detect_shell().startup_file(&home::user_home()?),
        };
        Ok(Self::new(config.env_file(), rc_file))
    }

    pub fn env_file(&self) -> &Path {
        &self.env_file
    }

    pub fn rc_file(&self) -> &Path {
        &self.rc_file
    }

    fn read_lines(&self) -> Result<Vec<String>> {
        match fs::read_to_string(&self.env_file) {
            Ok(contents) => Ok(contents.lines().map(str::to_string).collect()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(persistence_error(&self.env_file, "read", e)),
        }
    }

    fn write_lines(&self, lines: &[String]) -> Result<()> {
        shared::ensure_parent_directory(&self.env_file)
            .map_err(|e| CoffeebarError::PersistenceFailure(e.to_string()))?;

        let mut contents = String::new();
        if lines.first().map(String::as_str) != Some(FRAGMENT_HEADER) {
            contents.push_str(FRAGMENT_HEADER);
            contents.push('\n');
        }
        for line in lines {
            contents.push_str(line);
            contents.push('\n');
        }

        fs::write(&self.env_file, contents)
            .map_err(|e| persistence_error(&self.env_file, "write", e))?;
        log::debug!("Wrote {}", self.env_file.display());

        self.ensure_sourced()
    }

    /// Make sure the startup file sources the fragment exactly once.
    fn ensure_sourced(&self) -> Result<()> {
        let line = shell::source_line(&self.env_file);
        let existing = match fs::read_to_string(&self.rc_file) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
            Err(e) => return Err(persistence_error(&self.rc_file, "read", e)),
        };

        if existing.lines().any(|l| l.trim() == line) {
            return Ok(());
        }

        shared::ensure_parent_directory(&self.rc_file)
            .map_err(|e| CoffeebarError::PersistenceFailure(e.to_string()))?;

        let mut updated = existing;
        if !updated.is_empty() && !updated.ends_with('\n') {
            updated.push('\n');
        }
        updated.push_str(&format!("\n{SOURCE_COMMENT}\n{line}\n"));

        fs::write(&self.rc_file, updated)
            .map_err(|e| persistence_error(&self.rc_file, "update", e))?;
        log::info!("Added coffeebar to {}", self.rc_file.display());
        Ok(())
    }
}

impl EnvironmentStore for ShellFileStore {
    fn get(&self, name: &str) -> Result<Option<String>> {
        let lines = self.read_lines()?;
        let Some(raw) = lines.iter().rev().find_map(|line| export_value(line, name)) else {
            return Ok(None);
        };

        if name == PATH_KEY {
            let entries = raw.strip_suffix(PATH_SUFFIX).unwrap_or(raw);
            return Ok(Some(unescape(entries)));
        }
        Ok(Some(unescape(raw)))
    }

    fn set(&self, name: &str, value: &str) -> Result<()> {
        validate_name(name)?;
        let mut lines = self.read_lines()?;
        let previous_index = lines.iter().position(|l| export_value(l, name).is_some());
        lines.retain(|l| export_value(l, name).is_none());

        if name == PATH_KEY {
            lines.push(format!(
                "export PATH=\"{}{PATH_SUFFIX}\"",
                escape(value, false)
            ));
        } else {
            let export = format!("export {name}=\"{}\"", escape(value, true));
            let path_index = lines.iter().position(|l| export_value(l, PATH_KEY).is_some());
            let index = match (previous_index, path_index) {
                (Some(previous), Some(path)) => previous.min(path),
                (Some(previous), None) => previous.min(lines.len()),
                (None, Some(path)) => path,
                (None, None) => lines.len(),
            };
            lines.insert(index, export);
        }

        self.write_lines(&lines)
    }

    fn append_to_path(&self, entry: &str) -> Result<bool> {
        let current = self.get(PATH_KEY)?.unwrap_or_default();
        match merge_path_entry(&current, entry, ':') {
            Some(merged) => {
                self.set(PATH_KEY, &merged)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn java_home_bin_entry(&self) -> String {
        "$JAVA_HOME/bin".to_string()
    }

    fn describe(&self) -> String {
        format!(
            "{} (sourced from {})",
            self.env_file.display(),
            self.rc_file.display()
        )
    }
}

/// Raw right-hand side of `export NAME=...` with surrounding quotes removed.
fn export_value<'a>(line: &'a str, name: &str) -> Option<&'a str> {
    let rest = line.trim().strip_prefix("export ")?.trim_start();
    let value = rest.strip_prefix(name)?.strip_prefix('=')?;
    Some(
        value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .unwrap_or(value),
    )
}

fn validate_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && !name.starts_with(|c: char| c.is_ascii_digit())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(CoffeebarError::ValidationError(format!(
            "'{name}' is not a valid environment variable name"
        )))
    }
}

fn escape(value: &str, escape_dollar: bool) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' | '"' | '`' => {
                escaped.push('\\');
                escaped.push(ch);
            }
            '$' if escape_dollar => escaped.push_str("\\$"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn unescape(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some(next @ ('\\' | '"' | '`' | '$')) => result.push(next),
                Some(other) => {
                    result.push('\\');
                    result.push(other);
                }
                None => result.push('\\'),
            }
        } else {
            result.push(ch);
        }
    }
    result
}

fn persistence_error(path: &Path, action: &str, error: std::io::Error) -> CoffeebarError {
    CoffeebarError::PersistenceFailure(format!("Failed to {action} {}: {error}", path.display()))
}
