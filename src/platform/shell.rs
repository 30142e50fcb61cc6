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


use std::env;
use std::path::{Path, PathBuf};

/// Interactive shell whose startup file sources the coffeebar fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum Shell {
    Bash,
    Zsh,
    Unknown(String),
}

/// Detect the user's shell from `$SHELL`.
pub fn detect_shell() -> Shell {
    match env::var("SHELL") {
        Ok(shell_path) => shell_from_path(&shell_path),
        Err(_) => Shell::Unknown(String::new()),
    }
}

pub fn shell_from_path(shell_path: &str) -> Shell {
    let name = Path::new(shell_path)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    if name.contains("zsh") {
        Shell::Zsh
    } else if name.contains("bash") {
        Shell::Bash
    } else {
        Shell::Unknown(shell_path.to_string())
    }
}

impl Shell {
    /// Startup file read by new interactive shells. Anything other than zsh gets `~/.bashrc`.
    pub fn startup_file(&self, user_home: &Path) -> PathBuf {
        match self {
            Shell::Zsh => user_home.join(".zshrc"),
            Shell::Bash | Shell::Unknown(_) => user_home.join(".bashrc"),
        }
    }

    /// Get the shell name for display
    pub fn get_shell_name(&self) -> &str {
        match self {
            Shell::Bash => "bash",
            Shell::Zsh => "zsh",
            Shell::Unknown(name) if name.is_empty() => "unknown",
            Shell::Unknown(name) => name,
        }
    }
}

/// POSIX line that loads `fragment` when it exists.
pub fn source_line(fragment: &Path) -> String {
    format!("[ -f \"{0}\" ] && . \"{0}\"", fragment.display())
}
