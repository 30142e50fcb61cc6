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


use std::path::{Path, PathBuf};

/// Default install root, shared with other tools that keep JDKs under `~/.jdks`.
pub const DEFAULT_INSTALL_DIR: &str = ".jdks";
/// Scratch directory created inside the install root while an archive is unpacked.
pub const SCRATCH_DIR: &str = "_temp_extract";
pub const INSTALL_LOCK_FILE: &str = "_temp_extract.lock";
pub const INSTALL_FOLDER_PREFIX: &str = "temurin-";

pub fn default_install_root(user_home: &Path) -> PathBuf {
    user_home.join(DEFAULT_INSTALL_DIR)
}

pub fn scratch_directory(target_root: &Path) -> PathBuf {
    target_root.join(SCRATCH_DIR)
}

pub fn install_lock_file(target_root: &Path) -> PathBuf {
    target_root.join(INSTALL_LOCK_FILE)
}

pub fn bin_directory(java_home: &Path) -> PathBuf {
    java_home.join("bin")
}

/// Folder name for a Temurin release, e.g. `jdk-21.0.1+12` becomes `temurin-21.0.1_12`.
pub fn install_folder_name_for(release_name: &str) -> String {
    let trimmed = release_name.trim();
    let stripped = trimmed
        .strip_prefix("jdk-")
        .or_else(|| trimmed.strip_prefix("jdk"))
        .filter(|rest| !rest.is_empty())
        .unwrap_or(trimmed);

    let sanitized: String = stripped
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '.' {
                ch
            } else {
                '_'
            }
        })
        .collect();

    format!("{INSTALL_FOLDER_PREFIX}{sanitized}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_paths_follow_layout() {
        let root = Path::new("/home/user/.jdks");
        assert_eq!(
            default_install_root(Path::new("/home/user")),
            PathBuf::from("/home/user/.jdks")
        );
        assert_eq!(
            scratch_directory(root),
            PathBuf::from("/home/user/.jdks/_temp_extract")
        );
        assert_eq!(
            install_lock_file(root),
            PathBuf::from("/home/user/.jdks/_temp_extract.lock")
        );
        assert_eq!(
            bin_directory(&root.join("temurin-21.0.1_12")),
            PathBuf::from("/home/user/.jdks/temurin-21.0.1_12/bin")
        );
    }

    #[test]
    fn folder_names_are_sanitized() {
        assert_eq!(install_folder_name_for("jdk-21.0.1+12"), "temurin-21.0.1_12");
        assert_eq!(install_folder_name_for("jdk8u392-b08"), "temurin-8u392-b08");
        assert_eq!(
            install_folder_name_for("jdk-17.0.9+9.1"),
            "temurin-17.0.9_9.1"
        );
        assert_eq!(install_folder_name_for("jdk"), "temurin-jdk");
        assert_eq!(install_folder_name_for("weird name/1"), "temurin-weird_name_1");
    }
}
