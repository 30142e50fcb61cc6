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


//! Path comparison that tolerates the different spellings of one directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Compare two paths the way a user would: canonicalized when possible,
/// separator-normalized, trailing separators ignored, and case-insensitive
/// on Windows and macOS.
pub fn paths_equal(left: &Path, right: &Path) -> bool {
    normalize_for_comparison(left) == normalize_for_comparison(right)
}

/// Same comparison for a raw string such as a stored `JAVA_HOME` value.
pub fn path_str_equal(left: &str, right: &Path) -> bool {
    let left = left.trim();
    !left.is_empty() && paths_equal(Path::new(left), right)
}

pub fn normalize_for_comparison(path: &Path) -> String {
    let resolved = fs::canonicalize(path)
        .map(strip_verbatim_prefix)
        .unwrap_or_else(|_| path.to_path_buf());

    let mut normalized = resolved.to_string_lossy().replace('\\', "/");
    while normalized.len() > 1 && normalized.ends_with('/') {
        normalized.pop();
    }

    if cfg!(any(windows, target_os = "macos")) {
        normalized.to_lowercase()
    } else {
        normalized
    }
}

/// `path` resolved against the working directory, without following links.
///
/// Values that end up in `JAVA_HOME` or PATH must not depend on the cwd of
/// the process that wrote them.
pub fn absolute_path(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    std::path::absolute(path)
}

/// Drop the `\\?\` prefix `canonicalize` adds on Windows.
pub fn strip_verbatim_prefix(path: PathBuf) -> PathBuf {
    let text = path.to_string_lossy();
    if let Some(rest) = text.strip_prefix(r"\\?\UNC\") {
        PathBuf::from(format!(r"\\{rest}"))
    } else if let Some(rest) = text.strip_prefix(r"\\?\") {
        PathBuf::from(rest)
    } else {
        path
    }
}
