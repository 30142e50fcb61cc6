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


use crate::error::{CoffeebarError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Ensure the provided path exists, returning it on success.
pub fn ensure_directory(path: PathBuf) -> Result<PathBuf> {
    fs::create_dir_all(&path).map_err(|error| {
        if error.kind() == std::io::ErrorKind::PermissionDenied {
            CoffeebarError::PermissionDenied(path.display().to_string())
        } else {
            CoffeebarError::SystemError(format!(
                "Failed to create directory {}: {error}",
                path.display()
            ))
        }
    })?;
    Ok(path)
}

/// Ensure the parent directory of a file path exists.
pub fn ensure_parent_directory(file: &Path) -> Result<()> {
    if let Some(parent) = file.parent()
        && !parent.as_os_str().is_empty()
    {
        ensure_directory(parent.to_path_buf())?;
    }
    Ok(())
}
