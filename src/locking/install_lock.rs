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
use crate::paths::install::install_lock_file;
use crate::paths::shared::ensure_directory;
use log::{debug, warn};
use std::fs::{File, OpenOptions, TryLockError};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Exclusive advisory lock serializing installs into one target root.
///
/// The scratch directory is shared by every install into a root, so two
/// concurrent installs would clobber each other. The lock is released on drop.
#[derive(Debug)]
pub struct InstallLock {
    path: PathBuf,
    file: Option<File>,
    acquired_at: Instant,
}

impl InstallLock {
    /// Take the lock for `target_root` without waiting.
    ///
    /// Fails with `InstallInProgress` when another process (or another handle
    /// in this process) already holds it.
    pub fn try_acquire(target_root: &Path) -> Result<Self> {
        ensure_directory(target_root.to_path_buf())?;
        let path = install_lock_file(target_root);
        let file = prepare_lock_file(&path).map_err(|err| {
            CoffeebarError::SystemError(format!(
                "Failed to open lock file {}: {err}",
                path.display()
            ))
        })?;

        loop {
            match file.try_lock() {
                Ok(()) => break,
                Err(TryLockError::WouldBlock) => {
                    return Err(CoffeebarError::InstallInProgress(
                        target_root.display().to_string(),
                    ));
                }
                Err(TryLockError::Error(err)) if err.kind() == io::ErrorKind::Interrupted => {
                    continue;
                }
                Err(TryLockError::Error(err)) if err.kind() == io::ErrorKind::Unsupported => {
                    warn!(
                        "Advisory locking unsupported at {}; continuing without a lock",
                        path.display()
                    );
                    return Ok(Self {
                        path,
                        file: None,
                        acquired_at: Instant::now(),
                    });
                }
                Err(TryLockError::Error(err)) => {
                    return Err(CoffeebarError::SystemError(format!(
                        "Failed to lock {}: {err}",
                        path.display()
                    )));
                }
            }
        }

        debug!("Acquired install lock {}", path.display());
        Ok(Self {
            path,
            file: Some(file),
            acquired_at: Instant::now(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn release(mut self) -> Result<()> {
        self.release_inner()
    }

    fn release_inner(&mut self) -> Result<()> {
        if let Some(file) = self.file.take() {
            file.unlock().map_err(|err| {
                CoffeebarError::SystemError(format!(
                    "Failed to release lock {}: {err}",
                    self.path.display()
                ))
            })?;
            debug!(
                "Released install lock {} after {:.3}s",
                self.path.display(),
                self.acquired_at.elapsed().as_secs_f64()
            );
        }
        Ok(())
    }
}

impl Drop for InstallLock {
    fn drop(&mut self) {
        if let Err(err) = self.release_inner() {
            warn!("{err}");
        }
    }
}

fn prepare_lock_file(lock_path: &Path) -> io::Result<File> {
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(lock_path)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(lock_path, std::fs::Permissions::from_mode(0o600))?;
    }

    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_second_acquire_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let first = InstallLock::try_acquire(temp_dir.path()).unwrap();

        let err = InstallLock::try_acquire(temp_dir.path()).unwrap_err();
        assert!(matches!(err, CoffeebarError::InstallInProgress(_)));

        drop(first);
        let again = InstallLock::try_acquire(temp_dir.path()).unwrap();
        assert!(again.path().ends_with("_temp_extract.lock"));
    }

    #[test]
    fn test_different_roots_do_not_conflict() {
        let temp_dir = TempDir::new().unwrap();
        let _a = InstallLock::try_acquire(&temp_dir.path().join("a")).unwrap();
        let _b = InstallLock::try_acquire(&temp_dir.path().join("b")).unwrap();
    }

    #[test]
    fn test_explicit_release() {
        let temp_dir = TempDir::new().unwrap();
        let lock = InstallLock::try_acquire(temp_dir.path()).unwrap();
        lock.release().unwrap();
        InstallLock::try_acquire(temp_dir.path()).unwrap();
    }
}
