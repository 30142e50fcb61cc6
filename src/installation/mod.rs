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


//! Turns a downloaded JDK archive into `target_root/<install folder>`.

use crate::archive::{extract_archive, single_root};
use crate::error::{CoffeebarError, Result};
use crate::locking::InstallLock;
use crate::paths::install::scratch_directory;
use crate::paths::shared::ensure_directory;
use crate::platform::file_ops::remove_dir_all_forced;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

const PREVIOUS_INSTALL_DIR: &str = ".previous";

pub struct JdkInstaller;

impl JdkInstaller {
    /// Extract `archive_path` and move its single top-level directory to
    /// `target_root/install_folder_name`.
    ///
    /// The scratch directory and the archive are removed on every exit path.
    /// An existing destination is an `AlreadyExists` error unless `overwrite`
    /// is set, in which case the old tree is swapped out and restored if the
    /// final rename fails.
    pub fn install(
        archive_path: &Path,
        target_root: &Path,
        install_folder_name: &str,
        overwrite: bool,
    ) -> Result<PathBuf> {
        let _lock = InstallLock::try_acquire(target_root)?;
        let scratch = scratch_directory(target_root);
        let _guard = ScratchGuard {
            scratch: scratch.clone(),
            archive: archive_path.to_path_buf(),
        };

        let final_path = target_root.join(install_folder_name);
        if final_path.exists() && !overwrite {
            return Err(CoffeebarError::AlreadyExists(format!(
                "{install_folder_name} is already installed at {}",
                final_path.display()
            )));
        }

        if scratch.exists() {
            debug!("Removing stale scratch directory {}", scratch.display());
            remove_dir_all_forced(&scratch)?;
        }
        ensure_directory(scratch.clone())?;

        let entries = extract_archive(archive_path, &scratch)?;
        debug!("Extracted {entries} entries into {}", scratch.display());
        let extracted_root = single_root(&scratch)?;

        if final_path.exists() {
            Self::replace_existing(&extracted_root, &final_path, &scratch)?;
        } else {
            fs::rename(&extracted_root, &final_path)?;
        }

        info!("Installed JDK at {}", final_path.display());
        Ok(final_path)
    }

    fn replace_existing(source: &Path, final_path: &Path, scratch: &Path) -> Result<()> {
        let backup = scratch.join(PREVIOUS_INSTALL_DIR);
        debug!(
            "Moving existing installation {} aside to {}",
            final_path.display(),
            backup.display()
        );
        fs::rename(final_path, &backup)?;

        if let Err(err) = fs::rename(source, final_path) {
            warn!("Restoring previous installation after failed replace: {err}");
            if let Err(restore_err) = fs::rename(&backup, final_path) {
                return Err(CoffeebarError::SystemError(format!(
                    "Failed to replace {} ({err}) and to restore the previous \
                     installation ({restore_err})",
                    final_path.display()
                )));
            }
            return Err(err.into());
        }
        Ok(())
    }
}

struct ScratchGuard {
    scratch: PathBuf,
    archive: PathBuf,
}

impl Drop for ScratchGuard {
    fn drop(&mut self) {
        if let Err(err) = remove_dir_all_forced(&self.scratch) {
            warn!(
                "Failed to remove scratch directory {}: {err}",
                self.scratch.display()
            );
        }
        match fs::remove_file(&self.archive) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => warn!("Failed to remove archive {}: {err}", self.archive.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::is_valid_jdk;
    use crate::paths::install::install_folder_name_for;
    use crate::test::fixtures::{as_entries, create_tar_gz, create_zip, jdk_archive_entries};
    use tempfile::TempDir;

    fn jdk_zip(dir: &Path, root: &str) -> PathBuf {
        let archive = dir.join("OpenJDK.zip");
        create_zip(&archive, &as_entries(&jdk_archive_entries(root)));
        archive
    }

    #[test]
    fn test_install_renames_release_folder() {
        let temp_dir = TempDir::new().unwrap();
        let target_root = temp_dir.path().join(".jdks");
        let archive = jdk_zip(temp_dir.path(), "jdk-21.0.1+12");

        let folder = install_folder_name_for("jdk-21.0.1+12");
        let installed = JdkInstaller::install(&archive, &target_root, &folder, false).unwrap();

        assert_eq!(installed, target_root.join("temurin-21.0.1_12"));
        assert!(is_valid_jdk(&installed));
        assert!(!scratch_directory(&target_root).exists());
        assert!(!archive.exists());
    }

    #[test]
    fn test_install_tar_gz() {
        let temp_dir = TempDir::new().unwrap();
        let target_root = temp_dir.path().join(".jdks");
        let archive = temp_dir.path().join("OpenJDK17.tar.gz");
        create_tar_gz(&archive, &as_entries(&jdk_archive_entries("jdk-17.0.9+9")));

        let installed =
            JdkInstaller::install(&archive, &target_root, "temurin-17.0.9_9", false).unwrap();
        assert!(installed.join("release").is_file());
    }

    #[test]
    fn test_install_cleans_up_after_extraction_failure() {
        let temp_dir = TempDir::new().unwrap();
        let target_root = temp_dir.path().join(".jdks");
        let archive = temp_dir.path().join("broken.zip");
        fs::write(&archive, b"not an archive at all").unwrap();

        let err = JdkInstaller::install(&archive, &target_root, "temurin-21", false).unwrap_err();

        assert!(matches!(err, CoffeebarError::Extract(_)));
        assert!(!scratch_directory(&target_root).exists());
        assert!(!archive.exists());
        assert!(!target_root.join("temurin-21").exists());
    }

    #[test]
    fn test_install_rejects_multiple_roots() {
        let temp_dir = TempDir::new().unwrap();
        let target_root = temp_dir.path().join(".jdks");
        let archive = temp_dir.path().join("two.zip");
        create_zip(&archive, &[("a/", None), ("b/", None)]);

        let err = JdkInstaller::install(&archive, &target_root, "temurin-x", false).unwrap_err();
        match err {
            CoffeebarError::Extract(msg) => assert!(msg.starts_with("expected a single")),
            other => panic!("unexpected {other:?}"),
        }
        assert!(!scratch_directory(&target_root).exists());
    }

    #[test]
    fn test_install_existing_without_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let target_root = temp_dir.path().join(".jdks");
        fs::create_dir_all(target_root.join("temurin-21.0.1_12")).unwrap();
        let archive = jdk_zip(temp_dir.path(), "jdk-21.0.1+12");

        let err = JdkInstaller::install(&archive, &target_root, "temurin-21.0.1_12", false)
            .unwrap_err();

        assert!(matches!(err, CoffeebarError::AlreadyExists(_)));
        assert!(!archive.exists());
    }

    #[test]
    fn test_install_overwrite_replaces_tree() {
        let temp_dir = TempDir::new().unwrap();
        let target_root = temp_dir.path().join(".jdks");
        let existing = target_root.join("temurin-21.0.1_12");
        fs::create_dir_all(&existing).unwrap();
        fs::write(existing.join("stale.txt"), "old").unwrap();
        let archive = jdk_zip(temp_dir.path(), "jdk-21.0.1+12");

        let installed =
            JdkInstaller::install(&archive, &target_root, "temurin-21.0.1_12", true).unwrap();

        assert!(is_valid_jdk(&installed));
        assert!(!installed.join("stale.txt").exists());
        assert!(!scratch_directory(&target_root).exists());
    }

    #[test]
    fn test_install_removes_stale_scratch() {
        let temp_dir = TempDir::new().unwrap();
        let target_root = temp_dir.path().join(".jdks");
        let stale = scratch_directory(&target_root).join("leftover");
        fs::create_dir_all(&stale).unwrap();
        let archive = jdk_zip(temp_dir.path(), "jdk-11.0.21+9");

        let installed =
            JdkInstaller::install(&archive, &target_root, "temurin-11.0.21_9", false).unwrap();
        assert!(is_valid_jdk(&installed));
    }

    #[test]
    fn test_install_while_locked() {
        let temp_dir = TempDir::new().unwrap();
        let target_root = temp_dir.path().join(".jdks");
        let archive = jdk_zip(temp_dir.path(), "jdk-21.0.1+12");

        let held = InstallLock::try_acquire(&target_root).unwrap();
        let result = JdkInstaller::install(&archive, &target_root, "temurin-21.0.1_12", false);
        drop(held);

        match result {
            Err(CoffeebarError::InstallInProgress(_)) => assert!(archive.exists()),
            // filesystems without advisory locking proceed unlocked
            Ok(path) => assert!(path.exists()),
            Err(other) => panic!("unexpected {other:?}"),
        }
    }
}
