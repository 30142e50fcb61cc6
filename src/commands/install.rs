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


use crate::activation::activate;
use crate::api::{ReleaseClient, ReleaseDescriptor};
use crate::commands::new_sessions_note;
use crate::config::CoffeebarConfig;
use crate::download::{ChannelProgress, DownloadOptions, HttpFileDownloader, render_progress_events};
use crate::env_store::{EnvironmentStore, default_store};
use crate::error::{CoffeebarError, Result};
use crate::indicator::StatusReporter;
use crate::installation::JdkInstaller;
use crate::locking::{CancellationToken, global_token};
use crate::paths::install::install_folder_name_for;
use crate::platform::filesystem::absolute_path;
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct InstallOptions {
    pub version: u32,
    /// Replace an existing installation of the same release.
    pub overwrite: bool,
    /// Activate the JDK once installed.
    pub use_after: bool,
    pub no_progress: bool,
    /// Download timeout in seconds; the configured value when `None`.
    pub timeout: Option<u64>,
    /// Install root; the configured one when `None`.
    pub target_dir: Option<PathBuf>,
}

pub struct InstallCommand<'a> {
    config: &'a CoffeebarConfig,
    client: ReleaseClient,
    store: Box<dyn EnvironmentStore>,
    cancel: CancellationToken,
}

impl<'a> InstallCommand<'a> {
    pub fn new(config: &'a CoffeebarConfig) -> Result<Self> {
        Ok(Self {
            config,
            client: ReleaseClient::from_config(config),
            store: default_store(config)?,
            cancel: global_token(),
        })
    }

    pub fn with_parts(
        config: &'a CoffeebarConfig,
        client: ReleaseClient,
        store: Box<dyn EnvironmentStore>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            config,
            client,
            store,
            cancel,
        }
    }

    /// Fetch, download, verify and unpack the latest build of a major version.
    pub fn execute(&self, options: &InstallOptions) -> Result<PathBuf> {
        let version = options.version;
        info!("Installing Java {version}");
        debug!("Install options: {options:?}");

        let target_root = match &options.target_dir {
            Some(dir) => absolute_path(dir)?,
            None => absolute_path(&self.config.install_root()?)?,
        };

        let mut reporter = StatusReporter::new(options.no_progress);
        reporter.operation("Installing", &format!("Java {version}"));

        let release = self.client.fetch_release(version)?.ok_or_else(|| {
            CoffeebarError::ReleaseNotFound {
                version,
                os: self.client.os().to_string(),
                architecture: self.client.architecture().to_string(),
            }
        })?;
        debug!("Selected release {release:?}");

        let folder = install_folder_name_for(&release.release_name);
        let final_path = target_root.join(&folder);
        if final_path.exists() && !options.overwrite {
            return Err(CoffeebarError::AlreadyExists(format!(
                "{folder} is already installed at {}",
                final_path.display()
            )));
        }

        reporter.step(&format!(
            "Found {} ({})",
            release.release_name, release.file_name
        ));

        let timeout = options
            .timeout
            .map(Duration::from_secs)
            .unwrap_or_else(|| self.config.install_timeout());
        let archive = download_archive_path(&target_root, &release)?;
        self.download(&release, &archive, timeout, &mut reporter)?;

        reporter.step("Extracting archive");
        self.cancel.check()?;
        let installed = JdkInstaller::install(&archive, &target_root, &folder, options.overwrite)?;
        reporter.success(&format!("Installed {folder} at {}", installed.display()));

        if options.use_after {
            let activation = activate(self.store.as_ref(), &installed)?;
            println!("Now using {folder}");
            if activation.newly_added {
                println!("  Added {} to PATH", activation.path_entry);
            }
            println!("  {}", new_sessions_note(self.store.as_ref()));
        } else {
            println!("Run 'coffeebar use {folder}' to activate it");
        }

        Ok(installed)
    }

    /// Stream the archive on a worker thread while this thread renders progress.
    fn download(
        &self,
        release: &ReleaseDescriptor,
        archive: &Path,
        timeout: Duration,
        reporter: &mut StatusReporter,
    ) -> Result<()> {
        let downloader = HttpFileDownloader::new().with_timeout(timeout);
        let options = DownloadOptions::default().with_checksum(release.checksum.clone());
        if options.checksum.is_none() {
            log::warn!("No checksum published for {}; skipping verification", release.file_name);
        }
        let context = format!("Java {}", release.version);
        let (sender, receiver) = mpsc::channel();

        thread::scope(|scope| {
            let worker = scope.spawn(|| {
                let mut progress = ChannelProgress::new(sender);
                downloader.download_with_options(
                    &release.download_url,
                    archive,
                    &options,
                    &mut progress,
                    &self.cancel,
                )
            });

            render_progress_events(receiver, reporter.progress(), &context);

            worker
                .join()
                .map_err(|_| CoffeebarError::SystemError("Download worker panicked".to_string()))?
        })?;

        Ok(())
    }
}

/// Where the archive is downloaded before extraction. Unique per process.
fn download_archive_path(target_root: &Path, release: &ReleaseDescriptor) -> Result<PathBuf> {
    let file_name = Path::new(&release.file_name)
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| {
            CoffeebarError::SecurityError(format!(
                "Release file name '{}' is not a plain file name",
                release.file_name
            ))
        })?;

    if file_name != release.file_name {
        return Err(CoffeebarError::SecurityError(format!(
            "Release file name '{}' is not a plain file name",
            release.file_name
        )));
    }

    Ok(target_root.join(format!("_download-{}-{file_name}", std::process::id())))
}
