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


use super::checksum::verify_checksum;
use super::client::{AttohttpcClient, HttpClient, HttpResponse};
use super::options::DownloadOptions;
use super::progress::ProgressReporter;
use crate::error::{CoffeebarError, Result};
use crate::locking::CancellationToken;
use crate::paths::shared::ensure_parent_directory;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::NamedTempFile;

pub const DOWNLOAD_CHUNK_SIZE: usize = 8192;

pub struct HttpFileDownloader {
    pub(crate) http_client: Box<dyn HttpClient>,
}

impl Default for HttpFileDownloader {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpFileDownloader {
    pub fn new() -> Self {
        Self::with_client(Box::new(AttohttpcClient::new()))
    }

    pub fn with_client(http_client: Box<dyn HttpClient>) -> Self {
        Self { http_client }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http_client.set_timeout(timeout);
        self
    }

    /// Stream `url` into `destination`, replacing any existing file.
    pub fn download(
        &self,
        url: &str,
        destination: &Path,
        reporter: &mut dyn ProgressReporter,
        cancel: &CancellationToken,
    ) -> Result<PathBuf> {
        self.download_with_options(url, destination, &DownloadOptions::default(), reporter, cancel)
    }

    /// Like [`download`](Self::download), additionally enforcing `options`.
    ///
    /// Data goes to a temporary file next to `destination` that is only
    /// persisted once the transfer is complete and verified, so failures and
    /// cancellation never leave a partial archive behind.
    pub fn download_with_options(
        &self,
        url: &str,
        destination: &Path,
        options: &DownloadOptions,
        reporter: &mut dyn ProgressReporter,
        cancel: &CancellationToken,
    ) -> Result<PathBuf> {
        cancel.check()?;
        ensure_parent_directory(destination)?;

        let parent = destination
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut temp_file = NamedTempFile::new_in(parent)?;

        log::debug!("Downloading {url} to {}", destination.display());
        let response = self.http_client.get(url)?;
        validate_response(response.as_ref(), options.max_size)?;
        let total_bytes = declared_length(response.as_ref());

        reporter.on_start(total_bytes);
        let written = copy_chunks(
            response,
            temp_file.as_file_mut(),
            total_bytes,
            options.max_size,
            reporter,
            cancel,
        )?;

        if total_bytes > 0 && written < total_bytes {
            return Err(CoffeebarError::NetworkError(format!(
                "Connection closed after {written} of {total_bytes} bytes"
            )));
        }

        if let Some(expected) = &options.checksum {
            verify_checksum(temp_file.path(), expected)?;
        }

        temp_file.persist(destination).map_err(|e| {
            CoffeebarError::Download(format!(
                "Failed to move download into {}: {}",
                destination.display(),
                e.error
            ))
        })?;

        reporter.on_complete();
        log::debug!("Downloaded {written} bytes to {}", destination.display());
        Ok(destination.to_path_buf())
    }
}

fn validate_response(response: &dyn HttpResponse, max_size: u64) -> Result<()> {
    let status = response.status();

    if !(200..300).contains(&status) {
        return Err(CoffeebarError::NetworkError(format!(
            "Download failed with HTTP status {status}"
        )));
    }

    if let Some(length) = response
        .header("Content-Length")
        .and_then(|v| v.trim().parse::<u64>().ok())
        && length > max_size
    {
        return Err(CoffeebarError::ValidationError(format!(
            "Download size {length} exceeds maximum allowed size {max_size}"
        )));
    }

    Ok(())
}

/// Content-Length, or 0 when the server did not declare one.
fn declared_length(response: &dyn HttpResponse) -> u64 {
    response
        .header("Content-Length")
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(0)
}

fn copy_chunks(
    mut response: Box<dyn HttpResponse>,
    file: &mut std::fs::File,
    total_bytes: u64,
    max_size: u64,
    reporter: &mut dyn ProgressReporter,
    cancel: &CancellationToken,
) -> Result<u64> {
    let mut writer = BufWriter::new(file);
    let mut downloaded = 0u64;
    let mut buffer = vec![0; DOWNLOAD_CHUNK_SIZE];

    loop {
        cancel.check()?;

        match response.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => {
                writer.write_all(&buffer[..n])?;
                downloaded += n as u64;

                if downloaded > max_size {
                    return Err(CoffeebarError::ValidationError(format!(
                        "Download exceeds maximum allowed size {max_size}"
                    )));
                }

                reporter.on_progress(downloaded, total_bytes);
            }
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => {
                return Err(CoffeebarError::NetworkError(format!(
                    "Connection lost after {downloaded} bytes: {e}"
                )));
            }
        }
    }

    writer.flush()?;
    Ok(downloaded)
}

#[cfg(test)]
#[path = "http_file_downloader_tests.rs"]
mod http_file_downloader_tests;
