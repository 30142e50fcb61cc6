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


use crate::api::models::{AdoptiumAsset, ReleaseDescriptor};
use crate::config::{CoffeebarConfig, DEFAULT_API_BASE_URL};
use crate::error::{CoffeebarError, Result};
use crate::platform::{current_architecture, current_os};
use attohttpc::{Response, Session, StatusCode};
use log::{debug, trace};
use retry::{OperationResult, delay::Exponential, retry_with_index};
use std::thread;
use std::time::Duration;

const DEFAULT_TIMEOUT: u64 = 30;
const MAX_ATTEMPTS: usize = 3;
const INITIAL_BACKOFF_MS: u64 = 1000;
const MAX_RETRY_AFTER_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct ReleaseClient {
    pub(crate) session: Session,
    pub(crate) base_url: String,
    pub(crate) os: String,
    pub(crate) architecture: String,
    pub(crate) initial_backoff_ms: u64,
}

impl ReleaseClient {
    /// Client for the public Adoptium API targeting the host platform.
    pub fn new() -> Self {
        let mut session = Session::new();
        session.header("User-Agent", crate::user_agent::api_client());
        session.timeout(Duration::from_secs(DEFAULT_TIMEOUT));
        session.proxy_settings(attohttpc::ProxySettings::from_env());

        Self {
            session,
            base_url: DEFAULT_API_BASE_URL.to_string(),
            os: current_os(),
            architecture: current_architecture(),
            initial_backoff_ms: INITIAL_BACKOFF_MS,
        }
    }

    pub fn from_config(config: &CoffeebarConfig) -> Self {
        let mut client = Self::new().with_base_url(config.api.base_url.clone());
        if let Some(os) = &config.install.os {
            client.os = os.clone();
        }
        if let Some(architecture) = &config.install.architecture {
            client.architecture = architecture.clone();
        }
        client
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_platform(mut self, os: &str, architecture: &str) -> Self {
        self.os = os.to_string();
        self.architecture = architecture.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.session.timeout(timeout);
        self
    }

    pub fn with_initial_backoff(mut self, backoff: Duration) -> Self {
        self.initial_backoff_ms = backoff.as_millis().max(1) as u64;
        self
    }

    pub fn os(&self) -> &str {
        &self.os
    }

    pub fn architecture(&self) -> &str {
        &self.architecture
    }

    /// Latest Temurin JDK build of `version` for the configured platform.
    ///
    /// `Ok(None)` means the API has no such build (empty result or 404).
    /// Transport failures, other HTTP errors and malformed payloads are
    /// `NetworkError`.
    pub fn fetch_release(&self, version: u32) -> Result<Option<ReleaseDescriptor>> {
        let url = format!("{}/v3/assets/latest/{version}/hotspot", self.base_url);
        debug!(
            "Fetching release for Java {version} ({}/{}) from {url}",
            self.os, self.architecture
        );

        let body = self.execute_with_retry(|| {
            self.session
                .get(&url)
                .param("architecture", &self.architecture)
                .param("image_type", "jdk")
                .param("os", &self.os)
                .param("vendor", "eclipse")
                .send()
        })?;

        let Some(body) = body else {
            debug!("Release API returned 404 for Java {version}");
            return Ok(None);
        };

        let assets: Vec<AdoptiumAsset> = serde_json::from_str(&body).map_err(|e| {
            trace!("Unparseable release payload: {body}");
            CoffeebarError::NetworkError(format!("Invalid response from release API: {e}"))
        })?;

        let descriptor = assets
            .into_iter()
            .find(|asset| {
                asset
                    .binary
                    .image_type
                    .as_deref()
                    .is_none_or(|image| image == "jdk")
            })
            .map(|asset| ReleaseDescriptor::from_asset(version, asset));

        match &descriptor {
            Some(release) => debug!(
                "Java {version} resolves to {} ({})",
                release.release_name, release.file_name
            ),
            None => debug!("No Java {version} build for {}/{}", self.os, self.architecture),
        }
        Ok(descriptor)
    }

    /// Body of a successful response, or `None` on 404.
    fn execute_with_retry<F>(&self, send: F) -> Result<Option<String>>
    where
        F: Fn() -> attohttpc::Result<Response>,
    {
        let delays = Exponential::from_millis_with_factor(self.initial_backoff_ms, 2.0)
            .take(MAX_ATTEMPTS - 1);

        let result = retry_with_index(delays, |current_try| {
            let can_retry = current_try < MAX_ATTEMPTS as u64;

            let response = match send() {
                Ok(response) => response,
                Err(e) => {
                    let error = CoffeebarError::NetworkError(format!(
                        "Failed to reach release API: {e}"
                    ));
                    return if can_retry {
                        debug!("Attempt {current_try} failed, retrying: {error}");
                        OperationResult::Retry(error)
                    } else {
                        OperationResult::Err(error)
                    };
                }
            };

            let status = response.status();
            if status == StatusCode::NOT_FOUND {
                return OperationResult::Ok(None);
            }

            if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
                let error = CoffeebarError::NetworkError(format!(
                    "Release API responded with HTTP {}",
                    status.as_u16()
                ));
                if !can_retry {
                    return OperationResult::Err(error);
                }
                if let Some(seconds) = retry_after_secs(&response) {
                    thread::sleep(Duration::from_secs(seconds.min(MAX_RETRY_AFTER_SECS)));
                }
                debug!("Attempt {current_try} got HTTP {}, retrying", status.as_u16());
                return OperationResult::Retry(error);
            }

            if !response.is_success() {
                return OperationResult::Err(CoffeebarError::NetworkError(format!(
                    "Release API responded with HTTP {} {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown error")
                )));
            }

            match response.text() {
                Ok(body) => OperationResult::Ok(Some(body)),
                Err(e) => OperationResult::Err(CoffeebarError::NetworkError(format!(
                    "Failed to read response body: {e}"
                ))),
            }
        });

        result.map_err(|e| e.error)
    }
}

fn retry_after_secs(response: &Response) -> Option<u64> {
    response
        .headers()
        .get("Retry-After")?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

impl Default for ReleaseClient {
    fn default() -> Self {
        Self::new()
    }
}
