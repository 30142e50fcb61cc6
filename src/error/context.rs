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

use crate::error::CoffeebarError;
use std::fmt;

pub struct ErrorContext<'a> {
    pub error: &'a CoffeebarError,
    pub suggestion: Option<String>,
    pub details: Option<String>,
}

impl<'a> ErrorContext<'a> {
    pub fn new(error: &'a CoffeebarError) -> Self {
        let (suggestion, details) = match error {
            CoffeebarError::JdkNotFound(query) => {
                let suggestion = Some(format!(
                    "Run 'coffeebar list' to see discovered JDKs, pass '--root <DIR>' to scan an \
                     extra directory, or give the full path of a JDK home instead of '{query}'."
                ));
                (suggestion, None)
            }
            CoffeebarError::AmbiguousJdk { candidates, .. } => {
                let suggestion =
                    Some("Use a longer name or the full path to pick one JDK.".to_string());
                let details = Some(format!(
                    "Matches:\n{}",
                    candidates
                        .iter()
                        .map(|c| format!("  - {c}"))
                        .collect::<Vec<_>>()
                        .join("\n")
                ));
                (suggestion, details)
            }
            CoffeebarError::ReleaseNotFound { .. } => {
                let suggestion = Some(
                    "Run 'coffeebar versions' to see the long-term-support versions.".to_string(),
                );
                (suggestion, None)
            }
            CoffeebarError::PersistenceFailure(msg) => {
                let suggestion = if cfg!(windows) {
                    Some(
                        "Check that your account may write HKEY_CURRENT_USER\\Environment."
                            .to_string(),
                    )
                } else {
                    Some(
                        "Check that your shell startup file and ~/.coffeebar are writable."
                            .to_string(),
                    )
                };
                let details = Some(msg.clone());
                (suggestion, details)
            }
            CoffeebarError::PermissionDenied(path) => {
                let suggestion = if cfg!(unix) {
                    Some(format!(
                        "Try running with sudo or ensure you have write permissions to: {path}"
                    ))
                } else {
                    Some(format!(
                        "Run as Administrator or ensure you have write permissions to: {path}"
                    ))
                };
                (suggestion, None)
            }
            CoffeebarError::NetworkError(msg) => {
                let suggestion = Some(
                    "Check your internet connection and proxy settings (HTTPS_PROXY) and try \
                     again."
                        .to_string(),
                );
                let details = Some(format!("Network issue: {msg}"));
                (suggestion, details)
            }
            CoffeebarError::Download(msg) => {
                let suggestion = Some(
                    "Check your internet connection and try again. Use --timeout to increase \
                     timeout if needed."
                        .to_string(),
                );
                let details = Some(format!("Download failed: {msg}"));
                (suggestion, details)
            }
            CoffeebarError::Extract(msg) => {
                let suggestion =
                    Some("Ensure you have enough disk space and try again.".to_string());
                let details = Some(format!("Extraction failed: {msg}"));
                (suggestion, details)
            }
            CoffeebarError::ChecksumMismatch {
                expected, actual, ..
            } => {
                let suggestion = Some(
                    "Try downloading again. If the problem persists, the file may be corrupted at \
                     the source."
                        .to_string(),
                );
                let details = Some(format!("Expected: {expected}\nActual:   {actual}"));
                (suggestion, details)
            }
            CoffeebarError::AlreadyExists(_) => {
                let suggestion =
                    Some("Pass --overwrite to replace the existing installation.".to_string());
                (suggestion, None)
            }
            CoffeebarError::InstallInProgress(_) => {
                let suggestion = Some(
                    "Another coffeebar process is installing into the same directory. Wait for \
                     it to finish and try again."
                        .to_string(),
                );
                (suggestion, None)
            }
            CoffeebarError::ConfigError(msg) => {
                let suggestion = Some(
                    "Check ~/.coffeebar/config.toml and COFFEEBAR_* environment variables."
                        .to_string(),
                );
                let details = Some(msg.clone());
                (suggestion, details)
            }
            CoffeebarError::Http(http_err) => {
                let suggestion = Some(
                    "Check your internet connection and proxy settings and try again.".to_string(),
                );
                let details = Some(format!("HTTP error: {http_err}"));
                (suggestion, details)
            }
            _ => (None, None),
        };

        ErrorContext {
            error,
            suggestion,
            details,
        }
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestion = Some(suggestion);
        self
    }

    pub fn with_details(mut self, details: String) -> Self {
        self.details = Some(details);
        self
    }
}

impl<'a> fmt::Display for ErrorContext<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: {}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\n\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}
