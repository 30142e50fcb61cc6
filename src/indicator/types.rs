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


/// What to render when an operation starts.
#[derive(Debug, Clone)]
pub struct ProgressConfig {
    /// Verb shown first, e.g. "Downloading".
    pub operation: String,
    /// Subject, e.g. "Java 21".
    pub context: String,
    /// `None` renders a spinner.
    pub total: Option<u64>,
    pub style: ProgressStyle,
}

impl ProgressConfig {
    pub fn new(
        operation: impl Into<String>,
        context: impl Into<String>,
        style: ProgressStyle,
    ) -> Self {
        Self {
            operation: operation.into(),
            context: context.into(),
            total: None,
            style,
        }
    }

    pub fn with_total(mut self, total: u64) -> Self {
        self.total = Some(total);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressStyle {
    /// Byte counts with throughput and ETA.
    Bytes,
    #[default]
    Count,
}

/// Which renderer a [`super::ProgressIndicator`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressRendererKind {
    Tty,
    NonTty,
    Silent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_without_total_is_indeterminate() {
        let config = ProgressConfig::new("Extracting", "Java 17", ProgressStyle::Count);
        assert_eq!(config.total, None);
        assert_eq!(config.operation, "Extracting");
    }

    #[test]
    fn test_config_with_total() {
        let config =
            ProgressConfig::new("Downloading", "Java 17", ProgressStyle::Bytes).with_total(4096);
        assert_eq!(config.total, Some(4096));
        assert_eq!(config.style, ProgressStyle::Bytes);
    }

    #[test]
    fn test_default_style_is_count() {
        assert_eq!(ProgressStyle::default(), ProgressStyle::Count);
    }
}
