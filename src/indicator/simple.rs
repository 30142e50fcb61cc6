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


use crate::indicator::{ProgressConfig, ProgressIndicator, ProgressStyle};
use std::io::{self, Write};

/// One line per finished operation. Used for pipes, CI and dumb terminals.
#[derive(Default)]
pub struct SimpleProgress {
    operation: String,
    context: String,
    style: ProgressStyle,
    current: u64,
}

impl SimpleProgress {
    pub fn new() -> Self {
        Self::default()
    }

    fn summary(&self, message: &str) -> String {
        match self.style {
            ProgressStyle::Bytes if self.current > 0 => format!(
                "{} {} - {message} ({})",
                self.operation,
                self.context,
                format_size(self.current)
            ),
            _ => format!("{} {} - {message}", self.operation, self.context),
        }
    }
}

impl ProgressIndicator for SimpleProgress {
    fn start(&mut self, config: ProgressConfig) {
        self.operation = config.operation;
        self.context = config.context;
        self.style = config.style;
        self.current = 0;
    }

    fn update(&mut self, current: u64, _total: Option<u64>) {
        self.current = current;
    }

    fn set_message(&mut self, _message: String) {}

    fn complete(&mut self, message: Option<String>) {
        let message = message.unwrap_or_else(|| "Complete".to_string());
        let _ = writeln!(io::stderr(), "✓ {}", self.summary(&message));
    }

    fn error(&mut self, message: String) {
        let _ = writeln!(io::stderr(), "✗ {}", self.summary(&message));
    }
}

/// Human-readable byte count, e.g. `1.5 KB`.
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit = 0;

    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{size:.1} {}", UNITS[unit])
    }
}
