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


use crate::indicator::{ProgressConfig, ProgressIndicator, ProgressRendererKind, ProgressStyle};
use indicatif::{ProgressBar, ProgressDrawTarget};
use std::io;
use std::time::Duration;

/// Animated bar or spinner on stderr.
pub struct IndicatifProgress {
    progress_bar: Option<ProgressBar>,
}

impl IndicatifProgress {
    pub fn new() -> Self {
        Self { progress_bar: None }
    }

    fn template(config: &ProgressConfig) -> &'static str {
        match (config.total, config.style) {
            (Some(_), ProgressStyle::Bytes) => {
                "{spinner:.green} {prefix} [{bar:40.cyan/blue}] \
                 {bytes}/{total_bytes} ({bytes_per_sec}, {eta}) {msg}"
            }
            (Some(_), ProgressStyle::Count) => {
                "{spinner:.green} {prefix} [{bar:40.cyan/blue}] {pos}/{len} {msg}"
            }
            (None, ProgressStyle::Bytes) => "{spinner:.green} {prefix} {bytes} {msg}",
            (None, ProgressStyle::Count) => "{spinner:.green} {prefix} {msg}",
        }
    }
}

impl Default for IndicatifProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressIndicator for IndicatifProgress {
    fn start(&mut self, config: ProgressConfig) {
        let pb = ProgressBar::with_draw_target(config.total, ProgressDrawTarget::stderr());

        match indicatif::ProgressStyle::default_bar().template(Self::template(&config)) {
            Ok(style) => pb.set_style(style.progress_chars("█▓░").tick_chars("⣾⣽⣻⢿⡿⣟⣯⣷ ")),
            Err(e) => log::debug!("Invalid progress template: {e}"),
        }

        pb.set_prefix(format!("{} {}", config.operation, config.context));
        pb.enable_steady_tick(Duration::from_millis(100));
        self.progress_bar = Some(pb);
    }

    fn update(&mut self, current: u64, total: Option<u64>) {
        if let Some(pb) = &self.progress_bar {
            if let Some(total) = total
                && pb.length() != Some(total)
            {
                pb.set_length(total);
            }
            pb.set_position(current);
        }
    }

    fn set_message(&mut self, message: String) {
        if let Some(pb) = &self.progress_bar {
            pb.set_message(message);
        }
    }

    fn complete(&mut self, message: Option<String>) {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(message.unwrap_or_else(|| "Complete".to_string()));
        }
    }

    fn error(&mut self, message: String) {
        if let Some(pb) = &self.progress_bar {
            pb.abandon_with_message(format!("✗ {message}"));
        }
    }

    fn println(&self, message: &str) -> io::Result<()> {
        match &self.progress_bar {
            Some(pb) if !pb.is_finished() => {
                pb.println(message);
                Ok(())
            }
            _ => {
                use std::io::Write;
                writeln!(io::stderr(), "{message}")
            }
        }
    }

    fn renderer_kind(&self) -> ProgressRendererKind {
        ProgressRendererKind::Tty
    }
}
