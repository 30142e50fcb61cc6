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


use crate::indicator::{ProgressFactory, ProgressIndicator, ProgressRendererKind};

/// Step-by-step status lines around a long command, sharing one indicator.
pub struct StatusReporter {
    progress: Box<dyn ProgressIndicator>,
}

impl StatusReporter {
    pub fn new(no_progress: bool) -> Self {
        Self::with_indicator(ProgressFactory::create(no_progress))
    }

    pub fn with_indicator(progress: Box<dyn ProgressIndicator>) -> Self {
        Self { progress }
    }

    /// The indicator to drive a progress bar with.
    pub fn progress(&mut self) -> &mut dyn ProgressIndicator {
        self.progress.as_mut()
    }

    pub fn is_silent(&self) -> bool {
        self.progress.renderer_kind() == ProgressRendererKind::Silent
    }

    pub fn operation(&self, operation: &str, context: &str) {
        let _ = self.progress.println(&format!("{operation} {context}..."));
    }

    pub fn step(&self, message: &str) {
        let _ = self.progress.println(&format!("  {message}"));
    }

    pub fn success(&self, message: &str) {
        let _ = self.progress.success(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicator::{ProgressConfig, SilentProgress};
    use std::io;
    use std::sync::{Arc, Mutex};

    struct RecordingIndicator(Arc<Mutex<Vec<String>>>);

    impl ProgressIndicator for RecordingIndicator {
        fn start(&mut self, config: ProgressConfig) {
            self.0.lock().unwrap().push(format!("start {}", config.operation));
        }

        fn update(&mut self, _current: u64, _total: Option<u64>) {}

        fn set_message(&mut self, _message: String) {}

        fn complete(&mut self, _message: Option<String>) {}

        fn error(&mut self, _message: String) {}

        fn println(&self, message: &str) -> io::Result<()> {
            self.0.lock().unwrap().push(message.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_status_lines() {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let reporter =
            StatusReporter::with_indicator(Box::new(RecordingIndicator(Arc::clone(&lines))));

        reporter.operation("Installing", "Java 21");
        reporter.step("Extracting archive");
        reporter.success("Installed temurin-21.0.1_12");

        assert_eq!(
            *lines.lock().unwrap(),
            vec![
                "Installing Java 21...",
                "  Extracting archive",
                "✓ Installed temurin-21.0.1_12"
            ]
        );
        assert!(!reporter.is_silent());
    }

    #[test]
    fn test_silent_reporter() {
        let mut reporter = StatusReporter::with_indicator(Box::new(SilentProgress));
        assert!(reporter.is_silent());
        reporter.operation("Installing", "Java 21");
        reporter.progress().complete(None);
    }
}
