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


//! Terminal progress rendering for long operations (downloads, extraction).
//!
//! Renderers run on the presentation thread only. Worker threads report
//! through [`crate::download::ProgressReporter`] and never touch these types.

mod factory;
mod indicatif;
mod silent;
mod simple;
mod status;
pub mod types;

pub use factory::ProgressFactory;
pub use self::indicatif::IndicatifProgress;
pub use silent::SilentProgress;
pub use simple::SimpleProgress;
pub use status::StatusReporter;
pub use types::{ProgressConfig, ProgressRendererKind, ProgressStyle};

use std::io::{self, Write};

pub trait ProgressIndicator: Send + Sync {
    /// Begin an operation. A config with a total renders a bar, one without a spinner.
    fn start(&mut self, config: ProgressConfig);

    /// Move to `current`; `total` replaces the configured total when given.
    fn update(&mut self, current: u64, total: Option<u64>);

    fn set_message(&mut self, message: String);

    /// Finish successfully. `None` shows "Complete".
    fn complete(&mut self, message: Option<String>);

    fn error(&mut self, message: String);

    /// Print a line without corrupting an active bar.
    fn println(&self, message: &str) -> io::Result<()> {
        writeln!(io::stderr(), "{message}")
    }

    fn success(&self, message: &str) -> io::Result<()> {
        self.println(&format!("✓ {message}"))
    }

    fn renderer_kind(&self) -> ProgressRendererKind {
        ProgressRendererKind::NonTty
    }
}
