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


//! Platform detection utilities for the entire application.
//!
//! Host OS and architecture are reported in Adoptium API naming so they can be
//! passed straight into release queries.

pub mod file_ops;
pub mod filesystem;
pub mod process;
pub mod shell;

mod constants;
mod detection;

pub use constants::{
    coffeebar_binary_name, executable_extension, java_executable_name, path_separator,
    with_executable_extension,
};
pub use detection::{current_architecture, current_os, current_platform, platform_description};
