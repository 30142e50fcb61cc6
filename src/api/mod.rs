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


//! Adoptium release API: which Temurin build to fetch for a major version.

mod client;
mod models;
#[cfg(test)]
mod tests;

pub use client::ReleaseClient;
pub use models::{AdoptiumAsset, AdoptiumBinary, AdoptiumPackage, ReleaseDescriptor};

/// Long-term-support lines offered as a hint. Any other major version is still requested.
const SUPPORTED_VERSIONS: &[u32] = &[8, 11, 17, 21, 25];

pub fn list_supported_versions() -> &'static [u32] {
    SUPPORTED_VERSIONS
}
