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


use serde::{Deserialize, Serialize};

/// One element of `/v3/assets/latest/{version}/hotspot`.
#[derive(Debug, Clone, Deserialize)]
pub struct AdoptiumAsset {
    pub release_name: String,
    pub binary: AdoptiumBinary,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdoptiumBinary {
    pub package: AdoptiumPackage,
    #[serde(default)]
    pub image_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdoptiumPackage {
    pub link: String,
    pub size: u64,
    pub name: String,
    #[serde(default)]
    pub checksum: Option<String>,
}

/// Everything needed to download and name one release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseDescriptor {
    /// Major version that was requested.
    pub version: u32,
    pub release_name: String,
    pub download_url: String,
    pub size: u64,
    pub file_name: String,
    /// SHA-256 of the archive, hex encoded.
    pub checksum: Option<String>,
}

impl ReleaseDescriptor {
    pub fn from_asset(version: u32, asset: AdoptiumAsset) -> Self {
        let package = asset.binary.package;
        Self {
            version,
            release_name: asset.release_name,
            download_url: package.link,
            size: package.size,
            file_name: package.name,
            checksum: package.checksum.filter(|c| !c.trim().is_empty()),
        }
    }
}
