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


use crate::api::list_supported_versions;
use crate::error::Result;

pub struct VersionsCommand;

impl VersionsCommand {
    pub fn new() -> Result<Self> {
        Ok(Self)
    }

    pub fn execute(&self) -> Result<()> {
        print!("{}", render_versions(list_supported_versions()));
        Ok(())
    }
}

fn render_versions(versions: &[u32]) -> String {
    let mut output = String::from("Long-term support releases:\n");
    for version in versions {
        output.push_str(&format!("  {version}\n"));
    }
    output.push_str("Other major versions can be requested with 'coffeebar install <MAJOR>'.\n");
    output
}
