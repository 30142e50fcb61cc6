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


use crate::commands::discover;
use crate::config::CoffeebarConfig;
use crate::discovery::{JdkRecord, get_current};
use crate::env_store::{EnvironmentStore, default_store};
use crate::error::Result;
use colored::Colorize;
use comfy_table::{Cell, Color, Table};
use std::path::PathBuf;

pub struct ListCommand<'a> {
    config: &'a CoffeebarConfig,
    store: Box<dyn EnvironmentStore>,
}

impl<'a> ListCommand<'a> {
    pub fn new(config: &'a CoffeebarConfig) -> Result<Self> {
        Ok(Self::with_store(config, default_store(config)?))
    }

    pub fn with_store(config: &'a CoffeebarConfig, store: Box<dyn EnvironmentStore>) -> Self {
        Self { config, store }
    }

    pub fn execute(&self, extra_roots: &[PathBuf]) -> Result<()> {
        let jdks = discover(self.config, extra_roots);

        if jdks.is_empty() {
            println!("No JDKs found");
            println!(
                "Use 'coffeebar install <MAJOR>' to install one, or '--root <DIR>' to search \
                 another directory"
            );
            return Ok(());
        }

        let current = get_current(self.store.as_ref(), &jdks)?;
        println!("{}", render_table(&display_order(&jdks), current));

        if current.is_none() {
            println!(
                "\n{} none of these is active; run 'coffeebar use <NAME>'",
                "Note:".yellow().bold()
            );
        }
        Ok(())
    }
}

/// Major version ascending, then name; JDKs with an unreadable version go last.
fn display_order(jdks: &[JdkRecord]) -> Vec<&JdkRecord> {
    let mut ordered: Vec<&JdkRecord> = jdks.iter().collect();
    ordered.sort_by(|a, b| {
        let (a_major, b_major) = (a.major_version(), b.major_version());
        a_major
            .is_none()
            .cmp(&b_major.is_none())
            .then(a_major.cmp(&b_major))
            .then_with(|| a.name.cmp(&b.name))
    });
    ordered
}

fn render_table(jdks: &[&JdkRecord], current: Option<&JdkRecord>) -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_BORDERS_ONLY);
    table.set_header(vec![
        Cell::new(""),
        Cell::new("Name"),
        Cell::new("Version"),
        Cell::new("Path"),
    ]);

    for jdk in jdks {
        let is_current = current.is_some_and(|c| c == *jdk);
        let marker = if is_current {
            Cell::new("*").fg(Color::Green)
        } else {
            Cell::new("")
        };
        let name = if is_current {
            Cell::new(&jdk.name).fg(Color::Green)
        } else {
            Cell::new(&jdk.name)
        };
        table.add_row(vec![
            marker,
            name,
            Cell::new(&jdk.version),
            Cell::new(jdk.path.display()),
        ]);
    }
    table
}
