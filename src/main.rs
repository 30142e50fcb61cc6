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


use clap::{Parser, Subcommand};
use coffeebar::commands::current::CurrentCommand;
use coffeebar::commands::install::{InstallCommand, InstallOptions};
use coffeebar::commands::list::ListCommand;
use coffeebar::commands::register::RegisterCommand;
use coffeebar::commands::use_jdk::UseCommand;
use coffeebar::commands::versions::VersionsCommand;
use coffeebar::config::new_coffeebar_config;
use coffeebar::error::{CoffeebarError, Result, format_error_with_color, get_exit_code};
use coffeebar::logging;
use std::io::IsTerminal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "coffeebar")]
#[command(author, version, about = "Find, switch and install JDKs", long_about = None)]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List discovered JDKs
    #[command(visible_alias = "ls")]
    List {
        /// Additional directory to search (repeatable)
        #[arg(long = "root", value_name = "DIR")]
        roots: Vec<PathBuf>,
    },

    /// Show the persistently active JDK
    Current {
        /// Output in JSON format
        #[arg(long)]
        json: bool,

        /// Additional directory to search (repeatable)
        #[arg(long = "root", value_name = "DIR")]
        roots: Vec<PathBuf>,
    },

    /// Make a JDK the default for new sessions
    #[command(visible_alias = "switch")]
    Use {
        /// JDK name (or unique part of it) or a JDK home path
        jdk: String,

        /// Additional directory to search (repeatable)
        #[arg(long = "root", value_name = "DIR")]
        roots: Vec<PathBuf>,
    },

    /// Download and install the latest Temurin build of a major version
    #[command(visible_alias = "i")]
    Install {
        /// Major Java version, e.g. 21
        version: u32,

        /// Replace an existing installation of the same release
        #[arg(long)]
        overwrite: bool,

        /// Activate the JDK after installing it
        #[arg(long = "use")]
        use_after: bool,

        /// Disable progress indicators
        #[arg(long)]
        no_progress: bool,

        /// Download timeout in seconds
        #[arg(long, value_name = "SECONDS")]
        timeout: Option<u64>,

        /// Install root (default: ~/.jdks)
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },

    /// List the long-term support versions offered for install
    Versions,

    /// Add a directory (default: coffeebar's own) to the persistent PATH
    #[command(visible_alias = "add-to-path")]
    Register {
        dir: Option<PathBuf>,
    },
}

fn report_error(error: &CoffeebarError) -> ! {
    let use_color = std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none();
    eprintln!("{}", format_error_with_color(error, use_color));
    std::process::exit(get_exit_code(error));
}

fn main() {
    let cli = Cli::parse();

    logging::setup_logger(cli.verbose);

    let config = match new_coffeebar_config() {
        Ok(config) => config,
        Err(e) => report_error(&e),
    };

    let result: Result<()> = (|| match cli.command {
        Commands::List { roots } => ListCommand::new(&config)?.execute(&roots),
        Commands::Current { json, roots } => CurrentCommand::new(&config)?.execute(&roots, json),
        Commands::Use { jdk, roots } => UseCommand::new(&config)?.execute(&jdk, &roots),
        Commands::Install {
            version,
            overwrite,
            use_after,
            no_progress,
            timeout,
            dir,
        } => {
            let command = InstallCommand::new(&config)?;
            command
                .execute(&InstallOptions {
                    version,
                    overwrite,
                    use_after,
                    no_progress,
                    timeout,
                    target_dir: dir,
                })
                .map(|_| ())
        }
        Commands::Versions => VersionsCommand::new()?.execute(),
        Commands::Register { dir } => RegisterCommand::new(&config)?
            .execute(dir.as_deref())
            .map(|_| ()),
    })();

    if let Err(e) = result {
        report_error(&e);
    }
}
