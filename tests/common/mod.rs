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


#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Sandboxed user home with its own `~/.coffeebar` and shell startup file.
pub struct TestHome {
    dir: TempDir,
}

impl TestHome {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create test home");
        fs::create_dir_all(dir.path().join("home")).unwrap();
        Self { dir }
    }

    pub fn user_home(&self) -> PathBuf {
        self.dir.path().join("home")
    }

    pub fn coffeebar_home(&self) -> PathBuf {
        self.user_home().join(".coffeebar")
    }

    pub fn env_file(&self) -> PathBuf {
        self.coffeebar_home().join("env")
    }

    pub fn rc_file(&self) -> PathBuf {
        self.user_home().join(".bashrc")
    }

    /// Directory to hand to `--root`.
    pub fn jdk_root(&self) -> PathBuf {
        self.dir.path().join("jdks")
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// `coffeebar` with HOME, COFFEEBAR_HOME and SHELL pointing into the sandbox.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("coffeebar").unwrap();
        cmd.env("HOME", self.user_home())
            .env("USERPROFILE", self.user_home())
            .env("COFFEEBAR_HOME", self.coffeebar_home())
            .env("SHELL", "/bin/bash")
            .env("NO_COLOR", "1")
            .env_remove("JAVA_HOME")
            .env_remove("RUST_LOG")
            .env_remove("COFFEEBAR_INSTALL__ROOT")
            .env_remove("COFFEEBAR_API__BASE_URL")
            .env_remove("COFFEEBAR_DISCOVERY__EXTRA_ROOTS");
        cmd
    }

    /// `JAVA_HOME` as written to the shell fragment, if any.
    pub fn persisted_java_home(&self) -> Option<PathBuf> {
        let fragment = fs::read_to_string(self.env_file()).ok()?;
        fragment.lines().find_map(|line| {
            let value = line.strip_prefix("export JAVA_HOME=")?;
            Some(PathBuf::from(value.trim_matches('"')))
        })
    }

    pub fn fake_jdk(&self, name: &str, version: &str) -> PathBuf {
        create_fake_jdk(&self.jdk_root().join(name), version)
    }
}

/// A JDK home whose `bin/java -version` prints an OpenJDK banner on stderr.
pub fn create_fake_jdk(home: &Path, version: &str) -> PathBuf {
    let bin = home.join("bin");
    fs::create_dir_all(&bin).unwrap();

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let java = bin.join("java");
        fs::write(&java, java_script(version)).unwrap();
        fs::set_permissions(&java, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[cfg(windows)]
    fs::write(bin.join("java.exe"), b"").unwrap();

    home.to_path_buf()
}

pub fn java_script(version: &str) -> String {
    format!("#!/bin/sh\necho 'openjdk version \"{version}\" 2023-10-17' 1>&2\n")
}

/// In-memory zip of a JDK rooted at `root`.
pub fn jdk_zip_bytes(root: &str, version: &str) -> Vec<u8> {
    use zip::write::SimpleFileOptions;

    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().unix_permissions(0o755);
    let java = if cfg!(windows) { "java.exe" } else { "java" };

    zip.add_directory(format!("{root}/"), options).unwrap();
    zip.add_directory(format!("{root}/bin/"), options).unwrap();
    zip.start_file(format!("{root}/bin/{java}"), options).unwrap();
    zip.write_all(java_script(version).as_bytes()).unwrap();
    zip.start_file(format!("{root}/release"), options).unwrap();
    zip.write_all(format!("JAVA_VERSION=\"{version}\"\n").as_bytes())
        .unwrap();

    zip.finish().unwrap().into_inner()
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    use sha2::{Digest, Sha256};
    hex::encode(Sha256::digest(bytes))
}
