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


use super::*;
use crate::env_store::MemoryStore;
use crate::platform::filesystem::paths_equal;
use crate::test::fixtures::{create_fake_jdk, create_fake_jdk_home, create_test_record};
use serial_test::serial;
use tempfile::TempDir;

#[test]
fn test_find_jdks_returns_only_valid_homes() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().to_path_buf();

    let valid_a = create_fake_jdk(&root, "temurin-17.0.9_9", "openjdk version \"17.0.9\"");
    let valid_b = create_fake_jdk(&root, "temurin-21.0.1_12", "openjdk version \"21.0.1\"");
    fs::create_dir_all(root.join("not-a-jdk").join("lib")).unwrap();
    fs::create_dir_all(root.join("empty")).unwrap();
    fs::write(root.join("README.txt"), "hello").unwrap();

    let jdks = find_jdks(&[root]);

    assert_eq!(jdks.len(), 2);
    let paths: Vec<_> = jdks.iter().map(|j| j.path.clone()).collect();
    assert!(paths.contains(&valid_a));
    assert!(paths.contains(&valid_b));
    assert!(jdks.iter().all(|j| is_valid_jdk(&j.path)));
}

#[test]
fn test_find_jdks_skips_missing_roots() {
    let temp_dir = TempDir::new().unwrap();
    let present = temp_dir.path().join("present");
    fs::create_dir_all(&present).unwrap();
    create_fake_jdk(&present, "jdk-11", "openjdk version \"11.0.21\"");

    let jdks = find_jdks(&[temp_dir.path().join("missing"), present]);
    assert_eq!(jdks.len(), 1);
    assert_eq!(jdks[0].name, "jdk-11");
}

#[test]
fn test_find_jdks_is_not_recursive() {
    let temp_dir = TempDir::new().unwrap();
    let nested_root = temp_dir.path().join("vendor");
    create_fake_jdk(&nested_root, "jdk-17", "openjdk version \"17\"");

    let jdks = find_jdks(&[temp_dir.path().to_path_buf()]);
    assert!(jdks.is_empty());
}

#[test]
fn test_find_jdks_follows_bundle_layout() {
    let temp_dir = TempDir::new().unwrap();
    let bundle = temp_dir.path().join("temurin-21.jdk");
    let home = bundle.join("Contents").join("Home");
    create_fake_jdk_home(&home, "openjdk version \"21.0.1\"");

    let jdks = find_jdks(&[temp_dir.path().to_path_buf()]);
    assert_eq!(jdks.len(), 1);
    assert_eq!(jdks[0].name, "temurin-21.jdk");
    assert_eq!(jdks[0].path, home);
}

#[test]
fn test_is_valid_jdk() {
    let temp_dir = TempDir::new().unwrap();
    let home = create_fake_jdk(temp_dir.path(), "jdk", "x");
    assert!(is_valid_jdk(&home));
    assert!(!is_valid_jdk(temp_dir.path()));
    assert!(!is_valid_jdk(&temp_dir.path().join("missing")));
}

#[test]
#[cfg(unix)]
fn test_get_jdk_version_reads_stderr() {
    let temp_dir = TempDir::new().unwrap();
    let home = create_fake_jdk(
        temp_dir.path(),
        "jdk-21",
        "openjdk version \"21.0.1\" 2023-10-17",
    );

    assert_eq!(
        get_jdk_version(&home),
        "openjdk version \"21.0.1\" 2023-10-17"
    );
}

#[test]
#[cfg(unix)]
fn test_get_jdk_version_falls_back_to_stdout() {
    let temp_dir = TempDir::new().unwrap();
    let home = temp_dir.path().join("jdk");
    let bin = home.join("bin");
    fs::create_dir_all(&bin).unwrap();
    let java = bin.join("java");
    fs::write(&java, "#!/bin/sh\necho\necho '  java version \"1.8.0_392\"  '\n").unwrap();
    crate::platform::file_ops::make_executable(&java).unwrap();

    assert_eq!(get_jdk_version(&home), "java version \"1.8.0_392\"");
}

#[test]
#[cfg(unix)]
fn test_get_jdk_version_times_out_to_unknown() {
    let temp_dir = TempDir::new().unwrap();
    let home = temp_dir.path().join("jdk");
    let bin = home.join("bin");
    fs::create_dir_all(&bin).unwrap();
    let java = bin.join("java");
    fs::write(&java, "#!/bin/sh\nexec sleep 5\n").unwrap();
    crate::platform::file_ops::make_executable(&java).unwrap();

    let version = get_jdk_version_with_timeout(&home, Duration::from_millis(200));
    assert_eq!(version, UNKNOWN_VERSION);
}

#[test]
fn test_get_jdk_version_without_launcher_is_unknown() {
    let temp_dir = TempDir::new().unwrap();
    assert_eq!(get_jdk_version(temp_dir.path()), UNKNOWN_VERSION);
}

#[test]
fn test_get_current_matches_stored_java_home() {
    let temp_dir = TempDir::new().unwrap();
    let home = create_fake_jdk(temp_dir.path(), "temurin-21", "openjdk version \"21\"");
    let jdks = find_jdks(&[temp_dir.path().to_path_buf()]);

    let stored = format!("{}/", home.display());
    let store = MemoryStore::with_values([(JAVA_HOME, stored)]);

    let current = get_current(&store, &jdks).unwrap().unwrap();
    assert_eq!(current.name, "temurin-21");
}

#[test]
fn test_get_current_without_java_home() {
    let jdks = vec![create_test_record("jdk", "/opt/jdk", "Unknown")];
    let store = MemoryStore::new();
    assert!(get_current(&store, &jdks).unwrap().is_none());
}

#[test]
fn test_get_current_with_unknown_java_home() {
    let jdks = vec![create_test_record("jdk", "/opt/jdk", "Unknown")];
    let store = MemoryStore::with_values([(JAVA_HOME, "/somewhere/else")]);
    assert!(get_current(&store, &jdks).unwrap().is_none());
}

#[test]
fn test_major_version() {
    let cases = [
        ("openjdk version \"21.0.1\" 2023-10-17", Some(21)),
        ("java version \"1.8.0_392\"", Some(8)),
        ("openjdk version \"17\" 2021-09-14", Some(17)),
        ("openjdk 11.0.21 2023-10-17", Some(11)),
        ("Unknown", None),
    ];
    for (line, expected) in cases {
        let record = create_test_record("jdk", "/opt/jdk", line);
        assert_eq!(record.major_version(), expected, "{line}");
    }
}

#[test]
#[serial]
fn test_search_roots_include_install_root_and_extras_once() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = CoffeebarConfig::new(temp_dir.path().to_path_buf()).unwrap();
    let install_root = temp_dir.path().join("jdks");
    config.install.root = Some(install_root.clone());
    config.discovery.extra_roots = vec![temp_dir.path().join("extra"), install_root.clone()];

    let roots = search_roots(&config, &[temp_dir.path().join("cli"), temp_dir.path().join("extra")]);

    let count = |p: &Path| roots.iter().filter(|r| r.as_path() == p).count();
    assert_eq!(count(&install_root), 1);
    assert_eq!(count(&temp_dir.path().join("extra")), 1);
    assert_eq!(count(&temp_dir.path().join("cli")), 1);
}

#[test]
fn test_java_root_on_path() {
    let temp_dir = TempDir::new().unwrap();
    let roots = temp_dir.path().join("jvm");
    let home = create_fake_jdk(&roots, "temurin-21", "openjdk version \"21\"");
    let path_var = std::env::join_paths([home.join("bin")]).unwrap();

    let root = java_root_on_path(Some(path_var)).unwrap();
    assert_eq!(root, fs::canonicalize(&roots).unwrap());
}

#[test]
fn test_java_root_on_path_without_java() {
    let temp_dir = TempDir::new().unwrap();
    let path_var = std::env::join_paths([temp_dir.path()]).unwrap();
    assert_eq!(java_root_on_path(Some(path_var)), None);
}

#[test]
#[serial]
fn test_search_roots_are_absolute() {
    let temp_dir = TempDir::new().unwrap();
    let config = CoffeebarConfig::new(temp_dir.path().to_path_buf()).unwrap();

    let roots = search_roots(&config, &[PathBuf::from("relative-jdks")]);

    assert!(roots.iter().all(|root| root.is_absolute()));
    assert!(roots.iter().any(|root| root.ends_with("relative-jdks")));
}

#[test]
#[cfg(unix)]
fn test_find_jdks_records_absolute_paths() {
    // Root spelled relative to the working directory: `../..` up to `/`, then down.
    let temp_dir = TempDir::new().unwrap();
    create_fake_jdk(temp_dir.path(), "temurin-21.0.1", "openjdk version \"21.0.1\"");
    let cwd = std::env::current_dir().unwrap();
    let mut relative = PathBuf::new();
    for _ in cwd.components().skip(1) {
        relative.push("..");
    }
    let root = temp_dir.path().strip_prefix("/").unwrap_or(temp_dir.path());
    let relative = relative.join(root);

    let jdks = find_jdks(&[relative]);

    assert_eq!(jdks.len(), 1);
    assert!(jdks[0].path.is_absolute());
    assert!(paths_equal(&jdks[0].path, &temp_dir.path().join("temurin-21.0.1")));
}
