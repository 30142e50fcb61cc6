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


use crate::api::{ReleaseClient, list_supported_versions};
use crate::error::CoffeebarError;
use mockito::{Matcher, Server};
use std::time::Duration;

const ASSET_JSON: &str = r#"[
  {
    "binary": {
      "architecture": "x64",
      "image_type": "jdk",
      "os": "linux",
      "package": {
        "checksum": "5a04c9d9e89e685e56b3780ebec4134c723f6e5e9495513a2f23bf5798a3e70f",
        "link": "https://github.com/adoptium/temurin21-binaries/releases/download/jdk-21.0.1%2B12/OpenJDK21U-jdk_x64_linux_hotspot_21.0.1_12.tar.gz",
        "name": "OpenJDK21U-jdk_x64_linux_hotspot_21.0.1_12.tar.gz",
        "size": 205553723
      }
    },
    "release_name": "jdk-21.0.1+12",
    "vendor": "eclipse",
    "version": { "major": 21, "minor": 0, "security": 1, "build": 12 }
  }
]"#;

fn client(server: &Server) -> ReleaseClient {
    ReleaseClient::new()
        .with_base_url(server.url())
        .with_platform("linux", "x64")
        .with_initial_backoff(Duration::from_millis(1))
}

fn query_matcher() -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("architecture".into(), "x64".into()),
        Matcher::UrlEncoded("image_type".into(), "jdk".into()),
        Matcher::UrlEncoded("os".into(), "linux".into()),
        Matcher::UrlEncoded("vendor".into(), "eclipse".into()),
    ])
}

#[test]
fn test_supported_versions_are_lts_lines() {
    assert_eq!(list_supported_versions(), &[8, 11, 17, 21, 25]);
}

#[test]
fn test_fetch_release_parses_first_asset() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/v3/assets/latest/21/hotspot")
        .match_query(query_matcher())
        .match_header("user-agent", Matcher::Regex("^coffeebar/api/".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(ASSET_JSON)
        .create();

    let release = client(&server).fetch_release(21).unwrap().unwrap();

    mock.assert();
    assert_eq!(release.version, 21);
    assert_eq!(release.release_name, "jdk-21.0.1+12");
    assert_eq!(release.size, 205_553_723);
    assert_eq!(
        release.file_name,
        "OpenJDK21U-jdk_x64_linux_hotspot_21.0.1_12.tar.gz"
    );
    assert!(release.download_url.ends_with(&release.file_name));
    assert_eq!(
        release.checksum.as_deref(),
        Some("5a04c9d9e89e685e56b3780ebec4134c723f6e5e9495513a2f23bf5798a3e70f")
    );
}

#[test]
fn test_empty_result_is_none() {
    let mut server = Server::new();
    server
        .mock("GET", "/v3/assets/latest/9/hotspot")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("[]")
        .create();

    assert_eq!(client(&server).fetch_release(9).unwrap(), None);
}

#[test]
fn test_not_found_is_none() {
    let mut server = Server::new();
    server
        .mock("GET", "/v3/assets/latest/99/hotspot")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body(r#"{"errorMessage":"No releases match the request"}"#)
        .create();

    assert_eq!(client(&server).fetch_release(99).unwrap(), None);
}

#[test]
fn test_malformed_payload_is_network_error() {
    let mut server = Server::new();
    server
        .mock("GET", "/v3/assets/latest/21/hotspot")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"unexpected": true}"#)
        .create();

    let err = client(&server).fetch_release(21).unwrap_err();
    assert!(matches!(err, CoffeebarError::NetworkError(_)));
}

#[test]
fn test_client_error_is_not_retried() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/v3/assets/latest/21/hotspot")
        .match_query(Matcher::Any)
        .with_status(400)
        .expect(1)
        .create();

    let err = client(&server).fetch_release(21).unwrap_err();
    mock.assert();
    assert!(matches!(err, CoffeebarError::NetworkError(ref msg) if msg.contains("400")));
}

#[test]
fn test_server_errors_are_retried_then_fail() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/v3/assets/latest/21/hotspot")
        .match_query(Matcher::Any)
        .with_status(503)
        .expect(3)
        .create();

    let err = client(&server).fetch_release(21).unwrap_err();
    mock.assert();
    assert!(matches!(err, CoffeebarError::NetworkError(ref msg) if msg.contains("503")));
}

#[test]
fn test_unreachable_host_is_network_error() {
    let client = ReleaseClient::new()
        .with_base_url("http://127.0.0.1:1".to_string())
        .with_initial_backoff(Duration::from_millis(1))
        .with_timeout(Duration::from_secs(2));

    let err = client.fetch_release(21).unwrap_err();
    assert!(matches!(err, CoffeebarError::NetworkError(_)));
}

#[test]
fn test_platform_overrides_from_config() {
    let mut config = crate::config::CoffeebarConfig::default();
    config.api.base_url = "https://mirror.example.com/".to_string();
    config.install.os = Some("alpine-linux".to_string());
    config.install.architecture = Some("aarch64".to_string());

    let client = ReleaseClient::from_config(&config);
    assert_eq!(client.base_url, "https://mirror.example.com");
    assert_eq!(client.os(), "alpine-linux");
    assert_eq!(client.architecture(), "aarch64");
}
