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


use std::sync::OnceLock;

/// Cached (architecture, operating_system) tuple.
static CACHED_PLATFORM: OnceLock<(String, String)> = OnceLock::new();

/// Current platform as (architecture, os), cached after the first call.
pub fn current_platform() -> (String, String) {
    CACHED_PLATFORM
        .get_or_init(|| (current_architecture(), current_os()))
        .clone()
}

/// Detect the current system architecture.
///
/// Maps Rust's target architecture to Adoptium's naming:
/// - `x86_64` → `"x64"`
/// - `x86` → `"x32"`
/// - `aarch64` → `"aarch64"`
/// - `arm` → `"arm"`
/// - `powerpc64` → `"ppc64le"` (little endian) or `"ppc64"` (big endian)
/// - `s390x` → `"s390x"`
/// - Others → `"unknown"`
pub fn current_architecture() -> String {
    #[cfg(target_arch = "x86_64")]
    return "x64".to_string();

    #[cfg(target_arch = "x86")]
    return "x32".to_string();

    #[cfg(target_arch = "aarch64")]
    return "aarch64".to_string();

    #[cfg(target_arch = "arm")]
    return "arm".to_string();

    #[cfg(target_arch = "powerpc64")]
    {
        #[cfg(target_endian = "little")]
        return "ppc64le".to_string();
        #[cfg(target_endian = "big")]
        return "ppc64".to_string();
    }

    #[cfg(target_arch = "s390x")]
    return "s390x".to_string();

    #[cfg(not(any(
        target_arch = "x86_64",
        target_arch = "x86",
        target_arch = "aarch64",
        target_arch = "arm",
        target_arch = "powerpc64",
        target_arch = "s390x"
    )))]
    return "unknown".to_string();
}

/// Detect the current operating system.
///
/// Maps Rust's target OS to Adoptium's naming:
/// - `linux` (glibc) → `"linux"`
/// - `linux` (musl) → `"alpine-linux"`
/// - `windows` → `"windows"`
/// - `macos` → `"mac"`
/// - Others → `"unknown"`
pub fn current_os() -> String {
    #[cfg(all(target_os = "linux", target_env = "musl"))]
    return "alpine-linux".to_string();

    #[cfg(all(target_os = "linux", not(target_env = "musl")))]
    return "linux".to_string();

    #[cfg(target_os = "windows")]
    return "windows".to_string();

    #[cfg(target_os = "macos")]
    return "mac".to_string();

    #[cfg(not(any(target_os = "linux", target_os = "windows", target_os = "macos")))]
    return "unknown".to_string();
}

/// Get a user-friendly description of the current platform
pub fn platform_description() -> String {
    let (arch, os) = current_platform();
    let os_name = match os.as_str() {
        "linux" => "Linux",
        "alpine-linux" => "Alpine Linux (musl)",
        "windows" => "Windows",
        "mac" => "macOS",
        _ => "Unknown platform",
    };
    format!("{os_name} ({arch})")
}
