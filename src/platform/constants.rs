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


//! Platform-specific constants and utility functions.

/// Separator used by PATH-like variables.
pub fn path_separator() -> char {
    #[cfg(windows)]
    return ';';
    #[cfg(not(windows))]
    return ':';
}

/// Get the executable file extension for the current platform
pub fn executable_extension() -> &'static str {
    #[cfg(windows)]
    return ".exe";
    #[cfg(not(windows))]
    return "";
}

/// Add the platform-specific executable extension to a file name
pub fn with_executable_extension(name: &str) -> String {
    format!("{name}{}", executable_extension())
}

/// File name of the Java launcher inside a JDK's `bin` directory.
pub fn java_executable_name() -> String {
    with_executable_extension("java")
}

pub fn coffeebar_binary_name() -> &'static str {
    #[cfg(windows)]
    return "coffeebar.exe";
    #[cfg(not(windows))]
    return "coffeebar";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_separator() {
        let sep = path_separator();
        #[cfg(windows)]
        assert_eq!(sep, ';');
        #[cfg(not(windows))]
        assert_eq!(sep, ':');
    }

    #[test]
    fn test_java_executable_name() {
        let java = java_executable_name();
        #[cfg(windows)]
        assert_eq!(java, "java.exe");
        #[cfg(not(windows))]
        assert_eq!(java, "java");
    }

    #[test]
    fn test_coffeebar_binary_name_has_extension() {
        assert!(coffeebar_binary_name().ends_with(executable_extension()));
        assert!(coffeebar_binary_name().starts_with("coffeebar"));
    }
}
