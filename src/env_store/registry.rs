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


//! `HKEY_CURRENT_USER\Environment` backed store.

use super::{EnvironmentStore, merge_path_entry};
use crate::error::{CoffeebarError, Result};
use std::ffi::OsStr;
use std::os::windows::ffi::OsStrExt;
use std::ptr;
use winapi::shared::minwindef::{DWORD, HKEY, LPARAM};
use winapi::shared::winerror::{
    ERROR_ACCESS_DENIED, ERROR_FILE_NOT_FOUND, ERROR_MORE_DATA, ERROR_SUCCESS,
};
use winapi::um::winnt::{KEY_QUERY_VALUE, KEY_SET_VALUE, REG_EXPAND_SZ, REG_OPTION_NON_VOLATILE, REG_SZ};
use winapi::um::winreg::{
    HKEY_CURRENT_USER, RRF_NOEXPAND, RRF_RT_REG_EXPAND_SZ, RRF_RT_REG_SZ, RegCloseKey,
    RegCreateKeyExW, RegGetValueW, RegSetValueExW,
};
use winapi::um::winuser::{HWND_BROADCAST, SMTO_ABORTIFHUNG, SendMessageTimeoutW, WM_SETTINGCHANGE};

const ENVIRONMENT_KEY: &str = "Environment";
const PATH_VALUE: &str = "Path";
const BROADCAST_TIMEOUT_MS: u32 = 5000;

/// Per-user environment in the Windows registry.
///
/// `Path` is written as `REG_EXPAND_SZ` so `%JAVA_HOME%` stays an indirection;
/// every other value is `REG_SZ`.
#[derive(Debug, Default, Clone)]
pub struct RegistryStore;

impl RegistryStore {
    pub fn new() -> Self {
        Self
    }

    fn read_value(&self, name: &str) -> Result<Option<String>> {
        let sub_key = to_wide(ENVIRONMENT_KEY);
        let value_name = to_wide(name);
        let flags = RRF_RT_REG_SZ | RRF_RT_REG_EXPAND_SZ | RRF_NOEXPAND;

        let mut size: DWORD = 0;
        let status = unsafe {
            RegGetValueW(
                HKEY_CURRENT_USER,
                sub_key.as_ptr(),
                value_name.as_ptr(),
                flags,
                ptr::null_mut(),
                ptr::null_mut(),
                &mut size,
            )
        } as DWORD;
        if status == ERROR_FILE_NOT_FOUND {
            return Ok(None);
        }
        check_status(status, "read", name)?;

        loop {
            let mut buffer: Vec<u16> = vec![0; (size as usize).div_ceil(2) + 1];
            let mut byte_len = (buffer.len() * 2) as DWORD;
            let status = unsafe {
                RegGetValueW(
                    HKEY_CURRENT_USER,
                    sub_key.as_ptr(),
                    value_name.as_ptr(),
                    flags,
                    ptr::null_mut(),
                    buffer.as_mut_ptr().cast(),
                    &mut byte_len,
                )
            } as DWORD;

            match status {
                ERROR_SUCCESS => {
                    let chars = (byte_len as usize) / 2;
                    let text = &buffer[..chars.min(buffer.len())];
                    let end = text.iter().position(|&c| c == 0).unwrap_or(text.len());
                    return Ok(Some(String::from_utf16_lossy(&text[..end])));
                }
                ERROR_MORE_DATA => size = byte_len,
                ERROR_FILE_NOT_FOUND => return Ok(None),
                other => {
                    check_status(other, "read", name)?;
                }
            }
        }
    }

    fn write_value(&self, name: &str, value: &str, value_type: DWORD) -> Result<()> {
        let sub_key = to_wide(ENVIRONMENT_KEY);
        let value_name = to_wide(name);
        let data = to_wide(value);

        let mut key: HKEY = ptr::null_mut();
        let status = unsafe {
            RegCreateKeyExW(
                HKEY_CURRENT_USER,
                sub_key.as_ptr(),
                0,
                ptr::null_mut(),
                REG_OPTION_NON_VOLATILE,
                KEY_SET_VALUE | KEY_QUERY_VALUE,
                ptr::null_mut(),
                &mut key,
                ptr::null_mut(),
            )
        } as DWORD;
        check_status(status, "open", name)?;

        let status = unsafe {
            RegSetValueExW(
                key,
                value_name.as_ptr(),
                0,
                value_type,
                data.as_ptr().cast(),
                (data.len() * 2) as DWORD,
            )
        } as DWORD;
        unsafe {
            RegCloseKey(key);
        }
        check_status(status, "write", name)?;

        broadcast_environment_change();
        Ok(())
    }
}

impl EnvironmentStore for RegistryStore {
    fn get(&self, name: &str) -> Result<Option<String>> {
        self.read_value(name)
    }

    fn set(&self, name: &str, value: &str) -> Result<()> {
        let value_type = if name.eq_ignore_ascii_case(PATH_VALUE) {
            REG_EXPAND_SZ
        } else {
            REG_SZ
        };
        log::debug!("Setting HKCU\\Environment\\{name}");
        self.write_value(name, value, value_type)
    }

    fn append_to_path(&self, entry: &str) -> Result<bool> {
        let current = self.read_value(PATH_VALUE)?.unwrap_or_default();
        match merge_path_entry(&current, entry, ';') {
            Some(merged) => {
                self.write_value(PATH_VALUE, &merged, REG_EXPAND_SZ)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn java_home_bin_entry(&self) -> String {
        r"%JAVA_HOME%\bin".to_string()
    }

    fn describe(&self) -> String {
        r"HKEY_CURRENT_USER\Environment".to_string()
    }
}

/// Tell running applications (Explorer in particular) that the environment changed.
fn broadcast_environment_change() {
    let environment = to_wide(ENVIRONMENT_KEY);
    let mut result: usize = 0;
    let sent = unsafe {
        SendMessageTimeoutW(
            HWND_BROADCAST,
            WM_SETTINGCHANGE,
            0,
            environment.as_ptr() as LPARAM,
            SMTO_ABORTIFHUNG,
            BROADCAST_TIMEOUT_MS,
            &mut result,
        )
    };
    if sent == 0 {
        log::warn!("WM_SETTINGCHANGE broadcast timed out; open a new terminal to pick up changes");
    }
}

fn check_status(status: DWORD, action: &str, name: &str) -> Result<()> {
    match status {
        ERROR_SUCCESS => Ok(()),
        ERROR_ACCESS_DENIED => Err(CoffeebarError::PersistenceFailure(format!(
            "Access denied when trying to {action} HKCU\\Environment\\{name}"
        ))),
        code => Err(CoffeebarError::PersistenceFailure(format!(
            "Failed to {action} HKCU\\Environment\\{name} (error {code})"
        ))),
    }
}

fn to_wide(value: &str) -> Vec<u16> {
    OsStr::new(value).encode_wide().chain(Some(0)).collect()
}
