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

use crate::error::CoffeebarError;

pub fn get_exit_code(error: &CoffeebarError) -> i32 {
    match error {
        CoffeebarError::ValidationError(_) | CoffeebarError::ConfigError(_) => 2,

        CoffeebarError::AmbiguousJdk { .. } => 3,

        CoffeebarError::JdkNotFound(_) | CoffeebarError::ReleaseNotFound { .. } => 4,

        CoffeebarError::PermissionDenied(_) | CoffeebarError::PersistenceFailure(_) => 13,

        CoffeebarError::AlreadyExists(_) => 17,

        CoffeebarError::NetworkError(_) | CoffeebarError::Http(_) | CoffeebarError::Download(_) => {
            20
        }

        CoffeebarError::InstallInProgress(_) => 75, // EX_TEMPFAIL

        CoffeebarError::Cancelled => 130, // 128 + SIGINT

        _ => 1,
    }
}
