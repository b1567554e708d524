// Copyright 2025 PRAGMA
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

mod built {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const OS: &str = built::CFG_OS;
pub const ARCH: &str = built::CFG_TARGET_ARCH;

/// The package version, suffixed with the short commit hash when built from a git checkout.
pub fn version() -> String {
    match built::GIT_COMMIT_HASH_SHORT {
        Some(commit) => format!("{}+{commit}", built::PKG_VERSION),
        None => built::PKG_VERSION.to_string(),
    }
}
