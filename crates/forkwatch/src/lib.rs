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

use forkwatch_kernel::NetworkName;

pub mod build_info;
pub mod observability;
pub mod panic;

pub const DEFAULT_NETWORK: NetworkName = NetworkName::Preprod;

pub const DEFAULT_PEER_ADDRESS: &str = "127.0.0.1:3001";

/// Where logs go while the terminal is taken over by the display.
pub const DEFAULT_LOG_FILE: &str = "forkwatch.log";

pub mod env_vars {
    pub const PEER_ADDRESS: &str = "FORKWATCH_PEER_ADDRESS";
    pub const NETWORK: &str = "FORKWATCH_NETWORK";
    pub const RETENTION: &str = "FORKWATCH_RETENTION";
    pub const HEADLESS: &str = "FORKWATCH_HEADLESS";
    pub const LOG_FILE: &str = "FORKWATCH_LOG_FILE";
    pub const WITH_JSON_TRACES: &str = "FORKWATCH_WITH_JSON_TRACES";
    pub const COLOR: &str = "FORKWATCH_COLOR";
}

pub mod value_names {
    pub const ENDPOINT: &str = "ENDPOINT";
    pub const NETWORK: &str = "NETWORK";
    pub const SECONDS: &str = "SECONDS";
    pub const FILE: &str = "FILE";
}
