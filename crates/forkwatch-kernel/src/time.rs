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

//! Timing constants shared by the pump and the display.

use std::time::Duration;

/// A fork whose head hasn't moved for that long is considered stale and hidden from display.
pub const STALE_THRESHOLD: Duration = Duration::from_millis(45_000);

/// Period at which the display is refreshed.
pub const RENDER_INTERVAL: Duration = Duration::from_millis(1_000);

/// Delay between two connection attempts to the upstream peer.
pub const RECONNECT_DELAY: Duration = Duration::from_millis(1_000);

/// Round a duration to the nearest whole second, halves rounding up.
pub fn round_to_secs(duration: Duration) -> u64 {
    let millis = duration.as_millis();
    ((millis + 500) / 1000) as u64
}
