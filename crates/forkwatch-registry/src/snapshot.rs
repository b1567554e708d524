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

use forkwatch_kernel::HeaderHash;

/// A display-ready line of a [`Snapshot`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub hash: HeaderHash,
    /// How many blocks behind the most advanced live fork this one is.
    pub depth_behind: u64,
    /// Seconds since the fork last moved, rounded.
    pub age_secs: u64,
    /// Number of extensions observed on this fork.
    pub mined: u64,
}

/// Forks that are still moving, most advanced first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub rows: Vec<DisplayRow>,
}

impl Snapshot {
    pub fn count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
