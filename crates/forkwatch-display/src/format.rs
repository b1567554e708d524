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

use crate::Frame;
use forkwatch_registry::{DisplayRow, Snapshot};

pub const FOOTER: &str = "Press Q to quit";

/// `<hash> | <blocks behind> | <age>s | <mined>`, with the numeric columns right-aligned.
pub fn format_row(row: &DisplayRow) -> String {
    format!(
        "{} | {:>6} | {:>2}s | {}",
        row.hash, row.depth_behind, row.age_secs, row.mined
    )
}

pub fn format_status(connected: bool, forks: usize) -> String {
    format!("Node: {connected}, Forks: {forks:<2}")
}

impl Frame {
    pub fn from_snapshot(connected: bool, snapshot: &Snapshot) -> Self {
        Self {
            status: format_status(connected, snapshot.count()),
            lines: snapshot.rows.iter().map(format_row).collect(),
            footer: FOOTER,
        }
    }
}
