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

//! Tracking of competing chain tips.
//!
//! The [`ForkRegistry`] ingests blocks as they are announced by the network and keeps exactly
//! one [`ForkRecord`] per observed chain tip. When a block extends a known tip, the record of
//! that tip is replaced by a record keyed by the new block, carrying one more extension. Records
//! are never removed otherwise; a [`Snapshot`] simply ignores those that haven't moved for a
//! while.

mod registry;
pub use registry::*;

mod shared;
pub use shared::*;

mod snapshot;
pub use snapshot::*;
