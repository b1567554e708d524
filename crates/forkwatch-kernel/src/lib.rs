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

pub use pallas_crypto::hash::Hash;

mod block;
pub use block::*;

pub mod network;
pub use network::NetworkName;

pub mod time;

/// Size, in bytes, of a block header hash.
pub const HEADER_HASH_SIZE: usize = 32;

/// Type alias for a block header hash.
pub type HeaderHash = Hash<HEADER_HASH_SIZE>;

/// The hash used as parent for headers that do not reference one (e.g. the first block of a
/// chain).
pub const ORIGIN_HASH: HeaderHash = Hash::new([0; HEADER_HASH_SIZE]);
