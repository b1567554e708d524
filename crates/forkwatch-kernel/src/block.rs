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

use crate::HeaderHash;
use std::fmt;

/// A reference to a block as announced by the network: its identity, the block it extends and
/// its height in the chain.
///
/// Nothing about a `BlockRef` is validated; two announcements may legitimately (or maliciously)
/// carry the same hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockRef {
    pub hash: HeaderHash,
    pub parent: HeaderHash,
    pub height: u64,
}

impl BlockRef {
    pub fn new(hash: HeaderHash, parent: HeaderHash, height: u64) -> Self {
        Self {
            hash,
            parent,
            height,
        }
    }
}

impl fmt::Display for BlockRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.height, self.hash)
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use test_utils::*;

#[cfg(any(test, feature = "test-utils"))]
mod test_utils {
    use super::*;
    use crate::HEADER_HASH_SIZE;
    use proptest::prelude::*;

    /// Build a deterministic hash out of a small integer, handy to write readable test fixtures.
    pub fn hash_from_u64(n: u64) -> HeaderHash {
        let mut bytes = [0; HEADER_HASH_SIZE];
        bytes[HEADER_HASH_SIZE - 8..].copy_from_slice(&n.to_be_bytes());
        HeaderHash::new(bytes)
    }

    /// A block identified by `id`, extending the block identified by `parent`.
    pub fn make_block(id: u64, parent: u64, height: u64) -> BlockRef {
        BlockRef::new(hash_from_u64(id), hash_from_u64(parent), height)
    }

    pub fn any_header_hash() -> impl Strategy<Value = HeaderHash> {
        any::<[u8; HEADER_HASH_SIZE]>().prop_map(HeaderHash::new)
    }

    pub fn any_block_ref() -> impl Strategy<Value = BlockRef> {
        (any_header_hash(), any_header_hash(), 0..10_000_000u64)
            .prop_map(|(hash, parent, height)| BlockRef::new(hash, parent, height))
    }
}
