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

use crate::{ForkRegistry, Observation, Snapshot};
use forkwatch_kernel::BlockRef;
use parking_lot::RwLock;
use std::{
    sync::Arc,
    time::{Duration, Instant},
};

/// A [`ForkRegistry`] shared between the task feeding it and the task displaying it.
///
/// Observations take the write lock and snapshots the read lock, so a snapshot never sees a
/// half-applied observation. Both are short and never await.
#[derive(Debug, Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<RwLock<ForkRegistry>>,
}

impl SharedRegistry {
    pub fn new(registry: ForkRegistry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    pub fn observe(&self, block: BlockRef, now: Instant) -> Observation {
        self.inner.write().observe(block, now)
    }

    pub fn snapshot(&self, now: Instant, stale_threshold: Duration) -> Snapshot {
        self.inner.read().snapshot(now, stale_threshold)
    }

    pub fn evict_stale(&self, now: Instant, retention: Duration) -> usize {
        self.inner.write().evict_stale(now, retention)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}
