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

use crate::{DisplayRow, Snapshot};
use forkwatch_kernel::{BlockRef, HeaderHash, time::round_to_secs};
use std::{
    collections::HashMap,
    time::{Duration, Instant},
};
use tracing::{debug, trace};

/// The live state of a fork, keyed by the hash of its head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForkRecord {
    pub head: BlockRef,
    /// When the fork was created or last extended.
    pub last_seen: Instant,
    /// Number of extensions observed since the fork first appeared.
    pub depth: u64,
    /// Rank of the key in observation order, used to break ties between forks of equal height.
    ordinal: u64,
}

impl ForkRecord {
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_seen)
    }

    pub fn is_stale(&self, now: Instant, threshold: Duration) -> bool {
        self.age(now) >= threshold
    }
}

/// What happened to the registry as a result of observing a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    /// The parent of the block wasn't a known tip: a new fork starts with it.
    NewFork { tip: HeaderHash },
    /// The block extended a known tip, whose record moved to the new block.
    Extended {
        from: HeaderHash,
        tip: HeaderHash,
        depth: u64,
    },
}

/// One record per observed chain tip.
///
/// The registry performs no validation whatsoever: it describes what the network announces and
/// never decides which fork is right.
#[derive(Debug, Default)]
pub struct ForkRegistry {
    forks: HashMap<HeaderHash, ForkRecord>,
    next_ordinal: u64,
}

impl ForkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.forks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forks.is_empty()
    }

    pub fn get(&self, tip: &HeaderHash) -> Option<&ForkRecord> {
        self.forks.get(tip)
    }

    #[cfg(test)]
    fn records(&self) -> impl Iterator<Item = &ForkRecord> {
        self.forks.values()
    }

    /// Ingest a newly announced block.
    ///
    /// If the block's parent is a known tip, that tip's record is subsumed by a record for the
    /// block with one more extension. Otherwise a new fork is recorded with a depth of 0.
    ///
    /// Each block must be observed exactly once: observing it again after its fork has been
    /// extended derives its depth from whatever is recorded at its parent at that time.
    pub fn observe(&mut self, block: BlockRef, now: Instant) -> Observation {
        let parent = self.forks.remove(&block.parent);

        let depth = parent.as_ref().map_or(0, |record| record.depth + 1);

        // Overwriting a tip in place keeps its rank, like an insertion-ordered map would.
        let ordinal = match self.forks.get(&block.hash) {
            Some(existing) => existing.ordinal,
            None => {
                let ordinal = self.next_ordinal;
                self.next_ordinal += 1;
                ordinal
            }
        };

        self.forks.insert(
            block.hash,
            ForkRecord {
                head: block,
                last_seen: now,
                depth,
                ordinal,
            },
        );

        match parent {
            Some(_) => {
                debug!(tip = %block.hash, height = block.height, depth, "fork.extended");
                Observation::Extended {
                    from: block.parent,
                    tip: block.hash,
                    depth,
                }
            }
            None => {
                trace!(tip = %block.hash, height = block.height, "fork.new");
                Observation::NewFork { tip: block.hash }
            }
        }
    }

    /// Ranked view of the forks that moved within `stale_threshold`, most advanced first.
    pub fn snapshot(&self, now: Instant, stale_threshold: Duration) -> Snapshot {
        let mut alive: Vec<&ForkRecord> = self
            .forks
            .values()
            .filter(|record| !record.is_stale(now, stale_threshold))
            .collect();

        alive.sort_by(|a, b| {
            b.head
                .height
                .cmp(&a.head.height)
                .then(a.ordinal.cmp(&b.ordinal))
        });

        let highest = alive.first().map_or(0, |record| record.head.height);

        Snapshot {
            rows: alive
                .into_iter()
                .map(|record| DisplayRow {
                    hash: record.head.hash,
                    depth_behind: highest - record.head.height,
                    age_secs: round_to_secs(record.age(now)),
                    mined: record.depth,
                })
                .collect(),
        }
    }

    /// Drop every record that hasn't moved for `retention` or longer, returning how many were
    /// dropped. Without this, records of abandoned forks live for as long as the registry.
    pub fn evict_stale(&mut self, now: Instant, retention: Duration) -> usize {
        let before = self.forks.len();
        self.forks
            .retain(|_, record| !record.is_stale(now, retention));
        let evicted = before - self.forks.len();
        if evicted > 0 {
            debug!(evicted, remaining = self.forks.len(), "fork.evicted");
        }
        evicted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forkwatch_kernel::{any_block_ref, hash_from_u64, make_block};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    const THRESHOLD: Duration = Duration::from_millis(45_000);

    fn at(origin: Instant, millis: u64) -> Instant {
        origin + Duration::from_millis(millis)
    }

    #[test]
    fn unknown_parent_creates_a_fork_with_no_depth() {
        let now = Instant::now();
        let mut registry = ForkRegistry::new();

        let a = make_block(0xA, 0xFF, 10);
        let observation = registry.observe(a, now);

        assert_eq!(Observation::NewFork { tip: a.hash }, observation);
        assert_eq!(1, registry.len());
        let record = registry.get(&a.hash).unwrap();
        assert_eq!(0, record.depth);
        assert_eq!(a, record.head);
        assert_eq!(now, record.last_seen);
    }

    #[test]
    fn extension_replaces_the_parent_record() {
        let t0 = Instant::now();
        let mut registry = ForkRegistry::new();

        let a = make_block(0xA, 0xFF, 10);
        let b = make_block(0xB, 0xA, 11);
        registry.observe(a, t0);
        let observation = registry.observe(b, at(t0, 1_000));

        assert_eq!(
            Observation::Extended {
                from: a.hash,
                tip: b.hash,
                depth: 1
            },
            observation
        );
        assert_eq!(1, registry.len());
        assert!(registry.get(&a.hash).is_none());
        let record = registry.get(&b.hash).unwrap();
        assert_eq!(1, record.depth);
        assert_eq!(at(t0, 1_000), record.last_seen);
    }

    #[test]
    fn depth_grows_by_one_along_a_lineage() {
        let t0 = Instant::now();
        let mut registry = ForkRegistry::new();

        registry.observe(make_block(1, 0, 1), t0);
        for id in 2..=10 {
            registry.observe(make_block(id, id - 1, id), at(t0, id * 100));
        }

        assert_eq!(1, registry.len());
        assert_eq!(9, registry.get(&hash_from_u64(10)).unwrap().depth);
    }

    #[test]
    fn independent_forks_are_ranked_by_height() {
        let now = Instant::now();
        let mut registry = ForkRegistry::new();

        let c = make_block(0xC, 0xF1, 5);
        let d = make_block(0xD, 0xF2, 7);
        registry.observe(c, now);
        registry.observe(d, now);

        let snapshot = registry.snapshot(now, THRESHOLD);

        assert_eq!(
            vec![
                DisplayRow {
                    hash: d.hash,
                    depth_behind: 0,
                    age_secs: 0,
                    mined: 0
                },
                DisplayRow {
                    hash: c.hash,
                    depth_behind: 2,
                    age_secs: 0,
                    mined: 0
                },
            ],
            snapshot.rows
        );
        assert_eq!(2, snapshot.count());
    }

    #[test]
    fn stale_forks_are_hidden_but_kept() {
        let t0 = Instant::now();
        let mut registry = ForkRegistry::new();

        registry.observe(make_block(1, 0, 10), t0);

        assert!(registry.snapshot(at(t0, 46_000), THRESHOLD).is_empty());
        assert_eq!(1, registry.len());
    }

    #[test]
    fn staleness_threshold_is_exclusive() {
        let t0 = Instant::now();
        let mut registry = ForkRegistry::new();

        registry.observe(make_block(1, 0, 10), t0);

        assert_eq!(1, registry.snapshot(at(t0, 44_999), THRESHOLD).count());
        assert_eq!(0, registry.snapshot(at(t0, 45_000), THRESHOLD).count());
    }

    #[test]
    fn highest_height_only_accounts_for_live_forks() {
        let t0 = Instant::now();
        let mut registry = ForkRegistry::new();

        registry.observe(make_block(1, 0, 100), t0);
        registry.observe(make_block(2, 0, 90), at(t0, 30_000));

        let snapshot = registry.snapshot(at(t0, 50_000), THRESHOLD);

        assert_eq!(1, snapshot.count());
        assert_eq!(hash_from_u64(2), snapshot.rows[0].hash);
        assert_eq!(0, snapshot.rows[0].depth_behind);
        assert_eq!(20, snapshot.rows[0].age_secs);
    }

    #[test]
    fn age_is_rounded_to_the_nearest_second() {
        let t0 = Instant::now();
        let mut registry = ForkRegistry::new();

        registry.observe(make_block(1, 0, 1), t0);

        assert_eq!(2, registry.snapshot(at(t0, 1_500), THRESHOLD).rows[0].age_secs);
        assert_eq!(1, registry.snapshot(at(t0, 1_499), THRESHOLD).rows[0].age_secs);
    }

    #[test]
    fn equal_heights_keep_observation_order() {
        let now = Instant::now();
        let mut registry = ForkRegistry::new();

        for id in [7, 3, 9, 1] {
            registry.observe(make_block(id, 100 + id, 42), now);
        }

        let hashes: Vec<_> = registry
            .snapshot(now, THRESHOLD)
            .rows
            .into_iter()
            .map(|row| row.hash)
            .collect();

        assert_eq!(
            vec![
                hash_from_u64(7),
                hash_from_u64(3),
                hash_from_u64(9),
                hash_from_u64(1)
            ],
            hashes
        );
    }

    #[test]
    fn overwriting_a_tip_keeps_its_rank() {
        let t0 = Instant::now();
        let mut registry = ForkRegistry::new();

        registry.observe(make_block(1, 100, 5), t0);
        registry.observe(make_block(2, 101, 5), t0);
        registry.observe(make_block(1, 100, 5), at(t0, 10));

        let first = &registry.snapshot(at(t0, 10), THRESHOLD).rows[0];
        assert_eq!(hash_from_u64(1), first.hash);
    }

    #[test]
    fn extending_moves_the_fork_to_the_back_of_ties() {
        let t0 = Instant::now();
        let mut registry = ForkRegistry::new();

        registry.observe(make_block(1, 100, 5), t0);
        registry.observe(make_block(2, 101, 6), t0);
        registry.observe(make_block(3, 1, 6), t0);

        let hashes: Vec<_> = registry
            .snapshot(t0, THRESHOLD)
            .rows
            .into_iter()
            .map(|row| row.hash)
            .collect();

        assert_eq!(vec![hash_from_u64(2), hash_from_u64(3)], hashes);
    }

    #[test]
    fn re_observing_after_extension_restarts_a_fork() {
        let t0 = Instant::now();
        let mut registry = ForkRegistry::new();

        let a = make_block(1, 0, 1);
        registry.observe(a, t0);
        registry.observe(make_block(2, 1, 2), t0);
        registry.observe(a, t0);

        assert_eq!(2, registry.len());
        assert_eq!(0, registry.get(&a.hash).unwrap().depth);
    }

    #[test]
    fn self_parented_block_extends_itself() {
        let now = Instant::now();
        let mut registry = ForkRegistry::new();

        let weird = make_block(1, 1, 1);
        registry.observe(weird, now);
        registry.observe(weird, now);

        assert_eq!(1, registry.len());
        assert_eq!(1, registry.get(&weird.hash).unwrap().depth);
    }

    #[test]
    fn eviction_removes_only_old_records() {
        let t0 = Instant::now();
        let mut registry = ForkRegistry::new();

        registry.observe(make_block(1, 0, 1), t0);
        registry.observe(make_block(2, 0, 1), at(t0, 60_000));

        let evicted = registry.evict_stale(at(t0, 90_000), Duration::from_secs(60));

        assert_eq!(1, evicted);
        assert!(registry.get(&hash_from_u64(1)).is_none());
        assert!(registry.get(&hash_from_u64(2)).is_some());
    }

    #[test]
    fn empty_registry_yields_empty_snapshot() {
        let registry = ForkRegistry::new();
        let snapshot = registry.snapshot(Instant::now(), THRESHOLD);
        assert!(snapshot.is_empty());
        assert_eq!(0, snapshot.count());
    }

    /// A stream of distinct blocks, each extending either an earlier block of the stream or
    /// some unknown block, observed at non-decreasing times.
    fn any_stream() -> impl Strategy<Value = Vec<(BlockRef, u64)>> {
        prop::collection::vec(
            (any::<Option<prop::sample::Index>>(), 0..50u64, 0..5_000u64),
            1..60,
        )
        .prop_map(|steps| {
            let mut elapsed = 0;
            let mut blocks: Vec<(BlockRef, u64)> = Vec::with_capacity(steps.len());
            for (i, (parent, height, delay)) in steps.into_iter().enumerate() {
                let id = i as u64 + 1;
                let parent = match parent {
                    Some(index) if i > 0 => index.index(i) as u64 + 1,
                    _ => 1_000_000 + id,
                };
                elapsed += delay;
                blocks.push((make_block(id, parent, height), elapsed));
            }
            blocks
        })
    }

    proptest! {
        #[test]
        fn prop_one_record_per_live_tip(stream in any_stream()) {
            let t0 = Instant::now();
            let mut registry = ForkRegistry::new();
            for (block, millis) in stream {
                registry.observe(block, at(t0, millis));
                for record in registry.records() {
                    prop_assert!(registry.get(&record.head.parent).is_none());
                }
            }
        }

        #[test]
        fn prop_extension_increments_parent_depth(stream in any_stream()) {
            let t0 = Instant::now();
            let mut registry = ForkRegistry::new();
            for (block, millis) in stream {
                let parent_depth = registry.get(&block.parent).map(|record| record.depth);
                let observation = registry.observe(block, at(t0, millis));
                let depth = registry.get(&block.hash).map(|record| record.depth);
                match parent_depth {
                    Some(parent_depth) => {
                        prop_assert_eq!(Some(parent_depth + 1), depth);
                        let is_extension = matches!(observation, Observation::Extended { .. });
                        prop_assert!(is_extension);
                    }
                    None => prop_assert_eq!(Some(0), depth),
                }
            }
        }

        #[test]
        fn prop_snapshot_is_ranked_and_fresh(stream in any_stream(), later in 0..60_000u64) {
            let t0 = Instant::now();
            let mut registry = ForkRegistry::new();
            let mut last = 0;
            for (block, millis) in stream {
                registry.observe(block, at(t0, millis));
                last = millis;
            }

            let now = at(t0, last + later);
            let snapshot = registry.snapshot(now, THRESHOLD);

            for row in snapshot.rows.iter() {
                let record = registry.get(&row.hash).unwrap();
                prop_assert!(record.age(now) < THRESHOLD);
                prop_assert_eq!(record.depth, row.mined);
            }

            for pair in snapshot.rows.windows(2) {
                let left = registry.get(&pair[0].hash).unwrap().head.height;
                let right = registry.get(&pair[1].hash).unwrap().head.height;
                prop_assert!(left >= right);
                prop_assert!(pair[0].depth_behind <= pair[1].depth_behind);
            }

            if let Some(first) = snapshot.rows.first() {
                prop_assert_eq!(0, first.depth_behind);
            }

            prop_assert_eq!(snapshot, registry.snapshot(now, THRESHOLD));
        }

        #[test]
        fn prop_arbitrary_blocks_never_duplicate_keys(
            blocks in prop::collection::vec(any_block_ref(), 0..30),
        ) {
            let now = Instant::now();
            let mut registry = ForkRegistry::new();
            for block in blocks.iter() {
                registry.observe(*block, now);
            }
            prop_assert!(registry.len() <= blocks.len());
            prop_assert_eq!(registry.len(), registry.snapshot(now, THRESHOLD).count());
        }
    }
}
