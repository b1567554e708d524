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

use crate::{BlockSource, Connectivity};
use forkwatch_kernel::time::RECONNECT_DELAY;
use forkwatch_registry::SharedRegistry;
use std::time::Duration;
use tokio::time::{Instant, sleep};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Keeps a [`BlockSource`] connected and pours every block it yields into the registry.
///
/// Failures are never fatal: a failed connection is retried after a fixed delay, and a stream
/// that ends or breaks is reconnected right away. The only way out is the exit token.
pub struct StreamPump<S> {
    source: S,
    registry: SharedRegistry,
    connectivity: Connectivity,
    retry_delay: Duration,
}

enum Outcome {
    Interrupted,
    Exit,
}

impl<S: BlockSource> StreamPump<S> {
    pub fn new(source: S, registry: SharedRegistry, connectivity: Connectivity) -> Self {
        Self {
            source,
            registry,
            connectivity,
            retry_delay: RECONNECT_DELAY,
        }
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    pub async fn run(mut self, exit: CancellationToken) {
        loop {
            let attempt = tokio::select! {
                biased;
                _ = exit.cancelled() => break,
                attempt = self.source.reconnect() => attempt,
            };

            match attempt {
                Ok(()) => {
                    self.connectivity.set(true);
                    info!("connected");
                }
                Err(err) => {
                    self.connectivity.set(false);
                    warn!(%err, retry_in = ?self.retry_delay, "connection failed");
                    tokio::select! {
                        biased;
                        _ = exit.cancelled() => break,
                        _ = sleep(self.retry_delay) => continue,
                    }
                }
            }

            let outcome = self.consume(&exit).await;
            self.connectivity.set(false);

            match outcome {
                Outcome::Exit => break,
                // Reconnect at once, without waiting: only refused connections are delayed,
                // even when a peer hangs up right after every handshake.
                Outcome::Interrupted => {}
            }
        }

        debug!("stream pump stopped");
        self.connectivity.set(false);
        self.source.disconnect().await;
    }

    async fn consume(&mut self, exit: &CancellationToken) -> Outcome {
        let mut observed = 0_u64;
        loop {
            let next = tokio::select! {
                biased;
                _ = exit.cancelled() => return Outcome::Exit,
                next = self.source.next_block() => next,
            };

            match next {
                Ok(Some(block)) => {
                    self.registry.observe(block, Instant::now().into_std());
                    observed += 1;
                }
                Ok(None) => {
                    info!(observed, "stream closed by peer");
                    return Outcome::Interrupted;
                }
                Err(err) => {
                    warn!(%err, observed, "stream interrupted");
                    return Outcome::Interrupted;
                }
            }
        }
    }
}
