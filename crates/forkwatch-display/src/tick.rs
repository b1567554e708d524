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

use crate::{Frame, Renderer};
use forkwatch_kernel::time::{RENDER_INTERVAL, STALE_THRESHOLD};
use forkwatch_network::Connectivity;
use forkwatch_registry::SharedRegistry;
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;
use tracing::warn;

/// Redraws the registry on a fixed period, regardless of what the pump is doing.
pub struct RenderTick {
    registry: SharedRegistry,
    connectivity: Connectivity,
    renderer: Box<dyn Renderer>,
    period: Duration,
    stale_threshold: Duration,
    retention: Option<Duration>,
}

impl RenderTick {
    pub fn new(
        registry: SharedRegistry,
        connectivity: Connectivity,
        renderer: Box<dyn Renderer>,
    ) -> Self {
        Self {
            registry,
            connectivity,
            renderer,
            period: RENDER_INTERVAL,
            stale_threshold: STALE_THRESHOLD,
            retention: None,
        }
    }

    /// Also forget forks that haven't moved for `retention`, instead of only hiding them.
    pub fn with_retention(mut self, retention: Option<Duration>) -> Self {
        self.retention = retention;
        self
    }

    pub fn frame(&self, now: std::time::Instant) -> Frame {
        let snapshot = self.registry.snapshot(now, self.stale_threshold);
        Frame::from_snapshot(self.connectivity.is_connected(), &snapshot)
    }

    /// Draw one frame for `now`.
    pub fn tick(&mut self, now: std::time::Instant) {
        if let Some(retention) = self.retention {
            self.registry.evict_stale(now, retention);
        }

        let frame = self.frame(now);
        if let Err(err) = self.renderer.draw(&frame) {
            warn!(%err, "failed to draw frame");
        }
    }

    pub async fn run(mut self, exit: CancellationToken) {
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = exit.cancelled() => break,
                _ = ticker.tick() => self.tick(Instant::now().into_std()),
            }
        }

        self.renderer.restore();
    }
}
