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

use crate::{BlockSource, SourceError};
use async_trait::async_trait;
use forkwatch_kernel::{BlockRef, ORIGIN_HASH};
use pallas_network::{
    facades::PeerClient,
    miniprotocols::chainsync::{HeaderContent, NextResponse},
};
use pallas_traverse::MultiEraHeader;
use tracing::{Level, debug, instrument};

/// Follows the tip of a Cardano peer through the node-to-node chain-sync protocol.
///
/// Upon connection, the client intersects at the peer's current tip so that only blocks
/// announced from then on are reported. Roll-backs carry no block and are skipped; the blocks
/// that follow them are what reveals a fork.
pub struct ChainSyncSource {
    peer_address: String,
    network_magic: u64,
    client: Option<PeerClient>,
}

impl ChainSyncSource {
    pub fn new(peer_address: impl Into<String>, network_magic: u64) -> Self {
        Self {
            peer_address: peer_address.into(),
            network_magic,
            client: None,
        }
    }
}

pub fn to_block_ref(header: &HeaderContent) -> Result<BlockRef, SourceError> {
    let subtag = header.byron_prefix.map(|(subtag, _)| subtag);
    let header = MultiEraHeader::decode(header.variant, subtag, &header.cbor)
        .map_err(|e| SourceError::Decode(e.to_string()))?;

    Ok(BlockRef::new(
        header.hash(),
        header.previous_hash().unwrap_or(ORIGIN_HASH),
        header.number(),
    ))
}

#[async_trait]
impl BlockSource for ChainSyncSource {
    #[instrument(
        level = Level::DEBUG,
        skip_all,
        name = "chainsync.connect",
        fields(peer = %self.peer_address, magic = self.network_magic),
    )]
    async fn connect(&mut self) -> Result<(), SourceError> {
        self.disconnect().await;

        let mut client = PeerClient::connect(self.peer_address.as_str(), self.network_magic)
            .await
            .map_err(|e| SourceError::Connect {
                peer: self.peer_address.clone(),
                reason: e.to_string(),
            })?;

        match client.chainsync().intersect_tip().await {
            Ok(point) => {
                debug!(?point, "intersected at tip");
                self.client = Some(client);
                Ok(())
            }
            Err(e) => {
                client.abort().await;
                Err(SourceError::Intersect {
                    peer: self.peer_address.clone(),
                    reason: e.to_string(),
                })
            }
        }
    }

    async fn next_block(&mut self) -> Result<Option<BlockRef>, SourceError> {
        let client = self.client.as_mut().ok_or(SourceError::NotConnected)?;

        loop {
            let chainsync = client.chainsync();
            let next = if chainsync.has_agency() {
                chainsync.request_next().await
            } else {
                chainsync.recv_while_must_reply().await
            };

            match next.map_err(|e| SourceError::Protocol(e.to_string()))? {
                NextResponse::RollForward(header, _tip) => return to_block_ref(&header).map(Some),
                NextResponse::RollBackward(point, tip) => {
                    debug!(?point, tip = ?tip.0, "roll_backward");
                }
                NextResponse::Await => {
                    debug!("awaiting next block");
                }
            }
        }
    }

    async fn disconnect(&mut self) {
        if let Some(client) = self.client.take() {
            client.abort().await;
        }
    }
}
