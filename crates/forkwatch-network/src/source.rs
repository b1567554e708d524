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

use async_trait::async_trait;
use forkwatch_kernel::BlockRef;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to connect to {peer}: {reason}")]
    Connect { peer: String, reason: String },
    #[error("no intersection found with {peer}: {reason}")]
    Intersect { peer: String, reason: String },
    #[error("protocol error: {0}")]
    Protocol(String),
    #[error("failed to decode header: {0}")]
    Decode(String),
    #[error("not connected")]
    NotConnected,
}

/// A reconnectable stream of announced blocks.
///
/// Every error is considered transient: the caller is expected to drop the connection and
/// connect again.
#[async_trait]
pub trait BlockSource: Send {
    /// Establish a fresh connection, dropping any previous one.
    async fn connect(&mut self) -> Result<(), SourceError>;

    /// Wait for the next announced block. `Ok(None)` means the stream was closed by the remote.
    async fn next_block(&mut self) -> Result<Option<BlockRef>, SourceError>;

    /// Release the current connection, if any.
    async fn disconnect(&mut self);

    async fn reconnect(&mut self) -> Result<(), SourceError> {
        self.disconnect().await;
        self.connect().await
    }
}
