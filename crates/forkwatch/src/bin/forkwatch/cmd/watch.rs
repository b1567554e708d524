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

use clap::Parser;
use forkwatch::{
    DEFAULT_LOG_FILE, DEFAULT_NETWORK, DEFAULT_PEER_ADDRESS, env_vars,
    observability::LogOutput, panic::DisplayMode, value_names,
};
use forkwatch_display::{
    PlainRenderer, RenderTick, Renderer, TerminalRenderer, spawn_quit_listener,
};
use forkwatch_kernel::{NetworkName, time::STALE_THRESHOLD};
use forkwatch_network::{ChainSyncSource, Connectivity, StreamPump};
use forkwatch_registry::SharedRegistry;
use std::{error::Error, path::PathBuf, time::Duration};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Debug, Parser)]
pub struct Args {
    /// Address of the node to follow.
    ///
    /// The node should be accessible via the node-2-node protocol.
    #[arg(
        long,
        value_name = value_names::ENDPOINT,
        env = env_vars::PEER_ADDRESS,
        default_value = DEFAULT_PEER_ADDRESS,
    )]
    peer_address: String,

    /// Network the node belongs to.
    #[arg(
        long,
        value_name = value_names::NETWORK,
        env = env_vars::NETWORK,
        default_value_t = DEFAULT_NETWORK,
    )]
    network: NetworkName,

    /// Forget forks that haven't moved for that many seconds.
    ///
    /// Stale forks are only hidden by default, and kept in memory for as long as the process
    /// runs. Must not be shorter than the staleness threshold.
    #[arg(
        long,
        value_name = value_names::SECONDS,
        env = env_vars::RETENTION,
        value_parser = parse_retention,
    )]
    retention: Option<Duration>,

    /// Print forks to the logs instead of taking over the terminal.
    #[arg(long, action, env = env_vars::HEADLESS)]
    headless: bool,

    /// File receiving the logs while the terminal displays forks.
    #[arg(
        long,
        value_name = value_names::FILE,
        env = env_vars::LOG_FILE,
        default_value = DEFAULT_LOG_FILE,
    )]
    log_file: PathBuf,
}

impl Args {
    pub fn display_mode(&self) -> DisplayMode {
        if self.headless {
            DisplayMode::Headless
        } else {
            DisplayMode::Terminal {
                log_file: self.log_file.clone(),
            }
        }
    }

    pub fn log_output(&self) -> Result<LogOutput, Box<dyn Error>> {
        if self.headless {
            Ok(LogOutput::Stderr)
        } else {
            Ok(LogOutput::append_to(&self.log_file).map_err(|e| {
                format!("unable to open log file {}: {e}", self.log_file.display())
            })?)
        }
    }
}

fn parse_retention(s: &str) -> Result<Duration, String> {
    let retention = s
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| "retention must be a whole number of seconds".to_string())?;

    if retention < STALE_THRESHOLD {
        return Err(format!(
            "retention must be at least {}s",
            STALE_THRESHOLD.as_secs()
        ));
    }

    Ok(retention)
}

pub async fn run(args: Args) -> Result<(), Box<dyn Error>> {
    info!(
        _command = "watch",
        peer_address = %args.peer_address,
        network = %args.network,
        retention = ?args.retention,
        headless = args.headless,
        "running",
    );

    let exit = CancellationToken::new();

    let (renderer, keyboard): (Box<dyn Renderer>, _) = if args.headless {
        (Box::new(PlainRenderer::default()), None)
    } else {
        (
            Box::new(TerminalRenderer::init()?),
            Some(spawn_quit_listener(exit.clone())),
        )
    };

    tokio::spawn({
        let exit = exit.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("interrupted");
                exit.cancel();
            }
        }
    });

    let registry = SharedRegistry::default();
    let connectivity = Connectivity::default();

    let source = ChainSyncSource::new(args.peer_address, args.network.to_network_magic());
    let pump = tokio::spawn(
        StreamPump::new(source, registry.clone(), connectivity.clone()).run(exit.clone()),
    );

    RenderTick::new(registry, connectivity, renderer)
        .with_retention(args.retention)
        .run(exit.clone())
        .await;

    pump.await?;

    if let Some(keyboard) = keyboard {
        if let Err(err) = keyboard.await? {
            warn!(%err, "failed to read keyboard events");
        }
    }

    info!("exiting");
    Ok(())
}
