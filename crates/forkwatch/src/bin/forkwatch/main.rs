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

use clap::{Parser, Subcommand};
use forkwatch::{
    env_vars,
    observability::{Color, setup_observability},
    build_info::version,
    panic::panic_handler,
};
use std::sync::LazyLock;
use tracing::info;

mod cmd;

static VERSION: LazyLock<String> = LazyLock::new(version);

#[derive(Debug, Subcommand)]
enum Command {
    /// Watch the network for competing chain tips.
    ///
    /// Follows the tip of a peer and lists every chain tip seen recently, most advanced
    /// first, along with:
    ///
    ///   - how many blocks behind the most advanced tip it is
    ///   - how long ago it last moved
    ///   - how many blocks were seen extending it
    ///
    /// Tips that haven't moved for 45 seconds are hidden. Press Q to quit.
    #[clap(verbatim_doc_comment)]
    #[command(alias = "forks")]
    Watch(cmd::watch::Args),
}

#[derive(Debug, Parser)]
#[clap(name = "forkwatch")]
#[clap(bin_name = "forkwatch")]
#[clap(author, about, long_about = None, version = VERSION.as_str())]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[clap(long, action, env(env_vars::WITH_JSON_TRACES))]
    with_json_traces: bool,

    #[clap(long, action, env(env_vars::COLOR))]
    color: Option<Color>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();

    let (display_mode, log_output) = match &args.command {
        Command::Watch(args) => (args.display_mode(), args.log_output()?),
    };

    panic_handler(display_mode);

    setup_observability(
        args.with_json_traces,
        Color::is_enabled(args.color),
        log_output,
    );

    info!(
        version = VERSION.as_str(),
        with_json_traces = args.with_json_traces,
        "Started with global arguments"
    );

    match args.command {
        Command::Watch(args) => cmd::watch::run(args).await,
    }
}
