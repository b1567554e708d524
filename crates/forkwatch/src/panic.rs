// Copyright 2024 PRAGMA
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

use crate::build_info;
use std::{fmt, path::PathBuf, process::exit};
use tracing::error;

/// How forks were being shown when the process went down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayMode {
    /// Full-screen panel, with logs diverted to a file.
    Terminal { log_file: PathBuf },
    /// Frames and logs written to stderr.
    Headless,
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayMode::Terminal { .. } => f.write_str("terminal"),
            DisplayMode::Headless => f.write_str("headless"),
        }
    }
}

/// Installs a panic handler that gives the terminal back, leaves a trace in the logs and
/// tells the operator where to look before exiting with a non-zero code.
pub fn panic_handler(mode: DisplayMode) {
    let prev = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        // Raw mode and the alternate screen would swallow anything printed from here on.
        if let DisplayMode::Terminal { .. } = mode {
            forkwatch_display::restore_terminal();
        }
        error!(%info, mode = %mode, "panicked");
        prev(info);
        eprintln!("\n{}", crash_report(&mode));
        exit(1);
    }));
}

pub fn crash_report(mode: &DisplayMode) -> String {
    let logs = match mode {
        DisplayMode::Terminal { log_file } => {
            format!("The logs leading up to it are in {}.", log_file.display())
        }
        DisplayMode::Headless => "The logs leading up to it are printed above.".to_string(),
    };

    indoc::formatdoc! {
        "forkwatch {version} crashed while watching forks in {mode} mode.
        {logs}

        Please report it, mentioning:
          platform: {os}/{arch}
          version:  {version}",
        version = build_info::version(),
        os = build_info::OS,
        arch = build_info::ARCH,
    }
}
