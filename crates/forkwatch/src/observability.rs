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

use std::{
    env::VarError,
    error::Error,
    fs::{File, OpenOptions},
    io::{self, IsTerminal},
    path::Path,
    str::FromStr,
    sync::Mutex,
};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter,
    fmt::{
        format::{FmtSpan, JsonFields},
        writer::BoxMakeWriter,
    },
    prelude::*,
};

const FORKWATCH_LOG_VAR: &str = "FORKWATCH_LOG";

const DEFAULT_FORKWATCH_LOG_FILTER: &str = "error,forkwatch=info";

type DelayedWarning = Option<Box<dyn FnOnce()>>;

/// Where log lines are written.
#[derive(Debug)]
pub enum LogOutput {
    Stderr,
    /// Used while the terminal is busy displaying forks.
    File(File),
}

impl LogOutput {
    pub fn append_to(path: &Path) -> io::Result<Self> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map(LogOutput::File)
    }

    fn supports_color(&self) -> bool {
        match self {
            LogOutput::Stderr => true,
            LogOutput::File(_) => false,
        }
    }

    fn into_writer(self) -> BoxMakeWriter {
        match self {
            LogOutput::Stderr => BoxMakeWriter::new(io::stderr),
            LogOutput::File(file) => BoxMakeWriter::new(Mutex::new(file)),
        }
    }
}

// -----------------------------------------------------------------------------
// ENV FILTER
// -----------------------------------------------------------------------------

fn new_default_filter(var: &str, default: &str) -> (EnvFilter, DelayedWarning) {
    match EnvFilter::try_from_env(var) {
        Ok(filter) => (filter, None),
        Err(e) => {
            // Notice stashed for when the tracing system is up.
            let fallback = default.to_string();
            let var = var.to_string();
            let warning = match e.source().and_then(|e| e.downcast_ref::<VarError>()) {
                Some(VarError::NotPresent) => {
                    Box::new(move || info!(var, fallback, "unspecified ENV variable"))
                        as Box<dyn FnOnce()>
                }
                _ => Box::new(move || warn!(var, fallback, reason = %e, "invalid ENV variable"))
                    as Box<dyn FnOnce()>,
            };

            #[expect(clippy::expect_used)]
            let filter = EnvFilter::try_new(default).expect("invalid default filter");
            (filter, Some(warning))
        }
    }
}

// -----------------------------------------------------------------------------
// SUBSCRIBER
// -----------------------------------------------------------------------------

pub fn setup_observability(with_json_traces: bool, color: bool, output: LogOutput) {
    let (filter, warning) = new_default_filter(FORKWATCH_LOG_VAR, DEFAULT_FORKWATCH_LOG_FILTER);
    let color = color && output.supports_color();
    let writer = output.into_writer();

    if with_json_traces {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .event_format(tracing_subscriber::fmt::format().json().with_span_list(false))
                    .fmt_fields(JsonFields::new())
                    .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
                    .with_filter(filter),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .event_format(tracing_subscriber::fmt::format().with_ansi(color).compact())
                    .with_span_events(FmtSpan::CLOSE)
                    .with_filter(filter),
            )
            .init();
    }

    if let Some(notify) = warning {
        notify();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Never,
    Always,
    Auto,
}

impl FromStr for Color {
    type Err = &'static str;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "never" => Ok(Color::Never),
            "always" => Ok(Color::Always),
            "auto" => Ok(Color::Auto),
            _ => Err("valid color settings are 'never', 'always' or 'auto'"),
        }
    }
}

impl Color {
    pub fn is_enabled(this: Option<Self>) -> bool {
        match this {
            Some(Color::Never) => false,
            Some(Color::Always) => true,
            Some(Color::Auto) => std::io::stderr().is_terminal(),
            None => {
                if std::env::var("NO_COLOR").iter().any(|s| !s.is_empty()) {
                    false
                } else {
                    std::io::stderr().is_terminal()
                }
            }
        }
    }
}
