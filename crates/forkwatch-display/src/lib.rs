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

//! Periodic rendering of the fork registry.
//!
//! Every tick, the [`RenderTick`] takes a snapshot of the registry, turns it into a [`Frame`]
//! of pre-formatted lines and hands it over to a [`Renderer`]. Renderers know nothing about
//! forks; they only draw text.

mod format;
pub use format::*;

mod keys;
pub use keys::*;

mod plain;
pub use plain::*;

mod terminal;
pub use terminal::*;

mod tick;
pub use tick::*;

use std::io;

/// What gets drawn on each tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub status: String,
    pub lines: Vec<String>,
    pub footer: &'static str,
}

/// Something able to show a [`Frame`] to the operator.
pub trait Renderer: Send {
    fn draw(&mut self, frame: &Frame) -> io::Result<()>;

    /// Give the output back (e.g. leave the alternate screen). Called once, when stopping.
    fn restore(&mut self) {}
}
