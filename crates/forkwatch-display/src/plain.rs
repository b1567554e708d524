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
use std::io;
use tracing::info;

/// Writes frames to the logs, for when there is no terminal to draw on.
///
/// A frame identical to the previous one is not written again.
#[derive(Debug, Default)]
pub struct PlainRenderer {
    last: Option<Frame>,
}

impl PlainRenderer {
    fn is_repeat(&self, frame: &Frame) -> bool {
        self.last.as_ref() == Some(frame)
    }
}

impl Renderer for PlainRenderer {
    fn draw(&mut self, frame: &Frame) -> io::Result<()> {
        if self.is_repeat(frame) {
            return Ok(());
        }

        info!(status = %frame.status.trim_end(), "forks");
        for line in frame.lines.iter() {
            info!("{line}");
        }

        self.last = Some(frame.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FOOTER;

    fn frame(status: &str, lines: &[&str]) -> Frame {
        Frame {
            status: status.to_string(),
            lines: lines.iter().map(|line| line.to_string()).collect(),
            footer: FOOTER,
        }
    }

    #[test]
    fn first_frame_is_written() {
        let renderer = PlainRenderer::default();
        assert!(!renderer.is_repeat(&frame("Node: true, Forks: 0 ", &[])));
    }

    #[test]
    fn identical_frames_with_rows_are_written_once() {
        let mut renderer = PlainRenderer::default();
        let live = frame(
            "Node: true, Forks: 2 ",
            &["a |      0 |  1s | 3", "b |      1 |  1s | 0"],
        );

        renderer.draw(&live).unwrap();

        assert!(renderer.is_repeat(&live));
    }

    #[test]
    fn any_change_is_written_again() {
        let mut renderer = PlainRenderer::default();
        renderer
            .draw(&frame("Node: true, Forks: 1 ", &["a |      0 |  1s | 3"]))
            .unwrap();

        let older = frame("Node: true, Forks: 1 ", &["a |      0 |  2s | 3"]);
        let disconnected = frame("Node: false, Forks: 1 ", &["a |      0 |  1s | 3"]);

        assert!(!renderer.is_repeat(&older));
        assert!(!renderer.is_repeat(&disconnected));
    }
}
