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
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Layout},
    text::Line,
    widgets::Paragraph,
};
use std::io::{self, Stdout};

/// Full-screen rendering: status on the first line, forks below, footer on the last line.
pub struct TerminalRenderer<B: Backend> {
    terminal: Terminal<B>,
    owns_screen: bool,
}

impl TerminalRenderer<CrosstermBackend<Stdout>> {
    /// Take over the terminal (raw mode, alternate screen) until restored or dropped.
    pub fn init() -> io::Result<Self> {
        Ok(Self {
            terminal: ratatui::try_init()?,
            owns_screen: true,
        })
    }
}

impl<B: Backend> TerminalRenderer<B> {
    pub fn new(terminal: Terminal<B>) -> Self {
        Self {
            terminal,
            owns_screen: false,
        }
    }

    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }
}

impl<B: Backend + Send> Renderer for TerminalRenderer<B> {
    fn draw(&mut self, frame: &Frame) -> io::Result<()> {
        self.terminal.draw(|screen| {
            let [status, body, footer] = Layout::vertical([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .areas(screen.area());

            let lines: Vec<Line<'_>> = frame
                .lines
                .iter()
                .map(|line| Line::raw(line.as_str()))
                .collect();

            screen.render_widget(Paragraph::new(frame.status.as_str()), status);
            screen.render_widget(Paragraph::new(lines), body);
            screen.render_widget(Paragraph::new(frame.footer), footer);
        })?;
        Ok(())
    }

    fn restore(&mut self) {
        if self.owns_screen {
            restore_terminal();
            self.owns_screen = false;
        }
    }
}

impl<B: Backend> Drop for TerminalRenderer<B> {
    fn drop(&mut self) {
        if self.owns_screen {
            restore_terminal();
        }
    }
}

/// Leave raw mode and the alternate screen. Harmless when the terminal was never taken over.
pub fn restore_terminal() {
    ratatui::restore();
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn screen_lines(renderer: &TerminalRenderer<TestBackend>) -> Vec<String> {
        let buffer = renderer.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn lays_out_status_rows_and_footer() {
        let terminal = Terminal::new(TestBackend::new(40, 5)).unwrap();
        let mut renderer = TerminalRenderer::new(terminal);

        renderer
            .draw(&Frame {
                status: "Node: true, Forks: 2 ".to_string(),
                lines: vec!["first".to_string(), "second".to_string()],
                footer: "Press Q to quit",
            })
            .unwrap();

        assert_eq!(
            vec![
                "Node: true, Forks: 2",
                "first",
                "second",
                "",
                "Press Q to quit"
            ],
            screen_lines(&renderer)
        );
    }

    #[test]
    fn redraw_clears_previous_rows() {
        let terminal = Terminal::new(TestBackend::new(40, 4)).unwrap();
        let mut renderer = TerminalRenderer::new(terminal);

        renderer
            .draw(&Frame {
                status: "Node: true, Forks: 2 ".to_string(),
                lines: vec!["first".to_string(), "second".to_string()],
                footer: "",
            })
            .unwrap();
        renderer
            .draw(&Frame {
                status: "Node: false, Forks: 0 ".to_string(),
                lines: vec![],
                footer: "",
            })
            .unwrap();

        assert_eq!(
            vec!["Node: false, Forks: 0", "", "", ""],
            screen_lines(&renderer)
        );
    }
}
