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

use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::{io, time::Duration};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// `q`, `Esc` or `Ctrl-C`; the terminal is in raw mode so the latter doesn't raise a signal.
pub fn is_quit_key(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }

    matches!(key.code, KeyCode::Char('q' | 'Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Watch the keyboard on a blocking thread and cancel `exit` when a quit key is pressed.
///
/// The thread also stops on its own once `exit` is cancelled from elsewhere.
pub fn spawn_quit_listener(exit: CancellationToken) -> JoinHandle<io::Result<()>> {
    tokio::task::spawn_blocking(move || {
        while !exit.is_cancelled() {
            if !event::poll(POLL_INTERVAL)? {
                continue;
            }

            if let Event::Key(key) = event::read()? {
                if is_quit_key(&key) {
                    debug!(code = ?key.code, "quit requested");
                    exit.cancel();
                }
            }
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyEventState;
    use test_case::test_case;

    #[test_case(KeyCode::Char('q'), KeyModifiers::NONE => true)]
    #[test_case(KeyCode::Char('Q'), KeyModifiers::SHIFT => true)]
    #[test_case(KeyCode::Esc, KeyModifiers::NONE => true)]
    #[test_case(KeyCode::Char('c'), KeyModifiers::CONTROL => true)]
    #[test_case(KeyCode::Char('c'), KeyModifiers::NONE => false)]
    #[test_case(KeyCode::Char('x'), KeyModifiers::NONE => false)]
    #[test_case(KeyCode::Enter, KeyModifiers::NONE => false)]
    fn recognizes_quit_keys(code: KeyCode, modifiers: KeyModifiers) -> bool {
        is_quit_key(&KeyEvent::new(code, modifiers))
    }

    #[test]
    fn ignores_key_releases() {
        let release = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert!(!is_quit_key(&release));
    }
}
