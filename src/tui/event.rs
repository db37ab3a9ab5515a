use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use std::time::Duration;

use super::App;

pub fn poll_event(timeout: Duration) -> anyhow::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

pub fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match (code, modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            app.running = false;
            return;
        }
        (KeyCode::Left, KeyModifiers::SHIFT) => {
            app.shift_date(-7);
            return;
        }
        (KeyCode::Right, KeyModifiers::SHIFT) => {
            app.shift_date(7);
            return;
        }
        _ => {}
    }

    match code {
        KeyCode::Left | KeyCode::Char('h') => app.shift_date(-1),
        KeyCode::Right | KeyCode::Char('l') => app.shift_date(1),
        KeyCode::Char('H') => app.shift_date(-7),
        KeyCode::Char('L') => app.shift_date(7),
        KeyCode::Char('t') => app.jump_to_today(),
        KeyCode::Char('r') => {
            app.refresh();
            app.status_message = "Recomputed".into();
        }
        _ => {}
    }
}
