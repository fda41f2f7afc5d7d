use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent};

pub(super) fn handle_alert_key(key: KeyEvent, app: &mut App) {
    if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
        app.dismiss_alert();
    }
}
