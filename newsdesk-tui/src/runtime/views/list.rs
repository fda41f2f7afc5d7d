use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_list_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        KeyCode::Char('n') => app.start_create(),
        KeyCode::Char('L') => enqueue_action(action_tx, Action::Logout),
        KeyCode::Char('e') | KeyCode::Enter => {
            if let Some(record) = app.lister.actionable_record().cloned() {
                app.start_edit(record);
            }
        }
        KeyCode::Char('d') => app.begin_delete(),
        KeyCode::Char('r') => {
            app.request_refresh();
            app.set_status("Refreshing...".to_string());
        }
        KeyCode::Down | KeyCode::Char('j') => app.lister.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.lister.select_previous(),
        _ => {}
    }
}
