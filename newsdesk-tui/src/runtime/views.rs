use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::action_queue::{Action, ActionTx};

mod alert;
mod confirm_delete;
mod form;
mod list;

fn enqueue_action(action_tx: &ActionTx, action: Action) {
    let _ = action_tx.send(action);
}

/// Route a key press. Modals take precedence over the active screen.
pub(super) fn handle_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    if app.alert.is_some() {
        alert::handle_alert_key(key, app);
    } else if app.delete_context.is_some() {
        confirm_delete::handle_confirm_delete_key(key, app, action_tx);
    } else if app.is_listing() {
        list::handle_list_key(key, app, action_tx);
    } else {
        form::handle_form_key(key, app, action_tx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Alert;
    use crate::test_support::record;

    use super::super::action_queue::channel;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn alert_swallows_keys_until_dismissed() {
        let mut app = App::new("test");
        app.lister.records = vec![record("1", "A")];
        app.alert = Some(Alert {
            title: "Save failed".to_string(),
            message: "Error: boom".to_string(),
        });
        let (tx, mut rx) = channel();

        handle_key(press(KeyCode::Char('d')), &mut app, &tx);
        assert!(app.delete_context.is_none());
        assert!(app.alert.is_some());

        handle_key(press(KeyCode::Enter), &mut app, &tx);
        assert!(app.alert.is_none());
        assert!(app.is_listing());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn ctrl_c_quits_from_any_screen() {
        let mut app = App::new("test");
        app.start_create();
        let (tx, _rx) = channel();

        handle_key(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            &mut app,
            &tx,
        );

        assert!(!app.running);
    }
}
