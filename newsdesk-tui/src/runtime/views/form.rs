use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_form_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if key.code == KeyCode::Esc {
        app.on_cancel();
        return;
    }

    let Some(editor) = app.editor_mut() else {
        return;
    };
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('s') if ctrl => enqueue_action(action_tx, Action::SubmitForm),
        KeyCode::Char('u') if ctrl => editor.clear_field(),
        KeyCode::Tab => editor.focus_next(),
        KeyCode::BackTab => editor.focus_previous(),
        KeyCode::Enter if editor.focused.is_multiline() => editor.input_char('\n'),
        KeyCode::Enter | KeyCode::Down => editor.focus_next(),
        KeyCode::Up => editor.focus_previous(),
        KeyCode::Left => editor.move_cursor(true),
        KeyCode::Right => editor.move_cursor(false),
        KeyCode::Home => editor.cursor_home_end(true),
        KeyCode::End => editor.cursor_home_end(false),
        KeyCode::Backspace => editor.backspace(),
        KeyCode::Char(c) if !ctrl => editor.input_char(c),
        _ => {}
    }
}
