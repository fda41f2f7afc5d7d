use crate::app::App;
use crate::ui;
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use newsdesk_api::NewsBackend;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;

use super::action_queue::channel;
use super::actions::{apply_outcome, run_action, sync_lister, RuntimeContext, SessionMode};
use super::views::handle_key;

pub async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    backend: Arc<dyn NewsBackend>,
    session: SessionMode,
) -> Result<()> {
    let (ctx, mut outcome_rx) = RuntimeContext::new(backend, session);
    let (action_tx, mut action_rx) = channel();

    loop {
        sync_lister(app, &ctx);

        terminal.draw(|f| ui::render(f, app))?;

        if app.is_loading() {
            app.throbber_state.calc_next();
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(key, app, &action_tx);
                }
            }
        }

        while let Ok(action) = action_rx.try_recv() {
            run_action(action, app, &ctx)?;
        }

        while let Ok(completed) = outcome_rx.try_recv() {
            apply_outcome(completed, app);
        }

        if !app.running {
            break;
        }
    }

    Ok(())
}
