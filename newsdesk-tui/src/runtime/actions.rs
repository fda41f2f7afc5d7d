use crate::app::{App, SubmitRequest, TaskOwner};
use crate::session_store;
use anyhow::Result;
use newsdesk_api::{NewsApiError, NewsBackend, Record, RecordId};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use super::action_queue::Action;

/// Where the bearer token comes from, which decides what logout does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    Stored,
    Dev,
}

/// Result of a background request, applied to the app on the event loop.
#[derive(Debug)]
pub(super) enum Outcome {
    Loaded {
        refresh_token: u64,
        result: Result<Vec<Record>, NewsApiError>,
    },
    Saved(Result<Option<Record>, NewsApiError>),
    Deleted {
        id: RecordId,
        result: Result<(), NewsApiError>,
    },
}

#[derive(Debug)]
pub(super) struct Completed {
    owner: TaskOwner,
    epoch: u64,
    outcome: Outcome,
}

pub(super) type OutcomeRx = UnboundedReceiver<Completed>;

pub(super) struct RuntimeContext {
    backend: Arc<dyn NewsBackend>,
    session: SessionMode,
    outcome_tx: UnboundedSender<Completed>,
}

impl RuntimeContext {
    pub(super) fn new(backend: Arc<dyn NewsBackend>, session: SessionMode) -> (Self, OutcomeRx) {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        (
            Self {
                backend,
                session,
                outcome_tx,
            },
            outcome_rx,
        )
    }

    /// Run `request` in the background as a task owned by `owner`'s view.
    fn spawn<F>(&self, app: &mut App, owner: TaskOwner, request: F)
    where
        F: Future<Output = Outcome> + Send + 'static,
    {
        let epoch = app.tasks.epoch(owner);
        let tx = self.outcome_tx.clone();
        let handle = tokio::spawn(async move {
            let outcome = request.await;
            let _ = tx.send(Completed {
                owner,
                epoch,
                outcome,
            });
        });
        app.tasks.track(owner, handle.abort_handle());
    }
}

/// Start a list fetch when the lister is shown and its refresh token moved.
pub(super) fn sync_lister(app: &mut App, ctx: &RuntimeContext) {
    if !app.is_listing() || !app.lister.needs_fetch(app.refresh_token) {
        return;
    }

    let refresh_token = app.refresh_token;
    app.lister.begin_fetch(refresh_token);
    let backend = ctx.backend.clone();
    ctx.spawn(app, TaskOwner::Lister, async move {
        Outcome::Loaded {
            refresh_token,
            result: backend.list_news(1).await,
        }
    });
}

pub(super) fn run_action(action: Action, app: &mut App, ctx: &RuntimeContext) -> Result<()> {
    match action {
        Action::SubmitForm => submit_form(app, ctx),
        Action::ConfirmDelete => confirm_delete(app, ctx),
        Action::Logout => {
            if ctx.session == SessionMode::Stored {
                session_store::clear_token()?;
            }
            tracing::info!("Logged out");
            app.logged_out = true;
            app.quit();
        }
    }
    Ok(())
}

fn submit_form(app: &mut App, ctx: &RuntimeContext) {
    let submit = match app.editor_mut() {
        Some(editor) => editor.begin_submit(),
        None => return,
    };

    match submit {
        Ok(Some(request)) => {
            let backend = ctx.backend.clone();
            ctx.spawn(app, TaskOwner::Editor, async move {
                let result = match request {
                    SubmitRequest::Create(payload) => backend.create_news(&payload).await,
                    SubmitRequest::Update(id, payload) => {
                        backend.update_news(&id, &payload).await
                    }
                };
                Outcome::Saved(result)
            });
        }
        Ok(None) => {}
        Err(e) => app.show_alert("Missing field", format!("Error: {}", e)),
    }
}

fn confirm_delete(app: &mut App, ctx: &RuntimeContext) {
    let Some(target) = app.delete_context.take() else {
        return;
    };

    app.set_status(format!("Deleting \"{}\"...", target.title));
    app.lister.mark_deleting(target.id.clone());
    let backend = ctx.backend.clone();
    ctx.spawn(app, TaskOwner::Lister, async move {
        let result = backend.delete_news(&target.id).await;
        Outcome::Deleted {
            id: target.id,
            result,
        }
    });
}

pub(super) fn apply_outcome(completed: Completed, app: &mut App) {
    let Completed {
        owner,
        epoch,
        outcome,
    } = completed;
    if !app.tasks.is_current(owner, epoch) {
        tracing::debug!("Discarding result of torn down {:?} view", owner);
        return;
    }

    match outcome {
        Outcome::Loaded {
            refresh_token,
            result,
        } => match result {
            Ok(records) => {
                tracing::info!("Loaded {} articles", records.len());
                app.lister.finish_fetch(refresh_token, Some(records));
            }
            Err(e) => {
                tracing::error!("Error loading news: {}", e);
                app.lister.finish_fetch(refresh_token, None);
            }
        },
        Outcome::Saved(result) => {
            let Some(editor) = app.editor_mut() else {
                return;
            };
            editor.finish_submit();
            match result {
                Ok(Some(record)) => {
                    tracing::info!("Saved article {}", record.id);
                    app.on_save_success();
                }
                Ok(None) => {
                    tracing::info!("Saved article; the API did not echo it back");
                    app.on_save_success();
                }
                Err(e) => {
                    tracing::error!("Error saving article: {}", e);
                    app.show_alert("Save failed", format!("Error: {}", e.user_message()));
                }
            }
        }
        Outcome::Deleted { id, result } => {
            app.lister.finish_delete(&id);
            if let Err(e) = result {
                tracing::error!("Error deleting article {}: {}", id, e);
                app.clear_status();
                app.show_alert(
                    "Delete failed",
                    format!("Failed to delete: {}", e.user_message()),
                );
                return;
            }
            tracing::info!("Deleted article {}", id);
            app.lister.remove(&id);
            app.set_status("Article deleted".to_string());
        }
    }
}
