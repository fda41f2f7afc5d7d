use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Work requested by key handlers, executed by the event loop.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Action {
    SubmitForm,
    ConfirmDelete,
    Logout,
}

pub(super) type ActionTx = UnboundedSender<Action>;
pub(super) type ActionRx = UnboundedReceiver<Action>;

pub(super) fn channel() -> (ActionTx, ActionRx) {
    mpsc::unbounded_channel()
}
