use tokio::task::AbortHandle;

/// The view a background request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOwner {
    Lister,
    Editor,
}

/// Outstanding requests, grouped by owning view.
///
/// Tearing a view down aborts its requests and bumps the owner's epoch, so a
/// result that was already queued before the abort is recognised as stale.
#[derive(Debug, Default)]
pub struct OwnedTasks {
    handles: Vec<(TaskOwner, AbortHandle)>,
    lister_epoch: u64,
    editor_epoch: u64,
}

impl OwnedTasks {
    pub fn epoch(&self, owner: TaskOwner) -> u64 {
        match owner {
            TaskOwner::Lister => self.lister_epoch,
            TaskOwner::Editor => self.editor_epoch,
        }
    }

    pub fn is_current(&self, owner: TaskOwner, epoch: u64) -> bool {
        self.epoch(owner) == epoch
    }

    pub fn track(&mut self, owner: TaskOwner, handle: AbortHandle) {
        self.handles.retain(|(_, h)| !h.is_finished());
        self.handles.push((owner, handle));
    }

    pub fn abort(&mut self, owner: TaskOwner) {
        self.handles.retain(|(o, handle)| {
            if *o == owner {
                handle.abort();
                false
            } else {
                true
            }
        });
        match owner {
            TaskOwner::Lister => self.lister_epoch += 1,
            TaskOwner::Editor => self.editor_epoch += 1,
        }
    }

    #[cfg(test)]
    pub fn outstanding(&self, owner: TaskOwner) -> usize {
        self.handles
            .iter()
            .filter(|(o, h)| *o == owner && !h.is_finished())
            .count()
    }
}
