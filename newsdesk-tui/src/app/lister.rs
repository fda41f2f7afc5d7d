use newsdesk_api::{Record, RecordId};
use std::collections::HashSet;

/// Display list of the record lister and its fetch bookkeeping.
///
/// A fetch is due on every activation and whenever the refresh token differs
/// from the one the list was last loaded for. The token value itself carries
/// no meaning.
#[derive(Debug, Default)]
pub struct ListerState {
    pub records: Vec<Record>,
    pub selected: usize,
    pub loading: bool,
    loaded_token: Option<u64>,
    pending_token: Option<u64>,
    deleting: HashSet<RecordId>,
}

impl ListerState {
    pub fn needs_fetch(&self, refresh_token: u64) -> bool {
        self.pending_token.is_none() && self.loaded_token != Some(refresh_token)
    }

    pub fn has_loaded(&self) -> bool {
        self.loaded_token.is_some()
    }

    pub fn begin_fetch(&mut self, refresh_token: u64) {
        self.pending_token = Some(refresh_token);
        self.loading = true;
    }

    /// Apply a finished fetch. Failures keep the current display list.
    /// Returns false when the result belongs to a fetch that is no longer pending.
    pub fn finish_fetch(&mut self, refresh_token: u64, records: Option<Vec<Record>>) -> bool {
        if self.pending_token != Some(refresh_token) {
            return false;
        }
        self.pending_token = None;
        self.loaded_token = Some(refresh_token);
        self.loading = false;
        if let Some(records) = records {
            self.records = records;
            self.clamp_selection();
        }
        true
    }

    /// The lister was torn down: its requests are gone and the list it shows
    /// is no longer trusted, so the next activation fetches again.
    pub fn deactivate(&mut self) {
        self.pending_token = None;
        self.loaded_token = None;
        self.loading = false;
        self.deleting.clear();
    }

    pub fn is_deleting(&self, id: &RecordId) -> bool {
        self.deleting.contains(id)
    }

    pub fn mark_deleting(&mut self, id: RecordId) {
        self.deleting.insert(id);
    }

    pub fn finish_delete(&mut self, id: &RecordId) {
        self.deleting.remove(id);
    }

    /// The selected record, unless a delete for it is still in flight.
    pub fn actionable_record(&self) -> Option<&Record> {
        self.selected_record()
            .filter(|record| !self.is_deleting(&record.id))
    }

    /// Remove exactly the record with `id`, keeping the order of the rest.
    pub fn remove(&mut self, id: &RecordId) {
        self.records.retain(|record| &record.id != id);
        self.clamp_selection();
    }

    pub fn selected_record(&self) -> Option<&Record> {
        self.records.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.records.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.records.len().saturating_sub(1));
    }
}
