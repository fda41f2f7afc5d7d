use async_trait::async_trait;
use newsdesk_api::{NewsApiError, NewsBackend, NewsPayload, Record, RecordId};
use reqwest::StatusCode;
use std::sync::{Arc, Mutex};

pub fn record(id: &str, title: &str) -> Record {
    Record {
        id: RecordId::new(id),
        title: title.to_string(),
        subtitle: None,
        excerpt: Some(format!("Excerpt of {title}")),
        content: format!("Body of {title}"),
        cover_image: None,
        category: "Tecnología".to_string(),
        tags: vec![],
        author_name: None,
        author_company: None,
        destination_url: None,
        view_count: 0,
        click_count: 0,
        share_count: 0,
    }
}

fn remote_error(call: &str) -> NewsApiError {
    NewsApiError::Remote {
        call: call.to_string(),
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message: Some(format!("{call} failed")),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List(u32),
    Create(String),
    Update(RecordId, String),
    Delete(RecordId),
}

#[derive(Default)]
struct Recorded {
    records: Vec<Record>,
    calls: Vec<Call>,
    fail_list: bool,
    fail_writes: bool,
    fail_deletes: bool,
}

/// In-memory backend that records every call and can be told to fail.
#[derive(Clone, Default)]
pub struct RecordingBackend {
    inner: Arc<Mutex<Recorded>>,
}

impl RecordingBackend {
    pub fn with_records(records: Vec<Record>) -> Self {
        let backend = Self::default();
        backend.inner.lock().unwrap().records = records;
        backend
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn list_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::List(_)))
            .count()
    }

    pub fn fail_list(&self, fail: bool) {
        self.inner.lock().unwrap().fail_list = fail;
    }

    pub fn fail_writes(&self, fail: bool) {
        self.inner.lock().unwrap().fail_writes = fail;
    }

    pub fn fail_deletes(&self, fail: bool) {
        self.inner.lock().unwrap().fail_deletes = fail;
    }
}

#[async_trait]
impl NewsBackend for RecordingBackend {
    async fn list_news(&self, page: u32) -> Result<Vec<Record>, NewsApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::List(page));
        if inner.fail_list {
            return Err(remote_error("GET /news"));
        }
        Ok(inner.records.clone())
    }

    async fn create_news(&self, payload: &NewsPayload) -> Result<Option<Record>, NewsApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::Create(payload.title().to_string()));
        if inner.fail_writes {
            return Err(remote_error("POST /admin/news"));
        }
        let created = payload
            .clone()
            .into_record(RecordId::new(format!("new-{}", inner.records.len() + 1)));
        inner.records.insert(0, created.clone());
        Ok(Some(created))
    }

    async fn update_news(
        &self,
        id: &RecordId,
        payload: &NewsPayload,
    ) -> Result<Option<Record>, NewsApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner
            .calls
            .push(Call::Update(id.clone(), payload.title().to_string()));
        if inner.fail_writes {
            return Err(remote_error("PUT /admin/news/:id"));
        }
        Ok(None)
    }

    async fn delete_news(&self, id: &RecordId) -> Result<(), NewsApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::Delete(id.clone()));
        if inner.fail_deletes {
            return Err(remote_error("DELETE /admin/news/:id"));
        }
        inner.records.retain(|r| &r.id != id);
        Ok(())
    }
}
