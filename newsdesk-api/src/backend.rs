use async_trait::async_trait;

use crate::{NewsApiError, NewsClient, NewsPayload, Record, RecordId};

/// The record operations the dashboard performs against the API.
///
/// Implemented by [`NewsClient`]; the TUI also provides an in-memory backend
/// for offline dev runs.
#[async_trait]
pub trait NewsBackend: Send + Sync {
    async fn list_news(&self, page: u32) -> Result<Vec<Record>, NewsApiError>;

    /// Any successful write is `Ok`; the record is present when the API echoed it.
    async fn create_news(&self, payload: &NewsPayload) -> Result<Option<Record>, NewsApiError>;

    async fn update_news(
        &self,
        id: &RecordId,
        payload: &NewsPayload,
    ) -> Result<Option<Record>, NewsApiError>;

    async fn delete_news(&self, id: &RecordId) -> Result<(), NewsApiError>;
}

#[async_trait]
impl NewsBackend for NewsClient {
    async fn list_news(&self, page: u32) -> Result<Vec<Record>, NewsApiError> {
        NewsClient::list_news(self, page).await
    }

    async fn create_news(&self, payload: &NewsPayload) -> Result<Option<Record>, NewsApiError> {
        NewsClient::create_news(self, payload).await
    }

    async fn update_news(
        &self,
        id: &RecordId,
        payload: &NewsPayload,
    ) -> Result<Option<Record>, NewsApiError> {
        NewsClient::update_news(self, id, payload).await
    }

    async fn delete_news(&self, id: &RecordId) -> Result<(), NewsApiError> {
        NewsClient::delete_news(self, id).await
    }
}
