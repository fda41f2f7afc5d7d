use async_trait::async_trait;
use newsdesk_api::{Category, NewsApiError, NewsBackend, NewsPayload, Record, RecordId, PAGE_SIZE};
use reqwest::StatusCode;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// In-memory stand-in for the news API used by `newsdesk dev`.
#[derive(Debug, Clone)]
pub struct DevBackend {
    store: Arc<Mutex<DevStore>>,
}

#[derive(Debug)]
struct DevStore {
    records: Vec<Record>,
    next_id: u64,
}

impl DevBackend {
    pub fn new() -> Self {
        let records = seed_dev_records();
        let next_id = records.len() as u64 + 1;
        Self {
            store: Arc::new(Mutex::new(DevStore { records, next_id })),
        }
    }

    fn store(&self) -> MutexGuard<'_, DevStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn not_found(call: &str, id: &RecordId) -> NewsApiError {
    NewsApiError::Remote {
        call: call.to_string(),
        status: StatusCode::NOT_FOUND,
        message: Some(format!("Article {} not found", id)),
    }
}

#[async_trait]
impl NewsBackend for DevBackend {
    async fn list_news(&self, page: u32) -> Result<Vec<Record>, NewsApiError> {
        let skip = (page.max(1) - 1) as usize * PAGE_SIZE as usize;
        Ok(self
            .store()
            .records
            .iter()
            .skip(skip)
            .take(PAGE_SIZE as usize)
            .cloned()
            .collect())
    }

    async fn create_news(&self, payload: &NewsPayload) -> Result<Option<Record>, NewsApiError> {
        let mut store = self.store();
        let id = RecordId::new(store.next_id.to_string());
        store.next_id += 1;
        let record = payload.clone().into_record(id);
        store.records.insert(0, record.clone());
        Ok(Some(record))
    }

    async fn update_news(
        &self,
        id: &RecordId,
        payload: &NewsPayload,
    ) -> Result<Option<Record>, NewsApiError> {
        let mut store = self.store();
        let existing = store
            .records
            .iter_mut()
            .find(|record| &record.id == id)
            .ok_or_else(|| not_found("PUT /admin/news/:id", id))?;

        let mut updated = payload.clone().into_record(id.clone());
        updated.view_count = existing.view_count;
        updated.click_count = existing.click_count;
        updated.share_count = existing.share_count;
        *existing = updated.clone();
        Ok(Some(updated))
    }

    async fn delete_news(&self, id: &RecordId) -> Result<(), NewsApiError> {
        let mut store = self.store();
        let before = store.records.len();
        store.records.retain(|record| &record.id != id);
        if store.records.len() == before {
            return Err(not_found("DELETE /admin/news/:id", id));
        }
        Ok(())
    }
}

fn seed_dev_records() -> Vec<Record> {
    let seed = [
        (
            "La IA generativa llega a las pymes",
            Some("Herramientas accesibles para equipos pequeños"),
            Category::Technology,
            &["IA", "Tecnología", "Innovación"][..],
            (1520, 312, 44),
        ),
        (
            "El comercio electrónico crece un 18%",
            None,
            Category::Economy,
            &["ecommerce"][..],
            (980, 120, 17),
        ),
        (
            "Cinco claves para una landing que convierte",
            Some("Guía práctica para equipos de marketing"),
            Category::Marketing,
            &["CRO", "landing"][..],
            (640, 201, 33),
        ),
    ];

    seed.iter()
        .enumerate()
        .map(
            |(i, (title, subtitle, category, tags, (views, clicks, shares)))| Record {
                id: RecordId::new((i + 1).to_string()),
                title: title.to_string(),
                subtitle: subtitle.map(str::to_string),
                excerpt: Some(format!("Resumen: {}", title)),
                content: format!("{}\n\nContenido de ejemplo para el modo dev.", title),
                cover_image: Some(format!("https://picsum.photos/800/400?random={}", i + 1)),
                category: category.label().to_string(),
                tags: tags.iter().map(|t| t.to_string()).collect(),
                author_name: Some("Redacción".to_string()),
                author_company: None,
                destination_url: None,
                view_count: *views,
                click_count: *clicks,
                share_count: *shares,
            },
        )
        .collect()
}
