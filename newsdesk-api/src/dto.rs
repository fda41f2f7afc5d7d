use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Record;

#[derive(Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// The login endpoint is known to return the token either at the top level or
/// nested under `data`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginResponse {
    token: Option<String>,
    access_token: Option<String>,
    data: Option<LoginData>,
}

#[derive(Deserialize)]
pub(crate) struct LoginData {
    token: Option<String>,
}

impl LoginResponse {
    pub fn into_token(self) -> Option<String> {
        self.token
            .or(self.access_token)
            .or(self.data.and_then(|d| d.token))
            .filter(|t| !t.is_empty())
    }
}

/// `GET /news` response: `{ "data": { "news": [...] } }`.
#[derive(Deserialize)]
pub(crate) struct ListResponse {
    pub data: ListData,
}

#[derive(Deserialize)]
pub(crate) struct ListData {
    #[serde(default)]
    news: Vec<Value>,
}

impl ListResponse {
    /// Decode each entry on its own, skipping the ones that are not records.
    pub fn into_records(self) -> Vec<Record> {
        self.data
            .news
            .into_iter()
            .enumerate()
            .filter_map(|(i, raw)| match serde_json::from_value::<Record>(raw) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!("Skipping news entry {} that could not be decoded: {}", i, e);
                    None
                }
            })
            .collect()
    }
}

/// Write endpoints may return the record, bare or wrapped in `data`. Any other
/// body is still a successful write.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum RecordEnvelope {
    Nested { data: NewsField },
    Wrapped { data: Record },
    Bare(Record),
}

#[derive(Deserialize)]
pub(crate) struct NewsField {
    news: Record,
}

impl RecordEnvelope {
    pub fn into_record(self) -> Record {
        match self {
            RecordEnvelope::Nested { data } => data.news,
            RecordEnvelope::Wrapped { data } => data,
            RecordEnvelope::Bare(record) => record,
        }
    }
}

/// The record echoed back by a successful write, when the body holds one.
pub(crate) fn written_record(body: &str) -> Result<Record, serde_json::Error> {
    serde_json::from_str::<RecordEnvelope>(body).map(RecordEnvelope::into_record)
}

/// Error bodies carry a human readable `message` (sometimes `error`).
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

pub(crate) fn remote_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed
        .message
        .or(parsed.error)
        .filter(|m| !m.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_token_found_at_top_level_or_under_data() {
        let top: LoginResponse = serde_json::from_str(r#"{"token": "abc"}"#).unwrap();
        let nested: LoginResponse =
            serde_json::from_str(r#"{"success": true, "data": {"token": "xyz"}}"#).unwrap();
        let missing: LoginResponse = serde_json::from_str(r#"{"data": {}}"#).unwrap();

        assert_eq!(top.into_token().as_deref(), Some("abc"));
        assert_eq!(nested.into_token().as_deref(), Some("xyz"));
        assert_eq!(missing.into_token(), None);
    }

    #[test]
    fn record_envelope_accepts_wrapped_and_bare_records() {
        let bare: RecordEnvelope =
            serde_json::from_str(r#"{"id": 1, "title": "bare"}"#).unwrap();
        let wrapped: RecordEnvelope =
            serde_json::from_str(r#"{"success": true, "data": {"id": 2, "title": "wrapped"}}"#)
                .unwrap();
        let nested: RecordEnvelope =
            serde_json::from_str(r#"{"data": {"news": {"id": 3, "title": "nested"}}}"#).unwrap();

        assert_eq!(bare.into_record().title, "bare");
        assert_eq!(wrapped.into_record().title, "wrapped");
        assert_eq!(nested.into_record().title, "nested");
    }

    #[test]
    fn list_skips_undecodable_entries_and_keeps_the_rest() {
        let body = r#"{"data": {"news": [
            {"id": 1, "title": "A", "category": "Tecnología"},
            {"title": "no id"},
            {"id": 3, "title": "C", "category": "Salud"}
        ]}}"#;

        let records = serde_json::from_str::<ListResponse>(body)
            .unwrap()
            .into_records();

        let titles: Vec<_> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "C"]);
        assert_eq!(records[1].category, "Salud");
    }

    #[test]
    fn write_body_without_record_is_not_a_record() {
        assert!(written_record(r#"{"success": true, "message": "Noticia creada"}"#).is_err());
        assert!(written_record("").is_err());
        assert_eq!(
            written_record(r#"{"data": {"id": 4, "title": "ok"}}"#)
                .unwrap()
                .title,
            "ok"
        );
    }

    #[test]
    fn remote_message_reads_message_or_error() {
        assert_eq!(
            remote_message(r#"{"message": "Token inválido"}"#).as_deref(),
            Some("Token inválido")
        );
        assert_eq!(
            remote_message(r#"{"error": "Not found"}"#).as_deref(),
            Some("Not found")
        );
        assert_eq!(remote_message("<html>502</html>"), None);
        assert_eq!(remote_message(r#"{"message": ""}"#), None);
    }
}
