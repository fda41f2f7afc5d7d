use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::dto::{remote_message, written_record, ListResponse, LoginRequest, LoginResponse};
use crate::{CredentialProvider, NewsApiError, NewsPayload, Record, RecordId};

/// Fixed page size of the list endpoint.
pub const PAGE_SIZE: u32 = 20;

/// HTTP client for the news API.
///
/// Every request asks the credential provider for a token and sends it as
/// `Authorization: Bearer <token>` when one is available.
#[derive(Clone)]
pub struct NewsClient {
    client: Client,
    base_url: Url,
    credentials: Arc<dyn CredentialProvider>,
}

impl NewsClient {
    pub fn new(
        base_url: &str,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self, NewsApiError> {
        let base_url =
            Url::parse(base_url).map_err(|_| NewsApiError::InvalidUrl(base_url.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(NewsApiError::InvalidUrl(base_url.to_string()));
        }

        let client = Client::builder()
            .build()
            .map_err(|source| NewsApiError::Request {
                call: "client setup".to_string(),
                source,
            })?;

        Ok(Self {
            client,
            base_url,
            credentials,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append path segments to the base URL, keeping any base path such as `/api`.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, NewsApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| NewsApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(crate) fn request(
        &self,
        method: Method,
        segments: &[&str],
    ) -> Result<RequestBuilder, NewsApiError> {
        let request = self.client.request(method, self.endpoint(segments)?);
        Ok(match self.credentials.bearer_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        })
    }

    async fn send(&self, request: RequestBuilder, call: &str) -> Result<Response, NewsApiError> {
        tracing::debug!("sending {}", call);

        let response = request
            .send()
            .await
            .map_err(|source| NewsApiError::Request {
                call: call.to_string(),
                source,
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = remote_message(&body);
        tracing::warn!("{} returned {}", call, status);

        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            return Err(NewsApiError::Unauthorized { status, message });
        }
        Err(NewsApiError::Remote {
            call: call.to_string(),
            status,
            message,
        })
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        call: &str,
    ) -> Result<T, NewsApiError> {
        self.send(request, call)
            .await?
            .json::<T>()
            .await
            .map_err(|source| NewsApiError::Decode {
                call: call.to_string(),
                source,
            })
    }

    /// `POST /auth/login`, returning the issued bearer token.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, NewsApiError> {
        let response: LoginResponse = self
            .send_json(
                self.request(Method::POST, &["auth", "login"])?
                    .json(&LoginRequest { email, password }),
                "POST /auth/login",
            )
            .await?;

        response.into_token().ok_or(NewsApiError::MissingToken)
    }

    /// `GET /news?page=P&limit=20`. Pages start at 1.
    pub async fn list_news(&self, page: u32) -> Result<Vec<Record>, NewsApiError> {
        let response: ListResponse = self
            .send_json(self.list_request(page)?, "GET /news")
            .await?;
        Ok(response.into_records())
    }

    fn list_request(&self, page: u32) -> Result<RequestBuilder, NewsApiError> {
        Ok(self
            .request(Method::GET, &["news"])?
            .query(&[("page", page.max(1)), ("limit", PAGE_SIZE)]))
    }

    /// Send a create or update. Any 2xx is a successful write; the record is
    /// returned only when the body echoes one back.
    async fn send_write(
        &self,
        request: RequestBuilder,
        call: &str,
    ) -> Result<Option<Record>, NewsApiError> {
        let response = self.send(request, call).await?;
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("{} succeeded but its body could not be read: {}", call, e);
                return Ok(None);
            }
        };
        if body.trim().is_empty() {
            return Ok(None);
        }

        match written_record(&body) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                tracing::warn!("{} succeeded without a record in its body: {}", call, e);
                Ok(None)
            }
        }
    }

    pub async fn create_news(
        &self,
        payload: &NewsPayload,
    ) -> Result<Option<Record>, NewsApiError> {
        self.send_write(
            self.request(Method::POST, &["admin", "news"])?.json(payload),
            "POST /admin/news",
        )
        .await
    }

    pub async fn update_news(
        &self,
        id: &RecordId,
        payload: &NewsPayload,
    ) -> Result<Option<Record>, NewsApiError> {
        self.send_write(
            self.request(Method::PUT, &["admin", "news", id.as_str()])?
                .json(payload),
            "PUT /admin/news/:id",
        )
        .await
    }

    /// The response body is not used.
    pub async fn delete_news(&self, id: &RecordId) -> Result<(), NewsApiError> {
        self.send(
            self.request(Method::DELETE, &["admin", "news", id.as_str()])?,
            "DELETE /admin/news/:id",
        )
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Draft, NoCredentials, StaticToken};
    use reqwest::header::AUTHORIZATION;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response on a local port; returns the API base URL.
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });

        format!("http://{addr}/api")
    }

    /// Read the request head and its `Content-Length` body.
    async fn read_request(socket: &mut tokio::net::TcpStream) {
        let mut raw = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                return;
            }
            raw.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&raw);
            if let Some(head_end) = text.find("\r\n\r\n") {
                let content_length = text[..head_end]
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if raw.len() >= head_end + 4 + content_length {
                    return;
                }
            }
        }
    }

    fn sample_payload() -> NewsPayload {
        let mut draft = Draft::new();
        draft.title = "Nueva".to_string();
        draft.content = "Texto".to_string();
        NewsPayload::try_from(&draft).unwrap()
    }

    fn client_with(credentials: Arc<dyn CredentialProvider>) -> NewsClient {
        NewsClient::new("http://localhost:3000/api", credentials).unwrap()
    }

    #[test]
    fn attaches_bearer_token_when_stored() {
        let client = client_with(Arc::new(StaticToken::new("secret-token")));

        let request = client
            .request(Method::DELETE, &["admin", "news", "9"])
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(
            request.headers().get(AUTHORIZATION).unwrap(),
            "Bearer secret-token"
        );
    }

    #[test]
    fn omits_authorization_header_without_token() {
        let client = client_with(Arc::new(NoCredentials));

        let request = client.list_request(1).unwrap().build().unwrap();

        assert!(request.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn reads_token_on_every_request() {
        use std::sync::Mutex;

        struct Rotating(Mutex<Option<String>>);
        impl CredentialProvider for Rotating {
            fn bearer_token(&self) -> Option<String> {
                self.0.lock().unwrap().clone()
            }
        }

        let provider = Arc::new(Rotating(Mutex::new(None)));
        let client = client_with(provider.clone());

        let before = client.list_request(1).unwrap().build().unwrap();
        *provider.0.lock().unwrap() = Some("fresh".to_string());
        let after = client.list_request(1).unwrap().build().unwrap();

        assert!(before.headers().get(AUTHORIZATION).is_none());
        assert_eq!(after.headers().get(AUTHORIZATION).unwrap(), "Bearer fresh");
    }

    #[test]
    fn list_request_keeps_base_path_and_fixed_limit() {
        let client = client_with(Arc::new(NoCredentials));

        let request = client.list_request(2).unwrap().build().unwrap();
        assert_eq!(
            request.url().as_str(),
            "http://localhost:3000/api/news?page=2&limit=20"
        );

        let first = client.list_request(0).unwrap().build().unwrap();
        assert_eq!(first.url().query(), Some("page=1&limit=20"));
    }

    #[test]
    fn endpoint_handles_trailing_slash_and_escapes_ids() {
        let client =
            NewsClient::new("https://news.example.com/api/", Arc::new(NoCredentials)).unwrap();

        let url = client.endpoint(&["admin", "news", "a/b"]).unwrap();

        assert_eq!(url.as_str(), "https://news.example.com/api/admin/news/a%2Fb");
    }

    #[tokio::test]
    async fn create_succeeds_when_body_is_not_a_record() {
        let base = serve_once(
            "201 Created",
            r#"{"success":true,"message":"Noticia creada"}"#,
        )
        .await;
        let client = NewsClient::new(&base, Arc::new(NoCredentials)).unwrap();

        let created = client.create_news(&sample_payload()).await.unwrap();

        assert_eq!(created, None);
    }

    #[tokio::test]
    async fn update_returns_echoed_record() {
        let base = serve_once("200 OK", r#"{"data":{"id":8,"title":"Nueva"}}"#).await;
        let client = NewsClient::new(&base, Arc::new(NoCredentials)).unwrap();

        let updated = client
            .update_news(&RecordId::new("8"), &sample_payload())
            .await
            .unwrap();

        assert_eq!(updated.map(|r| r.id), Some(RecordId::new("8")));
    }

    #[tokio::test]
    async fn list_keeps_records_with_unknown_category() {
        let base = serve_once(
            "200 OK",
            r#"{"data":{"news":[{"id":1,"title":"A","category":"Tecnología"},{"id":2,"title":"B","category":"Salud"}]}}"#,
        )
        .await;
        let client = NewsClient::new(&base, Arc::new(NoCredentials)).unwrap();

        let records = client.list_news(1).await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].category, "Salud");
    }

    #[tokio::test]
    async fn delete_ignores_response_body() {
        let base = serve_once("200 OK", "deleted").await;
        let client = NewsClient::new(&base, Arc::new(NoCredentials)).unwrap();

        client.delete_news(&RecordId::new("5")).await.unwrap();
    }

    #[tokio::test]
    async fn failed_write_carries_remote_message() {
        let base = serve_once(
            "422 Unprocessable Entity",
            r#"{"message":"El título es obligatorio"}"#,
        )
        .await;
        let client = NewsClient::new(&base, Arc::new(NoCredentials)).unwrap();

        let err = client.create_news(&sample_payload()).await.unwrap_err();

        assert_eq!(err.user_message(), "El título es obligatorio");
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(matches!(
            NewsClient::new("not a url", Arc::new(NoCredentials)),
            Err(NewsApiError::InvalidUrl(_))
        ));
        assert!(matches!(
            NewsClient::new("mailto:news@example.com", Arc::new(NoCredentials)),
            Err(NewsApiError::InvalidUrl(_))
        ));
    }
}
