use reqwest::StatusCode;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Serialize;

use crate::config::ClassifierConfig;
use crate::error::ReportError;
use crate::payload::{App, DocReport};

const DISCOVER_ENDPOINT: &str = "app/discover";
const LOADER_DOC_ENDPOINT: &str = "loader/doc";
const LOG_BODY_LIMIT: usize = 999;

/// HTTP client for the classification service.
#[derive(Debug, Clone)]
pub struct ClassifierClient {
    http: reqwest::Client,
    base_url: String,
}

impl ClassifierClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &ClassifierConfig) -> Result<Self, ReportError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("safeload/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_owned(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Register the app. `502 Bad Gateway` counts as acknowledged.
    ///
    /// # Errors
    ///
    /// Returns `ReportError` on network or serialization failure, or any other status.
    pub async fn send_discover(&self, app: &App) -> Result<StatusCode, ReportError> {
        let status = self.post(DISCOVER_ENDPOINT, app).await?;
        if status == StatusCode::OK || status == StatusCode::BAD_GATEWAY {
            Ok(status)
        } else {
            Err(ReportError::UnexpectedStatus {
                endpoint: DISCOVER_ENDPOINT,
                status: status.as_u16(),
            })
        }
    }

    /// # Errors
    ///
    /// Returns `ReportError` on network or serialization failure, or any status but `200 OK`.
    pub async fn send_loader_doc(&self, report: &DocReport<'_>) -> Result<(), ReportError> {
        let status = self.post(LOADER_DOC_ENDPOINT, report).await?;
        if status == StatusCode::OK {
            Ok(())
        } else {
            Err(ReportError::UnexpectedStatus {
                endpoint: LOADER_DOC_ENDPOINT,
                status: status.as_u16(),
            })
        }
    }

    async fn post<T: Serialize + ?Sized>(
        &self,
        endpoint: &'static str,
        payload: &T,
    ) -> Result<StatusCode, ReportError> {
        let url = format!("{}/{endpoint}", self.base_url);
        let body = serde_json::to_string(payload)?;
        tracing::debug!(
            %url,
            body_len = body.len(),
            body = truncate(&body, LOG_BODY_LIMIT),
            "sending {endpoint} request"
        );

        let resp = self
            .http
            .post(&url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        tracing::debug!(
            %status,
            body = truncate(&text, LOG_BODY_LIMIT),
            "{endpoint} response"
        );
        Ok(status)
    }
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::loader_type::LoaderType;
    use crate::payload::LoaderDetails;
    use crate::runtime::{Runtime, describe_framework};

    fn sample_app() -> App {
        App {
            name: "app".into(),
            owner: "team".into(),
            description: None,
            load_id: "load-1".into(),
            runtime: Runtime {
                kind: "local".into(),
                host: "h".into(),
                path: "/".into(),
                ip: "127.0.0.1".into(),
                platform: "p".into(),
                os: "Linux".into(),
                os_version: "6".into(),
                language: "rust".into(),
                language_version: "1.88".into(),
                runtime: "local".into(),
            },
            framework: describe_framework(),
            plugin_version: "0.1.0".into(),
        }
    }

    fn client_for(server: &MockServer) -> ClassifierClient {
        ClassifierClient::new(&ClassifierConfig::new(server.uri())).unwrap()
    }

    #[test]
    fn trailing_slash_trimmed() {
        let client = ClassifierClient::new(&ClassifierConfig::new("http://svc/v1/")).unwrap();
        assert_eq!(client.base_url(), "http://svc/v1");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo", 2), "hé");
        assert_eq!(truncate("abc", 10), "abc");
    }

    #[tokio::test]
    async fn discover_sends_json_headers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/app/discover"))
            .and(header("accept", "application/json"))
            .and(header("content-type", "application/json"))
            .and(body_partial_json(serde_json::json!({
                "name": "app",
                "load_id": "load-1"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let status = client_for(&server).send_discover(&sample_app()).await.unwrap();
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn discover_accepts_bad_gateway() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/app/discover"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let status = client_for(&server).send_discover(&sample_app()).await.unwrap();
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn discover_rejects_other_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/app/discover"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .send_discover(&sample_app())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ReportError::UnexpectedStatus {
                endpoint: "app/discover",
                status: 500
            }
        ));
    }

    #[tokio::test]
    async fn loader_doc_requires_ok() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/loader/doc"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let details = LoaderDetails {
            loader: "TextLoader".into(),
            source_path: "/a".into(),
            source_type: LoaderType::File,
            source_size: None,
        };
        let report = DocReport {
            name: "app",
            owner: "team",
            docs: Vec::new(),
            plugin_version: "0.1.0",
            load_id: "load-1",
            loader_details: &details,
            loading_end: true,
            source_owner: "unknown",
        };
        let err = client_for(&server).send_loader_doc(&report).await.unwrap_err();
        assert!(matches!(
            err,
            ReportError::UnexpectedStatus { status: 502, .. }
        ));
    }

    #[tokio::test]
    async fn unreachable_service_is_http_error() {
        let client = ClassifierClient::new(&ClassifierConfig::new("http://127.0.0.1:1")).unwrap();
        let err = client.send_discover(&sample_app()).await.unwrap_err();
        assert!(matches!(err, ReportError::Http(_)));
    }
}
