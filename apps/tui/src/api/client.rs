use super::error::ApiError;
use super::models::{
    CommentsResponse, FeedResponse, LegalNotice, PostCommentResponse, PublishIssueRequest,
    PublishResponse, RawIssue, ReportResponse, TimestampFallback, TimestampSource,
};
use crate::config::AppConfig;
use crate::domain::{ChatReply, Comment, DepartmentStats, Issue, NewComment};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::CACHE_CONTROL;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

pub const CHAT_FALLBACK_REPLY: &str = "Error connecting to brain.";

/// Coordinates sent when the caller has no position (Bahawalpur).
pub const DEFAULT_COORDS: (f64, f64) = (29.3956, 71.6833);

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Operations the client performs against the backend.
///
/// Read paths that feed passive views swallow failures (logged) and return an
/// empty or `None` result; write paths return the error so the caller can
/// surface it. Nothing is retried or cached.
#[async_trait]
pub trait CivicApi: Send + Sync {
    async fn fetch_feed(&self, coords: Option<(f64, f64)>) -> Vec<Issue>;

    /// `None` means "not found", whatever the underlying cause.
    async fn fetch_issue(&self, id: &str) -> Option<Issue>;

    async fn submit_report(
        &self,
        description: &str,
        file: Option<&Path>,
    ) -> Result<ReportResponse, ApiError>;

    async fn publish_issue(
        &self,
        payload: &PublishIssueRequest,
    ) -> Result<PublishResponse, ApiError>;

    async fn fetch_comments(&self, issue_id: &str) -> Vec<Comment>;

    async fn post_comment(&self, comment: &NewComment) -> Result<PostCommentResponse, ApiError>;

    async fn send_chat(&self, query: &str, use_docs: bool) -> ChatReply;

    async fn fetch_department_stats(&self) -> Result<DepartmentStats, ApiError>;

    async fn draft_complaint(&self, issue_id: &str) -> Result<serde_json::Value, ApiError>;

    async fn generate_legal_notice(&self, issue_id: &str) -> Result<LegalNotice, ApiError>;
}

#[derive(Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    user_skills: String,
    default_coords: (f64, f64),
    timestamps: Mutex<TimestampSource>,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        user_skills: impl Into<String>,
        fallback: TimestampFallback,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            user_skills: user_skills.into(),
            default_coords: DEFAULT_COORDS,
            timestamps: Mutex::new(TimestampSource::new(fallback)),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        Self::new(
            config.api_url.clone(),
            config.user_skills.clone(),
            config.timestamp_fallback,
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn synthesize_timestamp(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self.timestamps.lock() {
            Ok(mut source) => source.synthesize(now),
            Err(poisoned) => poisoned.into_inner().synthesize(now),
        }
    }

    async fn try_fetch_feed(&self, coords: Option<(f64, f64)>) -> Result<Vec<Issue>, ApiError> {
        let (lat, lon) = coords.unwrap_or(self.default_coords);
        let params = [
            ("user_skills", self.user_skills.clone()),
            ("user_lat", lat.to_string()),
            ("user_lon", lon.to_string()),
        ];

        let response = self
            .http
            .post(self.endpoint("my_feed"))
            .form(&params)
            .send()
            .await?;
        let body: FeedResponse = read_json(response).await?;

        let now = Utc::now();
        Ok(body
            .feed
            .into_iter()
            .map(|raw| raw.normalize((lat, lon), || self.synthesize_timestamp(now)))
            .collect())
    }

    async fn try_fetch_issue(&self, id: &str) -> Result<Option<Issue>, ApiError> {
        let response = self
            .http
            .get(self.endpoint(&format!("issue/{id}")))
            .send()
            .await?;

        if !response.status().is_success() {
            log::warn!("issue {id} request returned {}", response.status());
            return Ok(None);
        }

        let raw: RawIssue = read_json(response).await?;
        if let Some(error) = raw.error {
            return Err(ApiError::Backend(error));
        }

        Ok(Some(raw.normalize(self.default_coords, || None)))
    }

    async fn try_fetch_comments(&self, issue_id: &str) -> Result<Vec<Comment>, ApiError> {
        let response = self
            .http
            .get(self.endpoint(&format!("comments/{issue_id}")))
            .query(&[("t", Utc::now().timestamp_millis())])
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await?;
        let body: CommentsResponse = read_json(response).await?;
        Ok(body.comments)
    }

    async fn try_send_chat(&self, query: &str, use_docs: bool) -> Result<ChatReply, ApiError> {
        let params = [("query", query.to_string()), ("use_docs", use_docs.to_string())];
        let response = self
            .http
            .post(self.endpoint("chat"))
            .form(&params)
            .send()
            .await?;
        read_json(response).await
    }
}

#[async_trait]
impl CivicApi for ApiClient {
    async fn fetch_feed(&self, coords: Option<(f64, f64)>) -> Vec<Issue> {
        match self.try_fetch_feed(coords).await {
            Ok(issues) => {
                log::debug!("feed returned {} issues", issues.len());
                issues
            }
            Err(e) => {
                log::error!("Feed Error: {e}");
                Vec::new()
            }
        }
    }

    async fn fetch_issue(&self, id: &str) -> Option<Issue> {
        self.try_fetch_issue(id).await.unwrap_or_else(|e| {
            log::error!("Fetch Issue Error ({id}): {e}");
            None
        })
    }

    async fn submit_report(
        &self,
        description: &str,
        file: Option<&Path>,
    ) -> Result<ReportResponse, ApiError> {
        let mut form = Form::new().text("description", description.to_string());

        if let Some(path) = file {
            let bytes = tokio::fs::read(path).await?;
            let file_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or("upload")
                .to_string();
            form = form.part("file", Part::bytes(bytes).file_name(file_name));
        }

        let response = self
            .http
            .post(self.endpoint("report"))
            .multipart(form)
            .send()
            .await?;
        let body: ReportResponse = read_json(response).await?;

        if let Some(error) = body.error.clone() {
            return Err(ApiError::Backend(error));
        }
        Ok(body)
    }

    async fn publish_issue(
        &self,
        payload: &PublishIssueRequest,
    ) -> Result<PublishResponse, ApiError> {
        let response = self
            .http
            .post(self.endpoint("publish_issue"))
            .json(payload)
            .send()
            .await?;
        read_json(response).await
    }

    async fn fetch_comments(&self, issue_id: &str) -> Vec<Comment> {
        self.try_fetch_comments(issue_id).await.unwrap_or_else(|e| {
            log::error!("Comments Error ({issue_id}): {e}");
            Vec::new()
        })
    }

    async fn post_comment(&self, comment: &NewComment) -> Result<PostCommentResponse, ApiError> {
        let params = [
            ("issue_id", comment.issue_id.as_str()),
            ("user_name", comment.user_name.as_str()),
            ("text", comment.text.as_str()),
            ("avatar", comment.avatar.as_str()),
        ];

        let result = async {
            let response = self
                .http
                .post(self.endpoint("comments"))
                .form(&params)
                .send()
                .await?;
            read_json(response).await
        }
        .await;

        if let Err(e) = &result {
            log::error!("Post Comment Error: {e}");
        }
        result
    }

    async fn send_chat(&self, query: &str, use_docs: bool) -> ChatReply {
        self.try_send_chat(query, use_docs).await.unwrap_or_else(|e| {
            log::error!("Chat Error: {e}");
            ChatReply {
                reply: CHAT_FALLBACK_REPLY.to_string(),
            }
        })
    }

    async fn fetch_department_stats(&self) -> Result<DepartmentStats, ApiError> {
        let response = self
            .http
            .get(self.endpoint("departments/stats"))
            .send()
            .await?;
        read_json(response).await
    }

    async fn draft_complaint(&self, issue_id: &str) -> Result<serde_json::Value, ApiError> {
        let response = self
            .http
            .post(self.endpoint("draft_complaint"))
            .form(&[("issue_id", issue_id)])
            .send()
            .await?;
        read_json(response).await
    }

    async fn generate_legal_notice(&self, issue_id: &str) -> Result<LegalNotice, ApiError> {
        let response = self
            .http
            .post(self.endpoint("generate_legal_notice"))
            .form(&[("issue_id", issue_id)])
            .send()
            .await?;
        let notice: LegalNotice = read_json(response).await?;

        match notice.error {
            Some(error) => Err(ApiError::Backend(error)),
            None => Ok(notice),
        }
    }
}

/// Rejects non-2xx responses, then decodes the body.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::IssueType;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    // Nothing listens on the discard port, so every request fails to connect.
    const UNREACHABLE: &str = "http://127.0.0.1:9";

    fn client() -> Result<ApiClient, ApiError> {
        ApiClient::new(UNREACHABLE, "Medical", TimestampFallback::Missing)
    }

    /// Answers a single request with `status` and a JSON `body`, then yields
    /// the raw request it received.
    async fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> std::io::Result<(String, JoinHandle<String>)> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let url = format!("http://{}", listener.local_addr()?);

        let server = tokio::spawn(async move {
            let Ok((mut stream, _)) = listener.accept().await else {
                return String::new();
            };
            let request = read_request(&mut stream).await.unwrap_or_default();
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes()).await;
            let _ = stream.shutdown().await;
            request
        });

        Ok((url, server))
    }

    async fn read_request(stream: &mut TcpStream) -> std::io::Result<String> {
        let mut request = Vec::new();
        let mut chunk = [0_u8; 1024];

        loop {
            let read = stream.read(&mut chunk).await?;
            if read == 0 {
                break;
            }
            request.extend_from_slice(&chunk[..read]);

            let text = String::from_utf8_lossy(&request);
            if let Some(end) = text.find("\r\n\r\n") {
                let length = text[..end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        if name.eq_ignore_ascii_case("content-length") {
                            value.trim().parse::<usize>().ok()
                        } else {
                            None
                        }
                    })
                    .unwrap_or(0);
                if request.len() >= end + 4 + length {
                    break;
                }
            }
        }

        Ok(String::from_utf8_lossy(&request).into_owned())
    }

    #[tokio::test]
    async fn issue_with_error_status_is_not_found() -> TestResult {
        let (url, server) = serve_once("404 Not Found", r#"{"detail":"Not Found"}"#).await?;
        let client = ApiClient::new(url, "", TimestampFallback::Missing)?;

        assert!(client.fetch_issue("12").await.is_none());
        assert!(server.await?.starts_with("GET /issue/12 "));
        Ok(())
    }

    #[tokio::test]
    async fn issue_with_backend_error_is_not_found() -> TestResult {
        let (url, server) = serve_once("200 OK", r#"{"error":"Issue not found"}"#).await?;
        let client = ApiClient::new(url, "", TimestampFallback::Missing)?;

        assert!(client.fetch_issue("12").await.is_none());
        server.await?;
        Ok(())
    }

    #[tokio::test]
    async fn feed_record_without_position_uses_request_coords() -> TestResult {
        let (url, server) = serve_once(
            "200 OK",
            r#"{"feed":[{"id":7,"title":"Open manhole","category":"Road Safety","severity":8}]}"#,
        )
        .await?;
        let client = ApiClient::new(url, "Plumbing", TimestampFallback::Missing)?;

        let issues = client.fetch_feed(Some((31.5, 74.25))).await;
        let request = server.await?;

        assert!(request.starts_with("POST /my_feed "));
        assert!(request.contains("user_lat=31.5"));
        assert!(request.contains("user_lon=74.25"));
        assert!(request.contains("user_skills=Plumbing"));

        assert_eq!(issues.len(), 1);
        let issue = &issues[0];
        assert_eq!(issue.id, "7");
        assert_eq!(issue.issue_type(), IssueType::Government);
        assert!((issue.location.lat - 31.5).abs() < f64::EPSILON);
        assert!((issue.location.lng - 74.25).abs() < f64::EPSILON);
        assert!(issue.timestamp.is_none());
        Ok(())
    }

    #[test]
    fn endpoints_join_without_double_slashes() -> Result<(), ApiError> {
        let client = ApiClient::new("http://localhost:8000/", "", TimestampFallback::Missing)?;
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.endpoint("/my_feed"), "http://localhost:8000/my_feed");
        assert_eq!(
            client.endpoint("comments/4"),
            "http://localhost:8000/comments/4"
        );
        Ok(())
    }

    #[tokio::test]
    async fn read_paths_fail_silently() -> Result<(), ApiError> {
        let client = client()?;

        assert!(client.fetch_feed(None).await.is_empty());
        assert!(client.fetch_issue("1").await.is_none());
        assert!(client.fetch_comments("1").await.is_empty());
        assert_eq!(client.send_chat("hello", true).await.reply, CHAT_FALLBACK_REPLY);
        Ok(())
    }

    #[tokio::test]
    async fn write_paths_surface_errors() -> Result<(), ApiError> {
        let client = client()?;
        let comment = NewComment {
            issue_id: "1".to_string(),
            user_name: "Jon Anderson".to_string(),
            text: "Still broken".to_string(),
            avatar: String::new(),
        };

        assert!(matches!(
            client.post_comment(&comment).await,
            Err(ApiError::Transport(_))
        ));
        assert!(client.fetch_department_stats().await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn missing_attachment_is_an_io_error() -> Result<(), ApiError> {
        let client = client()?;
        let result = client
            .submit_report("Broken pipe", Some(Path::new("/nonexistent/photo.jpg")))
            .await;
        assert!(matches!(result, Err(ApiError::Io(_))));
        Ok(())
    }
}
