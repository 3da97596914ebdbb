//! Matching service client: the single point of entry for every call to the
//! external résumé/job matching service.
//!
//! RULE: no other module talks HTTP. Flows depend on the `MatchService` trait.
//!
//! No retries and no backoff: a failure ends that attempt and the operator resubmits.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Deserialize};
use std::time::Duration;
use tracing::debug;

use crate::errors::ServiceError;
use crate::files::ResumeFile;
use crate::models::matching::RecommendationsResponse;
use crate::models::{
    BulkMatchResponse, CandidateRecord, CreatedJob, JobRecommendation, JobSpec, MatchResult,
    NewCandidate,
};

#[cfg(test)]
pub(crate) mod fake;

const EXTRACT_PATH: &str = "/api/extract-resume";
const RESUMES_PATH: &str = "/api/resumes";
const JOBS_PATH: &str = "/api/jobs";
const MATCH_PATH: &str = "/api/match";
const BULK_MATCH_PATH: &str = "/api/bulk-match";
const RECOMMENDATIONS_PATH: &str = "/api/recommendations";
const HEALTH_PATH: &str = "/health";

/// Request/response contracts of the matching service.
#[async_trait]
pub trait MatchService: Send + Sync {
    async fn extract_resume(&self, file: &ResumeFile) -> Result<String, ServiceError>;

    async fn create_candidate(
        &self,
        candidate: &NewCandidate,
    ) -> Result<CandidateRecord, ServiceError>;

    async fn create_job(&self, job: &JobSpec) -> Result<CreatedJob, ServiceError>;

    async fn get_match(&self, candidate_id: i64, job_id: i64) -> Result<MatchResult, ServiceError>;

    /// One request carrying the job fields and every file.
    async fn bulk_match(
        &self,
        job: &JobSpec,
        files: &[ResumeFile],
    ) -> Result<BulkMatchResponse, ServiceError>;

    async fn recommend_jobs(
        &self,
        candidate_id: i64,
        top_k: usize,
    ) -> Result<Vec<JobRecommendation>, ServiceError>;

    async fn health(&self) -> Result<ServiceHealth, ServiceError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceHealth {
    pub status: String,
}

#[derive(Debug, Deserialize)]
struct ExtractedText {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorField,
}

/// The service reports `{"error": "..."}`; some proxies nest a message object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorField {
    Text(String),
    Detail { message: String },
}

/// `reqwest` implementation of `MatchService`.
#[derive(Clone)]
pub struct HttpMatchService {
    client: Client,
    /// Separate client without a request timeout: bulk uploads run until the
    /// service answers.
    upload_client: Client,
    base_url: String,
}

impl HttpMatchService {
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self, ServiceError> {
        Ok(Self {
            client: Client::builder().timeout(request_timeout).build()?,
            upload_client: Client::builder().build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl MatchService for HttpMatchService {
    async fn extract_resume(&self, file: &ResumeFile) -> Result<String, ServiceError> {
        let form = Form::new().part("file", file_part(file)?);
        let response = self
            .client
            .post(self.url(EXTRACT_PATH))
            .multipart(form)
            .send()
            .await?;
        let extracted: ExtractedText = decode(EXTRACT_PATH, response).await?;
        Ok(extracted.text)
    }

    async fn create_candidate(
        &self,
        candidate: &NewCandidate,
    ) -> Result<CandidateRecord, ServiceError> {
        let response = self
            .client
            .post(self.url(RESUMES_PATH))
            .json(candidate)
            .send()
            .await?;
        decode(RESUMES_PATH, response).await
    }

    async fn create_job(&self, job: &JobSpec) -> Result<CreatedJob, ServiceError> {
        let response = self
            .client
            .post(self.url(JOBS_PATH))
            .json(job)
            .send()
            .await?;
        decode(JOBS_PATH, response).await
    }

    async fn get_match(&self, candidate_id: i64, job_id: i64) -> Result<MatchResult, ServiceError> {
        let response = self
            .client
            .get(self.url(MATCH_PATH))
            .query(&[("candidate_id", candidate_id), ("job_id", job_id)])
            .send()
            .await?;
        decode(MATCH_PATH, response).await
    }

    async fn bulk_match(
        &self,
        job: &JobSpec,
        files: &[ResumeFile],
    ) -> Result<BulkMatchResponse, ServiceError> {
        let mut form = Form::new()
            .text("title", job.title.clone())
            .text("description", job.description.clone())
            .text("required_skills", job.required_skills_field());
        for file in files {
            form = form.part("resume_files", file_part(file)?);
        }

        debug!("Uploading {} resume files to {}", files.len(), BULK_MATCH_PATH);
        let response = self
            .upload_client
            .post(self.url(BULK_MATCH_PATH))
            .multipart(form)
            .send()
            .await?;
        decode(BULK_MATCH_PATH, response).await
    }

    async fn recommend_jobs(
        &self,
        candidate_id: i64,
        top_k: usize,
    ) -> Result<Vec<JobRecommendation>, ServiceError> {
        let response = self
            .client
            .get(self.url(RECOMMENDATIONS_PATH))
            .query(&[
                ("candidate_id", candidate_id.to_string()),
                ("k", top_k.to_string()),
            ])
            .send()
            .await?;
        let body: RecommendationsResponse = decode(RECOMMENDATIONS_PATH, response).await?;
        Ok(body.recommendations)
    }

    async fn health(&self) -> Result<ServiceHealth, ServiceError> {
        let response = self.client.get(self.url(HEALTH_PATH)).send().await?;
        decode(HEALTH_PATH, response).await
    }
}

fn file_part(file: &ResumeFile) -> Result<Part, ServiceError> {
    let part = Part::bytes(file.bytes.to_vec()).file_name(file.name.clone());
    if file.mime.is_empty() {
        return Ok(part);
    }
    Ok(part.mime_str(&file.mime)?)
}

/// Reads the whole body as text first so it can be surfaced verbatim when it
/// does not parse.
async fn decode<T: DeserializeOwned>(path: &str, response: Response) -> Result<T, ServiceError> {
    let status = response.status();
    let body = response.text().await?;
    debug!("{} responded {}", path, status);

    if !status.is_success() {
        let message = error_message(&body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });
        return Err(ServiceError::Http {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str(&body).map_err(|source| ServiceError::MalformedResponse {
        status: status.as_u16(),
        body,
        source,
    })
}

/// Prefers the service's `error` field; falls back to the raw body.
fn error_message(body: &str) -> Option<String> {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return Some(match parsed.error {
            ErrorField::Text(message) | ErrorField::Detail { message } => message,
        });
    }
    let trimmed = body.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::{Multipart, Query};
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::collections::HashMap;

    async fn spawn(router: Router) -> HttpMatchService {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        HttpMatchService::new(&format!("http://{addr}/"), Duration::from_secs(5)).unwrap()
    }

    /// Echoes the multipart form back as JSON so tests can inspect what was sent.
    async fn echo_bulk(mut multipart: Multipart) -> Json<Value> {
        let mut fields = serde_json::Map::new();
        let mut files = Vec::new();
        while let Some(field) = multipart.next_field().await.unwrap() {
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let data = field.bytes().await.unwrap();
            match file_name {
                Some(file_name) => files.push(json!({
                    "field": name,
                    "file_name": file_name,
                    "content_type": content_type,
                    "len": data.len(),
                })),
                None => {
                    fields.insert(name, json!(String::from_utf8_lossy(&data)));
                }
            }
        }
        Json(json!({
            "job_title": fields.get("title").cloned().unwrap_or(Value::Null),
            "candidates": [{
                "filename": "echo",
                "name": fields.get("required_skills").cloned().unwrap_or(Value::Null),
                "contact": serde_json::to_string(&files).unwrap(),
                "score": 0.5
            }]
        }))
    }

    #[test]
    fn test_error_message_prefers_error_field() {
        assert_eq!(
            error_message(r#"{"error": "title and description are required"}"#),
            Some("title and description are required".to_string())
        );
        assert_eq!(
            error_message(r#"{"error": {"code": "X", "message": "nested"}}"#),
            Some("nested".to_string())
        );
        assert_eq!(
            error_message("<html>Bad Gateway</html>"),
            Some("<html>Bad Gateway</html>".to_string())
        );
        assert_eq!(error_message("   "), None);
    }

    #[tokio::test]
    async fn test_bulk_match_sends_one_multipart_request() {
        let service = spawn(Router::new().route(BULK_MATCH_PATH, post(echo_bulk))).await;
        let job = JobSpec::from_form("Data Engineer", "Pipelines", "SQL, Spark");
        let files = vec![
            ResumeFile::new("a.txt", "text/plain", b"Ada".to_vec()),
            ResumeFile::new("b.pdf", "application/pdf", b"%PDF".to_vec()),
        ];

        let response = service.bulk_match(&job, &files).await.unwrap();
        assert_eq!(response.display_title(), "Data Engineer");

        let echoed = &response.candidates[0];
        assert_eq!(echoed.name, "SQL,Spark");
        let uploaded: Vec<Value> = serde_json::from_str(&echoed.contact).unwrap();
        assert_eq!(uploaded.len(), 2);
        assert_eq!(uploaded[0]["field"], "resume_files");
        assert_eq!(uploaded[0]["file_name"], "a.txt");
        assert_eq!(uploaded[1]["content_type"], "application/pdf");
        assert_eq!(uploaded[1]["len"], 4);
    }

    #[tokio::test]
    async fn test_error_status_surfaces_service_message() {
        let router = Router::new().route(
            BULK_MATCH_PATH,
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Maximum 100 files allowed" })),
                )
            }),
        );
        let service = spawn(router).await;
        let job = JobSpec::from_form("t", "d", "");

        match service.bulk_match(&job, &[]).await {
            Err(ServiceError::Http { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "Maximum 100 files allowed");
            }
            other => panic!("expected HTTP error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_preserved() {
        let router = Router::new().route(
            MATCH_PATH,
            get(|| async { "Internal glitch: not json" }),
        );
        let service = spawn(router).await;

        match service.get_match(1, 2).await {
            Err(ServiceError::MalformedResponse { status, body, .. }) => {
                assert_eq!(status, 200);
                assert_eq!(body, "Internal glitch: not json");
            }
            other => panic!("expected malformed response, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_match_sends_ids_and_resolves_score_field() {
        let router = Router::new().route(
            MATCH_PATH,
            get(|Query(params): Query<HashMap<String, String>>| async move {
                Json(json!({
                    "candidate_id": params["candidate_id"].parse::<i64>().unwrap(),
                    "job_id": params["job_id"].parse::<i64>().unwrap(),
                    "match_score": 0.64,
                    "overlap_skills": ["Rust"],
                    "missing_skills": []
                }))
            }),
        );
        let service = spawn(router).await;

        let result = service.get_match(12, 34).await.unwrap();
        assert_eq!(result.candidate_id, Some(12));
        assert_eq!(result.job_id, Some(34));
        assert_eq!(result.raw_score, 0.64);
    }

    #[tokio::test]
    async fn test_create_candidate_and_job_round_trip() {
        let router = Router::new()
            .route(
                RESUMES_PATH,
                post(|Json(body): Json<Value>| async move {
                    assert!(body.get("name").is_none());
                    (
                        StatusCode::CREATED,
                        Json(json!({ "candidate_id": 5, "skills": ["Go", "SQL"] })),
                    )
                }),
            )
            .route(
                JOBS_PATH,
                post(|Json(body): Json<Value>| async move {
                    assert_eq!(body["required_skills"], json!(["Go"]));
                    (StatusCode::CREATED, Json(json!({ "job_id": 9 })))
                }),
            );
        let service = spawn(router).await;

        let candidate = service
            .create_candidate(&NewCandidate::new(None, None, "resume".into()))
            .await
            .unwrap();
        assert_eq!(candidate.candidate_id, 5);
        assert_eq!(candidate.skills, vec!["Go", "SQL"]);

        let job = service
            .create_job(&JobSpec::from_form("Gopher", "Write Go", "Go"))
            .await
            .unwrap();
        assert_eq!(job.job_id, 9);
    }

    #[tokio::test]
    async fn test_extract_resume_returns_text() {
        let router = Router::new().route(
            EXTRACT_PATH,
            post(|mut multipart: Multipart| async move {
                let field = multipart.next_field().await.unwrap().unwrap();
                assert_eq!(field.name(), Some("file"));
                let data = field.bytes().await.unwrap();
                Json(json!({ "text": format!("extracted {} bytes", data.len()) }))
            }),
        );
        let service = spawn(router).await;

        let file = ResumeFile::new("cv.pdf", "application/pdf", b"%PDF-1.7".to_vec());
        assert_eq!(
            service.extract_resume(&file).await.unwrap(),
            "extracted 8 bytes"
        );
    }

    #[tokio::test]
    async fn test_recommendations_and_health() {
        let router = Router::new()
            .route(
                RECOMMENDATIONS_PATH,
                get(|Query(params): Query<HashMap<String, String>>| async move {
                    assert_eq!(params["k"], "2");
                    Json(json!({ "recommendations": [
                        { "job_id": 1, "title": "SRE", "score": 0.81 },
                        { "job_id": 2, "title": "DBA", "score": 0.4 }
                    ]}))
                }),
            )
            .route(HEALTH_PATH, get(|| async { Json(json!({ "status": "ok" })) }));
        let service = spawn(router).await;

        let recommendations = service.recommend_jobs(3, 2).await.unwrap();
        assert_eq!(recommendations.len(), 2);
        assert_eq!(recommendations[0].title, "SRE");
        assert_eq!(service.health().await.unwrap().status, "ok");
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let service =
            HttpMatchService::new(&format!("http://{addr}"), Duration::from_secs(2)).unwrap();
        assert!(matches!(
            service.health().await,
            Err(ServiceError::Transport(_))
        ));
    }
}
