//! Scripted in-memory `MatchService` for flow tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{MatchService, ServiceHealth};
use crate::errors::ServiceError;
use crate::files::ResumeFile;
use crate::flows::batch::SubmitTrigger;
use crate::models::{
    BatchCandidateResult, BulkMatchResponse, CandidateRecord, CreatedJob, JobRecommendation,
    JobSpec, MatchResult, NewCandidate,
};

pub(crate) struct FakeService {
    calls: Mutex<Vec<&'static str>>,
    bulk: Mutex<VecDeque<Result<BulkMatchResponse, ServiceError>>>,
    fail_on: Option<&'static str>,
    hang_bulk: bool,
    extracted_text: String,
    candidate_skills: Vec<String>,
    match_body: Value,
    recommendations: Vec<JobRecommendation>,
    trigger: Option<SubmitTrigger>,
    trigger_seen: Mutex<Vec<bool>>,
    sent_resume_text: Mutex<Option<String>>,
}

impl FakeService {
    pub(crate) fn new() -> Self {
        FakeService {
            calls: Mutex::new(Vec::new()),
            bulk: Mutex::new(VecDeque::new()),
            fail_on: None,
            hang_bulk: false,
            extracted_text: "extracted pdf text".to_string(),
            candidate_skills: Vec::new(),
            match_body: json!({ "score": 0.0 }),
            recommendations: Vec::new(),
            trigger: None,
            trigger_seen: Mutex::new(Vec::new()),
            sent_resume_text: Mutex::new(None),
        }
    }

    pub(crate) fn with_bulk(self, job_title: &str, candidates: Vec<BatchCandidateResult>) -> Self {
        self.bulk.lock().unwrap().push_back(Ok(BulkMatchResponse {
            job_id: Some(1),
            job_title: Some(job_title.to_string()),
            total_candidates: Some(candidates.len()),
            candidates,
        }));
        self
    }

    pub(crate) fn with_bulk_error(self, status: u16, message: &str) -> Self {
        self.bulk.lock().unwrap().push_back(Err(ServiceError::Http {
            status,
            message: message.to_string(),
        }));
        self
    }

    pub(crate) fn with_extracted_text(mut self, text: impl Into<String>) -> Self {
        self.extracted_text = text.into();
        self
    }

    /// `bulk_match` never completes.
    pub(crate) fn hanging_bulk(mut self) -> Self {
        self.hang_bulk = true;
        self
    }

    pub(crate) fn failing_on(mut self, step: &'static str) -> Self {
        self.fail_on = Some(step);
        self
    }

    pub(crate) fn with_candidate_skills(mut self, skills: &[&str]) -> Self {
        self.candidate_skills = skills.iter().map(|s| s.to_string()).collect();
        self
    }

    pub(crate) fn with_match(mut self, body: Value) -> Self {
        self.match_body = body;
        self
    }

    pub(crate) fn with_recommendations(mut self, recommendations: Vec<JobRecommendation>) -> Self {
        self.recommendations = recommendations;
        self
    }

    /// Records the trigger state every time `bulk_match` is entered.
    pub(crate) fn watching(mut self, trigger: SubmitTrigger) -> Self {
        self.trigger = Some(trigger);
        self
    }

    pub(crate) fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn trigger_seen(&self) -> Vec<bool> {
        self.trigger_seen.lock().unwrap().clone()
    }

    pub(crate) fn sent_resume_text(&self) -> Option<String> {
        self.sent_resume_text.lock().unwrap().clone()
    }

    fn record(&self, step: &'static str) -> Result<(), ServiceError> {
        self.calls.lock().unwrap().push(step);
        if self.fail_on == Some(step) {
            return Err(ServiceError::Http {
                status: 500,
                message: format!("{step} failed"),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl MatchService for FakeService {
    async fn extract_resume(&self, _file: &ResumeFile) -> Result<String, ServiceError> {
        self.record("extract_resume")?;
        Ok(self.extracted_text.clone())
    }

    async fn create_candidate(
        &self,
        candidate: &NewCandidate,
    ) -> Result<CandidateRecord, ServiceError> {
        self.record("create_candidate")?;
        *self.sent_resume_text.lock().unwrap() = Some(candidate.resume_text.clone());
        Ok(CandidateRecord {
            candidate_id: 41,
            name: Some("Service Name".to_string()),
            email: None,
            resume_text: String::new(),
            skills: self.candidate_skills.clone(),
        })
    }

    async fn create_job(&self, _job: &JobSpec) -> Result<CreatedJob, ServiceError> {
        self.record("create_job")?;
        Ok(CreatedJob { job_id: 42 })
    }

    async fn get_match(
        &self,
        _candidate_id: i64,
        _job_id: i64,
    ) -> Result<MatchResult, ServiceError> {
        self.record("get_match")?;
        Ok(serde_json::from_value(self.match_body.clone())
            .expect("fake match body must deserialize"))
    }

    async fn bulk_match(
        &self,
        _job: &JobSpec,
        _files: &[ResumeFile],
    ) -> Result<BulkMatchResponse, ServiceError> {
        if let Some(trigger) = &self.trigger {
            self.trigger_seen.lock().unwrap().push(trigger.is_enabled());
        }
        self.record("bulk_match")?;
        if self.hang_bulk {
            std::future::pending::<()>().await;
        }
        self.bulk
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(BulkMatchResponse::default()))
    }

    async fn recommend_jobs(
        &self,
        _candidate_id: i64,
        top_k: usize,
    ) -> Result<Vec<JobRecommendation>, ServiceError> {
        self.record("recommend_jobs")?;
        Ok(self.recommendations.iter().take(top_k).cloned().collect())
    }

    async fn health(&self) -> Result<ServiceHealth, ServiceError> {
        self.record("health")?;
        Ok(ServiceHealth {
            status: "ok".to_string(),
        })
    }
}
