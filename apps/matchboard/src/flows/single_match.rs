//! Single-match flow: one résumé against one job.
//!
//! Steps run strictly in order: extract (PDF only) → create candidate →
//! create job → match. A failing step aborts the rest. Records already
//! created on the service are NOT rolled back; the service offers no way to
//! undo them, so the flow only logs what was left behind.

use serde::Serialize;
use tracing::{info, warn};

use crate::client::MatchService;
use crate::errors::{ClientError, ValidationError};
use crate::files::{FileKind, ResumeFile};
use crate::models::candidate::non_blank;
use crate::models::{CandidateRecord, JobSpec, MatchResult, NewCandidate, ScoreBreakdown};
use crate::pipeline::{
    classify, normalize, reconcile_with, Recommendation, SkillPartition, SkillPolicy,
};

/// Characters of extracted text shown in a preview.
pub const PREVIEW_CHAR_LIMIT: usize = 5000;

#[derive(Debug, Clone, Default)]
pub struct SingleMatchRequest {
    pub title: String,
    pub description: String,
    /// Comma-separated, as typed.
    pub required_skills: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub resume: Option<ResumeFile>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchReport {
    pub candidate_name: String,
    pub candidate_email: String,
    pub job_title: String,
    pub percentage: u32,
    pub recommendation: Recommendation,
    pub skills: SkillPartition,
    pub candidate_skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<ScoreBreakdown>,
}

impl MatchReport {
    /// "matched / required", e.g. "2 / 3".
    pub fn skills_match(&self) -> String {
        format!(
            "{} / {}",
            self.skills.matched_count(),
            self.skills.required_count()
        )
    }
}

pub async fn run_single_match(
    service: &dyn MatchService,
    request: SingleMatchRequest,
    policy: SkillPolicy,
) -> Result<MatchReport, ClientError> {
    let job = JobSpec::from_form(&request.title, &request.description, &request.required_skills);
    job.validate()?;
    let resume = request
        .resume
        .as_ref()
        .ok_or(ValidationError::MissingField("resume file"))?;
    let kind = resume.require_kind()?;

    let mut committed: Vec<String> = Vec::new();
    let result = async {
        let resume_text = match kind {
            FileKind::Pdf => service.extract_resume(resume).await?,
            FileKind::Text => resume.text_lossy(),
        };

        let new_candidate =
            NewCandidate::new(request.name.clone(), request.email.clone(), resume_text);
        let mut candidate = service.create_candidate(&new_candidate).await?;
        candidate.resume_text = new_candidate.resume_text;
        committed.push(format!("candidate {}", candidate.candidate_id));

        let created_job = service.create_job(&job).await?;
        committed.push(format!("job {}", created_job.job_id));

        let matched = service
            .get_match(candidate.candidate_id, created_job.job_id)
            .await?;
        Ok::<_, ClientError>((candidate, matched))
    }
    .await;

    let (candidate, matched) = match result {
        Ok(outcome) => outcome,
        Err(err) => {
            if !committed.is_empty() {
                warn!(
                    "Single match aborted after creating {}; these are not rolled back",
                    committed.join(", ")
                );
            }
            return Err(err);
        }
    };

    info!(
        "Matched candidate {} against job '{}' (raw score {})",
        candidate.candidate_id, job.title, matched.raw_score
    );
    Ok(build_match_report(&request, &job, &candidate, &matched, policy))
}

/// Assembles the report shown for one match. Form input wins over what the
/// service echoed back for name and email.
pub fn build_match_report(
    request: &SingleMatchRequest,
    job: &JobSpec,
    candidate: &CandidateRecord,
    matched: &MatchResult,
    policy: SkillPolicy,
) -> MatchReport {
    let percentage = normalize(matched.raw_score);

    let candidate_name = non_blank(request.name.clone())
        .or_else(|| non_blank(candidate.name.clone()))
        .unwrap_or_else(|| "Anonymous".to_string());
    let candidate_email = non_blank(request.email.clone())
        .or_else(|| non_blank(candidate.email.clone()))
        .unwrap_or_else(|| "Not provided".to_string());

    MatchReport {
        candidate_name,
        candidate_email,
        job_title: job.title.clone(),
        percentage,
        recommendation: classify(percentage),
        skills: reconcile_with(
            &candidate.skills,
            &matched.overlap_skills,
            &matched.missing_skills,
            policy,
        ),
        candidate_skills: candidate.skills.clone(),
        breakdown: matched.breakdown,
    }
}

/// Extracted text of a résumé, truncated for preview.
pub async fn preview_resume(
    service: &dyn MatchService,
    file: &ResumeFile,
) -> Result<String, ClientError> {
    file.require_kind()?;
    let text = service.extract_resume(file).await?;
    Ok(text.chars().take(PREVIEW_CHAR_LIMIT).collect())
}
