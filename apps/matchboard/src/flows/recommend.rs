use serde::Serialize;
use tracing::info;

use crate::client::MatchService;
use crate::errors::ClientError;
use crate::models::JobRecommendation;
use crate::pipeline::{classify, normalize, Recommendation};

/// Jobs returned when the caller does not ask for a specific count.
pub const DEFAULT_TOP_K: usize = 5;

/// A stored job suggested for a candidate, scored on the same scale as a match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendedJob {
    pub job_id: i64,
    pub title: String,
    pub percentage: u32,
    pub recommendation: Recommendation,
    pub overlap_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

impl From<JobRecommendation> for RecommendedJob {
    fn from(job: JobRecommendation) -> Self {
        let percentage = normalize(job.score);
        RecommendedJob {
            job_id: job.job_id,
            title: job.title,
            percentage,
            recommendation: classify(percentage),
            overlap_skills: job.overlap_skills,
            missing_skills: job.missing_skills,
        }
    }
}

/// Best-scoring jobs first; equal scores keep the service's order.
pub async fn recommend_jobs(
    service: &dyn MatchService,
    candidate_id: i64,
    top_k: usize,
) -> Result<Vec<RecommendedJob>, ClientError> {
    let mut jobs = service.recommend_jobs(candidate_id, top_k).await?;
    jobs.sort_by(|a, b| b.score.total_cmp(&a.score));
    jobs.truncate(top_k);
    info!("{} job recommendations for candidate {}", jobs.len(), candidate_id);
    Ok(jobs.into_iter().map(RecommendedJob::from).collect())
}
