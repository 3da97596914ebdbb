use serde::{Deserialize, Serialize};

/// Scorer output for one candidate/job pair.
///
/// The service names its score field inconsistently. The precedence
/// `score`, then `match_score`, then `match` (default 0) is applied once
/// here, so nothing downstream ever looks at the wire names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireMatchResult")]
pub struct MatchResult {
    pub candidate_id: Option<i64>,
    pub job_id: Option<i64>,
    /// Either a fraction in [0,1] or a percentage in (1,100]. See `pipeline::normalizer`.
    #[serde(rename = "score")]
    pub raw_score: f64,
    pub overlap_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    #[serde(flatten)]
    pub breakdown: Option<ScoreBreakdown>,
}

/// Component scores some service versions report alongside the blended score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub skills_match_score: Option<f64>,
    pub text_similarity_score: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct WireMatchResult {
    #[serde(default)]
    candidate_id: Option<i64>,
    #[serde(default)]
    job_id: Option<i64>,
    #[serde(default)]
    score: Option<f64>,
    #[serde(default)]
    match_score: Option<f64>,
    #[serde(default, rename = "match")]
    match_value: Option<f64>,
    #[serde(default)]
    overlap_skills: Vec<String>,
    #[serde(default)]
    missing_skills: Vec<String>,
    #[serde(default)]
    skills_match_score: Option<f64>,
    #[serde(default)]
    text_similarity_score: Option<f64>,
}

impl From<WireMatchResult> for MatchResult {
    fn from(wire: WireMatchResult) -> Self {
        let raw_score = wire
            .score
            .or(wire.match_score)
            .or(wire.match_value)
            .unwrap_or(0.0);

        let breakdown = match (wire.skills_match_score, wire.text_similarity_score) {
            (None, None) => None,
            (skills_match_score, text_similarity_score) => Some(ScoreBreakdown {
                skills_match_score,
                text_similarity_score,
            }),
        };

        MatchResult {
            candidate_id: wire.candidate_id,
            job_id: wire.job_id,
            raw_score,
            overlap_skills: wire.overlap_skills,
            missing_skills: wire.missing_skills,
            breakdown,
        }
    }
}

/// One entry of `GET /api/recommendations`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecommendation {
    pub job_id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub overlap_skills: Vec<String>,
    #[serde(default)]
    pub missing_skills: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationsResponse {
    #[serde(default)]
    pub recommendations: Vec<JobRecommendation>,
}
