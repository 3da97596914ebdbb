use serde::{Deserialize, Serialize};

/// One candidate's result from `POST /api/bulk-match`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchCandidateResult {
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub contact: String,
    /// Fraction in [0,1]. Never read as a percentage: rows, details and the
    /// board summary all scale it by 100 (`pipeline::fraction_percentage`).
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub overlap_skills: Vec<String>,
    #[serde(default)]
    pub missing_skills: Vec<String>,
    #[serde(default)]
    pub all_skills: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BulkMatchResponse {
    #[serde(default)]
    pub job_id: Option<i64>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub total_candidates: Option<usize>,
    #[serde(default)]
    pub candidates: Vec<BatchCandidateResult>,
}

impl BulkMatchResponse {
    /// Title shown above the board; "--" when the service sent none.
    pub fn display_title(&self) -> &str {
        self.job_title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or("--")
    }
}
