use serde::{Deserialize, Serialize};

/// Payload for `POST /api/resumes`. Blank name/email are omitted entirely.
#[derive(Debug, Clone, Serialize)]
pub struct NewCandidate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub resume_text: String,
}

impl NewCandidate {
    pub fn new(name: Option<String>, email: Option<String>, resume_text: String) -> Self {
        NewCandidate {
            name: non_blank(name),
            email: non_blank(email),
            resume_text,
        }
    }
}

/// Candidate as created by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub candidate_id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Not echoed by the service; filled in from the request by the caller.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub resume_text: String,
    /// Scorer order, duplicates kept.
    #[serde(default)]
    pub skills: Vec<String>,
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
