use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// A job posting as submitted to the matching service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSpec {
    pub title: String,
    pub description: String,
    /// Case-sensitive, kept in the order the recruiter typed them.
    #[serde(default)]
    pub required_skills: Vec<String>,
}

impl JobSpec {
    /// Builds a job from raw form input, splitting the comma-separated skills field.
    pub fn from_form(title: &str, description: &str, required_skills: &str) -> Self {
        JobSpec {
            title: title.to_string(),
            description: description.to_string(),
            required_skills: parse_skills(required_skills),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title"));
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::MissingField("description"));
        }
        Ok(())
    }

    /// Skills joined back into the comma-separated form field the bulk endpoint expects.
    pub fn required_skills_field(&self) -> String {
        self.required_skills.join(",")
    }
}

/// Splits "a, b,,c" into ["a", "b", "c"].
pub fn parse_skills(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatedJob {
    pub job_id: i64,
}
