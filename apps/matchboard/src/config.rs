use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::pipeline::reconcile::SkillPolicy;

const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub service_url: String,
    /// Applies to the small JSON calls only. Bulk uploads are never timed out.
    pub request_timeout: Duration,
    pub skill_policy: SkillPolicy,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let request_timeout_secs = match lookup("MATCHBOARD_REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .context("MATCHBOARD_REQUEST_TIMEOUT_SECS must be a whole number of seconds")?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        let skill_policy = SkillPolicy {
            fold_case: flag(&lookup, "MATCHBOARD_SKILL_FOLD_CASE")?,
            trim: flag(&lookup, "MATCHBOARD_SKILL_TRIM")?,
            dedup_extra: flag(&lookup, "MATCHBOARD_SKILL_DEDUP")?,
        };

        Ok(Config {
            service_url: lookup("MATCHBOARD_SERVICE_URL")
                .unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string()),
            request_timeout: Duration::from_secs(request_timeout_secs),
            skill_policy,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    pub fn with_service_url(mut self, service_url: Option<String>) -> Self {
        if let Some(url) = service_url {
            self.service_url = url;
        }
        self
    }
}

fn flag(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<bool> {
    let Some(raw) = lookup(key) else {
        return Ok(false);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => bail!("{key} must be a boolean, got '{other}'"),
    }
}
