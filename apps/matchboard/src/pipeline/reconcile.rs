//! Skill partitioning for display.
//!
//! Overlap and missing come from the scorer and are passed through untouched;
//! only `extra` is derived here. How two skill strings compare is a
//! `SkillPolicy`; the default is exact, case-sensitive equality.

use std::borrow::Cow;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// How skill strings are compared when deriving extra skills.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillPolicy {
    /// Compare case-insensitively.
    pub fold_case: bool,
    /// Ignore surrounding whitespace.
    pub trim: bool,
    /// Keep only the first occurrence of a repeated extra skill.
    pub dedup_extra: bool,
}

impl SkillPolicy {
    pub const EXACT: SkillPolicy = SkillPolicy {
        fold_case: false,
        trim: false,
        dedup_extra: false,
    };

    fn key<'a>(&self, skill: &'a str) -> Cow<'a, str> {
        let skill = if self.trim { skill.trim() } else { skill };
        if self.fold_case {
            Cow::Owned(skill.to_lowercase())
        } else {
            Cow::Borrowed(skill)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SkillPartition {
    pub overlap: Vec<String>,
    pub missing: Vec<String>,
    pub extra: Vec<String>,
}

impl SkillPartition {
    pub fn matched_count(&self) -> usize {
        self.overlap.len()
    }

    /// Required skills the job listed: everything the scorer put in overlap or missing.
    pub fn required_count(&self) -> usize {
        self.overlap.len() + self.missing.len()
    }
}

/// Exact-match reconciliation.
pub fn reconcile(all_skills: &[String], overlap: &[String], missing: &[String]) -> SkillPartition {
    reconcile_with(all_skills, overlap, missing, SkillPolicy::EXACT)
}

/// Partitions a candidate's skills. `extra` keeps the order of `all_skills`.
pub fn reconcile_with(
    all_skills: &[String],
    overlap: &[String],
    missing: &[String],
    policy: SkillPolicy,
) -> SkillPartition {
    let classified: HashSet<Cow<'_, str>> = overlap
        .iter()
        .chain(missing)
        .map(|s| policy.key(s))
        .collect();

    let mut seen: HashSet<Cow<'_, str>> = HashSet::new();
    let mut extra = Vec::new();
    for skill in all_skills {
        let key = policy.key(skill);
        if classified.contains(&key) {
            continue;
        }
        if policy.dedup_extra && !seen.insert(key) {
            continue;
        }
        extra.push(skill.clone());
    }

    SkillPartition {
        overlap: overlap.to_vec(),
        missing: missing.to_vec(),
        extra,
    }
}
