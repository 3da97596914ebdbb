//! Ranking aggregation for a batch of candidate results.
//!
//! Results are stable-sorted by descending score, so candidates with equal
//! scores keep the order the service returned them in. Each entry carries
//! everything a board row displays; the renderer never computes.

use serde::Serialize;

use crate::models::BatchCandidateResult;
use crate::pipeline::normalizer::{clamp_percentage, fraction_percentage, round_half_up};
use crate::pipeline::recommendation::Tier;

pub const MEDALS: [&str; 3] = ["🥇", "🥈", "🥉"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    /// 1-based position after sorting.
    pub rank: usize,
    /// Medal for the podium, "#N" otherwise.
    pub label: String,
    pub percentage: u32,
    pub tier: Tier,
    pub matched_skills: usize,
    pub required_skills: usize,
    pub candidate: BatchCandidateResult,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BoardSummary {
    pub average_percentage: u32,
    pub top_percentage: u32,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingBoard {
    pub job_title: String,
    pub entries: Vec<RankedEntry>,
    pub summary: BoardSummary,
}

impl RankingBoard {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn rank_label(rank: usize) -> String {
    match rank {
        1..=3 => MEDALS[rank - 1].to_string(),
        _ => format!("#{rank}"),
    }
}

/// Builds a board from one batch response. The input slice is left untouched.
pub fn aggregate(job_title: &str, results: &[BatchCandidateResult]) -> RankingBoard {
    let mut ordered: Vec<&BatchCandidateResult> = results.iter().collect();
    // `sort_by` is stable; ties keep arrival order.
    ordered.sort_by(|a, b| b.score.total_cmp(&a.score));

    let entries = ordered
        .into_iter()
        .enumerate()
        .map(|(index, candidate)| {
            let rank = index + 1;
            let percentage = fraction_percentage(candidate.score);
            RankedEntry {
                rank,
                label: rank_label(rank),
                percentage,
                tier: Tier::from_percentage(percentage),
                matched_skills: candidate.overlap_skills.len(),
                required_skills: candidate.overlap_skills.len() + candidate.missing_skills.len(),
                candidate: candidate.clone(),
            }
        })
        .collect();

    RankingBoard {
        job_title: job_title.to_string(),
        entries,
        summary: summarize(results),
    }
}

/// Average and top percentage over `score * 100`. Zero for an empty batch.
pub fn summarize(results: &[BatchCandidateResult]) -> BoardSummary {
    if results.is_empty() {
        return BoardSummary::default();
    }

    let percentages = results.iter().map(|r| r.score * 100.0);
    let total: f64 = percentages.clone().sum();
    let top = percentages.fold(f64::NEG_INFINITY, f64::max);

    BoardSummary {
        average_percentage: clamp_percentage(round_half_up(total / results.len() as f64)),
        top_percentage: clamp_percentage(round_half_up(top)),
        count: results.len(),
    }
}
