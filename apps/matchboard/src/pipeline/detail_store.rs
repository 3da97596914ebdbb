//! Per-candidate detail lookups.
//!
//! A `RankingSnapshot` pairs one board with the `DetailStore` built from its
//! rendered order. Both are produced by a single constructor and never
//! mutated, so a lookup always resolves against the rows it was issued for.
//! `BoardSlot` holds the snapshot currently on display and replaces it with a
//! single pointer swap.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::ClientError;
use crate::models::BatchCandidateResult;
use crate::pipeline::normalizer::fraction_percentage;
use crate::pipeline::ranking::{aggregate, RankingBoard};
use crate::pipeline::recommendation::{classify, Recommendation};
use crate::pipeline::reconcile::{reconcile_with, SkillPartition, SkillPolicy};

/// Index (0-based rendered position) to record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailStore {
    records: Vec<BatchCandidateResult>,
}

impl DetailStore {
    fn from_board(board: &RankingBoard) -> Self {
        DetailStore {
            records: board.entries.iter().map(|e| e.candidate.clone()).collect(),
        }
    }

    pub fn lookup(&self, index: usize) -> Option<&BatchCandidateResult> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Everything the detail panel shows for one candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateDetail {
    pub rank: usize,
    pub label: String,
    pub name: String,
    pub contact: String,
    pub filename: String,
    pub percentage: u32,
    pub recommendation: Recommendation,
    pub skills: SkillPartition,
    pub all_skills: Vec<String>,
}

#[derive(Debug)]
pub struct RankingSnapshot {
    id: Uuid,
    created_at: DateTime<Utc>,
    board: RankingBoard,
    details: DetailStore,
}

impl RankingSnapshot {
    /// Aggregates a batch and indexes its rendered order in one step.
    pub fn build(job_title: &str, results: &[BatchCandidateResult]) -> Self {
        let board = aggregate(job_title, results);
        let details = DetailStore::from_board(&board);
        RankingSnapshot {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            board,
            details,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn board(&self) -> &RankingBoard {
        &self.board
    }

    pub fn details(&self) -> &DetailStore {
        &self.details
    }

    pub fn lookup(&self, index: usize) -> Option<&BatchCandidateResult> {
        self.details.lookup(index)
    }

    pub fn detail(&self, index: usize, policy: SkillPolicy) -> Option<CandidateDetail> {
        let candidate = self.details.lookup(index)?;
        let entry = self.board.entries.get(index)?;
        Some(build_detail(entry.rank, &entry.label, candidate, policy))
    }
}

fn build_detail(
    rank: usize,
    label: &str,
    candidate: &BatchCandidateResult,
    policy: SkillPolicy,
) -> CandidateDetail {
    let percentage = fraction_percentage(candidate.score);
    CandidateDetail {
        rank,
        label: label.to_string(),
        name: or_placeholder(&candidate.name, "Unknown"),
        contact: or_placeholder(&candidate.contact, "Not provided"),
        filename: candidate.filename.clone(),
        percentage,
        recommendation: classify(percentage),
        skills: reconcile_with(
            &candidate.all_skills,
            &candidate.overlap_skills,
            &candidate.missing_skills,
            policy,
        ),
        all_skills: candidate.all_skills.clone(),
    }
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.trim().is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

/// The snapshot currently on display.
#[derive(Debug, Clone, Default)]
pub struct BoardSlot {
    current: Arc<RwLock<Option<Arc<RankingSnapshot>>>>,
}

impl BoardSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces whatever was displayed. The previous snapshot is never merged.
    pub fn publish(&self, snapshot: Arc<RankingSnapshot>) {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *current = Some(snapshot);
    }

    pub fn current(&self) -> Option<Arc<RankingSnapshot>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Resolves a row of the snapshot identified by `snapshot_id`. Fails if a
    /// newer snapshot has replaced it, rather than answering from the wrong rows.
    pub fn lookup(
        &self,
        snapshot_id: Uuid,
        index: usize,
    ) -> Result<BatchCandidateResult, ClientError> {
        let snapshot = self.displayed(snapshot_id)?;
        snapshot
            .lookup(index)
            .cloned()
            .ok_or(ClientError::NoSuchEntry(index))
    }

    pub fn detail(
        &self,
        snapshot_id: Uuid,
        index: usize,
        policy: SkillPolicy,
    ) -> Result<CandidateDetail, ClientError> {
        let snapshot = self.displayed(snapshot_id)?;
        snapshot
            .detail(index, policy)
            .ok_or(ClientError::NoSuchEntry(index))
    }

    fn displayed(&self, snapshot_id: Uuid) -> Result<Arc<RankingSnapshot>, ClientError> {
        match self.current() {
            Some(snapshot) if snapshot.id() == snapshot_id => Ok(snapshot),
            _ => Err(ClientError::StaleSnapshot {
                requested: snapshot_id,
            }),
        }
    }
}
