//! Batch submission state machine.
//!
//! ```text
//! Idle ──select──▶ FilesSelected(n) ──submit──▶ Submitting ──▶ Succeeded(snapshot)
//!   ▲                    ▲                          │      └──▶ Failed(message)
//!   └──select > 100──────┴──── zero candidates ─────┘
//! ```
//!
//! At most one submission is in flight. Entering `Submitting` disables the
//! submit trigger; a drop guard re-enables it on every exit path, including a
//! panic or the submission future being dropped. The same guard moves an
//! interrupted submission back to `FilesSelected` so it can be resubmitted.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::client::MatchService;
use crate::errors::{ClientError, ValidationError};
use crate::files::ResumeFile;
use crate::models::JobSpec;
use crate::pipeline::{BoardSlot, RankingSnapshot};

pub const MAX_BATCH_FILES: usize = 100;
/// Selections up to this size are listed by name.
pub const LIST_THRESHOLD: usize = 10;

#[derive(Debug, Clone)]
pub enum SubmissionState {
    Idle,
    FilesSelected { count: usize },
    Submitting,
    Succeeded(Arc<RankingSnapshot>),
    Failed(String),
}

impl SubmissionState {
    pub fn name(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::FilesSelected { .. } => "files_selected",
            SubmissionState::Submitting => "submitting",
            SubmissionState::Succeeded(_) => "succeeded",
            SubmissionState::Failed(_) => "failed",
        }
    }
}

/// Shared enable flag a UI binds its submit control to.
#[derive(Debug, Clone)]
pub struct SubmitTrigger(Arc<AtomicBool>);

impl Default for SubmitTrigger {
    fn default() -> Self {
        SubmitTrigger(Arc::new(AtomicBool::new(true)))
    }
}

impl SubmitTrigger {
    pub fn is_enabled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Disables the trigger until the returned guard is dropped. `None` if it
    /// was already disabled.
    fn engage(&self) -> Option<TriggerGuard> {
        self.0
            .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| TriggerGuard {
                trigger: self.clone(),
            })
    }
}

struct TriggerGuard {
    trigger: SubmitTrigger,
}

impl Drop for TriggerGuard {
    fn drop(&mut self) {
        self.trigger.0.store(true, Ordering::Release);
    }
}

/// Owns the controller state while a submission is in flight. Unless
/// `settle` runs, dropping it returns the state to `FilesSelected`.
struct InFlight<'a> {
    state: &'a mut SubmissionState,
    count: usize,
    settled: bool,
    _trigger: TriggerGuard,
}

impl<'a> InFlight<'a> {
    fn begin(state: &'a mut SubmissionState, count: usize, trigger: TriggerGuard) -> Self {
        *state = SubmissionState::Submitting;
        InFlight {
            state,
            count,
            settled: false,
            _trigger: trigger,
        }
    }

    fn settle(mut self, next: SubmissionState) {
        *self.state = next;
        self.settled = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            warn!("Batch submission of {} files was interrupted", self.count);
            *self.state = SubmissionState::FilesSelected { count: self.count };
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "names", rename_all = "snake_case")]
pub enum FileListing {
    Empty,
    Names(Vec<String>),
    TooManyToList,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionSummary {
    pub count: usize,
    /// "1 file", "3 files".
    pub label: String,
    pub listing: FileListing,
}

pub struct BatchSubmissionController {
    state: SubmissionState,
    selection: Vec<ResumeFile>,
    trigger: SubmitTrigger,
    slot: BoardSlot,
}

impl Default for BatchSubmissionController {
    fn default() -> Self {
        Self::new(BoardSlot::new())
    }
}

impl BatchSubmissionController {
    pub fn new(slot: BoardSlot) -> Self {
        BatchSubmissionController {
            state: SubmissionState::Idle,
            selection: Vec::new(),
            trigger: SubmitTrigger::default(),
            slot,
        }
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn selection(&self) -> &[ResumeFile] {
        &self.selection
    }

    pub fn trigger(&self) -> SubmitTrigger {
        self.trigger.clone()
    }

    pub fn slot(&self) -> &BoardSlot {
        &self.slot
    }

    /// Replaces the selection. More than `MAX_BATCH_FILES` clears it and
    /// returns to `Idle`.
    pub fn select_files(&mut self, files: Vec<ResumeFile>) -> Result<usize, ValidationError> {
        if !self.trigger.is_enabled() {
            return Err(ValidationError::SubmissionInFlight);
        }

        let count = files.len();
        if count > MAX_BATCH_FILES {
            warn!("Rejected selection of {count} files (max {MAX_BATCH_FILES})");
            self.selection.clear();
            self.state = SubmissionState::Idle;
            return Err(ValidationError::TooManyFiles {
                selected: count,
                max: MAX_BATCH_FILES,
            });
        }

        self.selection = files;
        self.state = SubmissionState::FilesSelected { count };
        Ok(count)
    }

    pub fn selection_summary(&self) -> SelectionSummary {
        let count = self.selection.len();
        let label = format!("{count} file{}", if count == 1 { "" } else { "s" });
        let listing = match count {
            0 => FileListing::Empty,
            1..=LIST_THRESHOLD => {
                FileListing::Names(self.selection.iter().map(|f| f.name.clone()).collect())
            }
            _ => FileListing::TooManyToList,
        };
        SelectionSummary {
            count,
            label,
            listing,
        }
    }

    /// Submits the current selection for `job`.
    ///
    /// On success the new snapshot is published to the slot, replacing the
    /// previous board wholesale. A response with no candidates is a failure
    /// that keeps the selection so it can be resubmitted.
    pub async fn submit(
        &mut self,
        service: &dyn MatchService,
        job: &JobSpec,
    ) -> Result<Arc<RankingSnapshot>, ClientError> {
        let count = self.check_submittable(job)?;
        let trigger = self
            .trigger
            .engage()
            .ok_or(ValidationError::SubmissionInFlight)?;

        let in_flight = InFlight::begin(&mut self.state, count, trigger);
        info!("Submitting {count} resumes for '{}'", job.title);

        match service.bulk_match(job, &self.selection).await {
            Ok(response) if response.candidates.is_empty() => {
                warn!("Batch for '{}' returned no candidates", job.title);
                in_flight.settle(SubmissionState::FilesSelected { count });
                Err(ValidationError::NoCandidatesProcessed.into())
            }
            Ok(response) => {
                let snapshot = Arc::new(RankingSnapshot::build(
                    response.display_title(),
                    &response.candidates,
                ));
                self.slot.publish(snapshot.clone());
                info!(
                    "Ranked {} candidates (snapshot {})",
                    snapshot.board().len(),
                    snapshot.id()
                );
                in_flight.settle(SubmissionState::Succeeded(snapshot.clone()));
                Ok(snapshot)
            }
            Err(err) => {
                warn!("Batch submission failed: {err}");
                in_flight.settle(SubmissionState::Failed(err.to_string()));
                Err(err.into())
            }
        }
    }

    fn check_submittable(&self, job: &JobSpec) -> Result<usize, ValidationError> {
        if !self.trigger.is_enabled() {
            return Err(ValidationError::SubmissionInFlight);
        }
        let count = self.selection.len();
        if count == 0 {
            return Err(ValidationError::NoFilesSelected);
        }
        if count > MAX_BATCH_FILES {
            return Err(ValidationError::TooManyFiles {
                selected: count,
                max: MAX_BATCH_FILES,
            });
        }
        job.validate()?;
        Ok(count)
    }
}
