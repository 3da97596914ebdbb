//! Wire-level data exchanged with the matching service.

pub mod batch;
pub mod candidate;
pub mod job;
pub mod matching;

pub use batch::{BatchCandidateResult, BulkMatchResponse};
pub use candidate::{CandidateRecord, NewCandidate};
pub use job::{CreatedJob, JobSpec};
pub use matching::{JobRecommendation, MatchResult, ScoreBreakdown};
