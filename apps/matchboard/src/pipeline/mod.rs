// Result-reconciliation and ranking pipeline.
// Pure functions over plain data; rendering consumes their output only.

pub mod detail_store;
pub mod normalizer;
pub mod ranking;
pub mod recommendation;
pub mod reconcile;

pub use detail_store::{BoardSlot, CandidateDetail, DetailStore, RankingSnapshot};
pub use normalizer::{fraction_percentage, normalize};
pub use ranking::{aggregate, BoardSummary, RankedEntry, RankingBoard};
pub use recommendation::{classify, Recommendation, Tier};
pub use reconcile::{reconcile, reconcile_with, SkillPartition, SkillPolicy};
