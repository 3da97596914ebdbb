// User-facing flows. Each one validates locally, calls the service through
// `MatchService`, then hands plain data to the pipeline.

pub mod batch;
pub mod recommend;
pub mod single_match;

pub use batch::{
    BatchSubmissionController, FileListing, SelectionSummary, SubmissionState, SubmitTrigger,
    MAX_BATCH_FILES,
};
pub use recommend::{recommend_jobs, RecommendedJob, DEFAULT_TOP_K};
pub use single_match::{
    build_match_report, preview_resume, run_single_match, MatchReport, SingleMatchRequest,
    PREVIEW_CHAR_LIMIT,
};
