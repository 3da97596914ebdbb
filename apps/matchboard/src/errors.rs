use thiserror::Error;
use uuid::Uuid;

/// Advisory checks performed before anything is sent to the matching service.
/// Never fatal: the form stays editable and no state is corrupted.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Unsupported file type for '{0}'. Please upload a .txt or .pdf file.")]
    UnsupportedFileType(String),

    #[error("Maximum {max} files allowed ({selected} selected)")]
    TooManyFiles { selected: usize, max: usize },

    #[error("Please select at least one resume file")]
    NoFilesSelected,

    #[error("No candidates were successfully processed. Please check the resume files.")]
    NoCandidatesProcessed,

    #[error("A batch submission is already in flight")]
    SubmissionInFlight,
}

/// Failures talking to the matching service.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Service error (status {status}): {message}")]
    Http { status: u16, message: String },

    /// The body did not match the expected structure. The raw text is kept so
    /// the failure is visible instead of swallowed.
    #[error("Malformed response (status {status}): {body}")]
    MalformedResponse {
        status: u16,
        body: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Top-level error for client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("Ranking {requested} is no longer the displayed ranking")]
    StaleSnapshot { requested: Uuid },

    #[error("No candidate at position {0}")]
    NoSuchEntry(usize),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// True for local, non-fatal failures the operator fixes by editing the form.
    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }
}
