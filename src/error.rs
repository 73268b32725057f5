#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("member listing failed: {0}")]
    Listing(String),

    // Per-job kinds below are never fatal; the pipeline and dispatcher
    // convert them into failure Outcomes.
    #[error("{0}")]
    ContentRetrieval(String),

    #[error("{0}")]
    Submission(String),

    #[error("{0}")]
    Monitoring(String),

    #[error("invalid job return code {0}")]
    InvalidReturnCode(String),

    #[error("timed out after {0}s waiting for job task")]
    TaskTimeout(u64),

    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("{message}")]
    Api { status: u16, message: String },
}

pub type Result<T> = std::result::Result<T, AppError>;
