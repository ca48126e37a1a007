use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("connection failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("backend error: {0}")]
    Backend(String),

    #[error("unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("could not read attachment: {0}")]
    Io(#[from] std::io::Error),
}
