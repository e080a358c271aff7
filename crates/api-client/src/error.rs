use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to perform the HTTP request: {0}")]
    Request(#[from] reqwest::Error),

    #[error("The backend returned {status}: {message}")]
    Backend { status: u16, message: String },

    #[error("Failed to deserialize the API response: {0}")]
    Deserialization(String),
}
