use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no rows returned")]
    NoRows,

    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    #[error("an account with email {0} already exists")]
    EmailTaken(String),

    #[error("no account found for {0}")]
    UnknownEmail(String),

    #[error("incorrect password")]
    BadCredentials,

    #[error("password hash error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),
}
