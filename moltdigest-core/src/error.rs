use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Moltbook API error: {0}")]
    MoltbookApi(#[from] MoltbookApiError),

    #[error("Credential error: {0}")]
    Credential(#[from] CredentialError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Internal error: {message}")]
    Internal { message: String },
}

#[derive(Error, Debug, Clone)]
pub enum MoltbookApiError {
    #[error("Authentication failed: {reason}")]
    AuthenticationFailed { reason: String },

    #[error("Invalid API token")]
    InvalidToken,

    #[error("Rate limit exceeded. Retry after {retry_after} seconds")]
    RateLimitExceeded { retry_after: u64 },

    #[error("Forbidden access to resource: {resource}")]
    Forbidden { resource: String },

    #[error("Request timeout")]
    RequestTimeout,

    #[error("Invalid API response: {details}")]
    InvalidResponse { details: String },

    #[error("Server error: {status_code}")]
    ServerError { status_code: u16 },
}

#[derive(Error, Debug, Clone)]
pub enum CredentialError {
    #[error("Credential file not found: {path}")]
    FileNotFound { path: String },

    #[error("Credential file malformed: {details}")]
    Malformed { details: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Configuration parsing error: {0}")]
    Parse(#[from] toml::de::Error),
}
