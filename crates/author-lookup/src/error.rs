//! Error types for the author lookup.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

/// Errors from the Crossref HTTP client layer.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// Transport error (connection, DNS, TLS, timeout).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Resource not found (404 response).
    #[error("Resource not found: {resource}")]
    NotFound {
        /// Description of the missing resource
        resource: String,
    },

    /// Any other non-success status from Crossref.
    #[error("Upstream error ({status}): {message}")]
    Upstream {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ClientError {
    /// Create a not found error.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    /// Create an upstream error.
    #[must_use]
    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        Self::Upstream { status, message: message.into() }
    }

    /// HTTP status reported by Crossref, if the request got that far.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors from lookup operations (aggregation, session handoff, queries).
#[derive(thiserror::Error, Debug)]
pub enum LookupError {
    /// Error from the API client
    #[error("API error: {0}")]
    Client(#[from] ClientError),

    /// Caller supplied an unusable argument
    #[error("Invalid argument: {field}: {message}")]
    InvalidArgument {
        /// Argument that failed validation
        field: String,
        /// Validation error message
        message: String,
    },

    /// The publications step ran before any author was selected
    #[error("No author selected")]
    NoSelection,

    /// Session slot could not be read or written
    #[error("Session error: {0}")]
    Session(String),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem error while touching the session file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LookupError {
    /// Create an invalid argument error.
    #[must_use]
    pub fn invalid_argument(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument { field: field.into(), message: message.into() }
    }

    /// Create a session error.
    #[must_use]
    pub fn session(message: impl Into<String>) -> Self {
        Self::Session(message.into())
    }

    /// Convert to the single user-visible message shown for a failure.
    #[must_use]
    pub fn to_user_message(&self) -> String {
        match self {
            Self::Client(ClientError::NotFound { resource }) if is_work_path(resource) => {
                format!("No work found at {resource}. Please check the DOI is correct.")
            }
            Self::Client(ClientError::NotFound { resource }) => {
                format!("Crossref has no resource at {resource}. Please check the API URL.")
            }
            Self::Client(_) => {
                "Failed to fetch data from Crossref. Please try again.".to_string()
            }
            Self::InvalidArgument { field, message } => {
                format!("Invalid input for '{field}': {message}")
            }
            Self::NoSelection => {
                "No author selected. Please search for an author and select one first."
                    .to_string()
            }
            _ => self.to_string(),
        }
    }
}

/// Whether a not-found path names a single work (`/works/{doi}`).
fn is_work_path(resource: &str) -> bool {
    resource
        .split_once("/works/")
        .is_some_and(|(_, doi)| !doi.trim_matches('/').is_empty())
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for lookup operations.
pub type LookupResult<T> = Result<T, LookupError>;
