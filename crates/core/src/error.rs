use thiserror::Error;

/// Settings workflow error types.
///
/// Each variant maps to an HTTP-style status code via
/// [`SettingsError::status_code`]. Variants below 500 are *rejections*:
/// expected outcomes of the workflow (stale credentials, taken email) that
/// callers surface to the end user. Variants at 500 are *faults*: broken
/// infrastructure that callers should log and mask.
#[derive(Error, Debug)]
pub enum SettingsError {
    // --- 400 Bad Request ---
    #[error("{0}")]
    Validation(String),

    #[error("Cannot change email and password in the same request")]
    CombinedCredentialChange,

    #[error("Invalid or expired verification token")]
    InvalidToken,

    #[error("Verification token has expired")]
    TokenExpired,

    // --- 401 Unauthorized ---
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid old password")]
    InvalidOldPassword,

    // --- 409 Conflict ---
    #[error("Email already in use")]
    EmailTaken,

    // --- 500 Internal Server Error ---
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Mail error: {0}")]
    Mail(String),
}

impl SettingsError {
    /// HTTP-style status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            // 400
            Self::Validation(_)
            | Self::CombinedCredentialChange
            | Self::InvalidToken
            | Self::TokenExpired => 400,
            // 401
            Self::Unauthorized | Self::InvalidOldPassword => 401,
            // 409
            Self::EmailTaken => 409,
            // 500
            Self::Config(_)
            | Self::Store(_)
            | Self::Serialization(_)
            | Self::PasswordHash(_)
            | Self::Mail(_) => 500,
        }
    }

    /// Whether this error is an expected workflow outcome rather than a fault.
    ///
    /// Rejections carry a user-facing message; faults carry diagnostics that
    /// must not reach the end user.
    pub fn is_rejection(&self) -> bool {
        self.status_code() < 500
    }

    // --- Constructors ---

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn password_hash(message: impl Into<String>) -> Self {
        Self::PasswordHash(message.into())
    }

    pub fn mail(message: impl Into<String>) -> Self {
        Self::Mail(message.into())
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

#[cfg(feature = "sqlx-postgres")]
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                if db_err.is_unique_violation() {
                    StoreError::Constraint(db_err.to_string())
                } else {
                    StoreError::Query(db_err.to_string())
                }
            }
            sqlx::Error::PoolClosed => StoreError::Connection("Pool closed".to_string()),
            sqlx::Error::PoolTimedOut => StoreError::Connection("Pool timed out".to_string()),
            _ => StoreError::Query(err.to_string()),
        }
    }
}

#[cfg(feature = "sqlx-postgres")]
impl From<sqlx::Error> for SettingsError {
    fn from(err: sqlx::Error) -> Self {
        SettingsError::Store(StoreError::from(err))
    }
}

pub type SettingsResult<T> = Result<T, SettingsError>;
