/// Error types for board, gamification and account operations
///
/// Every variant is recoverable at the request boundary. Operations validate
/// their input before mutating anything, so an `Err` always means the store is
/// unchanged.
///
/// # Example
///
/// ```
/// use taskboard_shared::error::BoardError;
///
/// let err = BoardError::validation("Task text cannot be empty");
/// assert_eq!(err.to_string(), "Validation failed: Task text cannot be empty");
/// assert_eq!(err.code(), "validation_error");
/// ```

use crate::auth::password::PasswordError;

/// Result alias used throughout the shared crate
pub type BoardResult<T> = Result<T, BoardError>;

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    /// Caller's role does not allow the action
    #[error("Permission denied: {0}")]
    Permission(String),

    /// Malformed or empty input
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Referenced project, task or notification does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Action needs a selected project and none is set
    #[error("No active project selected")]
    NoActiveProject,

    /// The user is not registered in the store
    #[error("Unknown user: {0}")]
    UnknownUser(String),

    /// Password hashing or verification failed
    #[error("Password operation failed: {0}")]
    Password(#[from] PasswordError),
}

impl BoardError {
    pub fn permission(msg: impl Into<String>) -> Self {
        BoardError::Permission(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        BoardError::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        BoardError::NotFound(msg.into())
    }

    /// Stable machine-readable code, used in API error bodies
    pub fn code(&self) -> &'static str {
        match self {
            BoardError::Permission(_) => "permission_denied",
            BoardError::Validation(_) => "validation_error",
            BoardError::NotFound(_) => "not_found",
            BoardError::NoActiveProject => "no_active_project",
            BoardError::UnknownUser(_) => "unknown_user",
            BoardError::Password(_) => "internal_error",
        }
    }
}
