use mentormee_store::StoreError;
use thiserror::Error;
use uuid::Uuid;

/// Errors raised by identity and content operations.
///
/// Social graph operations only raise these for missing users or storage
/// failures; everything else they report through
/// [`SocialOutcome`](crate::SocialOutcome).
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("User already exists with this email")]
    DuplicateEmail,

    #[error("User already exists with this username")]
    DuplicateUsername,

    /// No user matched the email or username given.
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Post not found: {0}")]
    PostNotFound(Uuid),

    /// The comment is missing, or belongs to a different post.
    #[error("No comment found with ID: {id} and postId: {post_id}")]
    CommentNotFound { id: Uuid, post_id: Uuid },

    /// The database could not be opened or migrated.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[source] StoreError),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    /// The session token slot could not be read or written.
    #[error("Session slot error: {0}")]
    Session(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CoreError>;
