use thiserror::Error;

use crate::domain::post::models::PostId;
use crate::domain::user::models::UserId;

/// Error type for PostId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PostIdError {
    #[error("Invalid post id: {0}")]
    InvalidFormat(String),
}

/// Error type for PostTitle validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PostTitleError {
    #[error("Title is required")]
    Empty,

    #[error("Title too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Title too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error type for PostContent validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PostContentError {
    #[error("Content is required")]
    Empty,

    #[error("Content too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },
}

/// Top-level error type for all post-related operations
#[derive(Debug, Clone, Error)]
pub enum PostError {
    #[error("Invalid post ID: {0}")]
    InvalidPostId(#[from] PostIdError),

    #[error("Invalid title: {0}")]
    InvalidTitle(#[from] PostTitleError),

    #[error("Invalid content: {0}")]
    InvalidContent(#[from] PostContentError),

    #[error("Post not found: {0}")]
    NotFound(PostId),

    #[error("User {user_id} is not the author of post {post_id}")]
    NotAuthor { user_id: UserId, post_id: PostId },

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}
