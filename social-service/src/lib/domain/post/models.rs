use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::post::errors::PostContentError;
use crate::domain::post::errors::PostIdError;
use crate::domain::post::errors::PostTitleError;
use crate::domain::user::models::UserId;

/// Post unique identifier, assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PostId(pub i64);

impl PostId {
    /// Parse a post ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a positive integer
    pub fn from_string(s: &str) -> Result<Self, PostIdError> {
        match s.parse::<i64>() {
            Ok(id) if id > 0 => Ok(PostId(id)),
            Ok(id) => Err(PostIdError::InvalidFormat(format!("{} is not positive", id))),
            Err(e) => Err(PostIdError::InvalidFormat(e.to_string())),
        }
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Post aggregate entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub title: PostTitle,
    pub content: PostContent,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub fn is_authored_by(&self, user_id: &UserId) -> bool {
        self.user_id == *user_id
    }
}

/// Post record before the store assigns its identifier and creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: PostTitle,
    pub content: PostContent,
    pub user_id: UserId,
}

/// Post title value object.
///
/// Between 5 and 100 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostTitle(String);

impl PostTitle {
    pub const MIN_LENGTH: usize = 5;
    pub const MAX_LENGTH: usize = 100;

    /// Create a new validated title.
    ///
    /// # Errors
    /// * `Empty` - Title is empty
    /// * `TooShort` - Title shorter than 5 characters
    /// * `TooLong` - Title longer than 100 characters
    pub fn new(title: String) -> Result<Self, PostTitleError> {
        let length = title.chars().count();
        if length == 0 {
            Err(PostTitleError::Empty)
        } else if length < Self::MIN_LENGTH {
            Err(PostTitleError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(PostTitleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(title))
        }
    }

    pub(crate) fn new_unchecked(title: String) -> Self {
        Self(title)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Post body value object, at least 10 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostContent(String);

impl PostContent {
    pub const MIN_LENGTH: usize = 10;

    /// Create a new validated body.
    ///
    /// # Errors
    /// * `Empty` - Content is empty
    /// * `TooShort` - Content shorter than 10 characters
    pub fn new(content: String) -> Result<Self, PostContentError> {
        let length = content.chars().count();
        if length == 0 {
            Err(PostContentError::Empty)
        } else if length < Self::MIN_LENGTH {
            Err(PostContentError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(content))
        }
    }

    pub(crate) fn new_unchecked(content: String) -> Self {
        Self(content)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Command to create a post authored by the authenticated user.
#[derive(Debug)]
pub struct CreatePostCommand {
    pub title: PostTitle,
    pub content: PostContent,
}

impl CreatePostCommand {
    pub fn new(title: PostTitle, content: PostContent) -> Self {
        Self { title, content }
    }
}

/// Command to update a post. Only provided fields will be updated.
#[derive(Debug, Default)]
pub struct UpdatePostCommand {
    pub title: Option<PostTitle>,
    pub content: Option<PostContent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_length_bounds() {
        assert!(PostTitle::new("Hello".to_string()).is_ok());
        assert!(PostTitle::new("x".repeat(100)).is_ok());
        assert_eq!(PostTitle::new(String::new()), Err(PostTitleError::Empty));
        assert_eq!(
            PostTitle::new("Hey".to_string()),
            Err(PostTitleError::TooShort { min: 5, actual: 3 })
        );
        assert_eq!(
            PostTitle::new("x".repeat(101)),
            Err(PostTitleError::TooLong {
                max: 100,
                actual: 101
            })
        );
    }

    #[test]
    fn test_content_minimum_length() {
        assert!(PostContent::new("0123456789".to_string()).is_ok());
        assert_eq!(PostContent::new(String::new()), Err(PostContentError::Empty));
        assert_eq!(
            PostContent::new("too short".to_string()),
            Err(PostContentError::TooShort { min: 10, actual: 9 })
        );
    }

    #[test]
    fn test_post_id_from_string() {
        assert_eq!(PostId::from_string("3"), Ok(PostId(3)));
        assert!(PostId::from_string("-1").is_err());
        assert!(PostId::from_string("three").is_err());
    }
}
