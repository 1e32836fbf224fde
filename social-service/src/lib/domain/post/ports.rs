use async_trait::async_trait;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::NewPost;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::models::UpdatePostCommand;
use crate::domain::user::models::UserId;

/// Port for post domain service operations.
#[async_trait]
pub trait PostServicePort: Send + Sync + 'static {
    /// Create a post authored by `author`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_post(
        &self,
        author: &UserId,
        command: CreatePostCommand,
    ) -> Result<Post, PostError>;

    /// Retrieve all posts.
    async fn list_posts(&self) -> Result<Vec<Post>, PostError>;

    /// Retrieve a post by id.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_post(&self, id: &PostId) -> Result<Post, PostError>;

    /// Retrieve the posts of one user, oldest first.
    async fn list_posts_by_user(&self, user_id: &UserId) -> Result<Vec<Post>, PostError>;

    /// Update a post on behalf of `actor`.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `NotAuthor` - `actor` did not write the post
    /// * `DatabaseError` - Database operation failed
    async fn update_post(
        &self,
        id: &PostId,
        actor: &UserId,
        command: UpdatePostCommand,
    ) -> Result<Post, PostError>;

    /// Delete a post on behalf of `actor`.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `NotAuthor` - `actor` did not write the post
    /// * `DatabaseError` - Database operation failed
    async fn delete_post(&self, id: &PostId, actor: &UserId) -> Result<(), PostError>;
}

/// Persistence operations for post aggregate.
#[async_trait]
pub trait PostRepository: Send + Sync + 'static {
    async fn create(&self, post: NewPost) -> Result<Post, PostError>;

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostError>;

    async fn list_all(&self) -> Result<Vec<Post>, PostError>;

    /// Posts of one user ordered by creation time ascending.
    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Post>, PostError>;

    /// # Errors
    /// * `NotFound` - Post does not exist
    async fn update(&self, post: Post) -> Result<Post, PostError>;

    /// # Errors
    /// * `NotFound` - Post does not exist
    async fn delete(&self, id: &PostId) -> Result<(), PostError>;
}
