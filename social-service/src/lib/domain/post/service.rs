use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::NewPost;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::models::UpdatePostCommand;
use crate::domain::post::ports::PostRepository;
use crate::domain::post::ports::PostServicePort;
use crate::domain::user::models::UserId;

/// Domain service implementation for post operations.
pub struct PostService<PR>
where
    PR: PostRepository,
{
    repository: Arc<PR>,
}

impl<PR> PostService<PR>
where
    PR: PostRepository,
{
    pub fn new(repository: Arc<PR>) -> Self {
        Self { repository }
    }

    /// Load a post and check that `actor` wrote it.
    async fn find_owned(&self, id: &PostId, actor: &UserId) -> Result<Post, PostError> {
        let post = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(PostError::NotFound(*id))?;

        if !post.is_authored_by(actor) {
            tracing::warn!(post_id = %id, user_id = %actor, "Rejected change by non-author");
            return Err(PostError::NotAuthor {
                user_id: *actor,
                post_id: *id,
            });
        }

        Ok(post)
    }
}

#[async_trait]
impl<PR> PostServicePort for PostService<PR>
where
    PR: PostRepository,
{
    async fn create_post(
        &self,
        author: &UserId,
        command: CreatePostCommand,
    ) -> Result<Post, PostError> {
        let post = self
            .repository
            .create(NewPost {
                title: command.title,
                content: command.content,
                user_id: *author,
            })
            .await?;

        tracing::info!(post_id = %post.id, user_id = %author, "Post created");

        Ok(post)
    }

    async fn list_posts(&self) -> Result<Vec<Post>, PostError> {
        self.repository.list_all().await
    }

    async fn get_post(&self, id: &PostId) -> Result<Post, PostError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(PostError::NotFound(*id))
    }

    async fn list_posts_by_user(&self, user_id: &UserId) -> Result<Vec<Post>, PostError> {
        self.repository.list_by_user(user_id).await
    }

    async fn update_post(
        &self,
        id: &PostId,
        actor: &UserId,
        command: UpdatePostCommand,
    ) -> Result<Post, PostError> {
        let mut post = self.find_owned(id, actor).await?;

        if let Some(title) = command.title {
            post.title = title;
        }

        if let Some(content) = command.content {
            post.content = content;
        }

        let post = self.repository.update(post).await?;

        tracing::info!(post_id = %post.id, "Post updated");

        Ok(post)
    }

    async fn delete_post(&self, id: &PostId, actor: &UserId) -> Result<(), PostError> {
        self.find_owned(id, actor).await?;
        self.repository.delete(id).await?;

        tracing::info!(post_id = %id, "Post deleted");

        Ok(())
    }
}
