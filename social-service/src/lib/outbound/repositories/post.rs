use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::NewPost;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostContent;
use crate::domain::post::models::PostId;
use crate::domain::post::models::PostTitle;
use crate::domain::post::ports::PostRepository;
use crate::domain::user::models::UserId;

const POST_COLUMNS: &str = "id, title, content, user_id, created_at";

#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    title: String,
    content: String,
    user_id: i64,
    created_at: DateTime<Utc>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post {
            id: PostId(row.id),
            title: PostTitle::new_unchecked(row.title),
            content: PostContent::new_unchecked(row.content),
            user_id: UserId(row.user_id),
            created_at: row.created_at,
        }
    }
}

fn database_error(e: sqlx::Error) -> PostError {
    PostError::DatabaseError(e.to_string())
}

pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, post: NewPost) -> Result<Post, PostError> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            r#"
            INSERT INTO posts (title, content, user_id)
            VALUES ($1, $2, $3)
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(post.title.as_str())
        .bind(post.content.as_str())
        .bind(post.user_id.0)
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostError> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = $1"
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(row.map(Post::from))
    }

    async fn list_all(&self) -> Result<Vec<Post>, PostError> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Post>, PostError> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM posts
            WHERE user_id = $1
            ORDER BY created_at ASC, id ASC
            "#
        ))
        .bind(user_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn update(&self, post: Post) -> Result<Post, PostError> {
        let result = sqlx::query("UPDATE posts SET title = $2, content = $3 WHERE id = $1")
            .bind(post.id.0)
            .bind(post.title.as_str())
            .bind(post.content.as_str())
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(PostError::NotFound(post.id));
        }

        Ok(post)
    }

    async fn delete(&self, id: &PostId) -> Result<(), PostError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(PostError::NotFound(*id));
        }

        Ok(())
    }
}
