use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::application::ports::comment_repository::{CommentRepository, CommentRow};
use crate::infrastructure::db::PgPool;

pub struct SqlxCommentRepository {
    pub pool: PgPool,
}

impl SqlxCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const COMMENT_SELECT: &str = r#"SELECT c.id, c.article_id, c.user_id, u.username, c.content, c.created_at
       FROM comments c JOIN users u ON u.id = c.user_id"#;

fn map_comment(r: &sqlx::postgres::PgRow) -> CommentRow {
    CommentRow {
        id: r.get("id"),
        article_id: r.get("article_id"),
        user_id: r.get("user_id"),
        username: r.get("username"),
        content: r.get("content"),
        created_at: r.get("created_at"),
    }
}

#[async_trait]
impl CommentRepository for SqlxCommentRepository {
    async fn create(
        &self,
        article_id: Uuid,
        user_id: Uuid,
        content: &str,
    ) -> anyhow::Result<CommentRow> {
        let row = sqlx::query(
            r#"WITH inserted AS (
                   INSERT INTO comments (article_id, user_id, content)
                   VALUES ($1, $2, $3)
                   RETURNING id, article_id, user_id, content, created_at
               )
               SELECT i.id, i.article_id, i.user_id, u.username, i.content, i.created_at
               FROM inserted i JOIN users u ON u.id = i.user_id"#,
        )
        .bind(article_id)
        .bind(user_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await?;
        Ok(map_comment(&row))
    }

    async fn list(&self, article_id: Option<Uuid>) -> anyhow::Result<Vec<CommentRow>> {
        let rows = if let Some(article_id) = article_id {
            sqlx::query(&format!(
                "{COMMENT_SELECT} WHERE c.article_id = $1 ORDER BY c.created_at ASC"
            ))
            .bind(article_id)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query(&format!("{COMMENT_SELECT} ORDER BY c.created_at ASC"))
                .fetch_all(&self.pool)
                .await?
        };
        Ok(rows.iter().map(map_comment).collect())
    }

    async fn find(&self, id: Uuid) -> anyhow::Result<Option<CommentRow>> {
        let row = sqlx::query(&format!("{COMMENT_SELECT} WHERE c.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| map_comment(&r)))
    }

    async fn update(&self, id: Uuid, content: &str) -> anyhow::Result<Option<CommentRow>> {
        let row = sqlx::query(
            r#"WITH updated AS (
                   UPDATE comments SET content = $2 WHERE id = $1
                   RETURNING id, article_id, user_id, content, created_at
               )
               SELECT up.id, up.article_id, up.user_id, u.username, up.content, up.created_at
               FROM updated up JOIN users u ON u.id = up.user_id"#,
        )
        .bind(id)
        .bind(content)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| map_comment(&r)))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
