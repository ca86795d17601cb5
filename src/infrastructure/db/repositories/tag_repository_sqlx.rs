use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::application::ports::tag_repository::{TagRepository, TagRow};
use crate::infrastructure::db::PgPool;

pub struct SqlxTagRepository {
    pub pool: PgPool,
}

impl SqlxTagRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_tag(r: &sqlx::postgres::PgRow) -> TagRow {
    TagRow {
        id: r.get("id"),
        name: r.get("name"),
    }
}

#[async_trait]
impl TagRepository for SqlxTagRepository {
    async fn list(&self) -> anyhow::Result<Vec<TagRow>> {
        let rows = sqlx::query("SELECT id, name FROM tags ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(map_tag).collect())
    }

    async fn create(&self, name: &str) -> anyhow::Result<TagRow> {
        let row = sqlx::query("INSERT INTO tags (name) VALUES ($1) RETURNING id, name")
            .bind(name)
            .fetch_one(&self.pool)
            .await?;
        Ok(map_tag(&row))
    }

    async fn find(&self, id: Uuid) -> anyhow::Result<Option<TagRow>> {
        let row = sqlx::query("SELECT id, name FROM tags WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| map_tag(&r)))
    }

    async fn update(&self, id: Uuid, name: &str) -> anyhow::Result<Option<TagRow>> {
        let row = sqlx::query("UPDATE tags SET name = $2 WHERE id = $1 RETURNING id, name")
            .bind(id)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| map_tag(&r)))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
