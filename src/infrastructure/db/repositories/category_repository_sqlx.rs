use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::application::ports::category_repository::{CategoryRepository, CategoryRow};
use crate::infrastructure::db::PgPool;

pub struct SqlxCategoryRepository {
    pub pool: PgPool,
}

impl SqlxCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_category(r: &sqlx::postgres::PgRow) -> CategoryRow {
    CategoryRow {
        id: r.get("id"),
        name: r.get("name"),
        created_at: r.get("created_at"),
    }
}

#[async_trait]
impl CategoryRepository for SqlxCategoryRepository {
    async fn list(&self) -> anyhow::Result<Vec<CategoryRow>> {
        let rows =
            sqlx::query("SELECT id, name, created_at FROM categories ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.iter().map(map_category).collect())
    }

    async fn create(&self, name: &str) -> anyhow::Result<CategoryRow> {
        let row = sqlx::query(
            "INSERT INTO categories (name) VALUES ($1) RETURNING id, name, created_at",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(map_category(&row))
    }

    async fn find(&self, id: Uuid) -> anyhow::Result<Option<CategoryRow>> {
        let row = sqlx::query("SELECT id, name, created_at FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| map_category(&r)))
    }

    async fn update(&self, id: Uuid, name: &str) -> anyhow::Result<Option<CategoryRow>> {
        let row = sqlx::query(
            "UPDATE categories SET name = $2 WHERE id = $1 RETURNING id, name, created_at",
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| map_category(&r)))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
