use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::application::ports::article_repository::{
    ArticleFilter, ArticleOrder, ArticleRecord, ArticleRepository, ArticleRow, ContentRow,
    NewContent,
};
use crate::application::ports::category_repository::CategoryRow;
use crate::application::ports::comment_repository::CommentRow;
use crate::application::ports::tag_repository::TagRow;
use crate::infrastructure::db::PgPool;

pub struct SqlxArticleRepository {
    pub pool: PgPool,
}

impl SqlxArticleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Hydrates the full aggregate the way the API serializes it.
    async fn load(&self, id: Uuid) -> anyhow::Result<Option<ArticleRecord>> {
        let row = sqlx::query(
            r#"SELECT a.id, a.author_id, u.username AS author_name,
                      a.category_id, c.name AS category_name, c.created_at AS category_created_at,
                      a.created_at, a.updated_at
               FROM articles a
               JOIN users u ON u.id = a.author_id
               LEFT JOIN categories c ON c.id = a.category_id
               WHERE a.id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        let Some(row) = row else {
            return Ok(None);
        };

        let category = row
            .get::<Option<Uuid>, _>("category_id")
            .map(|cid| CategoryRow {
                id: cid,
                name: row.get("category_name"),
                created_at: row.get("category_created_at"),
            });
        let article = ArticleRow {
            id: row.get("id"),
            author_id: row.get("author_id"),
            author_name: row.get("author_name"),
            category,
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        };

        let contents = sqlx::query(
            r#"SELECT id, article_id, language, title, body
               FROM article_contents WHERE article_id = $1 ORDER BY language ASC"#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?
        .iter()
        .map(map_content)
        .collect();

        let tags = sqlx::query(
            r#"SELECT t.id, t.name FROM article_tags at
               JOIN tags t ON t.id = at.tag_id
               WHERE at.article_id = $1 ORDER BY t.name ASC"#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(|r| TagRow {
            id: r.get("id"),
            name: r.get("name"),
        })
        .collect();

        let comments = sqlx::query(
            r#"SELECT cm.id, cm.article_id, cm.user_id, u.username, cm.content, cm.created_at
               FROM comments cm JOIN users u ON u.id = cm.user_id
               WHERE cm.article_id = $1 ORDER BY cm.created_at ASC"#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(|r| CommentRow {
            id: r.get("id"),
            article_id: r.get("article_id"),
            user_id: r.get("user_id"),
            username: r.get("username"),
            content: r.get("content"),
            created_at: r.get("created_at"),
        })
        .collect();

        Ok(Some(ArticleRecord {
            article,
            contents,
            tags,
            comments,
        }))
    }
}

/// Keyword search is substring matching, so LIKE metacharacters in the
/// user's input must match themselves literally.
fn like_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

fn map_content(r: &sqlx::postgres::PgRow) -> ContentRow {
    ContentRow {
        id: r.get("id"),
        article_id: r.get("article_id"),
        language: r.get("language"),
        title: r.get("title"),
        body: r.get("body"),
    }
}

#[async_trait]
impl ArticleRepository for SqlxArticleRepository {
    async fn create(
        &self,
        author_id: Uuid,
        category_id: Option<Uuid>,
        contents: &[NewContent],
        tag_ids: &[Uuid],
    ) -> anyhow::Result<ArticleRecord> {
        let mut tx = self.pool.begin().await?;
        let article_id: Uuid = sqlx::query_scalar(
            "INSERT INTO articles (author_id, category_id) VALUES ($1, $2) RETURNING id",
        )
        .bind(author_id)
        .bind(category_id)
        .fetch_one(&mut *tx)
        .await?;
        for content in contents {
            sqlx::query(
                r#"INSERT INTO article_contents (article_id, language, title, body)
                   VALUES ($1, $2, $3, $4)"#,
            )
            .bind(article_id)
            .bind(&content.language)
            .bind(&content.title)
            .bind(&content.body)
            .execute(&mut *tx)
            .await?;
        }
        for tag_id in tag_ids {
            sqlx::query("INSERT INTO article_tags (article_id, tag_id) VALUES ($1, $2)")
                .bind(article_id)
                .bind(tag_id)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;

        self.load(article_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("article vanished after insert"))
    }

    async fn list(&self, filter: &ArticleFilter) -> anyhow::Result<Vec<ArticleRecord>> {
        let order_column = match filter.order {
            ArticleOrder::Created => "a.created_at",
            ArticleOrder::Updated => "a.updated_at",
        };
        // Filters live in EXISTS subqueries, so a multi-language keyword hit
        // still yields the article once.
        let sql = format!(
            r#"SELECT a.id FROM articles a
               LEFT JOIN categories c ON c.id = a.category_id
               WHERE ($1::TEXT IS NULL OR c.name = $1)
                 AND ($2::TEXT IS NULL OR EXISTS (
                     SELECT 1 FROM article_tags at JOIN tags t ON t.id = at.tag_id
                     WHERE at.article_id = a.id AND t.name = $2))
                 AND ($3::TEXT IS NULL OR EXISTS (
                     SELECT 1 FROM article_contents ac
                     WHERE ac.article_id = a.id
                       AND (ac.title ILIKE $3 OR ac.body ILIKE $3)))
               ORDER BY {order_column} DESC"#,
        );
        let keyword_like = filter
            .keyword
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(|s| format!("%{}%", like_escape(s)));
        let ids: Vec<Uuid> = sqlx::query_scalar(&sql)
            .bind(filter.category.as_deref().filter(|s| !s.trim().is_empty()))
            .bind(filter.tag.as_deref().filter(|s| !s.trim().is_empty()))
            .bind(keyword_like)
            .fetch_all(&self.pool)
            .await?;

        let mut records = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(record) = self.load(id).await? {
                records.push(record);
            }
        }
        Ok(records)
    }

    async fn find(&self, id: Uuid) -> anyhow::Result<Option<ArticleRecord>> {
        self.load(id).await
    }

    async fn update(
        &self,
        id: Uuid,
        category_id: Option<Option<Uuid>>,
        tag_ids: Option<&[Uuid]>,
    ) -> anyhow::Result<Option<ArticleRecord>> {
        let mut tx = self.pool.begin().await?;
        let res = sqlx::query("UPDATE articles SET updated_at = now() WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if res.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }
        if let Some(category_id) = category_id {
            sqlx::query("UPDATE articles SET category_id = $2 WHERE id = $1")
                .bind(id)
                .bind(category_id)
                .execute(&mut *tx)
                .await?;
        }
        if let Some(tag_ids) = tag_ids {
            sqlx::query("DELETE FROM article_tags WHERE article_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            for tag_id in tag_ids {
                sqlx::query("INSERT INTO article_tags (article_id, tag_id) VALUES ($1, $2)")
                    .bind(id)
                    .bind(tag_id)
                    .execute(&mut *tx)
                    .await?;
            }
        }
        tx.commit().await?;
        self.load(id).await
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn list_contents(&self) -> anyhow::Result<Vec<ContentRow>> {
        let rows = sqlx::query(
            r#"SELECT id, article_id, language, title, body
               FROM article_contents ORDER BY article_id, language"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(map_content).collect())
    }

    async fn add_content(
        &self,
        article_id: Uuid,
        content: &NewContent,
    ) -> anyhow::Result<ContentRow> {
        let row = sqlx::query(
            r#"INSERT INTO article_contents (article_id, language, title, body)
               VALUES ($1, $2, $3, $4)
               RETURNING id, article_id, language, title, body"#,
        )
        .bind(article_id)
        .bind(&content.language)
        .bind(&content.title)
        .bind(&content.body)
        .fetch_one(&self.pool)
        .await?;
        sqlx::query("UPDATE articles SET updated_at = now() WHERE id = $1")
            .bind(article_id)
            .execute(&self.pool)
            .await?;
        Ok(map_content(&row))
    }

    async fn find_content(&self, id: Uuid) -> anyhow::Result<Option<ContentRow>> {
        let row = sqlx::query(
            "SELECT id, article_id, language, title, body FROM article_contents WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| map_content(&r)))
    }

    async fn update_content(
        &self,
        id: Uuid,
        language: &str,
        title: &str,
        body: &str,
    ) -> anyhow::Result<Option<ContentRow>> {
        let row = sqlx::query(
            r#"UPDATE article_contents SET language = $2, title = $3, body = $4
               WHERE id = $1
               RETURNING id, article_id, language, title, body"#,
        )
        .bind(id)
        .bind(language)
        .bind(title)
        .bind(body)
        .fetch_optional(&self.pool)
        .await?;
        if let Some(row) = &row {
            sqlx::query("UPDATE articles SET updated_at = now() WHERE id = $1")
                .bind(row.get::<Uuid, _>("article_id"))
                .execute(&self.pool)
                .await?;
        }
        Ok(row.map(|r| map_content(&r)))
    }

    async fn delete_content(&self, id: Uuid) -> anyhow::Result<bool> {
        let article_id: Option<Uuid> =
            sqlx::query_scalar("DELETE FROM article_contents WHERE id = $1 RETURNING article_id")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        if let Some(article_id) = article_id {
            sqlx::query("UPDATE articles SET updated_at = now() WHERE id = $1")
                .bind(article_id)
                .execute(&self.pool)
                .await?;
        }
        Ok(article_id.is_some())
    }

    async fn content_language_exists(
        &self,
        article_id: Uuid,
        language: &str,
        exclude: Option<Uuid>,
    ) -> anyhow::Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS(
                   SELECT 1 FROM article_contents
                   WHERE article_id = $1 AND language = $2 AND ($3::UUID IS NULL OR id <> $3))"#,
        )
        .bind(article_id)
        .bind(language)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }
}

#[cfg(test)]
mod tests {
    use super::like_escape;

    #[test]
    fn like_metacharacters_match_themselves() {
        assert_eq!(like_escape("a%b"), "a\\%b");
        assert_eq!(like_escape("a_b"), "a\\_b");
        assert_eq!(like_escape("a\\b"), "a\\\\b");
        assert_eq!(like_escape("plain words"), "plain words");
    }

    #[test]
    fn escaping_happens_before_wildcard_wrapping() {
        // a backslash in the input must not swallow the escape of a later %
        assert_eq!(like_escape("\\%"), "\\\\\\%");
    }
}
