use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::application::error::ApiError;
use crate::application::ports::article_repository::{
    ArticleFilter, ArticleOrder, ArticleRecord, NewContent,
};
use crate::application::use_cases::articles::create_article::CreateArticle;
use crate::application::use_cases::articles::delete_article::DeleteArticle;
use crate::application::use_cases::articles::get_article::GetArticle;
use crate::application::use_cases::articles::list_articles::ListArticles;
use crate::application::use_cases::articles::update_article::UpdateArticle;
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::auth::{Bearer, require_user, validate_access};
use crate::presentation::http::categories::CategoryResponse;
use crate::presentation::http::comments::CommentResponse;
use crate::presentation::http::contents::ContentResponse;
use crate::presentation::http::tags::TagResponse;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ContentPayload {
    pub language: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
}

impl From<ContentPayload> for NewContent {
    fn from(p: ContentPayload) -> Self {
        Self {
            language: p.language,
            title: p.title,
            body: p.body,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateArticleRequest {
    pub contents: Vec<ContentPayload>,
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub tag_ids: Vec<Uuid>,
}

/// `category_id: null` clears the category; omitting the field leaves it
/// alone. The double Option distinguishes the two.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateArticleRequest {
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<Uuid>)]
    pub category_id: Option<Option<Uuid>>,
    pub tag_ids: Option<Vec<Uuid>>,
}

fn double_option<'de, D>(de: D) -> Result<Option<Option<Uuid>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<Uuid>::deserialize(de).map(Some)
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ArticleResponse {
    pub id: Uuid,
    pub author_id: Uuid,
    pub author_name: String,
    pub category: Option<CategoryResponse>,
    pub contents: Vec<ContentResponse>,
    pub tags: Vec<TagResponse>,
    pub comments: Vec<CommentResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ArticleRecord> for ArticleResponse {
    fn from(record: ArticleRecord) -> Self {
        Self {
            id: record.article.id,
            author_id: record.article.author_id,
            author_name: record.article.author_name,
            category: record.article.category.map(Into::into),
            contents: record.contents.into_iter().map(Into::into).collect(),
            tags: record.tags.into_iter().map(Into::into).collect(),
            comments: record.comments.into_iter().map(Into::into).collect(),
            created_at: record.article.created_at,
            updated_at: record.article.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ArticleQuery {
    pub category: Option<String>,
    pub tag: Option<String>,
    pub keyword: Option<String>,
    pub order: Option<String>,
}

impl ArticleQuery {
    fn into_filter(self) -> Result<ArticleFilter, ApiError> {
        let order = match self.order.as_deref() {
            None | Some("created") => ArticleOrder::Created,
            Some("updated") => ArticleOrder::Updated,
            Some(_) => {
                return Err(ApiError::validation(
                    "Invalid order. Use 'created' or 'updated'.",
                ));
            }
        };
        Ok(ArticleFilter {
            category: self.category.filter(|s| !s.is_empty()),
            tag: self.tag.filter(|s| !s.is_empty()),
            keyword: self.keyword.filter(|s| !s.is_empty()),
            order,
        })
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/articles", get(list).post(create))
        .route("/articles/search", get(list))
        .route(
            "/articles/:id",
            get(get_one).put(update).delete(delete_one),
        )
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/articles", tag = "Articles", security(()),
    params(ArticleQuery),
    responses((status = 200, body = [ArticleResponse])))]
pub async fn list(
    State(ctx): State<AppContext>,
    Query(query): Query<ArticleQuery>,
) -> Result<Json<Vec<ArticleResponse>>, ApiError> {
    let filter = query.into_filter()?;
    let repo = ctx.article_repo();
    let uc = ListArticles {
        repo: repo.as_ref(),
    };
    let records = uc.execute(&filter).await?;
    Ok(Json(records.into_iter().map(Into::into).collect()))
}

#[utoipa::path(post, path = "/api/articles", tag = "Articles", request_body = CreateArticleRequest, responses(
    (status = 201, body = ArticleResponse)
))]
pub async fn create(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Json(req): Json<CreateArticleRequest>,
) -> Result<(StatusCode, Json<ArticleResponse>), ApiError> {
    let author_id = validate_access(&ctx.cfg, &bearer)?;
    let articles = ctx.article_repo();
    let categories = ctx.category_repo();
    let tags = ctx.tag_repo();
    let uc = CreateArticle {
        articles: articles.as_ref(),
        categories: categories.as_ref(),
        tags: tags.as_ref(),
    };
    let contents: Vec<NewContent> = req.contents.into_iter().map(Into::into).collect();
    let record = uc
        .execute(author_id, req.category_id, &contents, &req.tag_ids)
        .await?;
    Ok((StatusCode::CREATED, Json(record.into())))
}

#[utoipa::path(get, path = "/api/articles/{id}", tag = "Articles", security(()),
    params(("id" = Uuid, Path, description = "Article id")),
    responses((status = 200, body = ArticleResponse)))]
pub async fn get_one(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<ArticleResponse>, ApiError> {
    let repo = ctx.article_repo();
    let uc = GetArticle {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(id).await?.into()))
}

#[utoipa::path(put, path = "/api/articles/{id}", tag = "Articles", request_body = UpdateArticleRequest,
    params(("id" = Uuid, Path, description = "Article id")),
    responses((status = 200, body = ArticleResponse)))]
pub async fn update(
    State(ctx): State<AppContext>,
    bearer: Option<Bearer>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateArticleRequest>,
) -> Result<Json<ArticleResponse>, ApiError> {
    require_user(&ctx.cfg, bearer.as_ref())?;
    let articles = ctx.article_repo();
    let categories = ctx.category_repo();
    let tags = ctx.tag_repo();
    let uc = UpdateArticle {
        articles: articles.as_ref(),
        categories: categories.as_ref(),
        tags: tags.as_ref(),
    };
    let record = uc
        .execute(id, req.category_id, req.tag_ids.as_deref())
        .await?;
    Ok(Json(record.into()))
}

#[utoipa::path(delete, path = "/api/articles/{id}", tag = "Articles",
    params(("id" = Uuid, Path, description = "Article id")),
    responses((status = 204)))]
pub async fn delete_one(
    State(ctx): State<AppContext>,
    bearer: Option<Bearer>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    require_user(&ctx.cfg, bearer.as_ref())?;
    let repo = ctx.article_repo();
    let uc = DeleteArticle {
        repo: repo.as_ref(),
    };
    uc.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(order: Option<&str>) -> ArticleQuery {
        ArticleQuery {
            category: Some("Tech".into()),
            tag: Some(String::new()),
            keyword: None,
            order: order.map(String::from),
        }
    }

    #[test]
    fn filter_drops_empty_values_and_defaults_to_created() {
        let filter = query(None).into_filter().unwrap();
        assert_eq!(filter.category.as_deref(), Some("Tech"));
        assert_eq!(filter.tag, None);
        assert_eq!(filter.order, ArticleOrder::Created);
    }

    #[test]
    fn filter_accepts_both_orders_and_rejects_anything_else() {
        assert_eq!(
            query(Some("updated")).into_filter().unwrap().order,
            ArticleOrder::Updated
        );
        assert!(query(Some("alphabetical")).into_filter().is_err());
    }
}
