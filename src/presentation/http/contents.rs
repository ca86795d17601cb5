use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::error::ApiError;
use crate::application::ports::article_repository::{ContentRow, NewContent};
use crate::application::use_cases::contents::add_content::AddContent;
use crate::application::use_cases::contents::delete_content::DeleteContent;
use crate::application::use_cases::contents::get_content::GetContent;
use crate::application::use_cases::contents::list_contents::ListContents;
use crate::application::use_cases::contents::update_content::UpdateContent;
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::auth::{Bearer, require_user};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateContentRequest {
    pub article_id: Uuid,
    pub language: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateContentRequest {
    pub language: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ContentResponse {
    pub id: Uuid,
    pub article_id: Uuid,
    pub language: String,
    pub title: String,
    pub body: String,
}

impl From<ContentRow> for ContentResponse {
    fn from(row: ContentRow) -> Self {
        Self {
            id: row.id,
            article_id: row.article_id,
            language: row.language,
            title: row.title,
            body: row.body,
        }
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/article-contents", get(list).post(create))
        .route(
            "/article-contents/:id",
            get(get_one).put(update).delete(delete_one),
        )
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/article-contents", tag = "Article contents", security(()), responses(
    (status = 200, body = [ContentResponse])
))]
pub async fn list(State(ctx): State<AppContext>) -> Result<Json<Vec<ContentResponse>>, ApiError> {
    let repo = ctx.article_repo();
    let uc = ListContents {
        repo: repo.as_ref(),
    };
    let rows = uc.execute().await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

#[utoipa::path(post, path = "/api/article-contents", tag = "Article contents", request_body = CreateContentRequest, responses(
    (status = 201, body = ContentResponse)
))]
pub async fn create(
    State(ctx): State<AppContext>,
    bearer: Option<Bearer>,
    Json(req): Json<CreateContentRequest>,
) -> Result<(StatusCode, Json<ContentResponse>), ApiError> {
    require_user(&ctx.cfg, bearer.as_ref())?;
    let repo = ctx.article_repo();
    let uc = AddContent {
        repo: repo.as_ref(),
    };
    let content = NewContent {
        language: req.language,
        title: req.title,
        body: req.body,
    };
    let row = uc.execute(req.article_id, &content).await?;
    Ok((StatusCode::CREATED, Json(row.into())))
}

#[utoipa::path(get, path = "/api/article-contents/{id}", tag = "Article contents", security(()),
    params(("id" = Uuid, Path, description = "Content id")),
    responses((status = 200, body = ContentResponse)))]
pub async fn get_one(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<ContentResponse>, ApiError> {
    let repo = ctx.article_repo();
    let uc = GetContent {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(id).await?.into()))
}

#[utoipa::path(put, path = "/api/article-contents/{id}", tag = "Article contents", request_body = UpdateContentRequest,
    params(("id" = Uuid, Path, description = "Content id")),
    responses((status = 200, body = ContentResponse)))]
pub async fn update(
    State(ctx): State<AppContext>,
    bearer: Option<Bearer>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateContentRequest>,
) -> Result<Json<ContentResponse>, ApiError> {
    require_user(&ctx.cfg, bearer.as_ref())?;
    let repo = ctx.article_repo();
    let uc = UpdateContent {
        repo: repo.as_ref(),
    };
    let content = NewContent {
        language: req.language,
        title: req.title,
        body: req.body,
    };
    Ok(Json(uc.execute(id, &content).await?.into()))
}

#[utoipa::path(delete, path = "/api/article-contents/{id}", tag = "Article contents",
    params(("id" = Uuid, Path, description = "Content id")),
    responses((status = 204)))]
pub async fn delete_one(
    State(ctx): State<AppContext>,
    bearer: Option<Bearer>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    require_user(&ctx.cfg, bearer.as_ref())?;
    let repo = ctx.article_repo();
    let uc = DeleteContent {
        repo: repo.as_ref(),
    };
    uc.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
