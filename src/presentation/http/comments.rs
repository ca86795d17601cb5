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
use crate::application::ports::comment_repository::CommentRow;
use crate::application::use_cases::comments::create_comment::CreateComment;
use crate::application::use_cases::comments::delete_comment::DeleteComment;
use crate::application::use_cases::comments::get_comment::GetComment;
use crate::application::use_cases::comments::list_comments::ListComments;
use crate::application::use_cases::comments::update_comment::UpdateComment;
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::auth::{Bearer, validate_access};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCommentRequest {
    pub article_id: Uuid,
    pub content: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCommentRequest {
    pub content: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CommentResponse {
    pub id: Uuid,
    pub article_id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<CommentRow> for CommentResponse {
    fn from(row: CommentRow) -> Self {
        Self {
            id: row.id,
            article_id: row.article_id,
            user_id: row.user_id,
            username: row.username,
            content: row.content,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct CommentQuery {
    pub article: Option<Uuid>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/comments", get(list).post(create))
        .route(
            "/comments/:id",
            get(get_one).put(update).delete(delete_one),
        )
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/comments", tag = "Comments", security(()),
    params(CommentQuery),
    responses((status = 200, body = [CommentResponse])))]
pub async fn list(
    State(ctx): State<AppContext>,
    Query(query): Query<CommentQuery>,
) -> Result<Json<Vec<CommentResponse>>, ApiError> {
    let repo = ctx.comment_repo();
    let uc = ListComments {
        repo: repo.as_ref(),
    };
    let rows = uc.execute(query.article).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

#[utoipa::path(post, path = "/api/comments", tag = "Comments", request_body = CreateCommentRequest, responses(
    (status = 201, body = CommentResponse)
))]
pub async fn create(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Json(req): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<CommentResponse>), ApiError> {
    let user_id = validate_access(&ctx.cfg, &bearer)?;
    let comments = ctx.comment_repo();
    let articles = ctx.article_repo();
    let uc = CreateComment {
        comments: comments.as_ref(),
        articles: articles.as_ref(),
    };
    let row = uc.execute(req.article_id, user_id, &req.content).await?;
    Ok((StatusCode::CREATED, Json(row.into())))
}

#[utoipa::path(get, path = "/api/comments/{id}", tag = "Comments", security(()),
    params(("id" = Uuid, Path, description = "Comment id")),
    responses((status = 200, body = CommentResponse)))]
pub async fn get_one(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<CommentResponse>, ApiError> {
    let repo = ctx.comment_repo();
    let uc = GetComment {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(id).await?.into()))
}

#[utoipa::path(put, path = "/api/comments/{id}", tag = "Comments", request_body = UpdateCommentRequest,
    params(("id" = Uuid, Path, description = "Comment id")),
    responses((status = 200, body = CommentResponse)))]
pub async fn update(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateCommentRequest>,
) -> Result<Json<CommentResponse>, ApiError> {
    let user_id = validate_access(&ctx.cfg, &bearer)?;
    let repo = ctx.comment_repo();
    let uc = UpdateComment {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(id, user_id, &req.content).await?.into()))
}

#[utoipa::path(delete, path = "/api/comments/{id}", tag = "Comments",
    params(("id" = Uuid, Path, description = "Comment id")),
    responses((status = 204)))]
pub async fn delete_one(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let user_id = validate_access(&ctx.cfg, &bearer)?;
    let repo = ctx.comment_repo();
    let uc = DeleteComment {
        repo: repo.as_ref(),
    };
    uc.execute(id, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
