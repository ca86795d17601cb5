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
use crate::application::ports::tag_repository::TagRow;
use crate::application::use_cases::tags::create_tag::CreateTag;
use crate::application::use_cases::tags::delete_tag::DeleteTag;
use crate::application::use_cases::tags::get_tag::GetTag;
use crate::application::use_cases::tags::list_tags::ListTags;
use crate::application::use_cases::tags::update_tag::UpdateTag;
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::auth::{Bearer, require_user};

#[derive(Debug, Deserialize, ToSchema)]
pub struct TagPayload {
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TagResponse {
    pub id: Uuid,
    pub name: String,
}

impl From<TagRow> for TagResponse {
    fn from(row: TagRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
        }
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/tags", get(list).post(create))
        .route("/tags/:id", get(get_one).put(update).delete(delete_one))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/tags", tag = "Tags", security(()), responses(
    (status = 200, body = [TagResponse])
))]
pub async fn list(State(ctx): State<AppContext>) -> Result<Json<Vec<TagResponse>>, ApiError> {
    let repo = ctx.tag_repo();
    let uc = ListTags {
        repo: repo.as_ref(),
    };
    let rows = uc.execute().await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

#[utoipa::path(post, path = "/api/tags", tag = "Tags", request_body = TagPayload, responses(
    (status = 201, body = TagResponse)
))]
pub async fn create(
    State(ctx): State<AppContext>,
    bearer: Option<Bearer>,
    Json(req): Json<TagPayload>,
) -> Result<(StatusCode, Json<TagResponse>), ApiError> {
    require_user(&ctx.cfg, bearer.as_ref())?;
    let repo = ctx.tag_repo();
    let uc = CreateTag {
        repo: repo.as_ref(),
    };
    let row = uc.execute(&req.name).await?;
    Ok((StatusCode::CREATED, Json(row.into())))
}

#[utoipa::path(get, path = "/api/tags/{id}", tag = "Tags", security(()),
    params(("id" = Uuid, Path, description = "Tag id")),
    responses((status = 200, body = TagResponse)))]
pub async fn get_one(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<TagResponse>, ApiError> {
    let repo = ctx.tag_repo();
    let uc = GetTag {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(id).await?.into()))
}

#[utoipa::path(put, path = "/api/tags/{id}", tag = "Tags", request_body = TagPayload,
    params(("id" = Uuid, Path, description = "Tag id")),
    responses((status = 200, body = TagResponse)))]
pub async fn update(
    State(ctx): State<AppContext>,
    bearer: Option<Bearer>,
    Path(id): Path<Uuid>,
    Json(req): Json<TagPayload>,
) -> Result<Json<TagResponse>, ApiError> {
    require_user(&ctx.cfg, bearer.as_ref())?;
    let repo = ctx.tag_repo();
    let uc = UpdateTag {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(id, &req.name).await?.into()))
}

#[utoipa::path(delete, path = "/api/tags/{id}", tag = "Tags",
    params(("id" = Uuid, Path, description = "Tag id")),
    responses((status = 204)))]
pub async fn delete_one(
    State(ctx): State<AppContext>,
    bearer: Option<Bearer>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    require_user(&ctx.cfg, bearer.as_ref())?;
    let repo = ctx.tag_repo();
    let uc = DeleteTag {
        repo: repo.as_ref(),
    };
    uc.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
