use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::error::ApiError;
use crate::application::ports::category_repository::CategoryRow;
use crate::application::use_cases::categories::create_category::CreateCategory;
use crate::application::use_cases::categories::delete_category::DeleteCategory;
use crate::application::use_cases::categories::get_category::GetCategory;
use crate::application::use_cases::categories::list_categories::ListCategories;
use crate::application::use_cases::categories::update_category::UpdateCategory;
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::auth::{Bearer, require_user};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CategoryPayload {
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<CategoryRow> for CategoryResponse {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
        }
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/categories", get(list).post(create))
        .route(
            "/categories/:id",
            get(get_one).put(update).delete(delete_one),
        )
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/categories", tag = "Categories", security(()), responses(
    (status = 200, body = [CategoryResponse])
))]
pub async fn list(State(ctx): State<AppContext>) -> Result<Json<Vec<CategoryResponse>>, ApiError> {
    let repo = ctx.category_repo();
    let uc = ListCategories {
        repo: repo.as_ref(),
    };
    let rows = uc.execute().await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

#[utoipa::path(post, path = "/api/categories", tag = "Categories", request_body = CategoryPayload, responses(
    (status = 201, body = CategoryResponse)
))]
pub async fn create(
    State(ctx): State<AppContext>,
    bearer: Option<Bearer>,
    Json(req): Json<CategoryPayload>,
) -> Result<(StatusCode, Json<CategoryResponse>), ApiError> {
    require_user(&ctx.cfg, bearer.as_ref())?;
    let repo = ctx.category_repo();
    let uc = CreateCategory {
        repo: repo.as_ref(),
    };
    let row = uc.execute(&req.name).await?;
    Ok((StatusCode::CREATED, Json(row.into())))
}

#[utoipa::path(get, path = "/api/categories/{id}", tag = "Categories", security(()),
    params(("id" = Uuid, Path, description = "Category id")),
    responses((status = 200, body = CategoryResponse)))]
pub async fn get_one(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<CategoryResponse>, ApiError> {
    let repo = ctx.category_repo();
    let uc = GetCategory {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(id).await?.into()))
}

#[utoipa::path(put, path = "/api/categories/{id}", tag = "Categories", request_body = CategoryPayload,
    params(("id" = Uuid, Path, description = "Category id")),
    responses((status = 200, body = CategoryResponse)))]
pub async fn update(
    State(ctx): State<AppContext>,
    bearer: Option<Bearer>,
    Path(id): Path<Uuid>,
    Json(req): Json<CategoryPayload>,
) -> Result<Json<CategoryResponse>, ApiError> {
    require_user(&ctx.cfg, bearer.as_ref())?;
    let repo = ctx.category_repo();
    let uc = UpdateCategory {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(id, &req.name).await?.into()))
}

#[utoipa::path(delete, path = "/api/categories/{id}", tag = "Categories",
    params(("id" = Uuid, Path, description = "Category id")),
    responses((status = 204)))]
pub async fn delete_one(
    State(ctx): State<AppContext>,
    bearer: Option<Bearer>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    require_user(&ctx.cfg, bearer.as_ref())?;
    let repo = ctx.category_repo();
    let uc = DeleteCategory {
        repo: repo.as_ref(),
    };
    uc.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
