use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::error::ApiError;
use crate::application::use_cases::auth::change_password::ChangePassword;
use crate::application::use_cases::auth::change_username::ChangeUsername;
use crate::application::use_cases::auth::confirm_password_reset::ConfirmPasswordReset;
use crate::application::use_cases::auth::google_login::GoogleLogin;
use crate::application::use_cases::auth::login::{Login as LoginUc, LoginRequest as LoginDto};
use crate::application::use_cases::auth::logout::Logout as LogoutUc;
use crate::application::use_cases::auth::me::GetMe;
use crate::application::use_cases::auth::register::{
    Register as RegisterUc, RegisterRequest as RegisterDto,
};
use crate::application::use_cases::auth::request_password_reset::RequestPasswordReset;
use crate::application::use_cases::auth::verify_email::VerifyEmail;
use crate::bootstrap::app_context::AppContext;
use crate::bootstrap::config::Config;

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password1: String,
    pub password2: String,
    pub role: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
    pub is_email_verified: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TokenPairResponse {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LogoutRequest {
    pub refresh: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PasswordResetRequest {
    pub email: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetNewPasswordRequest {
    pub password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChangeUsernameRequest {
    pub new_username: String,
    pub password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct GoogleLoginRequest {
    pub token: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SuccessResponse {
    pub success: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub jti: Uuid,
    pub token_type: String,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/verifyEmail/:token", get(verify_email))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/userinfo", get(userinfo))
        .route("/password/reset", post(request_password_reset))
        .route(
            "/password/reset/confirm/:token",
            post(confirm_password_reset),
        )
        .route("/change-password", post(change_password))
        .route("/change-username", post(change_username))
        .route("/google-login", post(google_login))
        .with_state(ctx)
}

fn user_response(user: crate::application::ports::user_repository::UserRow) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username,
        email: user.email,
        role: user.role,
        is_active: user.is_active,
        is_email_verified: user.is_email_verified,
    }
}

#[utoipa::path(post, path = "/api/register", tag = "Account", request_body = RegisterRequest, security(()), responses(
    (status = 201, body = SuccessResponse)
))]
pub async fn register(
    State(ctx): State<AppContext>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<SuccessResponse>), ApiError> {
    let repo = ctx.user_repo();
    let mailer = ctx.mailer();
    let uc = RegisterUc {
        repo: repo.as_ref(),
        mailer: mailer.as_ref(),
    };
    let dto = RegisterDto {
        username: req.username,
        email: req.email,
        password1: req.password1,
        password2: req.password2,
        role: req.role,
    };
    let base = ctx.cfg.frontend_url.clone().unwrap_or_default();
    uc.execute(&dto, &base).await?;
    Ok((
        StatusCode::CREATED,
        Json(SuccessResponse {
            success: "User registered. Please check your email to verify your account."
                .to_string(),
        }),
    ))
}

#[utoipa::path(get, path = "/api/verifyEmail/{token}", tag = "Account", security(()),
    params(("token" = String, Path, description = "Email verification token")),
    responses((status = 200, body = SuccessResponse)))]
pub async fn verify_email(
    State(ctx): State<AppContext>,
    Path(token): Path<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let token =
        Uuid::parse_str(&token).map_err(|_| ApiError::validation("Invalid token."))?;
    let repo = ctx.user_repo();
    let uc = VerifyEmail {
        repo: repo.as_ref(),
    };
    uc.execute(token).await?;
    Ok(Json(SuccessResponse {
        success: "Email verified and account activated successfully.".to_string(),
    }))
}

#[utoipa::path(post, path = "/api/login", tag = "Account", request_body = LoginRequest, security(()), responses(
    (status = 200, body = TokenPairResponse)
))]
pub async fn login(
    State(ctx): State<AppContext>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TokenPairResponse>, ApiError> {
    let repo = ctx.user_repo();
    let uc = LoginUc {
        repo: repo.as_ref(),
    };
    let dto = LoginDto {
        email: req.email,
        password: req.password,
    };
    let user = uc.execute(&dto).await?;
    let pair = issue_token_pair(&ctx.cfg, user.id)?;
    Ok(Json(pair))
}

#[utoipa::path(post, path = "/api/logout", tag = "Account", request_body = LogoutRequest, responses((status = 205)))]
pub async fn logout(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Json(req): Json<LogoutRequest>,
) -> Result<StatusCode, ApiError> {
    validate_access(&ctx.cfg, &bearer)?;
    let refresh = req
        .refresh
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::validation("Refresh token is required"))?;
    let claims = decode_token(&ctx.cfg, &refresh)
        .map_err(|_| ApiError::validation("Token is invalid or expired"))?;
    if claims.token_type != "refresh" {
        return Err(ApiError::validation("Token is invalid or expired"));
    }
    let expires_at = DateTime::<Utc>::from_timestamp(claims.exp as i64, 0)
        .ok_or_else(|| ApiError::validation("Token is invalid or expired"))?;
    let blacklist = ctx.blacklist();
    let uc = LogoutUc {
        blacklist: blacklist.as_ref(),
    };
    uc.execute(claims.jti, expires_at).await?;
    Ok(StatusCode::RESET_CONTENT)
}

#[utoipa::path(get, path = "/api/userinfo", tag = "Account", responses((status = 200, body = UserResponse)))]
pub async fn userinfo(
    State(ctx): State<AppContext>,
    bearer: Bearer,
) -> Result<Json<UserResponse>, ApiError> {
    let user_id = validate_access(&ctx.cfg, &bearer)?;
    let repo = ctx.user_repo();
    let uc = GetMe {
        repo: repo.as_ref(),
    };
    let user = uc.execute(user_id).await?.ok_or(ApiError::Unauthorized)?;
    Ok(Json(user_response(user)))
}

#[utoipa::path(post, path = "/api/password/reset", tag = "Account", request_body = PasswordResetRequest, security(()), responses(
    (status = 200, body = SuccessResponse)
))]
pub async fn request_password_reset(
    State(ctx): State<AppContext>,
    Json(req): Json<PasswordResetRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let users = ctx.user_repo();
    let resets = ctx.reset_repo();
    let mailer = ctx.mailer();
    let uc = RequestPasswordReset {
        users: users.as_ref(),
        resets: resets.as_ref(),
        mailer: mailer.as_ref(),
    };
    let base = ctx.cfg.frontend_url.clone().unwrap_or_default();
    uc.execute(&req.email, &base).await?;
    Ok(Json(SuccessResponse {
        success: "Password reset email has been sent.".to_string(),
    }))
}

#[utoipa::path(post, path = "/api/password/reset/confirm/{token}", tag = "Account", request_body = SetNewPasswordRequest, security(()),
    params(("token" = String, Path, description = "Password reset token")),
    responses((status = 200, body = SuccessResponse)))]
pub async fn confirm_password_reset(
    State(ctx): State<AppContext>,
    Path(token): Path<String>,
    Json(req): Json<SetNewPasswordRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let token = Uuid::parse_str(&token)
        .map_err(|_| ApiError::validation("The reset link is invalid"))?;
    let users = ctx.user_repo();
    let resets = ctx.reset_repo();
    let uc = ConfirmPasswordReset {
        users: users.as_ref(),
        resets: resets.as_ref(),
    };
    uc.execute(token, &req.password).await?;
    Ok(Json(SuccessResponse {
        success: "Password has been reset successfully.".to_string(),
    }))
}

#[utoipa::path(post, path = "/api/change-password", tag = "Account", request_body = ChangePasswordRequest, responses(
    (status = 200, body = MessageResponse)
))]
pub async fn change_password(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let user_id = validate_access(&ctx.cfg, &bearer)?;
    let repo = ctx.user_repo();
    let uc = ChangePassword {
        repo: repo.as_ref(),
    };
    uc.execute(user_id, &req.old_password, &req.new_password)
        .await?;
    Ok(Json(MessageResponse {
        message: "Password changed successfully.".to_string(),
    }))
}

#[utoipa::path(post, path = "/api/change-username", tag = "Account", request_body = ChangeUsernameRequest, responses(
    (status = 200, body = MessageResponse)
))]
pub async fn change_username(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Json(req): Json<ChangeUsernameRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let user_id = validate_access(&ctx.cfg, &bearer)?;
    let repo = ctx.user_repo();
    let uc = ChangeUsername {
        repo: repo.as_ref(),
    };
    uc.execute(user_id, &req.new_username, &req.password).await?;
    Ok(Json(MessageResponse {
        message: "Username changed successfully.".to_string(),
    }))
}

#[utoipa::path(post, path = "/api/google-login", tag = "Account", request_body = GoogleLoginRequest, security(()), responses(
    (status = 200, body = TokenPairResponse)
))]
pub async fn google_login(
    State(ctx): State<AppContext>,
    Json(req): Json<GoogleLoginRequest>,
) -> Result<Json<TokenPairResponse>, ApiError> {
    let repo = ctx.user_repo();
    let verifier = ctx.identity();
    let uc = GoogleLogin {
        repo: repo.as_ref(),
        verifier: verifier.as_ref(),
    };
    let user = uc.execute(&req.token).await?;
    let pair = issue_token_pair(&ctx.cfg, user.id)?;
    Ok(Json(pair))
}

// --- Bearer extractor & JWT utils ---
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

pub struct Bearer(pub String);

#[axum::async_trait]
impl<S> FromRequestParts<S> for Bearer
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(auth) = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
        {
            if let Some(t) = auth.strip_prefix("Bearer ") {
                return Ok(Bearer(t.to_string()));
            }
        }
        Err(StatusCode::UNAUTHORIZED)
    }
}

pub fn issue_token_pair(cfg: &Config, user_id: Uuid) -> Result<TokenPairResponse, ApiError> {
    let now = Utc::now().timestamp() as usize;
    let encode = |token_type: &str, expires_secs: i64| -> anyhow::Result<String> {
        let claims = Claims {
            sub: user_id.to_string(),
            exp: now + expires_secs as usize,
            jti: Uuid::new_v4(),
            token_type: token_type.to_string(),
        };
        let token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(cfg.jwt_secret.as_bytes()),
        )?;
        Ok(token)
    };
    Ok(TokenPairResponse {
        access: encode("access", cfg.access_expires_secs)?,
        refresh: encode("refresh", cfg.refresh_expires_secs)?,
    })
}

pub(crate) fn decode_token(cfg: &Config, token: &str) -> Result<Claims, ApiError> {
    let data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(cfg.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| ApiError::Unauthorized)?;
    Ok(data.claims)
}

/// Checks the presented bearer token is a live access token and returns the
/// caller's user id.
pub fn validate_access(cfg: &Config, bearer: &Bearer) -> Result<Uuid, ApiError> {
    let claims = decode_token(cfg, &bearer.0)?;
    if claims.token_type != "access" {
        return Err(ApiError::Unauthorized);
    }
    Uuid::parse_str(&claims.sub).map_err(|_| ApiError::Unauthorized)
}

/// Writes require authentication, reads do not: handlers take
/// `Option<Bearer>` and call this on the mutating paths.
pub fn require_user(cfg: &Config, bearer: Option<&Bearer>) -> Result<Uuid, ApiError> {
    let bearer = bearer.ok_or(ApiError::Unauthorized)?;
    validate_access(cfg, bearer)
}
