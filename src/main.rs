use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::MatchedPath;
use dotenvy::dotenv;
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use blog_api::application::ports::identity_verifier::IdentityVerifier;
use blog_api::application::ports::mailer::Mailer;
use blog_api::bootstrap::app_context::{AppContext, AppServices};
use blog_api::bootstrap::config::Config;

#[derive(OpenApi)]
#[openapi(
        paths(
            blog_api::presentation::http::auth::register,
            blog_api::presentation::http::auth::verify_email,
            blog_api::presentation::http::auth::login,
            blog_api::presentation::http::auth::logout,
            blog_api::presentation::http::auth::userinfo,
            blog_api::presentation::http::auth::request_password_reset,
            blog_api::presentation::http::auth::confirm_password_reset,
            blog_api::presentation::http::auth::change_password,
            blog_api::presentation::http::auth::change_username,
            blog_api::presentation::http::auth::google_login,
            blog_api::presentation::http::categories::list,
            blog_api::presentation::http::categories::create,
            blog_api::presentation::http::categories::get_one,
            blog_api::presentation::http::categories::update,
            blog_api::presentation::http::categories::delete_one,
            blog_api::presentation::http::tags::list,
            blog_api::presentation::http::tags::create,
            blog_api::presentation::http::tags::get_one,
            blog_api::presentation::http::tags::update,
            blog_api::presentation::http::tags::delete_one,
            blog_api::presentation::http::articles::list,
            blog_api::presentation::http::articles::create,
            blog_api::presentation::http::articles::get_one,
            blog_api::presentation::http::articles::update,
            blog_api::presentation::http::articles::delete_one,
            blog_api::presentation::http::contents::list,
            blog_api::presentation::http::contents::create,
            blog_api::presentation::http::contents::get_one,
            blog_api::presentation::http::contents::update,
            blog_api::presentation::http::contents::delete_one,
            blog_api::presentation::http::comments::list,
            blog_api::presentation::http::comments::create,
            blog_api::presentation::http::comments::get_one,
            blog_api::presentation::http::comments::update,
            blog_api::presentation::http::comments::delete_one,
            blog_api::presentation::http::health::health,
        ),
        components(schemas(
            blog_api::presentation::http::auth::RegisterRequest,
            blog_api::presentation::http::auth::LoginRequest,
            blog_api::presentation::http::auth::TokenPairResponse,
            blog_api::presentation::http::auth::UserResponse,
            blog_api::presentation::http::auth::LogoutRequest,
            blog_api::presentation::http::auth::PasswordResetRequest,
            blog_api::presentation::http::auth::SetNewPasswordRequest,
            blog_api::presentation::http::auth::ChangePasswordRequest,
            blog_api::presentation::http::auth::ChangeUsernameRequest,
            blog_api::presentation::http::auth::GoogleLoginRequest,
            blog_api::presentation::http::auth::SuccessResponse,
            blog_api::presentation::http::auth::MessageResponse,
            blog_api::presentation::http::categories::CategoryPayload,
            blog_api::presentation::http::categories::CategoryResponse,
            blog_api::presentation::http::tags::TagPayload,
            blog_api::presentation::http::tags::TagResponse,
            blog_api::presentation::http::articles::ContentPayload,
            blog_api::presentation::http::articles::CreateArticleRequest,
            blog_api::presentation::http::articles::UpdateArticleRequest,
            blog_api::presentation::http::articles::ArticleResponse,
            blog_api::presentation::http::contents::CreateContentRequest,
            blog_api::presentation::http::contents::UpdateContentRequest,
            blog_api::presentation::http::contents::ContentResponse,
            blog_api::presentation::http::comments::CreateCommentRequest,
            blog_api::presentation::http::comments::UpdateCommentRequest,
            blog_api::presentation::http::comments::CommentResponse,
            blog_api::presentation::http::health::HealthResponse,
        )),
        tags(
            (name = "Account", description = "Registration, login and account management"),
            (name = "Categories", description = "Article categories"),
            (name = "Tags", description = "Article tags"),
            (name = "Articles", description = "Articles and search"),
            (name = "Article contents", description = "Per-language article content blocks"),
            (name = "Comments", description = "Article comments"),
            (name = "Health", description = "System health checks"),
        )
    )]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "blog_api=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(port = cfg.api_port, "Starting blog backend");

    let pool = blog_api::infrastructure::db::connect_pool(&cfg.database_url).await?;
    blog_api::infrastructure::db::migrate(&pool).await?;

    let user_repo = Arc::new(
        blog_api::infrastructure::db::repositories::user_repository_sqlx::SqlxUserRepository::new(
            pool.clone(),
        ),
    );
    let reset_repo = Arc::new(
        blog_api::infrastructure::db::repositories::password_reset_repository_sqlx::SqlxPasswordResetRepository::new(
            pool.clone(),
        ),
    );
    let blacklist = Arc::new(
        blog_api::infrastructure::db::repositories::token_blacklist_sqlx::SqlxTokenBlacklist::new(
            pool.clone(),
        ),
    );
    let category_repo = Arc::new(
        blog_api::infrastructure::db::repositories::category_repository_sqlx::SqlxCategoryRepository::new(
            pool.clone(),
        ),
    );
    let tag_repo = Arc::new(
        blog_api::infrastructure::db::repositories::tag_repository_sqlx::SqlxTagRepository::new(
            pool.clone(),
        ),
    );
    let article_repo = Arc::new(
        blog_api::infrastructure::db::repositories::article_repository_sqlx::SqlxArticleRepository::new(
            pool.clone(),
        ),
    );
    let comment_repo = Arc::new(
        blog_api::infrastructure::db::repositories::comment_repository_sqlx::SqlxCommentRepository::new(
            pool.clone(),
        ),
    );
    let mailer: Arc<dyn Mailer> = match cfg.mail_api_url.clone() {
        Some(url) => Arc::new(blog_api::infrastructure::email::HttpRelayMailer::new(
            url,
            cfg.mail_api_token.clone(),
            cfg.mail_from.clone(),
        )),
        None => Arc::new(blog_api::infrastructure::email::LogMailer),
    };
    let identity: Arc<dyn IdentityVerifier> = match cfg.google_client_id.clone() {
        Some(client_id) => Arc::new(
            blog_api::infrastructure::identity::google::GoogleIdentityVerifier::new(client_id),
        ),
        None => Arc::new(blog_api::infrastructure::identity::DisabledIdentityVerifier),
    };

    let services = AppServices::new(
        user_repo,
        reset_repo,
        blacklist,
        category_repo,
        tag_repo,
        article_repo,
        comment_repo,
        mailer,
        identity,
    );
    let ctx = AppContext::new(cfg.clone(), services);

    let methods = [
        http::Method::GET,
        http::Method::POST,
        http::Method::PUT,
        http::Method::DELETE,
        http::Method::OPTIONS,
    ];
    let cors = match cfg.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(methods)
            .allow_headers([http::header::CONTENT_TYPE, http::header::AUTHORIZATION])
            .allow_credentials(true),
        _ if cfg.is_production => CorsLayer::new()
            .allow_origin(AllowOrigin::exact(HeaderValue::from_static("http://invalid")))
            .allow_methods(methods)
            .allow_headers([http::header::CONTENT_TYPE, http::header::AUTHORIZATION]),
        _ => CorsLayer::new()
            .allow_origin(AllowOrigin::mirror_request())
            .allow_methods(methods)
            .allow_headers([http::header::CONTENT_TYPE, http::header::AUTHORIZATION])
            .allow_credentials(true),
    };

    let app = Router::new()
        .nest(
            "/api",
            blog_api::presentation::http::health::routes(pool.clone()),
        )
        .nest(
            "/api",
            blog_api::presentation::http::auth::routes(ctx.clone()),
        )
        .nest(
            "/api",
            blog_api::presentation::http::categories::routes(ctx.clone()),
        )
        .nest(
            "/api",
            blog_api::presentation::http::tags::routes(ctx.clone()),
        )
        .nest(
            "/api",
            blog_api::presentation::http::articles::routes(ctx.clone()),
        )
        .nest(
            "/api",
            blog_api::presentation::http::contents::routes(ctx.clone()),
        )
        .nest(
            "/api",
            blog_api::presentation::http::comments::routes(ctx.clone()),
        )
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
