use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::{DateTime, Duration, Utc};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use blog_api::application::ports::article_repository::{
    ArticleFilter, ArticleOrder, ArticleRecord, ArticleRepository, ArticleRow, ContentRow,
    NewContent,
};
use blog_api::application::ports::category_repository::{CategoryRepository, CategoryRow};
use blog_api::application::ports::comment_repository::{CommentRepository, CommentRow};
use blog_api::application::ports::identity_verifier::{IdentityVerifier, VerifiedIdentity};
use blog_api::application::ports::mailer::Mailer;
use blog_api::application::ports::password_reset_repository::{
    PasswordResetRepository, ResetTokenRow,
};
use blog_api::application::ports::tag_repository::{TagRepository, TagRow};
use blog_api::application::ports::token_blacklist::TokenBlacklist;
use blog_api::application::ports::user_repository::{UserRepository, UserRow};
use blog_api::bootstrap::app_context::{AppContext, AppServices};
use blog_api::bootstrap::config::Config;

// --- users ---

#[derive(Default)]
pub struct InMemoryUsers {
    rows: Mutex<Vec<UserRow>>,
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
        role: &str,
        verification_token: Uuid,
    ) -> anyhow::Result<UserRow> {
        let row = UserRow {
            id: Uuid::new_v4(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash: Some(password_hash.to_string()),
            role: role.to_string(),
            is_active: false,
            is_email_verified: false,
            email_verification_token: verification_token,
        };
        self.rows.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn create_federated_user(&self, username: &str, email: &str) -> anyhow::Result<UserRow> {
        let row = UserRow {
            id: Uuid::new_v4(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash: None,
            role: "blogger".to_string(),
            is_active: true,
            is_email_verified: true,
            email_verification_token: Uuid::new_v4(),
        };
        self.rows.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<UserRow>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<UserRow>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn find_by_verification_token(&self, token: Uuid) -> anyhow::Result<Option<UserRow>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email_verification_token == token)
            .cloned())
    }

    async fn mark_email_verified(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|u| u.id == id) {
            Some(u) => {
                u.is_email_verified = true;
                u.is_active = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_password_hash(&self, id: Uuid, password_hash: &str) -> anyhow::Result<bool> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|u| u.id == id) {
            Some(u) => {
                u.password_hash = Some(password_hash.to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_username(&self, id: Uuid, username: &str) -> anyhow::Result<bool> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|u| u.id == id) {
            Some(u) => {
                u.username = username.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn username_exists(&self, username: &str) -> anyhow::Result<bool> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .any(|u| u.username == username))
    }
}

// --- password reset tokens ---

#[derive(Default)]
pub struct InMemoryResets {
    rows: Mutex<Vec<ResetTokenRow>>,
}

impl InMemoryResets {
    /// Backdates a token so expiry paths can be exercised.
    pub fn expire(&self, token: Uuid) {
        let mut rows = self.rows.lock().unwrap();
        if let Some(row) = rows.iter_mut().find(|r| r.token == token) {
            row.expires_at = Utc::now() - Duration::seconds(1);
        }
    }
}

#[async_trait]
impl PasswordResetRepository for InMemoryResets {
    async fn replace_for_user(
        &self,
        user_id: Uuid,
        token: Uuid,
        expires_at: DateTime<Utc>,
    ) -> anyhow::Result<ResetTokenRow> {
        let mut rows = self.rows.lock().unwrap();
        rows.retain(|r| r.user_id != user_id);
        let row = ResetTokenRow {
            id: Uuid::new_v4(),
            user_id,
            token,
            created_at: Utc::now(),
            expires_at,
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn find_by_token(&self, token: Uuid) -> anyhow::Result<Option<ResetTokenRow>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.token == token)
            .cloned())
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.id != id);
        Ok(rows.len() < before)
    }
}

// --- refresh token blacklist ---

#[derive(Default)]
pub struct InMemoryBlacklist {
    jtis: Mutex<HashMap<Uuid, DateTime<Utc>>>,
}

#[async_trait]
impl TokenBlacklist for InMemoryBlacklist {
    async fn revoke(&self, jti: Uuid, expires_at: DateTime<Utc>) -> anyhow::Result<()> {
        self.jtis.lock().unwrap().insert(jti, expires_at);
        Ok(())
    }

    async fn is_revoked(&self, jti: Uuid) -> anyhow::Result<bool> {
        Ok(self.jtis.lock().unwrap().contains_key(&jti))
    }
}

// --- categories / tags ---

#[derive(Default)]
pub struct InMemoryCategories {
    rows: Mutex<Vec<CategoryRow>>,
}

#[async_trait]
impl CategoryRepository for InMemoryCategories {
    async fn list(&self) -> anyhow::Result<Vec<CategoryRow>> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn create(&self, name: &str) -> anyhow::Result<CategoryRow> {
        let row = CategoryRow {
            id: Uuid::new_v4(),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn find(&self, id: Uuid) -> anyhow::Result<Option<CategoryRow>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn update(&self, id: Uuid, name: &str) -> anyhow::Result<Option<CategoryRow>> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|c| c.id == id) {
            Some(c) => {
                c.name = name.to_string();
                Ok(Some(c.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|c| c.id != id);
        Ok(rows.len() < before)
    }
}

#[derive(Default)]
pub struct InMemoryTags {
    rows: Mutex<Vec<TagRow>>,
}

#[async_trait]
impl TagRepository for InMemoryTags {
    async fn list(&self) -> anyhow::Result<Vec<TagRow>> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn create(&self, name: &str) -> anyhow::Result<TagRow> {
        let row = TagRow {
            id: Uuid::new_v4(),
            name: name.to_string(),
        };
        self.rows.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn find(&self, id: Uuid) -> anyhow::Result<Option<TagRow>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .cloned())
    }

    async fn update(&self, id: Uuid, name: &str) -> anyhow::Result<Option<TagRow>> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|t| t.id == id) {
            Some(t) => {
                t.name = name.to_string();
                Ok(Some(t.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|t| t.id != id);
        Ok(rows.len() < before)
    }
}

// --- comments ---

pub struct InMemoryComments {
    rows: Mutex<Vec<CommentRow>>,
    users: Arc<InMemoryUsers>,
}

impl InMemoryComments {
    pub fn new(users: Arc<InMemoryUsers>) -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            users,
        }
    }
}

#[async_trait]
impl CommentRepository for InMemoryComments {
    async fn create(
        &self,
        article_id: Uuid,
        user_id: Uuid,
        content: &str,
    ) -> anyhow::Result<CommentRow> {
        let username = self
            .users
            .find_by_id(user_id)
            .await?
            .map(|u| u.username)
            .ok_or_else(|| anyhow::anyhow!("unknown user"))?;
        let row = CommentRow {
            id: Uuid::new_v4(),
            article_id,
            user_id,
            username,
            content: content.to_string(),
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn list(&self, article_id: Option<Uuid>) -> anyhow::Result<Vec<CommentRow>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|c| article_id.map_or(true, |id| c.article_id == id))
            .cloned()
            .collect())
    }

    async fn find(&self, id: Uuid) -> anyhow::Result<Option<CommentRow>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn update(&self, id: Uuid, content: &str) -> anyhow::Result<Option<CommentRow>> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|c| c.id == id) {
            Some(c) => {
                c.content = content.to_string();
                Ok(Some(c.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|c| c.id != id);
        Ok(rows.len() < before)
    }
}

// --- articles ---

#[derive(Clone)]
struct ArticleState {
    id: Uuid,
    author_id: Uuid,
    category_id: Option<Uuid>,
    tag_ids: Vec<Uuid>,
    contents: Vec<ContentRow>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

pub struct InMemoryArticles {
    rows: Mutex<Vec<ArticleState>>,
    users: Arc<InMemoryUsers>,
    categories: Arc<InMemoryCategories>,
    tags: Arc<InMemoryTags>,
    comments: Arc<InMemoryComments>,
}

impl InMemoryArticles {
    pub fn new(
        users: Arc<InMemoryUsers>,
        categories: Arc<InMemoryCategories>,
        tags: Arc<InMemoryTags>,
        comments: Arc<InMemoryComments>,
    ) -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            users,
            categories,
            tags,
            comments,
        }
    }

    async fn hydrate(&self, state: ArticleState) -> anyhow::Result<ArticleRecord> {
        let author_name = self
            .users
            .find_by_id(state.author_id)
            .await?
            .map(|u| u.username)
            .unwrap_or_default();
        let category = match state.category_id {
            Some(id) => self.categories.find(id).await?,
            None => None,
        };
        let mut tags = Vec::new();
        for tid in &state.tag_ids {
            if let Some(tag) = self.tags.find(*tid).await? {
                tags.push(tag);
            }
        }
        let comments = self.comments.list(Some(state.id)).await?;
        Ok(ArticleRecord {
            article: ArticleRow {
                id: state.id,
                author_id: state.author_id,
                author_name,
                category,
                created_at: state.created_at,
                updated_at: state.updated_at,
            },
            contents: state.contents,
            tags,
            comments,
        })
    }
}

#[async_trait]
impl ArticleRepository for InMemoryArticles {
    async fn create(
        &self,
        author_id: Uuid,
        category_id: Option<Uuid>,
        contents: &[NewContent],
        tag_ids: &[Uuid],
    ) -> anyhow::Result<ArticleRecord> {
        let now = Utc::now();
        let id = Uuid::new_v4();
        let state = ArticleState {
            id,
            author_id,
            category_id,
            tag_ids: tag_ids.to_vec(),
            contents: contents
                .iter()
                .map(|c| ContentRow {
                    id: Uuid::new_v4(),
                    article_id: id,
                    language: c.language.clone(),
                    title: c.title.clone(),
                    body: c.body.clone(),
                })
                .collect(),
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().push(state.clone());
        self.hydrate(state).await
    }

    async fn list(&self, filter: &ArticleFilter) -> anyhow::Result<Vec<ArticleRecord>> {
        let mut states: Vec<ArticleState> = self.rows.lock().unwrap().clone();
        match filter.order {
            ArticleOrder::Created => states.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            ArticleOrder::Updated => states.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
        }
        let mut out = Vec::new();
        for state in states {
            let record = self.hydrate(state).await?;
            if let Some(category) = &filter.category {
                if record.article.category.as_ref().map(|c| c.name.as_str())
                    != Some(category.as_str())
                {
                    continue;
                }
            }
            if let Some(tag) = &filter.tag {
                if !record.tags.iter().any(|t| &t.name == tag) {
                    continue;
                }
            }
            if let Some(keyword) = &filter.keyword {
                let needle = keyword.to_lowercase();
                let hit = record.contents.iter().any(|c| {
                    c.title.to_lowercase().contains(&needle)
                        || c.body.to_lowercase().contains(&needle)
                });
                if !hit {
                    continue;
                }
            }
            out.push(record);
        }
        Ok(out)
    }

    async fn find(&self, id: Uuid) -> anyhow::Result<Option<ArticleRecord>> {
        let state = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned();
        match state {
            Some(state) => Ok(Some(self.hydrate(state).await?)),
            None => Ok(None),
        }
    }

    async fn update(
        &self,
        id: Uuid,
        category_id: Option<Option<Uuid>>,
        tag_ids: Option<&[Uuid]>,
    ) -> anyhow::Result<Option<ArticleRecord>> {
        let state = {
            let mut rows = self.rows.lock().unwrap();
            let Some(state) = rows.iter_mut().find(|a| a.id == id) else {
                return Ok(None);
            };
            if let Some(cid) = category_id {
                state.category_id = cid;
            }
            if let Some(tids) = tag_ids {
                state.tag_ids = tids.to_vec();
            }
            state.updated_at = Utc::now();
            state.clone()
        };
        Ok(Some(self.hydrate(state).await?))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|a| a.id != id);
        Ok(rows.len() < before)
    }

    async fn list_contents(&self) -> anyhow::Result<Vec<ContentRow>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .flat_map(|a| a.contents.clone())
            .collect())
    }

    async fn add_content(
        &self,
        article_id: Uuid,
        content: &NewContent,
    ) -> anyhow::Result<ContentRow> {
        let mut rows = self.rows.lock().unwrap();
        let state = rows
            .iter_mut()
            .find(|a| a.id == article_id)
            .ok_or_else(|| anyhow::anyhow!("unknown article"))?;
        let row = ContentRow {
            id: Uuid::new_v4(),
            article_id,
            language: content.language.clone(),
            title: content.title.clone(),
            body: content.body.clone(),
        };
        state.contents.push(row.clone());
        state.updated_at = Utc::now();
        Ok(row)
    }

    async fn find_content(&self, id: Uuid) -> anyhow::Result<Option<ContentRow>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .flat_map(|a| a.contents.iter())
            .find(|c| c.id == id)
            .cloned())
    }

    async fn update_content(
        &self,
        id: Uuid,
        language: &str,
        title: &str,
        body: &str,
    ) -> anyhow::Result<Option<ContentRow>> {
        let mut rows = self.rows.lock().unwrap();
        for state in rows.iter_mut() {
            if let Some(content) = state.contents.iter_mut().find(|c| c.id == id) {
                content.language = language.to_string();
                content.title = title.to_string();
                content.body = body.to_string();
                let updated = content.clone();
                state.updated_at = Utc::now();
                return Ok(Some(updated));
            }
        }
        Ok(None)
    }

    async fn delete_content(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut rows = self.rows.lock().unwrap();
        for state in rows.iter_mut() {
            let before = state.contents.len();
            state.contents.retain(|c| c.id != id);
            if state.contents.len() < before {
                state.updated_at = Utc::now();
                return Ok(true);
            }
        }
        Ok(false)
    }

    async fn content_language_exists(
        &self,
        article_id: Uuid,
        language: &str,
        exclude: Option<Uuid>,
    ) -> anyhow::Result<bool> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.id == article_id)
            .flat_map(|a| a.contents.iter())
            .any(|c| c.language == language && Some(c.id) != exclude))
    }
}

// --- mailer / identity ---

#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<(String, String, String)>>,
}

impl RecordingMailer {
    pub fn last_body(&self) -> Option<String> {
        self.sent.lock().unwrap().last().map(|(_, _, b)| b.clone())
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), subject.to_string(), body.to_string()));
        Ok(())
    }
}

#[derive(Default)]
pub struct StubIdentityVerifier {
    identities: Mutex<HashMap<String, VerifiedIdentity>>,
}

impl StubIdentityVerifier {
    pub fn accept(&self, token: &str, email: &str, name: &str) {
        self.identities.lock().unwrap().insert(
            token.to_string(),
            VerifiedIdentity {
                email: email.to_string(),
                name: name.to_string(),
            },
        );
    }
}

#[async_trait]
impl IdentityVerifier for StubIdentityVerifier {
    async fn verify_id_token(&self, token: &str) -> anyhow::Result<Option<VerifiedIdentity>> {
        Ok(self.identities.lock().unwrap().get(token).cloned())
    }
}

// --- harness ---

pub struct TestApp {
    pub router: Router,
    pub resets: Arc<InMemoryResets>,
    pub mailer: Arc<RecordingMailer>,
    pub identity: Arc<StubIdentityVerifier>,
}

pub fn spawn_app() -> TestApp {
    let cfg = Config {
        api_port: 0,
        frontend_url: Some("http://localhost:3000".to_string()),
        database_url: String::new(),
        jwt_secret: "integration-test-secret".to_string(),
        access_expires_secs: 3600,
        refresh_expires_secs: 7 * 24 * 3600,
        google_client_id: Some("test-client".to_string()),
        mail_from: "no-reply@localhost".to_string(),
        mail_api_url: None,
        mail_api_token: None,
        is_production: false,
    };

    let users = Arc::new(InMemoryUsers::default());
    let resets = Arc::new(InMemoryResets::default());
    let blacklist = Arc::new(InMemoryBlacklist::default());
    let categories = Arc::new(InMemoryCategories::default());
    let tags = Arc::new(InMemoryTags::default());
    let comments = Arc::new(InMemoryComments::new(users.clone()));
    let articles = Arc::new(InMemoryArticles::new(
        users.clone(),
        categories.clone(),
        tags.clone(),
        comments.clone(),
    ));
    let mailer = Arc::new(RecordingMailer::default());
    let identity = Arc::new(StubIdentityVerifier::default());

    let services = AppServices::new(
        users,
        resets.clone(),
        blacklist,
        categories,
        tags,
        articles,
        comments,
        mailer.clone(),
        identity.clone(),
    );
    let ctx = AppContext::new(cfg, services);

    let router = Router::new()
        .nest("/api", blog_api::presentation::http::auth::routes(ctx.clone()))
        .nest(
            "/api",
            blog_api::presentation::http::categories::routes(ctx.clone()),
        )
        .nest("/api", blog_api::presentation::http::tags::routes(ctx.clone()))
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
            blog_api::presentation::http::comments::routes(ctx),
        );

    TestApp {
        router,
        resets,
        mailer,
        identity,
    }
}

impl TestApp {
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request("GET", uri, None, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request("POST", uri, None, Some(body)).await
    }

    pub async fn post_auth(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request("POST", uri, Some(token), Some(body)).await
    }
}

/// Pulls the path-embedded token out of an emailed link like
/// `http://localhost:3000/verifyEmail/<uuid>/`.
pub fn extract_token(body: &str) -> Uuid {
    let link = body
        .split_whitespace()
        .find(|w| w.starts_with("http"))
        .expect("email contains a link");
    let token = link
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .expect("link has a token segment");
    Uuid::parse_str(token).expect("token segment is a uuid")
}
