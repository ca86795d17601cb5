use std::sync::Arc;

use crate::application::ports::article_repository::ArticleRepository;
use crate::application::ports::category_repository::CategoryRepository;
use crate::application::ports::comment_repository::CommentRepository;
use crate::application::ports::identity_verifier::IdentityVerifier;
use crate::application::ports::mailer::Mailer;
use crate::application::ports::password_reset_repository::PasswordResetRepository;
use crate::application::ports::tag_repository::TagRepository;
use crate::application::ports::token_blacklist::TokenBlacklist;
use crate::application::ports::user_repository::UserRepository;
use crate::bootstrap::config::Config;

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

pub struct AppServices {
    user_repo: Arc<dyn UserRepository>,
    reset_repo: Arc<dyn PasswordResetRepository>,
    blacklist: Arc<dyn TokenBlacklist>,
    category_repo: Arc<dyn CategoryRepository>,
    tag_repo: Arc<dyn TagRepository>,
    article_repo: Arc<dyn ArticleRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    mailer: Arc<dyn Mailer>,
    identity: Arc<dyn IdentityVerifier>,
}

impl AppServices {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        reset_repo: Arc<dyn PasswordResetRepository>,
        blacklist: Arc<dyn TokenBlacklist>,
        category_repo: Arc<dyn CategoryRepository>,
        tag_repo: Arc<dyn TagRepository>,
        article_repo: Arc<dyn ArticleRepository>,
        comment_repo: Arc<dyn CommentRepository>,
        mailer: Arc<dyn Mailer>,
        identity: Arc<dyn IdentityVerifier>,
    ) -> Self {
        Self {
            user_repo,
            reset_repo,
            blacklist,
            category_repo,
            tag_repo,
            article_repo,
            comment_repo,
            mailer,
            identity,
        }
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn user_repo(&self) -> Arc<dyn UserRepository> {
        self.services.user_repo.clone()
    }

    pub fn reset_repo(&self) -> Arc<dyn PasswordResetRepository> {
        self.services.reset_repo.clone()
    }

    pub fn blacklist(&self) -> Arc<dyn TokenBlacklist> {
        self.services.blacklist.clone()
    }

    pub fn category_repo(&self) -> Arc<dyn CategoryRepository> {
        self.services.category_repo.clone()
    }

    pub fn tag_repo(&self) -> Arc<dyn TagRepository> {
        self.services.tag_repo.clone()
    }

    pub fn article_repo(&self) -> Arc<dyn ArticleRepository> {
        self.services.article_repo.clone()
    }

    pub fn comment_repo(&self) -> Arc<dyn CommentRepository> {
        self.services.comment_repo.clone()
    }

    pub fn mailer(&self) -> Arc<dyn Mailer> {
        self.services.mailer.clone()
    }

    pub fn identity(&self) -> Arc<dyn IdentityVerifier> {
        self.services.identity.clone()
    }
}
