pub mod article_repository;
pub mod category_repository;
pub mod comment_repository;
pub mod identity_verifier;
pub mod mailer;
pub mod password_reset_repository;
pub mod tag_repository;
pub mod token_blacklist;
pub mod user_repository;
