pub mod article_repository_sqlx;
pub mod category_repository_sqlx;
pub mod comment_repository_sqlx;
pub mod password_reset_repository_sqlx;
pub mod tag_repository_sqlx;
pub mod token_blacklist_sqlx;
pub mod user_repository_sqlx;
