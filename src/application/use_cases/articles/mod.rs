pub mod create_article;
pub mod delete_article;
pub mod get_article;
pub mod list_articles;
pub mod update_article;
