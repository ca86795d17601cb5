pub mod articles;
pub mod auth;
pub mod categories;
pub mod comments;
pub mod contents;
pub mod tags;
