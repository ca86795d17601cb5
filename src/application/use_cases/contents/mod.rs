pub mod add_content;
pub mod delete_content;
pub mod get_content;
pub mod list_contents;
pub mod update_content;
