pub mod change_password;
pub mod change_username;
pub mod confirm_password_reset;
pub mod google_login;
pub mod login;
pub mod logout;
pub mod me;
pub mod passwords;
pub mod register;
pub mod request_password_reset;
pub mod verify_email;
