pub mod auth;
pub mod diary_entries;
pub mod external_logins;
pub mod tokens;
pub mod users;
