pub mod diary_entries;
pub mod external_logins;
pub mod mock;
pub mod tokens;
pub mod users;
