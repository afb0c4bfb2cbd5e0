pub mod auth;
pub mod config;
pub mod db;
pub mod google;
pub mod keys;
pub mod repositories;
pub mod state;
