#[path = "../common/mod.rs"]
#[macro_use]
pub mod common;

pub mod refresh_test;
