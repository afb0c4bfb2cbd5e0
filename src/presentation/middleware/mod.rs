pub mod cors;
pub mod guard;
