pub mod authenticate;
pub mod refresh;
pub mod token_pair;
