pub mod common;
pub mod placeholder;
