pub mod authorization;
pub mod error;
