pub mod attendance;
pub mod chat;
pub mod core;
pub mod reports;
pub mod tasks;
pub mod validate;
