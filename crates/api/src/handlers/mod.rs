pub mod auth;
pub mod chat;
pub mod suggest;
pub mod user;
