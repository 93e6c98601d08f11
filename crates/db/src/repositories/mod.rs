mod chat_repo;
mod user_repo;

pub use chat_repo::ChatRepo;
pub use user_repo::UserRepo;
