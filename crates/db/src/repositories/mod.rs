pub mod topic_repo;
pub mod user_repo;

pub use topic_repo::TopicRepo;
pub use user_repo::UserRepo;
