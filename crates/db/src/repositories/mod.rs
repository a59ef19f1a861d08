//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

mod checklist;
pub mod goal_repo;
pub mod settings_repo;
pub mod task_repo;
pub mod user_repo;

pub use goal_repo::GoalRepo;
pub use settings_repo::SettingsRepo;
pub use task_repo::TaskRepo;
pub use user_repo::UserRepo;
