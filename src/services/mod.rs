pub mod module_service;
pub mod user_service;

pub use module_service::{ModuleDetail, ModuleService};
pub use user_service::{UserProfile, UserService};
