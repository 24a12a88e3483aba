// handlers/public/mod.rs - Public handlers (no identity required)
//
// Route Prefix: /, /health, /auth/*, GET /api/v1/modules

pub mod modules;
pub mod providers;
pub mod system;

pub use modules::list as modules_list;
pub use providers::get as provider_get;
pub use providers::list as providers_list;
pub use system::{health, root};
