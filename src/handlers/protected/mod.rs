// handlers/protected/mod.rs - Protected handlers (identity required)
//
// Route Prefix: /api/v1/*
// Each handler passes the optional token payload to a service; the service
// resolves identity before looking anything up.

pub mod colors;
pub mod modules;
pub mod plates;
pub mod users;

pub use colors::list as colors_list;

pub use modules::delete as module_delete;
pub use modules::get as module_get;
pub use modules::post as module_post;
pub use modules::put as module_put;

pub use plates::delete as plate_delete;
pub use plates::list as plates_list;
pub use plates::post as plate_post;
pub use plates::put as plate_put;

pub use users::get as user_get;
pub use users::put as user_put;
pub use users::self_get as user_self_get;
pub use users::self_put as user_self_put;
