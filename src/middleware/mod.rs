pub mod auth;

pub use auth::token_middleware;
