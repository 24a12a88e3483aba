pub mod color;
pub mod token;
pub mod user;
