pub mod color;
pub mod module;
pub mod plate;
pub mod user;

pub use color::Color;
pub use module::{Module, ModuleRecord};
pub use plate::{NewPlate, Plate, PlateRecord};
pub use user::User;
