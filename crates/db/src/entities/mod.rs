//! Database entities.

pub mod choice;
pub mod movie;

pub use choice::Entity as Choice;
pub use movie::Entity as Movie;
