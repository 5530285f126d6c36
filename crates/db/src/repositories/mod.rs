//! Database repositories.

mod choice;
mod movie;

pub use choice::ChoiceRepository;
pub use movie::MovieRepository;
