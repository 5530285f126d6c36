//! Core business logic for cinepoll.

pub mod services;

pub use services::*;
