//! Business logic services.

#![allow(missing_docs)]

pub mod movie;
pub mod seeding;
pub mod vote;

pub use movie::{CreateMovieInput, MovieService, MovieWithChoices};
pub use seeding::{
    DiscoverPage, MovieSource, SeedReport, SeedingService, TmdbClient, TmdbMovie,
};
pub use vote::{NO_CHOICE_MESSAGE, VoteOutcome, VoteService, averaged_score};
