//! Shared application state.

use std::sync::Arc;

use cinepoll_common::AppResult;
use cinepoll_core::{MovieService, VoteService};
use cinepoll_db::repositories::{ChoiceRepository, MovieRepository};
use sea_orm::DatabaseConnection;

use crate::templates::Templates;

/// Application state.
#[derive(Clone)]
pub struct AppState {
    /// Movie listing, lookup and administration.
    pub movie_service: MovieService,
    /// Vote recording.
    pub vote_service: VoteService,
    /// Compiled page templates.
    pub templates: Arc<Templates>,
}

impl AppState {
    /// Wire repositories and services on top of a database connection.
    pub fn new(db: Arc<DatabaseConnection>) -> AppResult<Self> {
        let movie_repo = MovieRepository::new(Arc::clone(&db));
        let choice_repo = ChoiceRepository::new(Arc::clone(&db));

        Ok(Self {
            movie_service: MovieService::new(movie_repo.clone(), choice_repo.clone()),
            vote_service: VoteService::new(movie_repo, choice_repo),
            templates: Arc::new(Templates::new()?),
        })
    }
}
