//! Vote service.

use cinepoll_common::AppResult;
use cinepoll_db::{
    entities::movie,
    repositories::{ChoiceRepository, MovieRepository},
};
use tracing::{debug, info};

use super::movie::MovieWithChoices;

/// Message shown when a vote arrives without a usable choice.
pub const NO_CHOICE_MESSAGE: &str = "You didn't select a choice.";

/// Result of a vote attempt.
#[derive(Debug, Clone)]
pub enum VoteOutcome {
    /// The vote was counted; carries the updated movie.
    Recorded(movie::Model),
    /// Nothing was changed; the voting form should be shown again.
    Rejected {
        movie: MovieWithChoices,
        message: &'static str,
    },
}

/// Score after folding in a vote for `value`.
#[must_use]
pub fn averaged_score(old_score: f64, value: i32) -> f64 {
    (old_score + f64::from(value)) / 2.0
}

/// Vote service for business logic.
#[derive(Clone)]
pub struct VoteService {
    movie_repo: MovieRepository,
    choice_repo: ChoiceRepository,
}

impl VoteService {
    /// Create a new vote service.
    #[must_use]
    pub const fn new(movie_repo: MovieRepository, choice_repo: ChoiceRepository) -> Self {
        Self {
            movie_repo,
            choice_repo,
        }
    }

    /// Vote on a movie.
    ///
    /// `selection` is the raw submitted choice ID. A missing or unparsable
    /// selection, or one naming a choice of another movie, is rejected
    /// without touching any row.
    pub async fn vote(&self, movie_id: i32, selection: Option<&str>) -> AppResult<VoteOutcome> {
        let movie = self.movie_repo.get_by_id(movie_id).await?;

        let choice = match selection.and_then(|s| s.trim().parse::<i32>().ok()) {
            Some(choice_id) => self.choice_repo.find_for_movie(movie_id, choice_id).await?,
            None => None,
        };

        let Some(choice) = choice else {
            debug!(movie_id, ?selection, "Rejected vote without a valid choice");
            let choices = self.choice_repo.find_by_movie(movie_id).await?;
            return Ok(VoteOutcome::Rejected {
                movie: MovieWithChoices { movie, choices },
                message: NO_CHOICE_MESSAGE,
            });
        };

        let updated = self
            .movie_repo
            .apply_vote(movie_id, choice.id, choice.choice)
            .await?;

        info!(
            movie_id,
            choice_id = choice.id,
            score = updated.score,
            vote_count = updated.vote_count,
            "Recorded vote"
        );

        Ok(VoteOutcome::Recorded(updated))
    }
}
