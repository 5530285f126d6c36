//! Movie service.

use chrono::{DateTime, Utc};
use cinepoll_common::{AppError, AppResult};
use cinepoll_db::{
    entities::{choice, movie},
    repositories::{ChoiceRepository, MovieRepository},
};
use sea_orm::{NotSet, Set};
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

/// Movie together with its choices.
#[derive(Debug, Clone, Serialize)]
pub struct MovieWithChoices {
    pub movie: movie::Model,
    pub choices: Vec<choice::Model>,
}

/// Input for creating a movie.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMovieInput {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub release_date: DateTime<Utc>,
    #[validate(length(max = 400))]
    #[serde(default)]
    pub image: String,
    #[validate(range(min = 0.0, max = 10.0))]
    pub score: f64,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub vote_count: i32,
    #[serde(default)]
    pub overview: String,
    /// Values of the choices created alongside the movie.
    #[serde(default)]
    pub choices: Vec<i32>,
}

/// Movie service for business logic.
#[derive(Clone)]
pub struct MovieService {
    movie_repo: MovieRepository,
    choice_repo: ChoiceRepository,
}

impl MovieService {
    /// Create a new movie service.
    #[must_use]
    pub const fn new(movie_repo: MovieRepository, choice_repo: ChoiceRepository) -> Self {
        Self {
            movie_repo,
            choice_repo,
        }
    }

    /// Movies whose release date is not in the future, newest first.
    pub async fn list_released(&self) -> AppResult<Vec<movie::Model>> {
        self.movie_repo.find_released(Utc::now()).await
    }

    /// A released movie with its choices.
    ///
    /// Unreleased movies are reported as missing.
    pub async fn get_released(&self, id: i32) -> AppResult<MovieWithChoices> {
        let movie = self
            .movie_repo
            .find_released_by_id(id, Utc::now())
            .await?
            .ok_or(AppError::MovieNotFound(id))?;

        self.with_choices(movie).await
    }

    /// Any movie with its choices, released or not.
    pub async fn get(&self, id: i32) -> AppResult<MovieWithChoices> {
        let movie = self.movie_repo.get_by_id(id).await?;
        self.with_choices(movie).await
    }

    /// Attach the choices of `movie`.
    pub async fn with_choices(&self, movie: movie::Model) -> AppResult<MovieWithChoices> {
        let choices = self.choice_repo.find_by_movie(movie.id).await?;
        Ok(MovieWithChoices { movie, choices })
    }

    /// Create a movie and its initial choices in one transaction.
    pub async fn create(&self, input: CreateMovieInput) -> AppResult<MovieWithChoices> {
        input.validate()?;

        let (movie, choices) = self
            .movie_repo
            .create_with_choices(
                movie::ActiveModel {
                    id: NotSet,
                    title: Set(input.title),
                    release_date: Set(input.release_date.fixed_offset()),
                    image: Set(input.image),
                    score: Set(input.score),
                    vote_count: Set(input.vote_count),
                    overview: Set(input.overview),
                },
                &input.choices,
            )
            .await?;

        info!(movie_id = movie.id, title = %movie.title, choices = choices.len(), "Created movie");

        Ok(MovieWithChoices { movie, choices })
    }

    /// Add a choice to an existing movie.
    pub async fn add_choice(&self, movie_id: i32, value: i32) -> AppResult<choice::Model> {
        self.movie_repo.get_by_id(movie_id).await?;
        self.insert_choice(movie_id, value).await
    }

    async fn insert_choice(&self, movie_id: i32, value: i32) -> AppResult<choice::Model> {
        self.choice_repo
            .create(choice::ActiveModel {
                id: NotSet,
                movie_id: Set(movie_id),
                choice: Set(value),
                votes: Set(0),
            })
            .await
    }

    /// Delete a movie and, through the cascade, its choices.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        if !self.movie_repo.delete(id).await? {
            return Err(AppError::MovieNotFound(id));
        }

        info!(movie_id = id, "Deleted movie");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Duration;
    use cinepoll_db::entities::Choice;
    use cinepoll_db::test_utils::TestDatabase;
    use sea_orm::{ConnectionTrait, EntityTrait, PaginatorTrait};

    fn service(db: &TestDatabase) -> MovieService {
        MovieService::new(
            MovieRepository::new(db.shared()),
            ChoiceRepository::new(db.shared()),
        )
    }

    fn input(title: &str, days: i64) -> CreateMovieInput {
        CreateMovieInput {
            title: title.to_string(),
            release_date: Utc::now() + Duration::days(days),
            image: "http://example.com/image.png".to_string(),
            score: 7.5,
            vote_count: 1000,
            overview: "Movie overview".to_string(),
            choices: vec![1, 2, 3],
        }
    }

    #[test]
    fn test_score_range_validation() {
        let mut movie = input("Pulp Fiction", -1);
        movie.score = 8.9;
        assert!(movie.validate().is_ok());

        movie.score = -1.0;
        assert!(movie.validate().is_err());

        movie.score = 11.0;
        assert!(movie.validate().is_err());
    }

    #[test]
    fn test_title_length_validation() {
        let mut movie = input("", -1);
        assert!(movie.validate().is_err());

        movie.title = "x".repeat(201);
        assert!(movie.validate().is_err());
    }

    #[tokio::test]
    async fn test_create_rejects_out_of_range_score() {
        let db = TestDatabase::in_memory().await.unwrap();
        let service = service(&db);

        let mut movie = input("Too good", -1);
        movie.score = 11.0;

        let result = service.create(movie).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(service.list_released().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_with_choices() {
        let db = TestDatabase::in_memory().await.unwrap();
        let service = service(&db);

        let created = service.create(input("Test Movie", -1)).await.unwrap();
        let values: Vec<i32> = created.choices.iter().map(|c| c.choice).collect();
        assert_eq!(values, vec![1, 2, 3]);

        let fetched = service.get_released(created.movie.id).await.unwrap();
        assert_eq!(fetched.movie.title, "Test Movie");
        assert_eq!(fetched.choices.len(), 3);
    }

    #[tokio::test]
    async fn test_create_is_all_or_nothing() {
        let db = TestDatabase::in_memory().await.unwrap();
        db.connection()
            .execute_unprepared(
                "CREATE TRIGGER reject_unlucky_choice BEFORE INSERT ON choice \
                 WHEN NEW.choice = 13 BEGIN SELECT RAISE(ABORT, 'unlucky'); END",
            )
            .await
            .unwrap();
        let service = service(&db);

        let mut movie = input("Friday the 13th", -1);
        movie.choices = vec![1, 2, 13];

        assert!(matches!(
            service.create(movie).await,
            Err(AppError::Database(_))
        ));
        assert_eq!(MovieRepository::new(db.shared()).count().await.unwrap(), 0);
        assert_eq!(Choice::find().count(db.connection()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unreleased_movie_is_hidden() {
        let db = TestDatabase::in_memory().await.unwrap();
        let service = service(&db);

        let future = service.create(input("Future movie.", 5)).await.unwrap();

        assert!(matches!(
            service.get_released(future.movie.id).await,
            Err(AppError::MovieNotFound(_))
        ));
        assert!(service.get(future.movie.id).await.is_ok());
        assert!(service.list_released().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_choice_requires_movie() {
        let db = TestDatabase::in_memory().await.unwrap();
        let service = service(&db);

        assert!(matches!(
            service.add_choice(404, 1).await,
            Err(AppError::MovieNotFound(404))
        ));

        let created = service.create(input("Movie", -1)).await.unwrap();
        let choice = service.add_choice(created.movie.id, 9).await.unwrap();
        assert_eq!(choice.choice, 9);
        assert_eq!(choice.votes, 0);
    }

    #[tokio::test]
    async fn test_delete() {
        let db = TestDatabase::in_memory().await.unwrap();
        let service = service(&db);

        let created = service.create(input("Movie", -1)).await.unwrap();
        service.delete(created.movie.id).await.unwrap();

        assert!(matches!(
            service.get(created.movie.id).await,
            Err(AppError::MovieNotFound(_))
        ));
        assert!(matches!(
            service.delete(created.movie.id).await,
            Err(AppError::MovieNotFound(_))
        ));
    }
}
