//! Movie repository.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use cinepoll_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait, sea_query::Expr,
};

use crate::entities::{Choice, Movie, choice, movie};

/// Movie repository for database operations.
#[derive(Clone)]
pub struct MovieRepository {
    db: Arc<DatabaseConnection>,
}

impl MovieRepository {
    /// Create a new movie repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a movie by ID.
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<movie::Model>> {
        Movie::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a movie by ID, returning error if not found.
    pub async fn get_by_id(&self, id: i32) -> AppResult<movie::Model> {
        self.find_by_id(id)
            .await?
            .ok_or(AppError::MovieNotFound(id))
    }

    /// Movies released at or before `now`, newest first.
    pub async fn find_released(&self, now: DateTime<Utc>) -> AppResult<Vec<movie::Model>> {
        Movie::find()
            .filter(movie::Column::ReleaseDate.lte(now.fixed_offset()))
            .order_by_desc(movie::Column::ReleaseDate)
            .order_by_desc(movie::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a movie by ID if it was released at or before `now`.
    pub async fn find_released_by_id(
        &self,
        id: i32,
        now: DateTime<Utc>,
    ) -> AppResult<Option<movie::Model>> {
        Movie::find_by_id(id)
            .filter(movie::Column::ReleaseDate.lte(now.fixed_offset()))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new movie.
    pub async fn create(&self, model: movie::ActiveModel) -> AppResult<movie::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a movie together with one choice per value.
    ///
    /// Either every row is written or none is.
    pub async fn create_with_choices(
        &self,
        model: movie::ActiveModel,
        values: &[i32],
    ) -> AppResult<(movie::Model, Vec<choice::Model>)> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let inserted = async {
            let movie = model.insert(&txn).await?;
            let mut choices = Vec::with_capacity(values.len());
            for &value in values {
                let choice = choice::ActiveModel {
                    id: NotSet,
                    movie_id: Set(movie.id),
                    choice: Set(value),
                    votes: Set(0),
                }
                .insert(&txn)
                .await?;
                choices.push(choice);
            }
            Ok::<_, sea_orm::DbErr>((movie, choices))
        }
        .await;

        match inserted {
            Ok(rows) => {
                txn.commit()
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                Ok(rows)
            }
            Err(e) => {
                txn.rollback()
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                Err(AppError::Database(e.to_string()))
            }
        }
    }

    /// Delete a movie. Its choices go with it through the foreign key cascade.
    ///
    /// Returns whether a row was removed.
    pub async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = Movie::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }

    /// Count all movies.
    pub async fn count(&self) -> AppResult<u64> {
        Movie::find()
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Record a vote for `choice_id` on `movie_id`.
    ///
    /// Increments the choice tally and the movie vote count, and folds `value`
    /// into the score as `(score + value) / 2`. Both rows are updated in one
    /// transaction with in-database arithmetic.
    pub async fn apply_vote(
        &self,
        movie_id: i32,
        choice_id: i32,
        value: i32,
    ) -> AppResult<movie::Model> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let updated = Choice::update_many()
            .col_expr(
                choice::Column::Votes,
                Expr::col(choice::Column::Votes).add(1),
            )
            .filter(choice::Column::Id.eq(choice_id))
            .filter(choice::Column::MovieId.eq(movie_id))
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if updated.rows_affected == 0 {
            txn.rollback()
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            return Err(AppError::NotFound(format!(
                "Choice {choice_id} not found for movie {movie_id}"
            )));
        }

        Movie::update_many()
            .col_expr(
                movie::Column::VoteCount,
                Expr::col(movie::Column::VoteCount).add(1),
            )
            .col_expr(
                movie::Column::Score,
                Expr::col(movie::Column::Score)
                    .add(f64::from(value))
                    .div(2.0_f64),
            )
            .filter(movie::Column::Id.eq(movie_id))
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let movie = Movie::find_by_id(movie_id)
            .one(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .ok_or(AppError::MovieNotFound(movie_id))?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(movie)
    }
}
