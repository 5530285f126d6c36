//! Choice repository.

use std::sync::Arc;

use cinepoll_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};

use crate::entities::{Choice, choice};

/// Choice repository for database operations.
#[derive(Clone)]
pub struct ChoiceRepository {
    db: Arc<DatabaseConnection>,
}

impl ChoiceRepository {
    /// Create a new choice repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a choice by ID.
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<choice::Model>> {
        Choice::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Choices of a movie, ordered by value.
    pub async fn find_by_movie(&self, movie_id: i32) -> AppResult<Vec<choice::Model>> {
        Choice::find()
            .filter(choice::Column::MovieId.eq(movie_id))
            .order_by_asc(choice::Column::Choice)
            .order_by_asc(choice::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a choice only if it belongs to the given movie.
    pub async fn find_for_movie(
        &self,
        movie_id: i32,
        choice_id: i32,
    ) -> AppResult<Option<choice::Model>> {
        Choice::find_by_id(choice_id)
            .filter(choice::Column::MovieId.eq(movie_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new choice.
    pub async fn create(&self, model: choice::ActiveModel) -> AppResult<choice::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Check if a choice exists.
    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        let count = Choice::find_by_id(id)
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(count > 0)
    }

    /// Count choices of a movie.
    pub async fn count_by_movie(&self, movie_id: i32) -> AppResult<u64> {
        Choice::find()
            .filter(choice::Column::MovieId.eq(movie_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
