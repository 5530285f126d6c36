//! Movie entity.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "movie")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,

    /// Release date; movies dated in the future are hidden from listings.
    #[sea_orm(indexed)]
    pub release_date: DateTimeWithTimeZone,

    /// Poster URL
    pub image: String,

    /// Running score, re-averaged on every vote
    pub score: f64,

    pub vote_count: i32,

    #[sea_orm(column_type = "Text")]
    pub overview: String,
}

impl Model {
    /// Whether the movie was released within the day before `now`.
    #[must_use]
    pub fn was_published_recently_at(&self, now: DateTime<Utc>) -> bool {
        let released = self.release_date.with_timezone(&Utc);
        now - Duration::days(1) <= released && released <= now
    }

    /// Whether the movie was released within the last day.
    #[must_use]
    pub fn was_published_recently(&self) -> bool {
        self.was_published_recently_at(Utc::now())
    }

    /// Whether the release date is not after `now`.
    #[must_use]
    pub fn is_released_at(&self, now: DateTime<Utc>) -> bool {
        self.release_date.with_timezone(&Utc) <= now
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::choice::Entity")]
    Choice,
}

impl Related<super::choice::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Choice.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie_released(release_date: DateTime<Utc>) -> Model {
        Model {
            id: 1,
            title: "Movie Title".to_string(),
            release_date: release_date.fixed_offset(),
            image: "http://example.com/image.png".to_string(),
            score: 7.5,
            vote_count: 1000,
            overview: "Movie overview".to_string(),
        }
    }

    #[test]
    fn test_recent_with_future_movie() {
        let now = Utc::now();
        let movie = movie_released(now + Duration::days(30));
        assert!(!movie.was_published_recently_at(now));
    }

    #[test]
    fn test_recent_with_old_movie() {
        let now = Utc::now();
        let movie = movie_released(now - Duration::days(1) - Duration::seconds(1));
        assert!(!movie.was_published_recently_at(now));
    }

    #[test]
    fn test_recent_with_recent_movie() {
        let now = Utc::now();
        let released = now - Duration::hours(23) - Duration::minutes(59) - Duration::seconds(59);
        let movie = movie_released(released);
        assert!(movie.was_published_recently_at(now));
    }

    #[test]
    fn test_recent_window_bounds_are_inclusive() {
        let now = Utc::now();
        assert!(movie_released(now).was_published_recently_at(now));
        assert!(movie_released(now - Duration::days(1)).was_published_recently_at(now));
    }

    #[test]
    fn test_recent_uses_wall_clock() {
        let movie = movie_released(Utc::now() - Duration::hours(1));
        assert!(movie.was_published_recently());
    }

    #[test]
    fn test_is_released_at() {
        let now = Utc::now();
        assert!(movie_released(now - Duration::days(30)).is_released_at(now));
        assert!(movie_released(now).is_released_at(now));
        assert!(!movie_released(now + Duration::seconds(1)).is_released_at(now));
    }

    #[test]
    fn test_display_is_title() {
        let movie = movie_released(Utc::now());
        assert_eq!(movie.to_string(), "Movie Title");
    }
}
