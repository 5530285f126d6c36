//! Browser-facing pages.
//!
//! Every movie lookup goes through the string path parameter so that a
//! non-numeric id is a plain 404 rather than a rejection.

#![allow(missing_docs)]

use axum::{
    Form, Router,
    extract::{Path, State, rejection::FormRejection},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use chrono::Utc;
use cinepoll_common::{AppError, AppResult};
use cinepoll_core::{MovieWithChoices, VoteOutcome};
use cinepoll_db::entities::movie;
use serde::{Deserialize, Serialize};
use tera::Context;
use tracing::debug;

use crate::{state::AppState, templates::HtmlError};

type PageResult = Result<Response, HtmlError>;

/// Movie fields as the templates see them.
#[derive(Debug, Serialize)]
pub struct MovieView {
    pub id: i32,
    pub title: String,
    pub release_date: String,
    pub image: String,
    pub score: String,
    pub vote_count: i32,
    pub overview: String,
    /// Released within the last day.
    pub recent: bool,
}

impl MovieView {
    fn new(movie: &movie::Model, now: chrono::DateTime<Utc>) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            release_date: movie.release_date.format("%B %-d, %Y").to_string(),
            image: movie.image.clone(),
            score: format!("{:.1}", movie.score),
            vote_count: movie.vote_count,
            overview: movie.overview.clone(),
            recent: movie.was_published_recently_at(now),
        }
    }
}

/// Submitted vote form.
#[derive(Debug, Deserialize)]
pub struct VoteForm {
    pub choice: Option<String>,
}

/// Parse a movie id from the path; anything that is not an id is missing.
pub(crate) fn parse_id(raw: &str) -> AppResult<i32> {
    raw.parse()
        .map_err(|_| AppError::NotFound(format!("Movie not found: {raw}")))
}

fn movie_context(movie: &MovieWithChoices, error_message: Option<&str>) -> Context {
    let mut context = Context::new();
    context.insert("movie", &MovieView::new(&movie.movie, Utc::now()));
    context.insert("choices", &movie.choices);
    context.insert("error_message", &error_message);
    context
}

async fn root() -> Redirect {
    Redirect::to("/movies")
}

/// Released movies, newest first.
async fn index(State(state): State<AppState>) -> PageResult {
    let now = Utc::now();
    let movies: Vec<MovieView> = state
        .movie_service
        .list_released()
        .await?
        .iter()
        .map(|m| MovieView::new(m, now))
        .collect();

    let mut context = Context::new();
    context.insert("latest_movie_list", &movies);
    Ok(state.templates.render("index.html", &context)?.into_response())
}

/// Detail page with the voting form.
async fn detail(State(state): State<AppState>, Path(id): Path<String>) -> PageResult {
    let movie = state.movie_service.get_released(parse_id(&id)?).await?;
    let context = movie_context(&movie, None);
    Ok(state.templates.render("detail.html", &context)?.into_response())
}

/// Per-choice tallies.
async fn results(State(state): State<AppState>, Path(id): Path<String>) -> PageResult {
    let movie = state.movie_service.get_released(parse_id(&id)?).await?;
    let context = movie_context(&movie, None);
    Ok(state.templates.render("results.html", &context)?.into_response())
}

/// Record a vote, or show the form again with an error.
///
/// A body that does not decode as a vote form counts as no selection. Votes
/// on a movie that is not yet released are counted, but since its results
/// page is hidden they return to the listing instead.
async fn vote(
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: Result<Form<VoteForm>, FormRejection>,
) -> PageResult {
    let movie_id = parse_id(&id)?;

    let selection = match form {
        Ok(Form(form)) => form.choice,
        Err(rejection) => {
            debug!(movie_id, %rejection, "Unreadable vote form");
            None
        }
    };

    match state
        .vote_service
        .vote(movie_id, selection.as_deref())
        .await?
    {
        VoteOutcome::Recorded(movie) if movie.is_released_at(Utc::now()) => {
            debug!(movie_id = movie.id, "Redirecting to results");
            Ok(Redirect::to(&format!("/movies/{}/results", movie.id)).into_response())
        }
        VoteOutcome::Recorded(movie) => {
            debug!(movie_id = movie.id, "Vote on unreleased movie, redirecting to listing");
            Ok(Redirect::to("/movies").into_response())
        }
        VoteOutcome::Rejected { movie, message } => {
            let context = movie_context(&movie, Some(message));
            Ok(state.templates.render("detail.html", &context)?.into_response())
        }
    }
}

/// Delete a movie and return to the listing.
async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> PageResult {
    state.movie_service.delete(parse_id(&id)?).await?;
    Ok(Redirect::to("/movies").into_response())
}

/// Page routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/movies", get(index))
        .route("/movies/{id}", get(detail))
        .route("/movies/{id}/results", get(results))
        .route("/movies/{id}/vote", post(vote))
        .route("/movies/{id}/delete", post(delete))
}
