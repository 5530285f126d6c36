//! Admin JSON endpoints.

#![allow(missing_docs)]

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    routing::post,
};
use cinepoll_common::AppResult;
use cinepoll_core::{CreateMovieInput, MovieWithChoices};
use cinepoll_db::entities::{choice, movie};
use serde::{Deserialize, Serialize};

use crate::{response::ApiResponse, state::AppState, views::parse_id};

/// Movie response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieResponse {
    pub id: i32,
    pub title: String,
    pub release_date: String,
    pub image: String,
    pub score: f64,
    pub vote_count: i32,
    pub overview: String,
    pub choices: Vec<ChoiceResponse>,
}

/// Choice response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceResponse {
    pub id: i32,
    pub movie_id: i32,
    pub choice: i32,
    pub votes: i32,
}

impl From<choice::Model> for ChoiceResponse {
    fn from(c: choice::Model) -> Self {
        Self {
            id: c.id,
            movie_id: c.movie_id,
            choice: c.choice,
            votes: c.votes,
        }
    }
}

impl MovieResponse {
    fn new(movie: movie::Model, choices: Vec<choice::Model>) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            release_date: movie.release_date.to_rfc3339(),
            image: movie.image,
            score: movie.score,
            vote_count: movie.vote_count,
            overview: movie.overview,
            choices: choices.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<MovieWithChoices> for MovieResponse {
    fn from(m: MovieWithChoices) -> Self {
        Self::new(m.movie, m.choices)
    }
}

/// Add choice request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddChoiceRequest {
    pub choice: i32,
}

/// Create a movie with optional initial choices.
///
/// Malformed bodies are reported in the usual error envelope.
async fn create_movie(
    State(state): State<AppState>,
    payload: Result<Json<CreateMovieInput>, JsonRejection>,
) -> AppResult<ApiResponse<MovieResponse>> {
    let Json(req) = payload?;
    let created = state.movie_service.create(req).await?;
    Ok(ApiResponse::created(created.into()))
}

/// Add a choice to a movie.
async fn add_choice(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<AddChoiceRequest>, JsonRejection>,
) -> AppResult<ApiResponse<ChoiceResponse>> {
    let movie_id = parse_id(&id)?;
    let Json(req) = payload?;
    let choice = state.movie_service.add_choice(movie_id, req.choice).await?;
    Ok(ApiResponse::created(choice.into()))
}

/// Admin routes, nested under `/admin`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/movies", post(create_movie))
        .route("/movies/{id}/choices", post(add_choice))
}
