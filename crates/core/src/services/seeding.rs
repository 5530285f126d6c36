//! Seeding the movie table from TMDB's discover endpoint.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use cinepoll_common::{AppError, AppResult, config::SeedConfig};
use serde::Deserialize;
use tracing::{info, warn};

use super::movie::{CreateMovieInput, MovieService};

/// One page of `discover/movie` results.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscoverPage {
    pub page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub results: Vec<TmdbMovie>,
}

/// A movie as returned by TMDB. Only the fields we store are decoded.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    pub title: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: i32,
    #[serde(default)]
    pub overview: Option<String>,
}

/// Release date used when TMDB has none or sends garbage.
fn fallback_release_date() -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(1900, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or_default()
}

impl TmdbMovie {
    /// Release date at midnight UTC, falling back to 1900-01-01.
    #[must_use]
    pub fn release_date_utc(&self) -> DateTime<Utc> {
        self.release_date
            .as_deref()
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map_or_else(fallback_release_date, |dt| dt.and_utc())
    }

    /// Poster URL under `image_base_url`, or a single space without a poster.
    #[must_use]
    pub fn image_url(&self, image_base_url: &str) -> String {
        self.poster_path
            .as_deref()
            .map_or_else(|| " ".to_string(), |path| format!("{image_base_url}{path}"))
    }

    /// Convert into a creation input carrying `choices`.
    #[must_use]
    pub fn into_input(self, image_base_url: &str, choices: &[i32]) -> CreateMovieInput {
        CreateMovieInput {
            release_date: self.release_date_utc(),
            image: self.image_url(image_base_url),
            title: self.title,
            score: self.vote_average,
            vote_count: self.vote_count.max(0),
            overview: self.overview.unwrap_or_default(),
            choices: choices.to_vec(),
        }
    }
}

/// A source of discover pages.
#[async_trait]
pub trait MovieSource: Send + Sync {
    /// Fetch one page (1-based).
    async fn fetch_page(&self, page: u32) -> AppResult<DiscoverPage>;
}

/// HTTP client for the TMDB API.
#[derive(Clone)]
pub struct TmdbClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    /// Create a client from the seed configuration.
    pub fn from_config(config: &SeedConfig) -> AppResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| AppError::Config("seed.api_key is not configured".to_string()))?;

        let http_client = reqwest::Client::builder()
            .user_agent(format!("cinepoll/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::ExternalService(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }
}

#[async_trait]
impl MovieSource for TmdbClient {
    async fn fetch_page(&self, page: u32) -> AppResult<DiscoverPage> {
        let response = self
            .http_client
            .get(format!("{}/discover/movie", self.base_url))
            .query(&[
                ("sort_by", "popularity.desc"),
                ("api_key", self.api_key.as_str()),
                ("page", page.to_string().as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("TMDB request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalService(format!(
                "TMDB returned {} for page {page}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::ExternalService(format!("Failed to parse TMDB response: {e}")))
    }
}

/// Summary of a seeding run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub pages: u32,
    pub created: usize,
    pub skipped: usize,
}

/// Populates the database from a [`MovieSource`].
#[derive(Clone)]
pub struct SeedingService {
    source: Arc<dyn MovieSource>,
    movie_service: MovieService,
    image_base_url: String,
    choices: Vec<i32>,
}

impl SeedingService {
    /// Create a new seeding service.
    #[must_use]
    pub fn new(
        source: Arc<dyn MovieSource>,
        movie_service: MovieService,
        config: &SeedConfig,
    ) -> Self {
        Self {
            source,
            movie_service,
            image_base_url: config.image_base_url.clone(),
            choices: config.choices.clone(),
        }
    }

    /// Fetch pages `1..=pages` and store every valid movie.
    ///
    /// Stops early once the source reports no further pages. Movies failing
    /// validation are skipped.
    pub async fn seed(&self, pages: u32) -> AppResult<SeedReport> {
        let mut report = SeedReport::default();

        for page_number in 1..=pages {
            let page = self.source.fetch_page(page_number).await?;
            report.pages += 1;
            info!(page = page.page, results = page.results.len(), "Fetched discover page");

            for tmdb_movie in page.results {
                let title = tmdb_movie.title.clone();
                let input = tmdb_movie.into_input(&self.image_base_url, &self.choices);

                match self.movie_service.create(input).await {
                    Ok(_) => report.created += 1,
                    Err(AppError::Validation(reason)) => {
                        warn!(%title, %reason, "Skipping invalid movie");
                        report.skipped += 1;
                    }
                    Err(e) => return Err(e),
                }
            }

            if page.total_pages != 0 && page_number >= page.total_pages {
                break;
            }
        }

        info!(
            pages = report.pages,
            created = report.created,
            skipped = report.skipped,
            "Seeding finished"
        );

        Ok(report)
    }
}
