use std::{num::NonZeroU32, str::FromStr, sync::Arc};

use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use jiff::civil::Date;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{error::AppResult, models::NewMovie};

const NOT_AVAILABLE: &str = "N/A";
const DATE_FORMAT: &str = "%d %b %Y";

pub struct OmdbClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl OmdbClient {
    pub fn new(client: reqwest::Client, api_key: String, base_url: String, rps: u32) -> Self {
        if api_key.trim().is_empty() {
            warn!("no OMDB_API_KEY provided, provider lookups will likely be rejected");
        }

        let quota = Quota::per_second(NonZeroU32::new(rps).unwrap_or(NonZeroU32::MIN));
        let limiter = Arc::new(RateLimiter::direct(quota));
        Self { client, api_key, base_url, limiter }
    }

    /// Exact-title lookup. `Ok(None)` when the provider reports no match.
    pub async fn find_by_title(&self, title: &str) -> AppResult<Option<OmdbMovie>> {
        self.limiter.until_ready().await;

        let url = format!("{}/", self.base_url.trim_end_matches('/'));
        let movie: OmdbMovie = self
            .client
            .get(url)
            .query(&[("apikey", self.api_key.as_str()), ("t", title)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if !movie.is_found() {
            debug!(title = %title, error = ?movie.error, "provider reported no match");
            return Ok(None);
        }
        Ok(Some(movie))
    }
}

/// Flat provider payload. `Year` and `Ratings` are intentionally not read.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct OmdbMovie {
    pub title: String,
    pub rated: String,
    pub released: String,
    pub runtime: String,
    pub genre: String,
    pub director: String,
    pub writer: String,
    pub actors: String,
    pub plot: String,
    pub language: String,
    pub country: String,
    pub awards: String,
    pub poster: String,
    pub metascore: String,
    #[serde(rename = "imdbRating")]
    pub imdb_rating: String,
    #[serde(rename = "imdbVotes")]
    pub imdb_votes: String,
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(rename = "DVD")]
    pub dvd: String,
    pub box_office: String,
    pub production: String,
    pub website: String,
    pub response: String,
    pub error: Option<String>,
}

impl OmdbMovie {
    pub fn is_found(&self) -> bool {
        !self.response.eq_ignore_ascii_case("false")
    }

    pub fn into_new_movie(self) -> AppResult<NewMovie> {
        let imdbid = self.imdb_id.trim().to_string();
        if imdbid.is_empty() {
            return Err(anyhow::anyhow!("provider match for {:?} has no imdbID", self.title).into());
        }

        Ok(NewMovie {
            released: parse_date("Released", &self.released),
            dvd: parse_date("DVD", &self.dvd),
            metascore: parse_number("Metascore", &self.metascore),
            imdbvotes: parse_number("imdbVotes", &self.imdb_votes),
            boxoffice: parse_number("BoxOffice", &self.box_office),
            imdbrating: parse_rating(&self.imdb_rating),
            imdbid,
            title: self.title,
            rated: self.rated,
            runtime: self.runtime,
            genre: self.genre,
            director: self.director,
            writer: self.writer,
            actors: self.actors,
            plot: self.plot,
            language: self.language,
            country: self.country,
            awards: self.awards,
            poster: self.poster,
            kind: self.kind,
            production: self.production,
            website: self.website,
        })
    }
}

fn is_not_available(raw: &str) -> bool {
    raw.is_empty() || raw == NOT_AVAILABLE
}

fn parse_date(field: &str, raw: &str) -> Option<Date> {
    let raw = raw.trim();
    if is_not_available(raw) {
        return None;
    }
    match Date::strptime(DATE_FORMAT, raw) {
        Ok(date) => Some(date),
        Err(err) => {
            warn!(field, value = raw, error = %err, "unparseable provider date, storing none");
            None
        },
    }
}

/// Strips thousands separators and currency symbols, e.g. `"$1,234"` -> `1234`.
fn parse_number<T: FromStr + Default>(field: &str, raw: &str) -> T {
    let raw = raw.trim();
    if is_not_available(raw) {
        return T::default();
    }
    let digits: String =
        raw.chars().filter(|c| !matches!(c, ',' | '$' | '€' | '£' | '¥')).collect();
    digits.trim().parse().unwrap_or_else(|_| {
        warn!(field, value = raw, "unparseable provider number, storing zero");
        T::default()
    })
}

fn parse_rating(raw: &str) -> f64 {
    parse_number("imdbRating", raw)
}
