use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// A movie as mapped from the provider, before the store assigns an ID.
#[derive(Clone, Debug, PartialEq)]
pub struct NewMovie {
    pub imdbid: String,
    pub title: String,
    pub rated: String,
    pub released: Option<Date>,
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
    pub metascore: i32,
    pub imdbrating: f64,
    pub imdbvotes: i64,
    pub kind: String,
    pub dvd: Option<Date>,
    pub boxoffice: i64,
    pub production: String,
    pub website: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SortKey {
    Id,
    Rating,
    Title,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MovieOrder {
    /// Store-default (insertion) order.
    Default,
    By { key: SortKey, descending: bool },
}

impl MovieOrder {
    pub fn from_query(order_by: Option<&str>, desc: Option<&str>) -> Self {
        let order_by = order_by.map(str::trim).unwrap_or_default();
        if order_by.is_empty() {
            return MovieOrder::Default;
        }
        let key = match order_by {
            "rating" => SortKey::Rating,
            "title" => SortKey::Title,
            _ => SortKey::Id,
        };
        MovieOrder::By { key, descending: desc == Some("true") }
    }
}

/// Inclusive range of `added_on` dates.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DateRange {
    pub start: Date,
    pub end: Date,
}

impl DateRange {
    /// Both bounds must be present for the range to apply.
    pub fn from_query(start: Option<&str>, end: Option<&str>) -> AppResult<Option<Self>> {
        let start = start.map(str::trim).filter(|s| !s.is_empty());
        let end = end.map(str::trim).filter(|s| !s.is_empty());
        let (Some(start), Some(end)) = (start, end) else {
            return Ok(None);
        };

        let parse = |s: &str| {
            s.parse::<Date>().map_err(|_| {
                AppError::validation("start_date and end_date must be dates in YYYY-MM-DD format")
            })
        };
        Ok(Some(Self { start: parse(start)?, end: parse(end)? }))
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TopMovie {
    pub id: i32,
    pub total_comments: i64,
    pub rank: u32,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateMovieRequest {
    #[serde(default)]
    pub movie_title: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateCommentRequest {
    #[serde(default)]
    pub movie_id: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MovieListQuery {
    pub order_by: Option<String>,
    pub desc: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CommentListQuery {
    pub movie_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TopQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}
