use std::sync::Arc;

use axum::{
    Form, Json, Router,
    extract::{FromRequest, Path, Query, Request, State},
    http::{StatusCode, header},
    routing::get,
};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::{
    AppState,
    entities::{comment, movie},
    error::{AppError, AppResult},
    ingest,
    models::{
        CommentListQuery, CreateCommentRequest, CreateMovieRequest, DateRange, MovieListQuery,
        MovieOrder, TopMovie, TopQuery,
    },
    ranking,
};


pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/movies", get(list_movies).post(create_movie))
        .route("/movies/{id}", get(get_movie))
        .route("/comments", get(list_comments).post(create_comment))
        .route("/top", get(top))
        .with_state(state)
}

/// POST body accepted as JSON or urlencoded form. Anything else reads as an
/// empty body so the handler's own validation message is returned. Bodies
/// that fail to parse are validation errors.
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        let is_json = content_type.starts_with("application/json");
        let is_form = content_type.starts_with("application/x-www-form-urlencoded");

        if is_json {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|rejection| AppError::validation(rejection.body_text()))?;
            Ok(Self(value))
        } else if is_form {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|rejection| AppError::validation(rejection.body_text()))?;
            Ok(Self(value))
        } else {
            Ok(Self(T::default()))
        }
    }
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn list_movies(
    State(state): State<Arc<AppState>>,
    Query(q): Query<MovieListQuery>,
) -> AppResult<Json<Vec<movie::Model>>> {
    let order = MovieOrder::from_query(q.order_by.as_deref(), q.desc.as_deref());
    Ok(Json(state.store.list_movies(order).await?))
}

pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    Payload(req): Payload<CreateMovieRequest>,
) -> AppResult<(StatusCode, Json<movie::Model>)> {
    let movie = ingest::ingest_movie(&state.store, &state.omdb, req.movie_title.as_deref()).await?;
    Ok((StatusCode::CREATED, Json(movie)))
}

pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Json<movie::Model>> {
    match state.store.find_movie_by_id(id).await? {
        Some(movie) => Ok(Json(movie)),
        None => Err(AppError::not_found(format!("Movie with id {id} doesn't exist in DB"))),
    }
}

pub async fn list_comments(
    State(state): State<Arc<AppState>>,
    Query(q): Query<CommentListQuery>,
) -> AppResult<Json<Vec<comment::Model>>> {
    let movie_id = q.movie_id.as_deref().map(str::trim).filter(|s| !s.is_empty());
    Ok(Json(state.store.list_comments(movie_id).await?))
}

pub async fn create_comment(
    State(state): State<Arc<AppState>>,
    Payload(req): Payload<CreateCommentRequest>,
) -> AppResult<(StatusCode, Json<comment::Model>)> {
    let today = jiff::Zoned::now().date();
    let comment = ingest::ingest_comment(
        &state.store,
        req.movie_id.as_deref(),
        req.comment.as_deref(),
        today,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

pub async fn top(
    State(state): State<Arc<AppState>>,
    Query(q): Query<TopQuery>,
) -> AppResult<Json<Vec<TopMovie>>> {
    let range = DateRange::from_query(q.start_date.as_deref(), q.end_date.as_deref())?;
    Ok(Json(ranking::top_movies(&state.store, range).await?))
}
