use jiff::civil::Date;
use tracing::debug;

use crate::{
    entities::{comment, movie},
    error::{AppError, AppResult},
    omdb::OmdbClient,
    store::Store,
};

/// Blank input counts as missing; anything else is kept exactly as sent.
fn non_empty(input: Option<&str>) -> Option<&str> {
    input.filter(|s| !s.trim().is_empty())
}

/// Looks `title` up at the provider and stores the mapped record.
pub async fn ingest_movie(
    store: &Store,
    omdb: &OmdbClient,
    title: Option<&str>,
) -> AppResult<movie::Model> {
    let Some(title) = non_empty(title) else {
        return Err(AppError::validation("Please provide a movie title"));
    };

    debug!(title = %title, "fetching movie from provider");
    let Some(found) = omdb.find_by_title(title.trim()).await? else {
        return Err(AppError::not_found(format!("There is no movie like {title}")));
    };

    let new = found.into_new_movie()?;
    let already_exists = || AppError::conflict(format!("{title} already exists in DB"));

    if store.find_movie_by_imdb_id(&new.imdbid).await?.is_some() {
        debug!(title = %title, imdb_id = %new.imdbid, "movie already stored");
        return Err(already_exists());
    }

    let imdb_id = new.imdbid.clone();
    let Some(movie) = store.insert_movie(new).await? else {
        debug!(title = %title, imdb_id = %imdb_id, "lost insert race on imdbid");
        return Err(already_exists());
    };

    debug!(id = movie.id, imdb_id = %movie.imdbid, "stored movie");
    Ok(movie)
}

/// Attaches a comment dated `today` to the movie with external ID `movie_id`.
pub async fn ingest_comment(
    store: &Store,
    movie_id: Option<&str>,
    text: Option<&str>,
    today: Date,
) -> AppResult<comment::Model> {
    let (Some(movie_id), Some(text)) = (non_empty(movie_id), non_empty(text)) else {
        return Err(AppError::validation("Please provide movie ID and comment"));
    };

    let Some(movie) = store.find_movie_by_imdb_id(movie_id.trim()).await? else {
        return Err(AppError::not_found(format!(
            "Movie with movie id {movie_id}, doesn't exist in DB. Make sure to enter imdb id"
        )));
    };

    let comment = store.insert_comment(movie.id, text, today).await?;
    debug!(id = comment.id, movie = movie.id, "stored comment");
    Ok(comment)
}
