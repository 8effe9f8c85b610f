use jiff::civil::Date;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, QuerySelect, Set, SqlErr, sea_query::Expr,
};

use crate::{
    entities::{comment, movie},
    error::AppResult,
    models::{DateRange, MovieOrder, NewMovie, SortKey},
};

/// Movie and comment persistence over a single sea-orm connection pool.
#[derive(Clone)]
pub struct Store {
    db: DatabaseConnection,
}

impl Store {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns `None` when the unique `imdbid` index rejects the row.
    pub async fn insert_movie(&self, new: NewMovie) -> AppResult<Option<movie::Model>> {
        let model = movie::ActiveModel {
            id: NotSet,
            title: Set(new.title),
            rated: Set(new.rated),
            released: Set(new.released.map(|d| d.to_string())),
            runtime: Set(new.runtime),
            genre: Set(new.genre),
            director: Set(new.director),
            writer: Set(new.writer),
            actors: Set(new.actors),
            plot: Set(new.plot),
            language: Set(new.language),
            country: Set(new.country),
            awards: Set(new.awards),
            poster: Set(new.poster),
            metascore: Set(new.metascore),
            imdbrating: Set(new.imdbrating),
            imdbvotes: Set(new.imdbvotes),
            imdbid: Set(new.imdbid),
            kind: Set(new.kind),
            dvd: Set(new.dvd.map(|d| d.to_string())),
            boxoffice: Set(new.boxoffice),
            production: Set(new.production),
            website: Set(new.website),
        };

        match model.insert(&self.db).await {
            Ok(movie) => Ok(Some(movie)),
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Ok(None)
            },
            Err(err) => Err(err.into()),
        }
    }

    pub async fn find_movie_by_imdb_id(&self, imdbid: &str) -> AppResult<Option<movie::Model>> {
        let movie = movie::Entity::find()
            .filter(movie::Column::Imdbid.eq(imdbid))
            .one(&self.db)
            .await?;
        Ok(movie)
    }

    pub async fn find_movie_by_id(&self, id: i32) -> AppResult<Option<movie::Model>> {
        Ok(movie::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Ties on the sort key fall back to ascending ID.
    pub async fn list_movies(&self, order: MovieOrder) -> AppResult<Vec<movie::Model>> {
        let query = match order {
            MovieOrder::Default => movie::Entity::find(),
            MovieOrder::By { key, descending } => {
                let column = match key {
                    SortKey::Id => movie::Column::Id,
                    SortKey::Rating => movie::Column::Imdbrating,
                    SortKey::Title => movie::Column::Title,
                };
                if descending {
                    movie::Entity::find().order_by_desc(column)
                } else {
                    movie::Entity::find().order_by_asc(column)
                }
            },
        };

        Ok(query.order_by_asc(movie::Column::Id).all(&self.db).await?)
    }

    pub async fn insert_comment(
        &self,
        movie_id: i32,
        text: &str,
        added_on: Date,
    ) -> AppResult<comment::Model> {
        let model = comment::ActiveModel {
            id: NotSet,
            comment: Set(text.to_string()),
            movie_id: Set(movie_id),
            added_on: Set(added_on.to_string()),
        };
        Ok(model.insert(&self.db).await?)
    }

    /// Comments for the movie with the given external ID, or all comments.
    pub async fn list_comments(&self, imdbid: Option<&str>) -> AppResult<Vec<comment::Model>> {
        let mut query = comment::Entity::find();
        if let Some(imdbid) = imdbid {
            query = query.inner_join(movie::Entity).filter(movie::Column::Imdbid.eq(imdbid));
        }
        Ok(query.order_by_asc(comment::Column::Id).all(&self.db).await?)
    }

    /// `(movie_id, comment count)` for every movie with at least one comment
    /// in range. `added_on` is ISO text so lexical and date order agree.
    pub async fn comment_counts(&self, range: Option<DateRange>) -> AppResult<Vec<(i32, i64)>> {
        let mut query = comment::Entity::find()
            .select_only()
            .column(comment::Column::MovieId)
            .column_as(Expr::col(comment::Column::Id).count(), "total_comments")
            .group_by(comment::Column::MovieId);

        if let Some(range) = range {
            query = query.filter(
                comment::Column::AddedOn.between(range.start.to_string(), range.end.to_string()),
            );
        }

        Ok(query.into_tuple::<(i32, i64)>().all(&self.db).await?)
    }
}
