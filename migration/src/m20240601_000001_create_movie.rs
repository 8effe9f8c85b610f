use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Movie::Table)
                    .if_not_exists()
                    .col(pk_auto(Movie::Id))
                    .col(string(Movie::Imdbid))
                    .col(string(Movie::Title))
                    .col(string(Movie::Rated))
                    .col(string_null(Movie::Released))
                    .col(string(Movie::Runtime))
                    .col(string(Movie::Genre))
                    .col(string(Movie::Director))
                    .col(text(Movie::Writer))
                    .col(text(Movie::Actors))
                    .col(text(Movie::Plot))
                    .col(string(Movie::Language))
                    .col(string(Movie::Country))
                    .col(string(Movie::Awards))
                    .col(text(Movie::Poster))
                    .col(integer(Movie::Metascore))
                    .col(double(Movie::Imdbrating))
                    .col(big_integer(Movie::Imdbvotes))
                    .col(string(Movie::Type))
                    .col(string_null(Movie::Dvd))
                    .col(big_integer(Movie::Boxoffice))
                    .col(string(Movie::Production))
                    .col(string(Movie::Website))
                    .to_owned(),
            )
            .await?;

        // Authoritative guard against concurrent ingestion of the same imdbID.
        manager
            .create_index(
                Index::create()
                    .name("idx_movie_imdbid_unique")
                    .table(Movie::Table)
                    .col(Movie::Imdbid)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Movie::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Movie {
    Table,
    Id,
    Imdbid,
    Title,
    Rated,
    Released,
    Runtime,
    Genre,
    Director,
    Writer,
    Actors,
    Plot,
    Language,
    Country,
    Awards,
    Poster,
    Metascore,
    Imdbrating,
    Imdbvotes,
    Type,
    Dvd,
    Boxoffice,
    Production,
    Website,
}
