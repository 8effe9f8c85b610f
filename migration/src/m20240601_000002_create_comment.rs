use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Comment::Table)
                    .if_not_exists()
                    .col(pk_auto(Comment::Id))
                    .col(text(Comment::Comment))
                    .col(integer(Comment::MovieId))
                    .col(string(Comment::AddedOn))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comment_movie")
                            .from(Comment::Table, Comment::MovieId)
                            .to(Movie::Table, Movie::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_comment_movie_id")
                    .table(Comment::Table)
                    .col(Comment::MovieId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_comment_added_on")
                    .table(Comment::Table)
                    .col(Comment::AddedOn)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Comment::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Comment {
    Table,
    Id,
    Comment,
    MovieId,
    AddedOn,
}

#[derive(DeriveIden)]
enum Movie {
    Table,
    Id,
}
