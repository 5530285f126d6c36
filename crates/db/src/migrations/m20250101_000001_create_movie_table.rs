//! Create movie and choice tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create movie table
        manager
            .create_table(
                Table::create()
                    .table(Movie::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Movie::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Movie::Title).string_len(200).not_null())
                    .col(
                        ColumnDef::new(Movie::ReleaseDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Movie::Image).string_len(400).not_null())
                    .col(ColumnDef::new(Movie::Score).double().not_null())
                    .col(
                        ColumnDef::new(Movie::VoteCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Movie::Overview).text().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movie_release_date")
                    .table(Movie::Table)
                    .col(Movie::ReleaseDate)
                    .to_owned(),
            )
            .await?;

        // Create choice table
        manager
            .create_table(
                Table::create()
                    .table(Choice::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Choice::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Choice::MovieId).integer().not_null())
                    .col(ColumnDef::new(Choice::Choice).integer().not_null())
                    .col(
                        ColumnDef::new(Choice::Votes)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_choice_movie")
                            .from(Choice::Table, Choice::MovieId)
                            .to(Movie::Table, Movie::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_choice_movie_id")
                    .table(Choice::Table)
                    .col(Choice::MovieId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Choice::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Movie::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Movie {
    Table,
    Id,
    Title,
    ReleaseDate,
    Image,
    Score,
    VoteCount,
    Overview,
}

#[derive(Iden)]
enum Choice {
    Table,
    Id,
    MovieId,
    Choice,
    Votes,
}
