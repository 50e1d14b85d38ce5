use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // One review per (title, author).
        manager
            .create_index(
                Index::create()
                    .table(Reviews::Table)
                    .col(Reviews::TitleId)
                    .col(Reviews::AuthorId)
                    .unique()
                    .name("uq_reviews_title_id_author_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(GenreTitles::Table)
                    .col(GenreTitles::TitleId)
                    .col(GenreTitles::GenreId)
                    .unique()
                    .name("uq_genre_titles_title_id_genre_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Reviews::Table)
                    .col(Reviews::PubDate)
                    .name("idx_reviews_pub_date")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Comments::Table)
                    .col(Comments::ReviewId)
                    .name("idx_comments_review_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Titles::Table)
                    .col(Titles::CategoryId)
                    .name("idx_titles_category_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_titles_category_id",
            "idx_comments_review_id",
            "idx_reviews_pub_date",
            "uq_genre_titles_title_id_genre_id",
            "uq_reviews_title_id_author_id",
        ] {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(Iden)]
enum Reviews {
    Table,
    TitleId,
    AuthorId,
    PubDate,
}

#[derive(Iden)]
enum GenreTitles {
    Table,
    TitleId,
    GenreId,
}

#[derive(Iden)]
enum Comments {
    Table,
    ReviewId,
}

#[derive(Iden)]
enum Titles {
    Table,
    CategoryId,
}
