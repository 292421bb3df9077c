use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Snippet::Table)
                    .if_not_exists()
                    .col(pk_auto(Snippet::Id))
                    .col(string_len(Snippet::Title, 100))
                    .col(text(Snippet::Content))
                    .col(timestamp(Snippet::Created))
                    .col(timestamp(Snippet::Expires))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_snippets_created")
                    .table(Snippet::Table)
                    .col(Snippet::Created)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Snippet::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Snippet {
    #[sea_orm(iden = "snippets")]
    Table,
    Id,
    Title,
    Content,
    Created,
    Expires,
}
