use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("priorities"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key()
                    )
                    .col(
                        ColumnDef::new(Alias::new("name"))
                            .string_len(50)
                            .not_null()
                            .unique_key()
                    )
                    .col(
                        ColumnDef::new(Alias::new("level"))
                            .integer()
                            .not_null()
                    )
                    .col(
                        ColumnDef::new(Alias::new("color"))
                            .string_len(20)
                            .not_null()
                    )
                    .to_owned()
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(Alias::new("priorities"))
                    .to_owned()
            )
            .await
    }
}
