use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 외래 키는 SQLite에서도 동작하도록 테이블 생성 시점에 함께 정의한다
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("incidents"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key()
                    )
                    .col(
                        ColumnDef::new(Alias::new("title"))
                            .string_len(200)
                            .not_null()
                    )
                    .col(
                        ColumnDef::new(Alias::new("description"))
                            .text()
                            .null()
                    )
                    .col(
                        ColumnDef::new(Alias::new("owner_username"))
                            .string_len(50)
                            .not_null()
                    )
                    .col(
                        ColumnDef::new(Alias::new("status_id"))
                            .integer()
                            .not_null()
                    )
                    .col(
                        ColumnDef::new(Alias::new("priority_id"))
                            .integer()
                            .not_null()
                    )
                    .col(
                        ColumnDef::new(Alias::new("created_at"))
                            .timestamp_with_time_zone()
                            .not_null()
                    )
                    .col(
                        ColumnDef::new(Alias::new("updated_at"))
                            .timestamp_with_time_zone()
                            .not_null()
                    )
                    .col(
                        ColumnDef::new(Alias::new("resolved_at"))
                            .timestamp_with_time_zone()
                            .null()
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_incident_status")
                            .from(Alias::new("incidents"), Alias::new("status_id"))
                            .to(Alias::new("statuses"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Restrict)
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_incident_priority")
                            .from(Alias::new("incidents"), Alias::new("priority_id"))
                            .to(Alias::new("priorities"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Restrict)
                    )
                    .to_owned()
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(Alias::new("incidents"))
                    .to_owned()
            )
            .await
    }
}
