pub use sea_orm_migration::prelude::*;

mod m20250812_000001_create_user_table;
mod m20250812_000002_create_status_table;
mod m20250812_000003_create_priority_table;
mod m20250812_000004_create_incident_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250812_000001_create_user_table::Migration),
            Box::new(m20250812_000002_create_status_table::Migration),
            Box::new(m20250812_000003_create_priority_table::Migration),
            Box::new(m20250812_000004_create_incident_table::Migration),
        ]
    }
}
