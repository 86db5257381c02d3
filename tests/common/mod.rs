use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use incident_tracker::migration::{Migrator, MigratorTrait};
use incident_tracker::repository::reference::ReferenceIds;
use incident_tracker::seed;

/// 마이그레이션과 참조 데이터 시드까지 끝난 인메모리 SQLite 연결.
/// 커넥션이 끊기면 DB가 사라지므로 풀 크기는 1로 고정한다.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options.max_connections(1).sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("failed to open in-memory sqlite");

    Migrator::up(&db, None).await.expect("migration failed");
    seed::seed_reference_data(&db).await.expect("seeding failed");

    db
}

pub async fn resolve_reference_ids(db: &DatabaseConnection) -> ReferenceIds {
    ReferenceIds::resolve(db)
        .await
        .expect("reference data not seeded")
}
