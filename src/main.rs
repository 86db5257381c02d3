use actix_cors::Cors;
use actix_web::http::header;
use actix_web::web::{scope, Data};
use actix_web::{App, HttpServer};
use dotenv::dotenv;
use tracing_log::log::info;

use incident_tracker::db::init_db;
use incident_tracker::migration::{Migrator, MigratorTrait};
use incident_tracker::repository::reference::ReferenceIds;
use incident_tracker::telemetry::{get_subscriber, init_subscriber};
use incident_tracker::{api, seed};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber(
        "incident_tracker".into(),
        "info,sqlx=warn".into(),
        std::io::stdout,
    );
    init_subscriber(subscriber);

    dotenv().ok();
    info!("환경 변수 로드 완료");

    let db = init_db().await?;

    info!("데이터베이스 마이그레이션 실행 중...");
    Migrator::up(&db, None).await?;
    info!("마이그레이션 완료");

    seed::seed_reference_data(&db).await?;

    if let (Ok(username), Ok(password)) = (
        std::env::var("ADMIN_USERNAME"),
        std::env::var("ADMIN_PASSWORD"),
    ) {
        seed::seed_admin_user(&db, &username, &password).await?;
    }

    let reference_ids = ReferenceIds::resolve(&db).await?;

    let port: u16 = std::env::var("APP_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(5001);

    let db_data = Data::new(db);
    let refs_data = Data::new(reference_ids);

    info!("서버 시작 중: http://0.0.0.0:{}", port);
    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![header::CONTENT_TYPE])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .app_data(db_data.clone())
            .app_data(refs_data.clone())
            .service(api::index)
            .service(
                scope("/api")
                    .service(api::health_check)
                    .service(api::register)
                    .service(api::login)
                    .service(api::get_user)
                    .service(api::list_users)
                    .service(api::create_incident)
                    .service(api::list_incidents)
                    .service(api::get_incident)
                    .service(api::update_incident)
                    .service(api::delete_incident)
                    .service(api::get_stats)
                    .service(api::list_statuses)
                    .service(api::list_priorities),
            )
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await?;

    Ok(())
}
