mod common;

use actix_web::web::{scope, Data};
use actix_web::{test, App};
use serde_json::{json, Value};

use incident_tracker::api;
use incident_tracker::repository::reference::ReferenceIds;
use sea_orm::DatabaseConnection;

macro_rules! test_app {
    ($db:expr, $refs:expr) => {
        test::init_service(
            App::new()
                .app_data(Data::new($db.clone()))
                .app_data(Data::new($refs))
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
                ),
        )
        .await
    };
}

async fn setup() -> (DatabaseConnection, ReferenceIds) {
    let db = common::setup_db().await;
    let refs = common::resolve_reference_ids(&db).await;
    (db, refs)
}

#[actix_web::test]
async fn health_check_reports_connected_database() {
    let (db, refs) = setup().await;
    let app = test_app!(db, refs);

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
}

#[actix_web::test]
async fn register_login_and_lookup_flow() {
    let (db, refs) = setup().await;
    let app = test_app!(db, refs);

    let req = test::TestRequest::post()
        .uri("/api/register")
        .set_json(json!({"username": "alice", "password": "secret"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    // 동일 사용자명 재등록은 409
    let req = test::TestRequest::post()
        .uri("/api/register")
        .set_json(json!({"username": "alice", "password": "secret"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 409);

    let req = test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({"username": "alice", "password": "wrong"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let req = test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({"username": "alice", "password": "secret"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["user"]["username"], "alice");
    assert_eq!(body["user"]["email"], "alice@example.com");

    let req = test::TestRequest::get().uri("/api/user/alice").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["exists"], true);

    let req = test::TestRequest::get().uri("/api/user/nobody").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn register_rejects_short_credentials() {
    let (db, refs) = setup().await;
    let app = test_app!(db, refs);

    let req = test::TestRequest::post()
        .uri("/api/register")
        .set_json(json!({"username": "ab", "password": "123"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn register_length_rules_count_characters_not_bytes() {
    let (db, refs) = setup().await;
    let app = test_app!(db, refs);

    // 2글자 사용자명은 바이트 수와 무관하게 거부된다
    let req = test::TestRequest::post()
        .uri("/api/register")
        .set_json(json!({"username": "김철", "password": "1234"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let req = test::TestRequest::post()
        .uri("/api/register")
        .set_json(json!({"username": "김철수", "password": "비밀번호"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
}

#[actix_web::test]
async fn duplicate_insert_is_detected_as_unique_violation() {
    use chrono::Utc;
    use incident_tracker::entity::user;
    use incident_tracker::model::global_error::is_unique_violation;
    use sea_orm::{ActiveModelTrait, Set};

    let (db, _refs) = setup().await;

    let make_user = |email: &str| user::ActiveModel {
        username: Set("alice".to_string()),
        email: Set(email.to_string()),
        password_hash: Set("hash".to_string()),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };

    make_user("alice@example.com").insert(&db).await.unwrap();

    let err = make_user("other@example.com").insert(&db).await.unwrap_err();
    assert!(is_unique_violation(&err));
}

#[actix_web::test]
async fn incident_lifecycle_over_http() {
    let (db, refs) = setup().await;
    let app = test_app!(db, refs);

    let req = test::TestRequest::post()
        .uri("/api/incidents")
        .set_json(json!({"title": "Printer down", "ownerUsername": "alice"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let created: Value = test::read_body_json(resp).await;

    assert_eq!(created["status"]["name"], "Open");
    assert_eq!(created["priority"]["name"], "Medium");
    assert_eq!(created["resolvedAt"], Value::Null);
    let id = created["id"].as_i64().unwrap();

    // Resolved 상태 ID는 참조 데이터 엔드포인트에서 읽는다
    let req = test::TestRequest::get().uri("/api/statuses").to_request();
    let statuses: Value = test::call_and_read_body_json(&app, req).await;
    let resolved_id = statuses
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["name"] == "Resolved")
        .and_then(|s| s["id"].as_i64())
        .unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/api/incidents/{}", id))
        .set_json(json!({"statusId": resolved_id}))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["status"]["name"], "Resolved");
    assert!(updated["resolvedAt"].is_string());

    let req = test::TestRequest::get()
        .uri("/api/incidents?ownerUsername=alice")
        .to_request();
    let listing: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listing["count"], 1);
    assert_eq!(listing["incidents"][0]["id"], id);

    let req = test::TestRequest::get().uri("/api/stats").to_request();
    let stats: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(stats["total"], 1);
    assert_eq!(stats["byStatus"]["Resolved"], 1);
    assert_eq!(stats["byPriority"]["Medium"], 1);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/incidents/{}", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 204);

    let req = test::TestRequest::get()
        .uri(&format!("/api/incidents/{}", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn create_incident_rejects_unknown_status_over_http() {
    let (db, refs) = setup().await;
    let app = test_app!(db, refs);

    let req = test::TestRequest::post()
        .uri("/api/incidents")
        .set_json(json!({
            "title": "Broken badge reader",
            "ownerUsername": "carol",
            "statusId": 9999
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "UnknownStatus");
}
