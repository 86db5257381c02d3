use actix_web::{get, web, HttpResponse, Responder};
use sea_orm::DatabaseConnection;
use serde_json::json;

#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "message": "IT 인시던트 트래커 API",
        "version": "1.0",
        "endpoints": {
            "register": "POST /api/register",
            "login": "POST /api/login",
            "user": "GET /api/user/{username}",
            "incidents": "GET /api/incidents",
            "stats": "GET /api/stats",
            "health": "GET /api/health"
        }
    }))
}

#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "서버와 데이터베이스가 정상 동작 중"),
        (status = 500, description = "데이터베이스 연결 불가")
    )
)]
#[get("/health")]
pub async fn health_check(db: web::Data<DatabaseConnection>) -> impl Responder {
    match db.ping().await {
        Ok(_) => HttpResponse::Ok().json(json!({
            "status": "healthy",
            "database": "connected"
        })),
        Err(err) => HttpResponse::InternalServerError().json(json!({
            "status": "unhealthy",
            "error": err.to_string()
        })),
    }
}
