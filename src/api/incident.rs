use actix_web::{delete, get, post, put, web, HttpResponse};
use sea_orm::DatabaseConnection;

use crate::model::incident::{
    IncidentCreateRequest, IncidentListQuery, IncidentListResponse, IncidentResponse,
    IncidentUpdateRequest, PriorityResponse, StatsResponse, StatusResponse,
};
use crate::model::global_error::AppError;
use crate::repository::incident::{IncidentFilter, IncidentPatch, IncidentRepository, NewIncident};
use crate::repository::reference::{self, ReferenceIds};

#[utoipa::path(
    post,
    path = "/api/incidents",
    summary = "인시던트 생성",
    request_body = IncidentCreateRequest,
    responses(
        (status = 201, description = "인시던트 생성 성공", body = IncidentResponse),
        (status = 400, description = "필수 필드 누락 또는 유효하지 않은 참조 ID"),
    ),
)]
#[post("/incidents")]
pub async fn create_incident(
    body: web::Json<IncidentCreateRequest>,
    db: web::Data<DatabaseConnection>,
    refs: web::Data<ReferenceIds>,
) -> Result<HttpResponse, AppError> {
    let repo = IncidentRepository::new(db.get_ref(), **refs);
    let body = body.into_inner();

    let created = repo
        .create(NewIncident {
            title: body.title,
            description: body.description,
            owner_username: body.owner_username,
            status_id: body.status_id,
            priority_id: body.priority_id,
        })
        .await?;

    Ok(HttpResponse::Created().json(IncidentResponse::from(created)))
}

#[utoipa::path(
    get,
    path = "/api/incidents",
    summary = "인시던트 목록 조회 (최신순, 필터 조합 가능)",
    responses(
        (status = 200, description = "목록 조회 성공", body = IncidentListResponse),
    ),
)]
#[get("/incidents")]
pub async fn list_incidents(
    query: web::Query<IncidentListQuery>,
    db: web::Data<DatabaseConnection>,
    refs: web::Data<ReferenceIds>,
) -> Result<HttpResponse, AppError> {
    let repo = IncidentRepository::new(db.get_ref(), **refs);
    let query = query.into_inner();

    let incidents: Vec<IncidentResponse> = repo
        .list(IncidentFilter {
            owner_username: query.owner_username,
            status_id: query.status_id,
            priority_id: query.priority_id,
        })
        .await?
        .into_iter()
        .map(IncidentResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(IncidentListResponse {
        count: incidents.len(),
        incidents,
    }))
}

#[get("/incidents/{id}")]
pub async fn get_incident(
    path: web::Path<i32>,
    db: web::Data<DatabaseConnection>,
    refs: web::Data<ReferenceIds>,
) -> Result<HttpResponse, AppError> {
    let repo = IncidentRepository::new(db.get_ref(), **refs);
    let incident = repo.get(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(IncidentResponse::from(incident)))
}

#[put("/incidents/{id}")]
pub async fn update_incident(
    path: web::Path<i32>,
    body: web::Json<IncidentUpdateRequest>,
    db: web::Data<DatabaseConnection>,
    refs: web::Data<ReferenceIds>,
) -> Result<HttpResponse, AppError> {
    let repo = IncidentRepository::new(db.get_ref(), **refs);
    let body = body.into_inner();

    let updated = repo
        .update(
            path.into_inner(),
            IncidentPatch {
                title: body.title,
                description: body.description,
                status_id: body.status_id,
                priority_id: body.priority_id,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(IncidentResponse::from(updated)))
}

#[delete("/incidents/{id}")]
pub async fn delete_incident(
    path: web::Path<i32>,
    db: web::Data<DatabaseConnection>,
    refs: web::Data<ReferenceIds>,
) -> Result<HttpResponse, AppError> {
    let repo = IncidentRepository::new(db.get_ref(), **refs);
    repo.delete(path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    get,
    path = "/api/stats",
    summary = "상태/우선순위별 인시던트 집계",
    responses(
        (status = 200, description = "집계 조회 성공", body = StatsResponse),
    ),
)]
#[get("/stats")]
pub async fn get_stats(
    db: web::Data<DatabaseConnection>,
    refs: web::Data<ReferenceIds>,
) -> Result<HttpResponse, AppError> {
    let repo = IncidentRepository::new(db.get_ref(), **refs);
    let stats = repo.stats().await?;

    Ok(HttpResponse::Ok().json(StatsResponse {
        total: stats.total,
        by_status: stats.by_status,
        by_priority: stats.by_priority,
    }))
}

#[get("/statuses")]
pub async fn list_statuses(db: web::Data<DatabaseConnection>) -> Result<HttpResponse, AppError> {
    let statuses: Vec<StatusResponse> = reference::all_statuses(db.get_ref())
        .await?
        .into_iter()
        .map(StatusResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(statuses))
}

#[get("/priorities")]
pub async fn list_priorities(db: web::Data<DatabaseConnection>) -> Result<HttpResponse, AppError> {
    let priorities: Vec<PriorityResponse> = reference::all_priorities(db.get_ref())
        .await?
        .into_iter()
        .map(PriorityResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(priorities))
}
