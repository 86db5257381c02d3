use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

use crate::entity::{priority, status};
use crate::repository::incident::HydratedIncident;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IncidentCreateRequest {
    pub title: String,
    pub description: Option<String>,
    pub owner_username: String,
    pub status_id: Option<i32>,
    pub priority_id: Option<i32>,
}

/// 부분 업데이트 요청. 비어 있는 필드는 건드리지 않는다.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IncidentUpdateRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status_id: Option<i32>,
    pub priority_id: Option<i32>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IncidentListQuery {
    pub owner_username: Option<String>,
    pub status_id: Option<i32>,
    pub priority_id: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub id: i32,
    pub name: String,
    pub color: String,
}

impl From<status::Model> for StatusResponse {
    fn from(model: status::Model) -> Self {
        StatusResponse {
            id: model.id,
            name: model.name,
            color: model.color,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PriorityResponse {
    pub id: i32,
    pub name: String,
    pub level: i32,
    pub color: String,
}

impl From<priority::Model> for PriorityResponse {
    fn from(model: priority::Model) -> Self {
        PriorityResponse {
            id: model.id,
            name: model.name,
            level: model.level,
            color: model.color,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IncidentResponse {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub owner_username: String,
    pub status: StatusResponse,
    pub priority: PriorityResponse,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl From<HydratedIncident> for IncidentResponse {
    fn from(hydrated: HydratedIncident) -> Self {
        IncidentResponse {
            id: hydrated.incident.id,
            title: hydrated.incident.title,
            description: hydrated.incident.description,
            owner_username: hydrated.incident.owner_username,
            status: StatusResponse::from(hydrated.status),
            priority: PriorityResponse::from(hydrated.priority),
            created_at: hydrated.incident.created_at.into(),
            updated_at: hydrated.incident.updated_at.into(),
            resolved_at: hydrated.incident.resolved_at.map(Into::into),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IncidentListResponse {
    pub count: usize,
    pub incidents: Vec<IncidentResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total: u64,
    pub by_status: HashMap<String, i64>,
    pub by_priority: HashMap<String, i64>,
}
