use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    FromQueryResult, JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, Set, TransactionTrait,
};
use sea_query::Condition;
use std::collections::HashMap;

use crate::entity::incident::{self, ActiveModel as IncidentActiveModel, Entity as IncidentEntity};
use crate::entity::priority::{self, Entity as PriorityEntity};
use crate::entity::status::{self, Entity as StatusEntity};
use crate::model::global_error::{AppError, ErrorCode, ValidationFieldError};
use crate::repository::reference::ReferenceIds;

#[derive(Debug, Clone)]
pub struct NewIncident {
    pub title: String,
    pub description: Option<String>,
    pub owner_username: String,
    pub status_id: Option<i32>,
    pub priority_id: Option<i32>,
}

/// 부분 업데이트 패치. `None`인 필드는 기존 값을 유지한다.
#[derive(Debug, Clone, Default)]
pub struct IncidentPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status_id: Option<i32>,
    pub priority_id: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct IncidentFilter {
    pub owner_username: Option<String>,
    pub status_id: Option<i32>,
    pub priority_id: Option<i32>,
}

/// 참조 데이터까지 조인된 인시던트
#[derive(Debug, Clone)]
pub struct HydratedIncident {
    pub incident: incident::Model,
    pub status: status::Model,
    pub priority: priority::Model,
}

#[derive(Debug, Clone)]
pub struct IncidentStats {
    pub total: u64,
    pub by_status: HashMap<String, i64>,
    pub by_priority: HashMap<String, i64>,
}

#[derive(Debug, FromQueryResult)]
struct NameCount {
    name: String,
    count: i64,
}

pub struct IncidentRepository<'a> {
    db: &'a DatabaseConnection,
    refs: ReferenceIds,
}

impl<'a> IncidentRepository<'a> {
    pub fn new(db: &'a DatabaseConnection, refs: ReferenceIds) -> Self {
        Self { db, refs }
    }

    pub async fn create(&self, new_incident: NewIncident) -> Result<HydratedIncident, AppError> {
        validate_new_incident(&new_incident)?;

        let status_id = new_incident.status_id.unwrap_or(self.refs.open_status);
        let priority_id = new_incident.priority_id.unwrap_or(self.refs.default_priority);

        let txn = self.db.begin().await?;

        let status = find_status(&txn, status_id).await?;
        let priority = find_priority(&txn, priority_id).await?;

        let now = Utc::now();
        let model = IncidentActiveModel {
            title: Set(new_incident.title.trim().to_string()),
            description: Set(new_incident.description),
            owner_username: Set(new_incident.owner_username.trim().to_string()),
            status_id: Set(status_id),
            priority_id: Set(priority_id),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            resolved_at: Set(None),
            ..Default::default()
        };

        let inserted = model.insert(&txn).await?;
        txn.commit().await?;

        Ok(HydratedIncident {
            incident: inserted,
            status,
            priority,
        })
    }

    pub async fn get(&self, id: i32) -> Result<HydratedIncident, AppError> {
        let incident = IncidentEntity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| AppError::not_found(ErrorCode::IncidentNotFound))?;

        self.hydrate(incident).await
    }

    /// 패치 적용, 타임스탬프 갱신, Resolved 전환 시각 기록을 하나의 트랜잭션으로 처리한다.
    pub async fn update(&self, id: i32, patch: IncidentPatch) -> Result<HydratedIncident, AppError> {
        if let Some(title) = &patch.title {
            if title.trim().is_empty() {
                return Err(AppError::ValidationError(vec![ValidationFieldError {
                    field: "title".to_string(),
                    message: "제목은 비워 둘 수 없습니다.".to_string(),
                }]));
            }
        }

        let txn = self.db.begin().await?;

        // 동시 업데이트가 끼어들지 못하도록 행을 잠그고 읽는다 (SELECT ... FOR UPDATE).
        // SQLite 백엔드에서는 잠금 절이 생략된다.
        let incident = IncidentEntity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::not_found(ErrorCode::IncidentNotFound))?;

        let mut model: IncidentActiveModel = incident.clone().into();
        let now = Utc::now();

        if let Some(title) = patch.title {
            model.title = Set(title.trim().to_string());
        }
        if let Some(description) = patch.description {
            model.description = Set(Some(description));
        }
        if let Some(status_id) = patch.status_id {
            find_status(&txn, status_id).await?;

            // Resolved로 "진입"할 때에만 해결 시각을 기록한다.
            // 이후 다른 상태로 되돌려도 resolved_at은 지워지지 않는다.
            if status_id == self.refs.resolved_status && incident.status_id != status_id {
                model.resolved_at = Set(Some(now.into()));
            }
            model.status_id = Set(status_id);
        }
        if let Some(priority_id) = patch.priority_id {
            find_priority(&txn, priority_id).await?;
            model.priority_id = Set(priority_id);
        }

        model.updated_at = Set(now.into());

        let updated = model.update(&txn).await?;
        let status = find_status(&txn, updated.status_id).await?;
        let priority = find_priority(&txn, updated.priority_id).await?;

        txn.commit().await?;

        Ok(HydratedIncident {
            incident: updated,
            status,
            priority,
        })
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let result = IncidentEntity::delete_by_id(id).exec(self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found(ErrorCode::IncidentNotFound));
        }

        Ok(())
    }

    pub async fn list(&self, filter: IncidentFilter) -> Result<Vec<HydratedIncident>, AppError> {
        let mut condition = Condition::all();
        if let Some(owner) = &filter.owner_username {
            condition = condition.add(incident::Column::OwnerUsername.eq(owner));
        }
        if let Some(status_id) = filter.status_id {
            condition = condition.add(incident::Column::StatusId.eq(status_id));
        }
        if let Some(priority_id) = filter.priority_id {
            condition = condition.add(incident::Column::PriorityId.eq(priority_id));
        }

        let incidents = IncidentEntity::find()
            .filter(condition)
            .order_by_desc(incident::Column::CreatedAt)
            .all(self.db)
            .await?;

        let statuses: HashMap<i32, status::Model> = StatusEntity::find()
            .all(self.db)
            .await?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();
        let priorities: HashMap<i32, priority::Model> = PriorityEntity::find()
            .all(self.db)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        incidents
            .into_iter()
            .map(|i| {
                let status = statuses
                    .get(&i.status_id)
                    .cloned()
                    .ok_or_else(|| AppError::internal_error(ErrorCode::InternalError))?;
                let priority = priorities
                    .get(&i.priority_id)
                    .cloned()
                    .ok_or_else(|| AppError::internal_error(ErrorCode::InternalError))?;

                Ok(HydratedIncident {
                    incident: i,
                    status,
                    priority,
                })
            })
            .collect()
    }

    /// 참조 데이터의 표시 이름 기준 집계. 인시던트가 없는 항목은 매핑에 나타나지 않는다.
    pub async fn stats(&self) -> Result<IncidentStats, AppError> {
        let total = IncidentEntity::find().count(self.db).await?;

        let by_status = IncidentEntity::find()
            .select_only()
            .column_as(status::Column::Name, "name")
            .column_as(incident::Column::Id.count(), "count")
            .join(JoinType::InnerJoin, incident::Relation::Status.def())
            .group_by(status::Column::Name)
            .into_model::<NameCount>()
            .all(self.db)
            .await?
            .into_iter()
            .map(|row| (row.name, row.count))
            .collect();

        let by_priority = IncidentEntity::find()
            .select_only()
            .column_as(priority::Column::Name, "name")
            .column_as(incident::Column::Id.count(), "count")
            .join(JoinType::InnerJoin, incident::Relation::Priority.def())
            .group_by(priority::Column::Name)
            .into_model::<NameCount>()
            .all(self.db)
            .await?
            .into_iter()
            .map(|row| (row.name, row.count))
            .collect();

        Ok(IncidentStats {
            total,
            by_status,
            by_priority,
        })
    }

    async fn hydrate(&self, incident: incident::Model) -> Result<HydratedIncident, AppError> {
        let status = StatusEntity::find_by_id(incident.status_id)
            .one(self.db)
            .await?
            .ok_or_else(|| AppError::internal_error(ErrorCode::InternalError))?;
        let priority = PriorityEntity::find_by_id(incident.priority_id)
            .one(self.db)
            .await?
            .ok_or_else(|| AppError::internal_error(ErrorCode::InternalError))?;

        Ok(HydratedIncident {
            incident,
            status,
            priority,
        })
    }
}

fn validate_new_incident(new_incident: &NewIncident) -> Result<(), AppError> {
    let mut errors = Vec::new();

    if new_incident.title.trim().is_empty() {
        errors.push(ValidationFieldError {
            field: "title".to_string(),
            message: "제목은 필수입니다.".to_string(),
        });
    }

    if new_incident.owner_username.trim().is_empty() {
        errors.push(ValidationFieldError {
            field: "ownerUsername".to_string(),
            message: "소유자 사용자명은 필수입니다.".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::ValidationError(errors))
    }
}

async fn find_status<C: ConnectionTrait>(conn: &C, status_id: i32) -> Result<status::Model, AppError> {
    StatusEntity::find_by_id(status_id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::bad_request(ErrorCode::UnknownStatus))
}

async fn find_priority<C: ConnectionTrait>(conn: &C, priority_id: i32) -> Result<priority::Model, AppError> {
    PriorityEntity::find_by_id(priority_id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::bad_request(ErrorCode::UnknownPriority))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(title: &str, owner: &str) -> NewIncident {
        NewIncident {
            title: title.to_string(),
            description: None,
            owner_username: owner.to_string(),
            status_id: None,
            priority_id: None,
        }
    }

    #[test]
    fn validation_passes_for_non_empty_fields() {
        assert!(validate_new_incident(&request("Printer down", "alice")).is_ok());
    }

    #[test]
    fn validation_collects_all_missing_fields() {
        let err = validate_new_incident(&request("  ", "\t")).unwrap_err();

        match err {
            AppError::ValidationError(errors) => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["title", "ownerUsername"]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
