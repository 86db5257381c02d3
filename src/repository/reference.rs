use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use crate::entity::priority::{self, Entity as PriorityEntity};
use crate::entity::status::{self, Entity as StatusEntity};
use crate::model::global_error::AppError;

pub const OPEN_STATUS_NAME: &str = "Open";
pub const RESOLVED_STATUS_NAME: &str = "Resolved";
pub const DEFAULT_PRIORITY_NAME: &str = "Medium";

/// 시드 데이터의 리터럴 ID 대신 부팅 시점에 이름으로 한 번 해석해 둔다.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceIds {
    pub open_status: i32,
    pub resolved_status: i32,
    pub default_priority: i32,
}

impl ReferenceIds {
    pub async fn resolve(db: &DatabaseConnection) -> anyhow::Result<Self> {
        let open = find_status_by_name(db, OPEN_STATUS_NAME).await?;
        let resolved = find_status_by_name(db, RESOLVED_STATUS_NAME).await?;
        let medium = PriorityEntity::find()
            .filter(priority::Column::Name.eq(DEFAULT_PRIORITY_NAME))
            .one(db)
            .await?
            .ok_or_else(|| anyhow::anyhow!("기본 우선순위 '{}'가 시드되어 있지 않습니다", DEFAULT_PRIORITY_NAME))?;

        Ok(ReferenceIds {
            open_status: open.id,
            resolved_status: resolved.id,
            default_priority: medium.id,
        })
    }
}

async fn find_status_by_name(db: &DatabaseConnection, name: &str) -> anyhow::Result<status::Model> {
    StatusEntity::find()
        .filter(status::Column::Name.eq(name))
        .one(db)
        .await?
        .ok_or_else(|| anyhow::anyhow!("상태 '{}'가 시드되어 있지 않습니다", name))
}

pub async fn all_statuses(db: &DatabaseConnection) -> Result<Vec<status::Model>, AppError> {
    let statuses = StatusEntity::find()
        .order_by_asc(status::Column::Id)
        .all(db)
        .await?;

    Ok(statuses)
}

pub async fn all_priorities(db: &DatabaseConnection) -> Result<Vec<priority::Model>, AppError> {
    let priorities = PriorityEntity::find()
        .order_by_asc(priority::Column::Level)
        .all(db)
        .await?;

    Ok(priorities)
}
