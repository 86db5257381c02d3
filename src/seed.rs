use anyhow::Result;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use tracing::info;

use crate::entity::{priority, status, user};

struct StatusSeed {
    name: &'static str,
    description: &'static str,
    color: &'static str,
}

struct PrioritySeed {
    name: &'static str,
    level: i32,
    color: &'static str,
}

const STATUSES: &[StatusSeed] = &[
    StatusSeed { name: "Open", description: "접수되어 처리 대기 중", color: "#e74c3c" },
    StatusSeed { name: "In Progress", description: "담당자가 처리 중", color: "#f39c12" },
    StatusSeed { name: "Resolved", description: "처리 완료", color: "#2ecc71" },
];

const PRIORITIES: &[PrioritySeed] = &[
    PrioritySeed { name: "Low", level: 1, color: "#3498db" },
    PrioritySeed { name: "Medium", level: 2, color: "#f1c40f" },
    PrioritySeed { name: "High", level: 3, color: "#e67e22" },
];

/// 상태/우선순위 참조 데이터를 시드한다. 이미 존재하는 항목은 건너뛴다.
pub async fn seed_reference_data(db: &DatabaseConnection) -> Result<()> {
    for seed in STATUSES {
        let existing = status::Entity::find()
            .filter(status::Column::Name.eq(seed.name))
            .one(db)
            .await?;

        if existing.is_some() {
            continue;
        }

        let model = status::ActiveModel {
            name: Set(seed.name.to_string()),
            description: Set(Some(seed.description.to_string())),
            color: Set(seed.color.to_string()),
            ..Default::default()
        };
        model.insert(db).await?;
        info!("상태 '{}' 시드 완료", seed.name);
    }

    for seed in PRIORITIES {
        let existing = priority::Entity::find()
            .filter(priority::Column::Name.eq(seed.name))
            .one(db)
            .await?;

        if existing.is_some() {
            continue;
        }

        let model = priority::ActiveModel {
            name: Set(seed.name.to_string()),
            level: Set(seed.level),
            color: Set(seed.color.to_string()),
            ..Default::default()
        };
        model.insert(db).await?;
        info!("우선순위 '{}' 시드 완료", seed.name);
    }

    Ok(())
}

/// 로컬 개발용 관리자 계정. 이미 있으면 아무것도 하지 않는다.
pub async fn seed_admin_user(db: &DatabaseConnection, username: &str, password: &str) -> Result<()> {
    let existing = user::Entity::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await?;

    if existing.is_some() {
        return Ok(());
    }

    let hashed = bcrypt::hash(password, bcrypt::DEFAULT_COST)?;

    let model = user::ActiveModel {
        username: Set(username.to_string()),
        email: Set(format!("{}@example.com", username)),
        password_hash: Set(hashed),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };
    model.insert(db).await?;
    info!("관리자 계정 '{}' 시드 완료", username);

    Ok(())
}
