use actix_web::{get, post, web, HttpResponse};
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, TransactionTrait};

use crate::entity::user::{self, Entity as UserEntity};
use crate::model::auth::{AuthResponse, LoginRequest, RegisterRequest, UserListResponse, UserLookupResponse, UserResponse};
use crate::model::global_error::{is_unique_violation, AppError, ErrorCode, ValidationFieldError};

#[post("/register")]
pub async fn register(
    body: web::Json<RegisterRequest>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    let username = body.username.trim().to_string();
    let email = body
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}@example.com", username));

    validate_register_request(&username, &body.password)?;

    let txn = db.begin().await?;

    let duplicate_username = UserEntity::find()
        .filter(user::Column::Username.eq(&username))
        .one(&txn)
        .await?;
    if duplicate_username.is_some() {
        return Err(AppError::conflict(ErrorCode::DuplicateUsername));
    }

    let duplicate_email = UserEntity::find()
        .filter(user::Column::Email.eq(&email))
        .one(&txn)
        .await?;
    if duplicate_email.is_some() {
        return Err(AppError::conflict(ErrorCode::DuplicateEmail));
    }

    let hashed_password = hash(&body.password, DEFAULT_COST)
        .map_err(|_| AppError::internal_error(ErrorCode::InternalError))?;

    let new_user = user::ActiveModel {
        username: Set(username),
        email: Set(email),
        password_hash: Set(hashed_password),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };

    // 중복 체크와 INSERT 사이에 다른 등록이 커밋되면 유니크 제약에 걸린다.
    // 그 경우에도 500이 아니라 409를 돌려준다.
    let inserted = new_user.insert(&txn).await.map_err(|err| {
        if is_unique_violation(&err) {
            if err.to_string().contains("email") {
                AppError::conflict(ErrorCode::DuplicateEmail)
            } else {
                AppError::conflict(ErrorCode::DuplicateUsername)
            }
        } else {
            AppError::from(err)
        }
    })?;
    txn.commit().await?;

    Ok(HttpResponse::Created().json(AuthResponse {
        message: "사용자가 생성되었습니다".to_string(),
        user: UserResponse::from(inserted),
    }))
}

#[post("/login")]
pub async fn login(
    body: web::Json<LoginRequest>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    let username = body.username.trim();

    if username.is_empty() || body.password.is_empty() {
        return Err(AppError::ValidationError(vec![ValidationFieldError {
            field: "username".to_string(),
            message: "사용자명과 비밀번호는 필수입니다.".to_string(),
        }]));
    }

    let found = UserEntity::find()
        .filter(user::Column::Username.eq(username))
        .one(db.get_ref())
        .await?
        .ok_or_else(|| AppError::unauthorized(ErrorCode::InvalidCredentials))?;

    let is_valid = verify(&body.password, &found.password_hash)
        .map_err(|_| AppError::internal_error(ErrorCode::InternalError))?;

    if !is_valid {
        return Err(AppError::unauthorized(ErrorCode::InvalidCredentials));
    }

    Ok(HttpResponse::Ok().json(AuthResponse {
        message: "로그인 성공".to_string(),
        user: UserResponse::from(found),
    }))
}

#[get("/user/{username}")]
pub async fn get_user(
    path: web::Path<String>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    let username = path.into_inner();

    let found = UserEntity::find()
        .filter(user::Column::Username.eq(&username))
        .one(db.get_ref())
        .await?;

    match found {
        Some(found) => Ok(HttpResponse::Ok().json(UserLookupResponse {
            exists: true,
            user: Some(UserResponse::from(found)),
        })),
        None => Ok(HttpResponse::NotFound().json(UserLookupResponse {
            exists: false,
            user: None,
        })),
    }
}

#[get("/users")]
pub async fn list_users(db: web::Data<DatabaseConnection>) -> Result<HttpResponse, AppError> {
    let users: Vec<UserResponse> = UserEntity::find()
        .all(db.get_ref())
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(UserListResponse {
        count: users.len(),
        users,
    }))
}

fn validate_register_request(username: &str, password: &str) -> Result<(), AppError> {
    let mut errors = Vec::new();

    if username.chars().count() < 3 {
        errors.push(ValidationFieldError {
            field: "username".to_string(),
            message: "사용자명은 최소 3자 이상이어야 합니다.".to_string(),
        });
    }

    if password.chars().count() < 4 {
        errors.push(ValidationFieldError {
            field: "password".to_string(),
            message: "비밀번호는 최소 4자 이상이어야 합니다.".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::ValidationError(errors))
    }
}
