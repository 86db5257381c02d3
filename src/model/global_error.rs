use actix_web::{HttpResponse, ResponseError};
use sea_orm::DbErr;
use serde::Serialize;
use thiserror::Error;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // 400 BAD REQUEST
    ValidationError,
    UnknownStatus,
    UnknownPriority,

    // 401 UNAUTHORIZED
    InvalidCredentials,

    // 404 NOT FOUND
    IncidentNotFound,
    MemberNotFound,

    // 409 CONFLICT
    DuplicateUsername,
    DuplicateEmail,

    // 500 SERVER ERRORS
    DatabaseError,
    InternalError,
}

impl ErrorCode {
    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "유효성 검증에 실패했습니다",
            ErrorCode::UnknownStatus => "유효하지 않은 상태 ID입니다",
            ErrorCode::UnknownPriority => "유효하지 않은 우선순위 ID입니다",

            ErrorCode::InvalidCredentials => "잘못된 자격 증명입니다",

            ErrorCode::IncidentNotFound => "인시던트를 찾을 수 없습니다",
            ErrorCode::MemberNotFound => "사용자를 찾을 수 없습니다",

            ErrorCode::DuplicateUsername => "이미 존재하는 사용자명입니다",
            ErrorCode::DuplicateEmail => "이미 등록된 이메일입니다",

            ErrorCode::DatabaseError => "데이터베이스 오류가 발생했습니다",
            ErrorCode::InternalError => "내부 서버 오류가 발생했습니다",
        }
    }

    pub fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            ErrorCode::ValidationError |
            ErrorCode::UnknownStatus |
            ErrorCode::UnknownPriority => StatusCode::BAD_REQUEST,

            ErrorCode::InvalidCredentials => StatusCode::UNAUTHORIZED,

            ErrorCode::IncidentNotFound |
            ErrorCode::MemberNotFound => StatusCode::NOT_FOUND,

            ErrorCode::DuplicateUsername |
            ErrorCode::DuplicateEmail => StatusCode::CONFLICT,

            ErrorCode::DatabaseError |
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationFieldError {
    pub field: String,
    pub message: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    ApiError(ErrorCode, Option<String>),

    #[error("유효성 검증에 실패했습니다")]
    ValidationError(Vec<ValidationFieldError>),
}

impl AppError {
    pub fn with_detail(code: ErrorCode, detail: String) -> Self {
        AppError::ApiError(code, Some(detail))
    }

    pub fn bad_request(code: ErrorCode) -> Self {
        AppError::ApiError(code, None)
    }

    pub fn unauthorized(code: ErrorCode) -> Self {
        AppError::ApiError(code, None)
    }

    pub fn not_found(code: ErrorCode) -> Self {
        AppError::ApiError(code, None)
    }

    pub fn conflict(code: ErrorCode) -> Self {
        AppError::ApiError(code, None)
    }

    pub fn internal_error(code: ErrorCode) -> Self {
        AppError::ApiError(code, None)
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        log::error!("데이터베이스 오류: {}", err);
        AppError::with_detail(ErrorCode::DatabaseError, err.to_string())
    }
}

/// 유니크 제약 위반 여부. 중복 체크와 INSERT 사이에 끼어든 동시 등록을
/// 500 대신 409로 돌려주기 위해 사용한다.
pub fn is_unique_violation(error: &DbErr) -> bool {
    use sea_orm::sqlx::error::DatabaseError;
    use sea_orm::RuntimeErr;

    let runtime_err = match error {
        DbErr::Query(RuntimeErr::SqlxError(err)) | DbErr::Exec(RuntimeErr::SqlxError(err)) => err,
        _ => return false,
    };

    match runtime_err.as_database_error() {
        Some(db_error) => db_error.is_unique_violation(),
        None => false,
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<ValidationFieldError>>,
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::ApiError(code, detail) => {
                let response = ErrorResponse {
                    code: format!("{:?}", code),
                    message: code.message().to_string(),
                    detail: detail.clone(),
                    errors: None,
                };

                HttpResponse::build(code.status_code())
                    .json(response)
            }
            AppError::ValidationError(errors) => {
                let response = ErrorResponse {
                    code: format!("{:?}", ErrorCode::ValidationError),
                    message: ErrorCode::ValidationError.message().to_string(),
                    detail: None,
                    errors: Some(errors.clone()),
                };

                HttpResponse::build(ErrorCode::ValidationError.status_code())
                    .json(response)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn api_error_response_uses_code_status() {
        let err = AppError::with_detail(ErrorCode::DatabaseError, "connection reset".to_string());
        assert_eq!(err.error_response().status(), StatusCode::INTERNAL_SERVER_ERROR);

        let err = AppError::conflict(ErrorCode::DuplicateUsername);
        assert_eq!(err.error_response().status(), StatusCode::CONFLICT);

        let err = AppError::not_found(ErrorCode::IncidentNotFound);
        assert_eq!(err.error_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_error_response_is_bad_request() {
        let err = AppError::ValidationError(vec![ValidationFieldError {
            field: "title".to_string(),
            message: "제목은 필수입니다.".to_string(),
        }]);
        assert_eq!(err.error_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn non_sqlx_errors_are_not_unique_violations() {
        assert!(!is_unique_violation(&DbErr::Custom("boom".to_string())));
        assert!(!is_unique_violation(&DbErr::RecordNotUpdated));
    }
}
