//! # 에러 처리 모듈
//!
//! 애플리케이션에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//!
//! 이 모듈의 핵심:
//! - `AppError` 열거형(enum): 모든 에러 종류를 하나의 타입으로 통합
//! - `IntoResponse` 구현: 에러를 HTML 에러 페이지 응답으로 자동 변환
//! - `unique_violation()`: SQLite의 UNIQUE 위반을 `Conflict`로 바꾸는 변환기

use axum::{
    http::StatusCode,                   // HTTP 상태 코드 (400, 404, 409, 500 등)
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
///
/// 핸들러에서 `Result<T, AppError>`를 반환하면,
/// Axum이 자동으로 `IntoResponse`를 호출하여 HTTP 응답으로 변환합니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 요청한 리소스를 찾을 수 없음 (HTTP 404)
    #[error("Resource not found")]
    NotFound,

    /// 입력값 검증 실패 (HTTP 400)
    /// 예: 빈 제목, 너무 긴 이름, 잘못된 날짜 형식
    #[error("{0}")]
    Validation(String),

    /// UNIQUE 제약 위반 (HTTP 409)
    /// 예: 같은 이름의 태그, 이미 연결된 할 일-태그 쌍
    #[error("{0}")]
    Conflict(String),

    /// 서버 내부 오류 (HTTP 500)
    #[error("Internal error: {0}")]
    Internal(String),

    /// 데이터베이스 오류 (HTTP 500)
    /// #[from]: `?` 연산자로 sqlx::Error → AppError::Database 자동 변환
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// 템플릿 렌더링 오류 (HTTP 500)
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),
}

impl AppError {
    /// 이 에러에 대응하는 HTTP 상태 코드
    ///
    /// 폼을 다시 그릴 때도 같은 상태 코드를 쓰기 위해 `into_response` 밖으로 분리했습니다.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) | AppError::Database(_) | AppError::Template(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// 사용자 입력 문제(검증 실패, 중복)인지 여부
    /// 이런 에러는 폼을 다시 보여주면서 메시지를 함께 표시합니다.
    pub fn is_user_error(&self) -> bool {
        matches!(self, AppError::Validation(_) | AppError::Conflict(_))
    }
}

/// sqlx 에러가 UNIQUE 제약 위반이면 `Conflict(message)`로, 아니면 `Database`로 변환합니다.
///
/// `map_err(unique_violation("..."))` 형태로 INSERT 쿼리 뒤에 붙여 사용합니다.
pub fn unique_violation(message: &'static str) -> impl Fn(sqlx::Error) -> AppError {
    move |err| match &err {
        // DatabaseError::is_unique_violation(): 드라이버별 에러 코드를 대신 해석해 줍니다.
        // SQLite에서는 SQLITE_CONSTRAINT_UNIQUE(2067)에 해당합니다.
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::Conflict(message.to_string())
        }
        _ => AppError::Database(err),
    }
}

impl IntoResponse for AppError {
    /// AppError를 HTML 에러 페이지로 변환합니다.
    ///
    /// 내부 에러(Database, Template, Internal)는 실제 내용을 로그에만 기록하고,
    /// 클라이언트에는 일반적인 메시지만 보여줍니다.
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                "A database error occurred".to_string()
            }
            AppError::Template(e) => {
                tracing::error!("Template error: {:?}", e);
                "A rendering error occurred".to_string()
            }
            other => other.to_string(),
        };

        let body = Html(format!(
            "<!doctype html><html><head><title>{code}</title></head>\
             <body><h1>{code}</h1><p>{message}</p><p><a href=\"/\">Back to list</a></p></body></html>",
            code = status,
            // 템플릿과 같은 규칙으로 이스케이프
            message = tera::escape_html(&message),
        ));

        (status, body).into_response()
    }
}
