//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 모아둔 모듈입니다.
//! Axum에서 핸들러는 HTTP 요청을 받아 응답을 반환하는 async 함수입니다.
//!
//! 각 하위 모듈:
//! - `todos`: 할 일 목록/생성/수정/삭제/완료 토글, 할 일-태그 연결
//! - `categories`: 카테고리 목록/생성/상세/삭제
//! - `tags`: 태그 목록/생성/삭제
//! - `health`: 서버 상태 확인 (헬스체크)

pub mod categories;
pub mod health;
pub mod tags;
pub mod todos;

// 각 모듈의 핸들러 함수들을 재공개하여
// `routes::list_todos`처럼 바로 접근 가능하게 합니다.
pub use categories::*;
pub use health::*;
pub use tags::*;
pub use todos::*;

use axum::{
    routing::{get, post},
    Router,
};

/// 애플리케이션의 모든 라우트를 등록한 라우터를 만듭니다.
///
/// 브라우저 폼은 GET/POST만 보낼 수 있으므로 삭제와 토글도 GET 링크로 엽니다.
/// 정적 파일과 트레이싱 레이어는 `main`에서 덧붙입니다.
pub fn router(state: AppState) -> Router {
    Router::new()
        // 할 일(Todo)
        .route("/", get(list_todos))
        .route("/create", get(create_todo_form).post(create_todo))
        .route("/edit/{id}", get(edit_todo_form).post(edit_todo))
        .route("/delete/{id}", get(delete_todo))
        .route("/toggle/{id}", get(toggle_todo))
        .route("/complete/{id}", get(complete_todo))
        .route("/incomplete/{id}", get(incomplete_todo))
        // 할 일-태그 관계
        .route("/todos/{id}/tags", post(attach_tag))
        .route("/todos/{id}/tags/{tag_id}/remove", get(detach_tag))
        // 카테고리(Category)
        .route("/categories", get(list_categories).post(create_category))
        .route("/categories/{id}", get(show_category))
        .route("/categories/{id}/delete", get(delete_category))
        // 태그(Tag)
        .route("/tags", get(list_tags).post(create_tag))
        .route("/tags/{id}/delete", get(delete_tag))
        .route("/health", get(health_check))
        .with_state(state)
}
