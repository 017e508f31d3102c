//! # 서비스 모듈
//!
//! DB 접근과 HTTP 처리 사이의 로직을 담습니다.
//! - `forms`: 폼 문자열 → 모델 변환, 폼 화면용 값 생성
//! - `listing`: 목록 화면용 `TodoItem` 조립
//! - `templates`: Tera 템플릿 로딩과 렌더링

pub mod forms;
pub mod listing;
pub mod templates;

pub use forms::*;
pub use listing::*;
pub use templates::*;
