//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! - `category`: 카테고리
//! - `tag`: 태그와 할 일-태그 연결
//! - `todo`: 할 일, 우선순위, 폼 본문
//!
//! 모델은 순수 데이터입니다. 저장/삭제는 `db` 모듈의 함수가 담당합니다.

pub mod category;
pub mod tag;
pub mod todo;

// `models::Todo`처럼 짧게 쓸 수 있도록 재공개합니다.
pub use category::*;
pub use tag::*;
pub use todo::*;
