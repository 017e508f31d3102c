//! # 태그 모델 정의
//!
//! 태그는 할 일에 붙이는 라벨입니다. 하나의 할 일에 여러 태그,
//! 하나의 태그에 여러 할 일이 연결될 수 있습니다 (N:M, `todo_tags` 테이블).
//!
//! ## 구조체 역할
//! - `Tag`: DB의 `tags` 테이블 한 행
//! - `TodoTag`: 할 일과 태그를 잇는 연결 레코드
//! - `NewTag`, `TagForm`: 태그 생성 입력과 폼 본문
//! - `AttachTagForm`: 할 일에 태그를 붙일 때의 폼 본문

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 태그 이름 최대 길이 (문자 수)
pub const TAG_NAME_MAX_CHARS: usize = 50;

/// 태그 엔티티: DB의 `tags` 테이블 한 행(row)에 대응합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tag {
    pub id: i64,
    /// 고유한 태그 이름 (예: "urgent")
    pub name: String,
    pub created_at: String,
}

// 화면에서는 해시태그 형태("#urgent")로 표시합니다.
impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.name)
    }
}

/// 할 일-태그 연결 레코드: DB의 `todo_tags` 테이블 한 행
///
/// (todo_id, tag_id) 쌍은 UNIQUE입니다. 할 일이나 태그 중
/// 어느 쪽이 삭제되어도 이 레코드는 함께 삭제됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TodoTag {
    pub id: i64,
    pub todo_id: i64,
    pub tag_id: i64,
    pub created_at: String,
}

impl TodoTag {
    /// "할 일 제목 - 태그 이름" 형태의 표시 문자열
    pub fn label(todo_title: &str, tag_name: &str) -> String {
        format!("{} - {}", todo_title, tag_name)
    }
}

/// 태그 생성 입력
#[derive(Debug, Clone)]
pub struct NewTag {
    pub name: String,
}

impl NewTag {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Tag name is required".to_string()));
        }
        if name.chars().count() > TAG_NAME_MAX_CHARS {
            return Err(AppError::Validation(format!(
                "Tag name must be at most {} characters",
                TAG_NAME_MAX_CHARS
            )));
        }
        Ok(())
    }
}

/// 태그 생성 폼: `POST /tags`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagForm {
    #[serde(default)]
    pub name: String,
}

/// 할 일에 태그 연결 폼: `POST /todos/{id}/tags`
///
/// 할 일 ID는 URL 경로에서, 태그 ID는 폼 본문에서 가져옵니다.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttachTagForm {
    #[serde(default)]
    pub tag_id: String,
}

impl AttachTagForm {
    /// 폼의 태그 ID를 숫자로 바꿉니다. 숫자가 아니면 검증 에러.
    pub fn tag_id(&self) -> Result<i64, AppError> {
        self.tag_id
            .trim()
            .parse()
            .map_err(|_| AppError::Validation("Choose a tag to attach".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_displays_as_hashtag() {
        let tag = Tag {
            id: 1,
            name: "important".to_string(),
            created_at: String::new(),
        };
        assert_eq!(tag.to_string(), "#important");
    }

    #[test]
    fn todo_tag_label() {
        assert_eq!(TodoTag::label("Test Todo", "test"), "Test Todo - test");
    }

    #[test]
    fn attach_form_parses_tag_id() {
        let form = |raw: &str| AttachTagForm {
            tag_id: raw.to_string(),
        };

        assert_eq!(form(" 12 ").tag_id().unwrap(), 12);
        assert!(matches!(form("abc").tag_id(), Err(AppError::Validation(_))));
        assert!(form("").tag_id().is_err());
    }

    #[test]
    fn tag_name_limits() {
        assert!(NewTag::named("urgent").validate().is_ok());
        assert!(NewTag::named(" ").validate().is_err());
        assert!(NewTag::named("t".repeat(TAG_NAME_MAX_CHARS)).validate().is_ok());
        assert!(NewTag::named("t".repeat(TAG_NAME_MAX_CHARS + 1))
            .validate()
            .is_err());
    }
}
