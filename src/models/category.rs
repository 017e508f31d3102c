//! # 카테고리 모델 정의
//!
//! 카테고리는 할 일을 묶는 이름 + 색상 그룹입니다.
//! 하나의 할 일은 최대 하나의 카테고리에 속합니다 (N:1, 선택).

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 카테고리 이름 최대 길이 (문자 수)
pub const CATEGORY_NAME_MAX_CHARS: usize = 100;

/// 색상을 지정하지 않았을 때 사용하는 기본 색상
pub const DEFAULT_CATEGORY_COLOR: &str = "#667eea";

/// 카테고리 엔티티: DB의 `categories` 테이블 한 행에 대응합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    /// 고유한 이름 (UNIQUE 제약)
    pub name: String,
    /// 16진수 색상 코드 (예: "#667eea")
    pub color: String,
    pub created_at: String,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// 카테고리 생성 입력
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub color: String,
}

impl NewCategory {
    /// 기본 색상을 가진 카테고리 입력
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: DEFAULT_CATEGORY_COLOR.to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Category name is required".to_string()));
        }
        if name.chars().count() > CATEGORY_NAME_MAX_CHARS {
            return Err(AppError::Validation(format!(
                "Category name must be at most {} characters",
                CATEGORY_NAME_MAX_CHARS
            )));
        }
        if !is_hex_color(&self.color) {
            return Err(AppError::Validation(
                "Color must be a hex code like #667eea".to_string(),
            ));
        }
        Ok(())
    }
}

/// `#rgb` 또는 `#rrggbb` 형태인지 확인합니다.
pub fn is_hex_color(color: &str) -> bool {
    match color.strip_prefix('#') {
        Some(hex) => {
            (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}

/// 카테고리 생성 폼: `POST /categories`
///
/// `color`가 없거나 비어 있으면 기본 색상을 사용합니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryForm {
    #[serde(default)]
    pub name: String,
    pub color: Option<String>,
}

impl From<CategoryForm> for NewCategory {
    fn from(form: CategoryForm) -> Self {
        let color = form
            .color
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY_COLOR.to_string());
        Self {
            color,
            ..Self::named(form.name.trim())
        }
    }
}
