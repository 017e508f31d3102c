//! # 할 일(Todo) 모델 정의
//!
//! 할 일 엔티티와 우선순위, 생성 입력, HTML 폼 본문 구조체를 정의합니다.
//!
//! ## 구조체 역할
//! - `Priority`: 우선순위 (LOW / MEDIUM / HIGH / URGENT)
//! - `Todo`: DB의 `todos` 테이블 한 행
//! - `NewTodo`: 검증을 거쳐 DB에 저장될 생성 입력
//! - `TodoForm`: `POST /create`, `POST /edit/{id}`의 폼 본문
//! - `TodoItem`: 목록 화면용 (카테고리, 태그, 기한 초과 여부 포함)

use crate::error::AppError;
use crate::models::{Category, Tag};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 제목 최대 길이 (문자 수)
pub const TITLE_MAX_CHARS: usize = 200;

/// 할 일 우선순위
///
/// 자유 문자열 대신 닫힌 열거형으로 두어 `match`에서 모든 경우를 처리하도록 강제합니다.
///
/// # derive 매크로 설명
/// - `sqlx::Type`: DB의 TEXT 컬럼과 변환 (`rename_all`로 "MEDIUM" 같은 대문자 저장)
/// - `Serialize`/`Deserialize`: 템플릿 컨텍스트 직렬화
/// - `Default`: `#[default]`가 붙은 MEDIUM이 기본값
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    /// 화면 선택 상자에 순서대로 보여줄 전체 목록
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Urgent,
    ];

    /// DB/폼에서 쓰는 코드 값 (예: "URGENT")
    pub fn code(self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
            Priority::Urgent => "URGENT",
        }
    }

    /// 사람이 읽는 이름 (예: "Urgent")
    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Urgent => "Urgent",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// FromStr: "high".parse::<Priority>() 형태로 폼 값을 변환할 수 있게 합니다.
// 대소문자는 구분하지 않습니다.
impl FromStr for Priority {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Priority::ALL
            .into_iter()
            .find(|p| p.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AppError::Validation("Unknown priority".to_string()))
    }
}

/// 할 일 엔티티: DB의 `todos` 테이블 한 행(row)에 대응합니다.
///
/// 저장 로직은 이 구조체가 아니라 `db` 모듈의 함수가 담당합니다.
/// 핸들러는 값을 꺼내 수정한 뒤 `db::update_todo`에 넘깁니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    /// 설명이 없으면 빈 문자열
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub completed: bool,
    pub priority: Priority,
    /// 카테고리가 삭제되면 NULL로 바뀝니다 (할 일은 남음)
    pub category_id: Option<i64>,
    /// 완료 시각. `mark_complete`에서만 채워지고 토글 경로에서는 건드리지 않습니다.
    pub completed_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Todo {
    /// 주어진 날짜 기준으로 기한이 지났는지 판정합니다.
    ///
    /// 마감일이 있고, 미완료이고, 마감일이 `today`보다 **엄격하게** 이전일 때만 true.
    /// 마감일이 오늘이면 아직 기한 초과가 아닙니다.
    pub fn is_overdue_on(&self, today: NaiveDate) -> bool {
        match self.due_date {
            Some(due) if !self.completed => due < today,
            _ => false,
        }
    }

    /// 로컬 시간대의 오늘 날짜 기준으로 기한 초과 여부를 계산합니다.
    /// 저장하지 않고 읽을 때마다 다시 계산합니다.
    pub fn is_overdue(&self) -> bool {
        self.is_overdue_on(chrono::Local::now().date_naive())
    }
}

impl fmt::Display for Todo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

/// 할 일 생성 입력
///
/// 폼이나 테스트에서 만들어 `db::create_todo`에 넘깁니다.
/// 완료 여부는 항상 false로 시작하므로 여기에는 없습니다.
#[derive(Debug, Clone, Default)]
pub struct NewTodo {
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
    pub category_id: Option<i64>,
}

impl NewTodo {
    /// 제목만 있는 최소 입력
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        validate_title(&self.title)
    }
}

/// 제목 검증: 공백만 있는 제목은 거부하고, 길이는 문자(char) 단위로 셉니다.
pub fn validate_title(title: &str) -> Result<(), AppError> {
    if title.trim().is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err(AppError::Validation(format!(
            "Title must be at most {} characters",
            TITLE_MAX_CHARS
        )));
    }
    Ok(())
}

/// 할 일 폼 본문: `application/x-www-form-urlencoded`
///
/// 모든 필드가 선택인 이유: 빠진 필드와 빈 필드를 구분해야 하기 때문입니다.
/// - `due_date`: 빈 문자열은 "마감일 없음"
/// - `priority`: 없으면 생성 시 MEDIUM, 수정 시 기존 값 유지
/// - `category_id`: 없으면 생성 시 없음, 수정 시 기존 값 유지 / 빈 문자열은 "카테고리 없음"
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TodoForm {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub priority: Option<String>,
    pub category_id: Option<String>,
}

impl From<&Todo> for TodoForm {
    /// 수정 화면을 기존 값으로 채우기 위한 변환
    fn from(todo: &Todo) -> Self {
        Self {
            title: todo.title.clone(),
            description: Some(todo.description.clone()),
            due_date: todo.due_date.map(|d| d.format("%Y-%m-%d").to_string()),
            priority: Some(todo.priority.code().to_string()),
            category_id: todo.category_id.map(|id| id.to_string()),
        }
    }
}

/// 목록 화면에 보여줄 할 일 한 건
///
/// `#[serde(flatten)]`: 템플릿에서 `item.title`처럼 `Todo`의 필드에 바로 접근할 수 있게
/// 필드를 한 단계 위로 펼쳐서 직렬화합니다.
#[derive(Debug, Clone, Serialize)]
pub struct TodoItem {
    #[serde(flatten)]
    pub todo: Todo,
    pub is_overdue: bool,
    pub priority_label: &'static str,
    pub category: Option<Category>,
    pub tags: Vec<Tag>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(due_date: Option<NaiveDate>, completed: bool) -> Todo {
        Todo {
            id: 1,
            title: "Test Todo".to_string(),
            description: String::new(),
            due_date,
            completed,
            priority: Priority::default(),
            category_id: None,
            completed_at: None,
            created_at: "2025-01-01T00:00:00.000Z".to_string(),
            updated_at: "2025-01-01T00:00:00.000Z".to_string(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn overdue_requires_past_due_date_and_incomplete() {
        let today = date(2025, 6, 15);

        assert!(todo(Some(date(2025, 6, 14)), false).is_overdue_on(today));
        assert!(!todo(Some(date(2025, 6, 15)), false).is_overdue_on(today));
        assert!(!todo(Some(date(2025, 6, 22)), false).is_overdue_on(today));
        assert!(!todo(Some(date(2025, 6, 14)), true).is_overdue_on(today));
        assert!(!todo(None, false).is_overdue_on(today));
    }

    #[test]
    fn overdue_against_real_clock() {
        let yesterday = chrono::Local::now().date_naive() - chrono::Duration::days(1);
        let next_week = chrono::Local::now().date_naive() + chrono::Duration::days(7);

        assert!(todo(Some(yesterday), false).is_overdue());
        assert!(!todo(Some(next_week), false).is_overdue());
    }

    #[test]
    fn priority_defaults_to_medium_and_parses_codes() {
        assert_eq!(Priority::default(), Priority::Medium);
        assert_eq!("URGENT".parse::<Priority>().unwrap(), Priority::Urgent);
        assert_eq!(" low ".parse::<Priority>().unwrap(), Priority::Low);
        assert!(matches!(
            "someday".parse::<Priority>(),
            Err(AppError::Validation(_))
        ));
        assert_eq!(Priority::High.to_string(), "High");
        assert_eq!(Priority::High.code(), "HIGH");
    }

    #[test]
    fn title_validation() {
        assert!(validate_title("Buy milk").is_ok());
        assert!(validate_title(&"가".repeat(TITLE_MAX_CHARS)).is_ok());
        assert!(validate_title(&"a".repeat(TITLE_MAX_CHARS + 1)).is_err());
        assert!(validate_title("").is_err());
        assert!(validate_title("   ").is_err());
    }

    #[test]
    fn display_is_title() {
        assert_eq!(todo(None, false).to_string(), "Test Todo");
    }

    #[test]
    fn form_prefills_from_todo() {
        let mut t = todo(Some(date(2025, 12, 31)), false);
        t.category_id = Some(7);
        let form = TodoForm::from(&t);

        assert_eq!(form.title, "Test Todo");
        assert_eq!(form.due_date.as_deref(), Some("2025-12-31"));
        assert_eq!(form.priority.as_deref(), Some("MEDIUM"));
        assert_eq!(form.category_id.as_deref(), Some("7"));
    }
}
