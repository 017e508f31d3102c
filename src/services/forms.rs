//! # 폼 입력 변환 서비스
//!
//! HTML 폼에서 들어온 문자열 값을 모델 타입으로 바꾸고,
//! 반대로 모델 값을 폼 화면에 다시 채울 수 있는 형태로 만듭니다.
//!
//! 폼 값의 세 가지 상태를 구분합니다:
//! - 필드 없음(`None`): 생성 시 기본값, 수정 시 기존 값 유지 (priority, category_id)
//! - 빈 문자열(`Some("")`): "값 없음" (마감일 없음, 카테고리 없음)
//! - 값 있음: 파싱, 실패하면 `AppError::Validation`

use crate::error::AppError;
use crate::models::*;
use chrono::NaiveDate;
use serde::Serialize;

/// 마감일 파싱. 필드가 없거나 비어 있으면 마감일 없음.
pub fn parse_due_date(raw: Option<&str>) -> Result<Option<NaiveDate>, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .ok()
            // 0을 채운 형태만 허용 (chrono는 "2025-2-3"도 파싱함)
            .filter(|date| date.format("%Y-%m-%d").to_string() == value)
            .map(Some)
            .ok_or_else(|| AppError::Validation("Due date must be in YYYY-MM-DD format".to_string())),
    }
}

/// 우선순위 파싱. 필드가 없거나 비어 있으면 `None` (호출하는 쪽에서 기본값 결정).
pub fn parse_priority(raw: Option<&str>) -> Result<Option<Priority>, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some),
    }
}

/// 카테고리 ID 파싱.
///
/// # 반환값
/// - `None`: 필드 없음 (변경하지 않음)
/// - `Some(None)`: 빈 값 (카테고리 없음)
/// - `Some(Some(id))`: 카테고리 지정
pub fn parse_category_id(raw: Option<&str>) -> Result<Option<Option<i64>>, AppError> {
    match raw.map(str::trim) {
        None => Ok(None),
        Some("") => Ok(Some(None)),
        Some(value) => value
            .parse::<i64>()
            .map(|id| Some(Some(id)))
            .map_err(|_| AppError::Validation("Unknown category".to_string())),
    }
}

/// 생성 폼을 `NewTodo`로 변환합니다. 제목 앞뒤 공백은 제거합니다.
pub fn new_todo_from_form(form: &TodoForm) -> Result<NewTodo, AppError> {
    let new = NewTodo {
        description: form.description.clone().unwrap_or_default(),
        due_date: parse_due_date(form.due_date.as_deref())?,
        priority: parse_priority(form.priority.as_deref())?.unwrap_or_default(),
        category_id: parse_category_id(form.category_id.as_deref())?.flatten(),
        ..NewTodo::titled(form.title.trim())
    };
    new.validate()?;
    Ok(new)
}

/// 수정 폼의 값을 기존 할 일에 덮어씁니다.
///
/// 제목/설명/마감일은 항상 폼 값으로 바뀌고, 우선순위/카테고리는
/// 필드가 있을 때만 바뀝니다. 완료 상태는 건드리지 않습니다.
/// 파싱에 실패하면 `todo`는 변경되지 않습니다.
pub fn apply_form(todo: &mut Todo, form: &TodoForm) -> Result<(), AppError> {
    let title = form.title.trim().to_string();
    validate_title(&title)?;
    let due_date = parse_due_date(form.due_date.as_deref())?;
    let priority = parse_priority(form.priority.as_deref())?;
    let category_id = parse_category_id(form.category_id.as_deref())?;

    todo.title = title;
    todo.description = form.description.clone().unwrap_or_default();
    todo.due_date = due_date;
    if let Some(priority) = priority {
        todo.priority = priority;
    }
    if let Some(category_id) = category_id {
        todo.category_id = category_id;
    }
    Ok(())
}

/// 템플릿에 넘기는 폼 값. 모든 필드가 문자열이라 템플릿에서 null 처리가 필요 없습니다.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FormFields {
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub priority: String,
    pub category_id: String,
}

impl From<&TodoForm> for FormFields {
    fn from(form: &TodoForm) -> Self {
        Self {
            title: form.title.clone(),
            description: form.description.clone().unwrap_or_default(),
            due_date: form.due_date.clone().unwrap_or_default(),
            priority: form
                .priority
                .clone()
                .unwrap_or_else(|| Priority::default().code().to_string()),
            category_id: form.category_id.clone().unwrap_or_default(),
        }
    }
}

/// `<select>`의 `<option>` 한 개
#[derive(Debug, Clone, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// 우선순위 선택 상자 옵션 (LOW → URGENT 순서)
pub fn priority_options(selected: &str) -> Vec<SelectOption> {
    Priority::ALL
        .into_iter()
        .map(|p| SelectOption {
            value: p.code().to_string(),
            label: p.label().to_string(),
            selected: p.code().eq_ignore_ascii_case(selected),
        })
        .collect()
}

/// 카테고리 선택 상자 옵션 (이름순, "카테고리 없음" 옵션은 템플릿에서 추가)
pub fn category_options(categories: &[Category], selected: &str) -> Vec<SelectOption> {
    categories
        .iter()
        .map(|c| SelectOption {
            value: c.id.to_string(),
            label: c.name.clone(),
            selected: c.id.to_string() == selected,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(title: &str, due_date: Option<&str>) -> TodoForm {
        TodoForm {
            title: title.to_string(),
            due_date: due_date.map(str::to_string),
            ..TodoForm::default()
        }
    }

    fn stored_todo() -> Todo {
        Todo {
            id: 3,
            title: "Original".to_string(),
            description: "Original description".to_string(),
            due_date: NaiveDate::from_ymd_opt(2025, 1, 1),
            completed: true,
            priority: Priority::High,
            category_id: Some(2),
            completed_at: Some("2025-01-02T00:00:00.000Z".to_string()),
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn empty_due_date_means_none() {
        let new = new_todo_from_form(&form("Buy milk", Some(""))).unwrap();

        assert_eq!(new.title, "Buy milk");
        assert_eq!(new.due_date, None);
        assert_eq!(new.priority, Priority::Medium);
        assert_eq!(new.description, "");
        assert_eq!(new.category_id, None);
    }

    #[test]
    fn parses_all_fields() {
        let new = new_todo_from_form(&TodoForm {
            title: "  New Todo ".to_string(),
            description: Some("Description".to_string()),
            due_date: Some("2025-12-31".to_string()),
            priority: Some("urgent".to_string()),
            category_id: Some("4".to_string()),
        })
        .unwrap();

        assert_eq!(new.title, "New Todo");
        assert_eq!(new.due_date, NaiveDate::from_ymd_opt(2025, 12, 31));
        assert_eq!(new.priority, Priority::Urgent);
        assert_eq!(new.category_id, Some(4));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(new_todo_from_form(&form("", None)).is_err());
        assert!(new_todo_from_form(&form("Bad date", Some("31/12/2025"))).is_err());
        assert!(parse_priority(Some("whenever")).is_err());
        assert!(parse_category_id(Some("abc")).is_err());
    }

    #[test]
    fn due_date_must_be_zero_padded() {
        assert_eq!(
            parse_due_date(Some("2025-02-03")).unwrap(),
            NaiveDate::from_ymd_opt(2025, 2, 3)
        );
        assert!(parse_due_date(Some("2025-2-3")).is_err());
        assert!(parse_due_date(Some("2025-02-3")).is_err());
        assert!(parse_due_date(Some("2025-02-30")).is_err());
    }

    #[test]
    fn category_field_states() {
        assert_eq!(parse_category_id(None).unwrap(), None);
        assert_eq!(parse_category_id(Some("")).unwrap(), Some(None));
        assert_eq!(parse_category_id(Some("9")).unwrap(), Some(Some(9)));
    }

    #[test]
    fn apply_form_keeps_unsent_fields_and_completion() {
        let mut todo = stored_todo();

        apply_form(&mut todo, &form("Updated", Some("2026-01-01"))).unwrap();

        assert_eq!(todo.title, "Updated");
        assert_eq!(todo.description, "");
        assert_eq!(todo.due_date, NaiveDate::from_ymd_opt(2026, 1, 1));
        assert_eq!(todo.priority, Priority::High);
        assert_eq!(todo.category_id, Some(2));
        assert!(todo.completed);
        assert!(todo.completed_at.is_some());
    }

    #[test]
    fn apply_form_can_clear_category() {
        let mut todo = stored_todo();
        let cleared = TodoForm {
            category_id: Some(String::new()),
            priority: Some("LOW".to_string()),
            ..form("Updated", None)
        };

        apply_form(&mut todo, &cleared).unwrap();

        assert_eq!(todo.category_id, None);
        assert_eq!(todo.priority, Priority::Low);
        assert_eq!(todo.due_date, None);
    }

    #[test]
    fn failed_apply_leaves_todo_untouched() {
        let mut todo = stored_todo();

        assert!(apply_form(&mut todo, &form("Updated", Some("not-a-date"))).is_err());
        assert_eq!(todo, stored_todo());
    }

    #[test]
    fn select_options_mark_selection() {
        let priorities = priority_options("HIGH");
        assert_eq!(priorities.len(), 4);
        assert_eq!(
            priorities.iter().filter(|o| o.selected).map(|o| o.value.as_str()).collect::<Vec<_>>(),
            vec!["HIGH"]
        );

        let categories = vec![Category {
            id: 5,
            name: "Work".to_string(),
            color: DEFAULT_CATEGORY_COLOR.to_string(),
            created_at: String::new(),
        }];
        assert!(category_options(&categories, "5")[0].selected);
        assert!(!category_options(&categories, "")[0].selected);
    }
}
