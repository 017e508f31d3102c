//! # 목록 화면 조립 서비스
//!
//! DB에서 따로 읽어온 할 일, 카테고리, 태그, 연결 레코드를 합쳐
//! 목록 화면용 `TodoItem`을 만듭니다. 기한 초과 여부도 여기서 계산합니다.

use crate::models::*;
use std::collections::HashMap;

/// 할 일 목록에 카테고리와 태그를 붙입니다.
///
/// - 할 일의 순서는 입력 순서를 그대로 유지합니다 (최신 생성순).
/// - 태그 순서는 `links`의 순서(태그 이름순)를 따릅니다.
/// - 기한 초과 여부는 로컬 시간대의 오늘 날짜 기준입니다 (`Todo::is_overdue`).
pub fn build_items(
    todos: Vec<Todo>,
    categories: &[Category],
    tags: &[Tag],
    links: &[TodoTag],
) -> Vec<TodoItem> {
    let categories: HashMap<i64, &Category> = categories.iter().map(|c| (c.id, c)).collect();
    let tags: HashMap<i64, &Tag> = tags.iter().map(|t| (t.id, t)).collect();

    let mut tags_by_todo: HashMap<i64, Vec<Tag>> = HashMap::new();
    for link in links {
        if let Some(tag) = tags.get(&link.tag_id) {
            tags_by_todo
                .entry(link.todo_id)
                .or_default()
                .push((*tag).clone());
        }
    }

    todos
        .into_iter()
        .map(|todo| TodoItem {
            is_overdue: todo.is_overdue(),
            priority_label: todo.priority.label(),
            category: todo
                .category_id
                .and_then(|id| categories.get(&id))
                .map(|c| (*c).clone()),
            tags: tags_by_todo.remove(&todo.id).unwrap_or_default(),
            todo,
        })
        .collect()
}
