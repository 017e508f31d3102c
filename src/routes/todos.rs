//! # 할 일(Todo) 라우트 핸들러
//!
//! 할 일의 목록/생성/수정/삭제/완료 토글을 처리하는 HTTP 핸들러 함수들입니다.
//! 화면은 서버에서 Tera 템플릿으로 렌더링하고, 변경 요청은 성공 시 목록으로 리다이렉트합니다.
//!
//! ## 엔드포인트
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | GET | / | `list_todos` | 할 일 목록 |
//! | GET | /create | `create_todo_form` | 빈 생성 폼 |
//! | POST | /create | `create_todo` | 할 일 생성 |
//! | GET | /edit/{id} | `edit_todo_form` | 기존 값으로 채운 수정 폼 |
//! | POST | /edit/{id} | `edit_todo` | 할 일 수정 |
//! | GET | /delete/{id} | `delete_todo` | 할 일 삭제 |
//! | GET | /toggle/{id} | `toggle_todo` | 완료 여부 뒤집기 |
//! | GET | /complete/{id} | `complete_todo` | 완료 처리 (완료 시각 기록) |
//! | GET | /incomplete/{id} | `incomplete_todo` | 미완료로 되돌리기 |
//! | POST | /todos/{id}/tags | `attach_tag` | 태그 연결 |
//! | GET | /todos/{id}/tags/{tag_id}/remove | `detach_tag` | 태그 연결 해제 |
//!
//! 검증 실패나 중복 연결은 폼을 다시 그리면서 메시지를 보여줍니다 (400 / 409).

use crate::{
    db,
    error::AppError,
    models::*,
    services::{self, FormFields},
};
use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tera::{Context, Tera};

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// SqlitePool과 Arc<Tera>는 clone해도 내부 자원을 공유하므로 요청마다 복제해도 가볍습니다.
#[derive(Clone)]
pub struct AppState {
    /// SQLite 연결 풀
    pub pool: SqlitePool,
    /// 시작 시 한 번 파싱해 둔 템플릿
    pub templates: Arc<Tera>,
}

/// 성공한 변경 요청 뒤에 돌아갈 목록 경로
const LIST_PATH: &str = "/";

/// `GET /` — 전체 할 일 목록 (최신 생성순)
pub async fn list_todos(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let todos = db::list_todos(&state.pool).await?;
    let categories = db::list_categories(&state.pool).await?;
    let tags = db::list_tags(&state.pool).await?;
    let links = db::list_todo_tags(&state.pool).await?;

    let items = services::build_items(todos, &categories, &tags, &links);

    let mut context = Context::new();
    context.insert("todos", &items);
    services::render(&state.templates, "todo_list.html", &context)
}

/// `GET /create` — 빈 생성 폼
pub async fn create_todo_form(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    render_todo_form(&state, None, &TodoForm::default(), None).await
}

/// `POST /create` — 새 할 일을 만들고 목록으로 리다이렉트합니다.
///
/// `Form(form)`: `application/x-www-form-urlencoded` 본문을 `TodoForm`으로 파싱합니다.
pub async fn create_todo(
    State(state): State<AppState>,
    Form(form): Form<TodoForm>,
) -> Result<Response, AppError> {
    let result = match services::new_todo_from_form(&form) {
        Ok(new) => db::create_todo(&state.pool, &new).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(todo) => {
            tracing::info!(todo_id = todo.id, "todo created");
            Ok(Redirect::to(LIST_PATH).into_response())
        }
        Err(err) if err.is_user_error() => form_error(&state, None, &form, err).await,
        Err(err) => Err(err),
    }
}

/// `GET /edit/{id}` — 기존 값으로 채운 수정 폼. 없는 ID면 404.
pub async fn edit_todo_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let todo = db::get_todo(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;

    render_todo_form(&state, Some(&todo), &TodoForm::from(&todo), None).await
}

/// `POST /edit/{id}` — 할 일을 수정하고 목록으로 리다이렉트합니다.
///
/// 제목/설명/마감일은 폼 값으로 바뀌고, 완료 상태는 그대로 유지됩니다.
pub async fn edit_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<TodoForm>,
) -> Result<Response, AppError> {
    let stored = db::get_todo(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut todo = stored.clone();
    let result = match services::apply_form(&mut todo, &form) {
        Ok(()) => db::update_todo(&state.pool, &todo).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(Some(saved)) => {
            tracing::info!(todo_id = saved.id, "todo updated");
            Ok(Redirect::to(LIST_PATH).into_response())
        }
        // 조회와 저장 사이에 다른 요청이 삭제한 경우
        Ok(None) => Err(AppError::NotFound),
        Err(err) if err.is_user_error() => form_error(&state, Some(&stored), &form, err).await,
        Err(err) => Err(err),
    }
}

/// `GET /delete/{id}` — 할 일을 삭제합니다 (연결된 태그 관계도 함께 삭제).
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    if !db::delete_todo(&state.pool, id).await? {
        return Err(AppError::NotFound);
    }
    tracing::info!(todo_id = id, "todo deleted");
    Ok(Redirect::to(LIST_PATH))
}

/// `GET /toggle/{id}` — 완료 여부를 뒤집습니다.
///
/// 완료 시각(completed_at)은 이 경로에서 기록하지 않습니다.
/// 완료 시각이 필요하면 `/complete/{id}`를 사용합니다.
pub async fn toggle_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    let todo = db::toggle_todo(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;
    tracing::debug!(todo_id = id, completed = todo.completed, "todo toggled");
    Ok(Redirect::to(LIST_PATH))
}

/// `GET /complete/{id}` — 완료 처리하고 완료 시각을 기록합니다.
pub async fn complete_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    db::mark_todo_complete(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Redirect::to(LIST_PATH))
}

/// `GET /incomplete/{id}` — 미완료로 되돌리고 완료 시각을 지웁니다.
pub async fn incomplete_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    db::mark_todo_incomplete(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Redirect::to(LIST_PATH))
}

/// `POST /todos/{id}/tags` + `tag_id=...` — 할 일에 태그를 연결합니다.
///
/// 할 일과 태그가 모두 있어야 하며(없으면 404),
/// 태그 ID가 숫자가 아니면 400, 이미 연결된 태그면 409와 함께 수정 폼을 다시 보여줍니다.
pub async fn attach_tag(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(req): Form<AttachTagForm>,
) -> Result<Response, AppError> {
    let todo = db::get_todo(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;
    let tag_id = match req.tag_id() {
        Ok(tag_id) => tag_id,
        Err(err) => return form_error(&state, Some(&todo), &TodoForm::from(&todo), err).await,
    };
    let tag = db::get_tag(&state.pool, tag_id)
        .await?
        .ok_or(AppError::NotFound)?;

    match db::add_tag_to_todo(&state.pool, todo.id, tag.id).await {
        Ok(link) => {
            tracing::info!(
                todo_id = link.todo_id,
                tag_id = link.tag_id,
                "tag attached: {}",
                TodoTag::label(&todo.title, &tag.name)
            );
            Ok(Redirect::to(&edit_path(todo.id)).into_response())
        }
        Err(err) if err.is_user_error() => {
            form_error(&state, Some(&todo), &TodoForm::from(&todo), err).await
        }
        Err(err) => Err(err),
    }
}

/// `GET /todos/{id}/tags/{tag_id}/remove` — 태그 연결을 해제하고 수정 폼으로 돌아갑니다.
///
/// `Path((todo_id, tag_id))`: 경로 변수가 2개일 때 URL에 나타난 순서대로 튜플로 추출합니다.
pub async fn detach_tag(
    State(state): State<AppState>,
    Path((todo_id, tag_id)): Path<(i64, i64)>,
) -> Result<Redirect, AppError> {
    if !db::remove_tag_from_todo(&state.pool, todo_id, tag_id).await? {
        return Err(AppError::NotFound);
    }
    Ok(Redirect::to(&edit_path(todo_id)))
}

fn edit_path(id: i64) -> String {
    format!("/edit/{}", id)
}

/// 생성/수정 폼을 렌더링합니다.
///
/// - `todo`: 수정 중인 할 일 (생성 폼이면 None). 있으면 태그 관리 영역도 함께 그립니다.
/// - `form`: 입력란에 채울 값
/// - `error`: 폼 위에 보여줄 에러 메시지
async fn render_todo_form(
    state: &AppState,
    todo: Option<&Todo>,
    form: &TodoForm,
    error: Option<String>,
) -> Result<Html<String>, AppError> {
    let categories = db::list_categories(&state.pool).await?;

    let (tags, available_tags) = match todo {
        Some(todo) => {
            let attached = db::get_todo_tags(&state.pool, todo.id).await?;
            let available: Vec<Tag> = db::list_tags(&state.pool)
                .await?
                .into_iter()
                .filter(|tag| !attached.iter().any(|a| a.id == tag.id))
                .collect();
            (attached, available)
        }
        None => (Vec::new(), Vec::new()),
    };

    let fields = FormFields::from(form);

    let mut context = Context::new();
    context.insert("todo", &todo);
    context.insert("priorities", &services::priority_options(&fields.priority));
    context.insert(
        "categories",
        &services::category_options(&categories, &fields.category_id),
    );
    context.insert("form", &fields);
    context.insert("tags", &tags);
    context.insert("available_tags", &available_tags);
    context.insert("error", &error);
    services::render(&state.templates, "todo_form.html", &context)
}

/// 사용자 입력 에러를 폼 화면으로 되돌려 보여줍니다 (에러에 맞는 상태 코드 사용).
async fn form_error(
    state: &AppState,
    todo: Option<&Todo>,
    form: &TodoForm,
    err: AppError,
) -> Result<Response, AppError> {
    tracing::debug!(error = %err, "rejected todo form");
    let status = err.status_code();
    let page = render_todo_form(state, todo, form, Some(err.to_string())).await?;
    Ok((status, page).into_response())
}
