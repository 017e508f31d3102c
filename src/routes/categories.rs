//! # 카테고리 라우트 핸들러
//!
//! ## 엔드포인트
//! - `GET  /categories`             → 카테고리 목록 + 생성 폼
//! - `POST /categories`             → 카테고리 생성
//! - `GET  /categories/{id}`        → 카테고리에 속한 할 일 목록
//! - `GET  /categories/{id}/delete` → 카테고리 삭제 (할 일은 남고 카테고리만 비워짐)

use crate::{
    db,
    error::AppError,
    models::*,
    routes::todos::AppState,
    services,
};
use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use tera::Context;

const CATEGORIES_PATH: &str = "/categories";

/// `GET /categories` — 전체 카테고리 목록 (이름순)
pub async fn list_categories(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let form = CategoryForm {
        color: Some(DEFAULT_CATEGORY_COLOR.to_string()),
        ..CategoryForm::default()
    };
    render_categories(&state, &form, None).await
}

/// `POST /categories` — 새 카테고리를 만듭니다.
///
/// 이름이 비었거나 중복이면 목록 화면을 에러 메시지와 함께 다시 보여줍니다.
pub async fn create_category(
    State(state): State<AppState>,
    Form(form): Form<CategoryForm>,
) -> Result<Response, AppError> {
    let new = NewCategory::from(form.clone());

    match db::create_category(&state.pool, &new).await {
        Ok(category) => {
            tracing::info!(category_id = category.id, name = %category.name, "category created");
            Ok(Redirect::to(CATEGORIES_PATH).into_response())
        }
        Err(err) if err.is_user_error() => {
            let status = err.status_code();
            let page = render_categories(&state, &form, Some(err.to_string())).await?;
            Ok((status, page).into_response())
        }
        Err(err) => Err(err),
    }
}

/// `GET /categories/{id}` — 카테고리 상세: 이 카테고리에 속한 할 일들
pub async fn show_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let category = db::get_category(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;
    let todos = db::list_category_todos(&state.pool, id).await?;
    let tags = db::list_tags(&state.pool).await?;
    let links = db::list_todo_tags(&state.pool).await?;

    let items = services::build_items(todos, std::slice::from_ref(&category), &tags, &links);

    let mut context = Context::new();
    context.insert("category", &category);
    context.insert("todos", &items);
    services::render(&state.templates, "category_detail.html", &context)
}

/// `GET /categories/{id}/delete` — 카테고리를 삭제합니다.
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    if !db::delete_category(&state.pool, id).await? {
        return Err(AppError::NotFound);
    }
    tracing::info!(category_id = id, "category deleted");
    Ok(Redirect::to(CATEGORIES_PATH))
}

async fn render_categories(
    state: &AppState,
    form: &CategoryForm,
    error: Option<String>,
) -> Result<Html<String>, AppError> {
    let categories = db::list_categories(&state.pool).await?;

    let mut context = Context::new();
    context.insert("categories", &categories);
    context.insert(
        "form",
        &serde_json::json!({
            "name": form.name,
            "color": form.color.as_deref().unwrap_or(DEFAULT_CATEGORY_COLOR),
        }),
    );
    context.insert("error", &error);
    services::render(&state.templates, "categories.html", &context)
}
