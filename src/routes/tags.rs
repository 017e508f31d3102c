//! # 태그 라우트 핸들러
//!
//! ## 엔드포인트
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | GET | /tags | `list_tags` | 전체 태그 목록 + 생성 폼 |
//! | POST | /tags | `create_tag` | 새 태그 생성 |
//! | GET | /tags/{id}/delete | `delete_tag` | 태그 삭제 (할 일과의 연결도 삭제) |
//!
//! 할 일에 태그를 붙이고 떼는 핸들러는 `routes::todos`에 있습니다.

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

const TAGS_PATH: &str = "/tags";

/// `GET /tags` — 전체 태그 목록 (이름순)
pub async fn list_tags(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    render_tags(&state, &TagForm::default(), None).await
}

/// `POST /tags` + `name=...` — 새 태그를 생성합니다.
///
/// 같은 이름의 태그가 있으면 409와 함께 목록 화면을 다시 보여줍니다.
pub async fn create_tag(
    State(state): State<AppState>,
    Form(form): Form<TagForm>,
) -> Result<Response, AppError> {
    match db::create_tag(&state.pool, &NewTag::named(form.name.trim())).await {
        Ok(tag) => {
            tracing::info!(tag_id = tag.id, name = %tag.name, "tag created");
            Ok(Redirect::to(TAGS_PATH).into_response())
        }
        Err(err) if err.is_user_error() => {
            let status = err.status_code();
            let page = render_tags(&state, &form, Some(err.to_string())).await?;
            Ok((status, page).into_response())
        }
        Err(err) => Err(err),
    }
}

/// `GET /tags/{id}/delete` — 태그를 삭제합니다. 없는 ID면 404.
pub async fn delete_tag(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    let deleted = db::delete_tag(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::NotFound);
    }
    tracing::info!(tag_id = id, "tag deleted");
    Ok(Redirect::to(TAGS_PATH))
}

async fn render_tags(
    state: &AppState,
    form: &TagForm,
    error: Option<String>,
) -> Result<Html<String>, AppError> {
    let tags = db::list_tags(&state.pool).await?;

    let mut context = Context::new();
    context.insert("tags", &tags);
    context.insert("form", form);
    context.insert("error", &error);
    services::render(&state.templates, "tags.html", &context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn create_then_duplicate() {
        let (app, pool) = test_app().await;

        let response = send_raw(&app, post_form("/tags", "name=urgent")).await;
        assert!(response.status().is_redirection());
        assert_eq!(location(&response), "/tags");

        let (status, body) = send(&app, post_form("/tags", "name=urgent")).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body.contains("already exists"));
        assert_eq!(db::list_tags(&pool).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let (app, pool) = test_app().await;

        let (status, body) = send(&app, post_form("/tags", "name=+++")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("Tag name is required"));
        assert!(db::list_tags(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_and_delete() {
        let (app, pool) = test_app().await;
        let tag = db::create_tag(&pool, &NewTag::named("errand")).await.unwrap();

        let (status, body) = send(&app, get("/tags")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("#errand"));

        let response = send_raw(&app, get(&format!("/tags/{}/delete", tag.id))).await;
        assert!(response.status().is_redirection());
        assert!(db::get_tag(&pool, tag.id).await.unwrap().is_none());

        let (status, _) = send(&app, get(&format!("/tags/{}/delete", tag.id))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
