//! # HTML 템플릿 렌더링 서비스
//!
//! Tera 템플릿을 `include_str!`로 바이너리에 포함시켜 두고 시작 시 한 번 파싱합니다.
//! 이름이 `.html`로 끝나는 템플릿은 Tera가 자동으로 HTML 이스케이프를 적용합니다.

use crate::error::AppError;
use axum::response::Html;
use tera::{Context, Tera};

/// (템플릿 이름, 내용) 목록
const TEMPLATES: [(&str, &str); 6] = [
    ("base.html", include_str!("../../templates/base.html")),
    ("todo_list.html", include_str!("../../templates/todo_list.html")),
    ("todo_form.html", include_str!("../../templates/todo_form.html")),
    ("categories.html", include_str!("../../templates/categories.html")),
    (
        "category_detail.html",
        include_str!("../../templates/category_detail.html"),
    ),
    ("tags.html", include_str!("../../templates/tags.html")),
];

/// 모든 템플릿을 등록한 Tera 인스턴스를 만듭니다.
///
/// `add_raw_templates`는 전부 추가한 뒤 상속 관계(`{% extends %}`)를 한 번에 해석하므로
/// 등록 순서는 상관없습니다. 문법 오류가 있으면 서버 시작 시점에 실패합니다.
pub fn load_templates() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_templates(TEMPLATES)?;
    Ok(tera)
}

/// 템플릿을 렌더링해 HTML 응답 본문으로 감쌉니다.
pub fn render(tera: &Tera, name: &str, context: &Context) -> Result<Html<String>, AppError> {
    let html = tera.render(name, context)?;
    Ok(Html(html))
}
