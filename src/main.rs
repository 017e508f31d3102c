//! # Todoboard 웹 서버 진입점
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. SQLite 데이터베이스 연결 풀 생성
//! 4. 데이터베이스 마이그레이션 실행
//! 5. 템플릿 로딩
//! 6. 라우터 설정 (+ 정적 파일)
//! 7. HTTP 서버 시작

// ── 모듈 선언 ──
mod config;
mod db;
mod error;
mod models;
mod routes;
mod services;

use anyhow::{Context, Result};
use config::Config;
use routes::AppState;
use std::{path::Path, sync::Arc};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1단계: 환경변수 로딩 ──
    // .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // ── 2단계: 로깅(tracing) 초기화 ──
    // RUST_LOG가 없으면 todoboard, tower_http, axum 모듈을 debug 레벨로 설정
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todoboard=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // ── 3단계: 설정 로딩 ──
    let config = Config::from_env().context("DATABASE_URL must be set")?;
    tracing::info!("Starting Todoboard server on {}", config.bind_addr());

    // ── 4단계: SQLite 연결 풀 + 마이그레이션 ──
    let pool = db::connect(&config.database_url, 5).await?;
    tracing::info!("Running database migrations...");
    db::migrate(&pool).await?;

    // ── 5단계: 템플릿 ──
    // 바이너리에 포함된 템플릿을 시작 시 한 번 파싱합니다. 문법 오류가 있으면 여기서 종료됩니다.
    let templates = services::load_templates()?;

    let state = AppState {
        pool,
        templates: Arc::new(templates),
    };

    // ── 6단계: 라우터 설정 ──
    let mut app = routes::router(state);

    let static_path = Path::new(&config.static_path);
    if static_path.exists() {
        tracing::info!("Serving static files from {}", config.static_path);
        app = app.nest_service("/static", ServeDir::new(static_path));
    } else {
        tracing::warn!("Static directory {} not found, skipping /static", config.static_path);
    }

    let app = app.layer(TraceLayer::new_for_http());

    // ── 7단계: 서버 시작 ──
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
