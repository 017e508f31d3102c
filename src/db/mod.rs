//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 데이터베이스와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 라우트 핸들러(routes/)는 이 모듈의 함수만 호출하고 SQL을 직접 다루지 않습니다.
//! 모든 함수는 `&SqlitePool`과 평범한 구조체를 받아 평범한 구조체를 돌려줍니다.
//!
//! 각 하위 모듈:
//! - `categories`: 카테고리 CRUD (삭제 시 할 일의 카테고리를 비움)
//! - `tags`: 태그 CRUD 및 할 일-태그 연결
//! - `todos`: 할 일 CRUD, 완료/미완료/토글

pub mod categories;
pub mod tags;
pub mod todos;

// `crate::db::list_todos`처럼 바로 접근할 수 있게 재공개합니다.
pub use categories::*;
pub use tags::*;
pub use todos::*;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// SQLite 연결 풀을 만듭니다.
///
/// - `create_if_missing(true)`: DB 파일이 없으면 새로 생성
/// - `foreign_keys(true)`: 연결마다 `PRAGMA foreign_keys = ON` (외래키 동작 활성화)
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// ./migrations 폴더의 SQL 파일 중 아직 적용되지 않은 것을 순서대로 실행합니다.
/// `sqlx::migrate!`는 컴파일 타임에 SQL 파일을 바이너리에 포함시킵니다.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// DB 연결이 살아 있는지 확인합니다 (헬스체크용).
pub async fn ping(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// 테스트용 인메모리 DB 풀
///
/// `sqlite::memory:`는 연결마다 별도의 DB가 생기므로 연결을 1개로 고정하고,
/// 그 연결이 풀에서 정리되지 않도록 유휴/수명 제한을 끕니다.
#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .unwrap();
    migrate(&pool).await.unwrap();
    pool
}
