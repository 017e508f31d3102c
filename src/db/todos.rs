//! # 할 일 데이터베이스 쿼리 모듈
//!
//! `todos` 테이블에 대한 CRUD 쿼리와 완료 상태 변경 함수들입니다.
//!
//! ## 완료 상태를 바꾸는 세 가지 경로
//! - `mark_todo_complete`: completed = true, completed_at = 현재 시각
//! - `mark_todo_incomplete`: completed = false, completed_at = NULL
//! - `toggle_todo`: completed만 뒤집고 completed_at은 건드리지 않음

use crate::error::AppError;
use crate::models::*;
use sqlx::SqlitePool;

/// 카테고리 외래키 위반(존재하지 않는 카테고리)을 검증 에러로 바꿉니다.
fn unknown_category(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            AppError::Validation("Unknown category".to_string())
        }
        _ => AppError::Database(err),
    }
}

/// 모든 할 일을 최신 생성순으로 조회합니다.
///
/// `created_at`은 밀리초 단위이므로 같은 순간에 만들어진 행은 id 내림차순으로 정렬합니다.
pub async fn list_todos(pool: &SqlitePool) -> Result<Vec<Todo>, AppError> {
    let todos = sqlx::query_as::<_, Todo>(
        r#"
        SELECT id, title, description, due_date, completed, priority, category_id,
               completed_at, created_at, updated_at
        FROM todos
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(todos)
}

/// ID로 할 일 하나를 조회합니다.
///
/// # 반환값
/// - `Ok(Some(Todo))`: 찾은 경우
/// - `Ok(None)`: 없는 경우 (핸들러에서 404로 변환)
pub async fn get_todo(pool: &SqlitePool, id: i64) -> Result<Option<Todo>, AppError> {
    let todo = sqlx::query_as::<_, Todo>(
        r#"
        SELECT id, title, description, due_date, completed, priority, category_id,
               completed_at, created_at, updated_at
        FROM todos
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(todo)
}

/// 특정 카테고리에 속한 할 일 목록 (최신 생성순)
pub async fn list_category_todos(
    pool: &SqlitePool,
    category_id: i64,
) -> Result<Vec<Todo>, AppError> {
    let todos = sqlx::query_as::<_, Todo>(
        r#"
        SELECT id, title, description, due_date, completed, priority, category_id,
               completed_at, created_at, updated_at
        FROM todos
        WHERE category_id = ?
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(category_id)
    .fetch_all(pool)
    .await?;

    Ok(todos)
}

/// 새 할 일을 생성하고 생성된 행을 반환합니다.
///
/// 제목을 먼저 검증하므로 빈 제목은 DB까지 가지 않습니다.
/// completed는 false, completed_at은 NULL, 타임스탬프는 DB 기본값으로 채워집니다.
pub async fn create_todo(pool: &SqlitePool, new: &NewTodo) -> Result<Todo, AppError> {
    new.validate()?;

    let result = sqlx::query(
        r#"
        INSERT INTO todos (title, description, due_date, priority, category_id)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&new.title)
    .bind(&new.description)
    .bind(new.due_date) // Option<NaiveDate>: None이면 NULL
    .bind(new.priority)
    .bind(new.category_id)
    .execute(pool)
    .await
    .map_err(unknown_category)?;

    // last_insert_rowid(): 방금 INSERT한 행의 INTEGER PRIMARY KEY
    get_todo(pool, result.last_insert_rowid())
        .await?
        .ok_or_else(|| AppError::Internal("Failed to retrieve created todo".to_string()))
}

/// 할 일의 변경 가능한 모든 필드를 저장하고 `updated_at`을 갱신합니다.
///
/// `todo.id`, `created_at`, `updated_at` 값은 무시됩니다.
///
/// # 반환값
/// - `Ok(Some(Todo))`: 저장 후 최신 상태
/// - `Ok(None)`: 해당 ID의 할 일이 없음
pub async fn update_todo(pool: &SqlitePool, todo: &Todo) -> Result<Option<Todo>, AppError> {
    validate_title(&todo.title)?;

    let result = sqlx::query(
        r#"
        UPDATE todos
        SET title = ?, description = ?, due_date = ?, completed = ?, priority = ?,
            category_id = ?, completed_at = ?,
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE id = ?
        "#,
    )
    .bind(&todo.title)
    .bind(&todo.description)
    .bind(todo.due_date)
    .bind(todo.completed)
    .bind(todo.priority)
    .bind(todo.category_id)
    .bind(&todo.completed_at)
    .bind(todo.id)
    .execute(pool)
    .await
    .map_err(unknown_category)?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }
    get_todo(pool, todo.id).await
}

/// 할 일을 완료 처리합니다: completed = true, completed_at = 현재 시각
pub async fn mark_todo_complete(pool: &SqlitePool, id: i64) -> Result<Option<Todo>, AppError> {
    let result = sqlx::query(
        r#"
        UPDATE todos
        SET completed = 1,
            completed_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now'),
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE id = ?
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }
    get_todo(pool, id).await
}

/// 할 일을 미완료로 되돌립니다: completed = false, completed_at = NULL
pub async fn mark_todo_incomplete(pool: &SqlitePool, id: i64) -> Result<Option<Todo>, AppError> {
    let result = sqlx::query(
        r#"
        UPDATE todos
        SET completed = 0,
            completed_at = NULL,
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE id = ?
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }
    get_todo(pool, id).await
}

/// 완료 여부를 뒤집습니다.
///
/// `mark_todo_complete`와 달리 completed_at은 설정하지도 지우지도 않습니다.
/// 목록 화면의 체크 버튼이 이 경로를 사용합니다.
pub async fn toggle_todo(pool: &SqlitePool, id: i64) -> Result<Option<Todo>, AppError> {
    // SQLite에서 NOT 0 = 1, NOT 1 = 0
    let result = sqlx::query(
        r#"
        UPDATE todos
        SET completed = NOT completed,
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE id = ?
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }
    get_todo(pool, id).await
}

/// 할 일을 삭제합니다. 연결된 `todo_tags` 행도 같은 트랜잭션에서 함께 삭제합니다.
///
/// # 반환값
/// - `true`: 삭제 성공
/// - `false`: 해당 ID의 할 일이 없음
pub async fn delete_todo(pool: &SqlitePool, id: i64) -> Result<bool, AppError> {
    // pool.begin(): 트랜잭션 시작. commit() 전에 에러로 빠져나가면 drop 시 자동 롤백됩니다.
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM todo_tags WHERE todo_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query("DELETE FROM todos WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(result.rows_affected() > 0)
}
