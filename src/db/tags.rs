//! # 태그 데이터베이스 쿼리 모듈
//!
//! 태그 CRUD 및 할 일-태그 관계를 관리하는 SQL 쿼리 함수들입니다.
//!
//! ## 테이블 구조
//! - `tags`: 태그 엔티티 (id, name, created_at)
//! - `todo_tags`: 할 일과 태그의 다대다(N:M) 관계 테이블, (todo_id, tag_id) UNIQUE

use crate::error::{unique_violation, AppError};
use crate::models::*;
use sqlx::SqlitePool;

/// 모든 태그를 이름순으로 조회합니다.
pub async fn list_tags(pool: &SqlitePool) -> Result<Vec<Tag>, AppError> {
    let tags = sqlx::query_as::<_, Tag>("SELECT id, name, created_at FROM tags ORDER BY name")
        .fetch_all(pool)
        .await?;

    Ok(tags)
}

/// ID로 태그 하나를 조회합니다. 없으면 `Ok(None)`.
pub async fn get_tag(pool: &SqlitePool, id: i64) -> Result<Option<Tag>, AppError> {
    let tag = sqlx::query_as::<_, Tag>("SELECT id, name, created_at FROM tags WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(tag)
}

/// 새 태그를 생성합니다. 같은 이름이 있으면 `AppError::Conflict`.
pub async fn create_tag(pool: &SqlitePool, new: &NewTag) -> Result<Tag, AppError> {
    new.validate()?;

    let result = sqlx::query("INSERT INTO tags (name) VALUES (?)")
        .bind(new.name.trim())
        .execute(pool)
        .await
        .map_err(unique_violation("A tag with this name already exists"))?;

    get_tag(pool, result.last_insert_rowid())
        .await?
        .ok_or_else(|| AppError::Internal("Failed to retrieve created tag".to_string()))
}

/// 태그를 삭제합니다. 이 태그의 `todo_tags` 연결도 같은 트랜잭션에서 삭제합니다.
///
/// # 반환값
/// - `true`: 삭제 성공
/// - `false`: 해당 ID의 태그가 없음
pub async fn delete_tag(pool: &SqlitePool, id: i64) -> Result<bool, AppError> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM todo_tags WHERE tag_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query("DELETE FROM tags WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(result.rows_affected() > 0)
}

/// 할 일에 태그를 연결하고 생성된 연결 레코드를 반환합니다.
///
/// 이미 연결된 쌍이면 조용히 무시하지 않고 `AppError::Conflict`를 반환합니다.
/// 할 일과 태그의 존재 확인은 호출하는 쪽(핸들러)의 책임입니다.
pub async fn add_tag_to_todo(
    pool: &SqlitePool,
    todo_id: i64,
    tag_id: i64,
) -> Result<TodoTag, AppError> {
    let result = sqlx::query("INSERT INTO todo_tags (todo_id, tag_id) VALUES (?, ?)")
        .bind(todo_id)
        .bind(tag_id)
        .execute(pool)
        .await
        .map_err(unique_violation("This tag is already attached to the todo"))?;

    let link = sqlx::query_as::<_, TodoTag>(
        "SELECT id, todo_id, tag_id, created_at FROM todo_tags WHERE id = ?",
    )
    .bind(result.last_insert_rowid())
    .fetch_one(pool)
    .await?;

    Ok(link)
}

/// 할 일에서 태그 연결을 해제합니다.
///
/// # 반환값
/// - `true`: 연결 해제 성공
/// - `false`: 해당 연결이 존재하지 않음
pub async fn remove_tag_from_todo(
    pool: &SqlitePool,
    todo_id: i64,
    tag_id: i64,
) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM todo_tags WHERE todo_id = ? AND tag_id = ?")
        .bind(todo_id)
        .bind(tag_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// 특정 할 일에 연결된 태그 목록 (이름순)
///
/// ```sql
/// tags ←── todo_tags ──→ todos
///  (1)       (N:M)        (1)
/// ```
pub async fn get_todo_tags(pool: &SqlitePool, todo_id: i64) -> Result<Vec<Tag>, AppError> {
    let tags = sqlx::query_as::<_, Tag>(
        r#"
        SELECT t.id, t.name, t.created_at
        FROM tags t
        JOIN todo_tags tt ON tt.tag_id = t.id
        WHERE tt.todo_id = ?
        ORDER BY t.name
        "#,
    )
    .bind(todo_id)
    .fetch_all(pool)
    .await?;

    Ok(tags)
}

/// 모든 할 일-태그 연결을 태그 이름순으로 조회합니다.
/// 목록 화면에서 할 일마다 태그를 붙일 때 사용합니다.
pub async fn list_todo_tags(pool: &SqlitePool) -> Result<Vec<TodoTag>, AppError> {
    let links = sqlx::query_as::<_, TodoTag>(
        r#"
        SELECT tt.id, tt.todo_id, tt.tag_id, tt.created_at
        FROM todo_tags tt
        JOIN tags t ON t.id = tt.tag_id
        ORDER BY t.name, tt.id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(links)
}
