//! # 카테고리 데이터베이스 쿼리 모듈
//!
//! `categories` 테이블 CRUD 함수들입니다.
//! 카테고리를 삭제해도 할 일은 지워지지 않고, 할 일의 `category_id`만 NULL이 됩니다.

use crate::error::{unique_violation, AppError};
use crate::models::*;
use sqlx::SqlitePool;

/// 모든 카테고리를 이름순으로 조회합니다.
pub async fn list_categories(pool: &SqlitePool) -> Result<Vec<Category>, AppError> {
    let categories = sqlx::query_as::<_, Category>(
        "SELECT id, name, color, created_at FROM categories ORDER BY name",
    )
    .fetch_all(pool)
    .await?;

    Ok(categories)
}

/// ID로 카테고리 하나를 조회합니다. 없으면 `Ok(None)`.
pub async fn get_category(pool: &SqlitePool, id: i64) -> Result<Option<Category>, AppError> {
    let category = sqlx::query_as::<_, Category>(
        "SELECT id, name, color, created_at FROM categories WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(category)
}

/// 새 카테고리를 생성합니다.
///
/// 같은 이름이 이미 있으면 `AppError::Conflict`를 반환합니다.
pub async fn create_category(pool: &SqlitePool, new: &NewCategory) -> Result<Category, AppError> {
    new.validate()?;

    let result = sqlx::query("INSERT INTO categories (name, color) VALUES (?, ?)")
        .bind(new.name.trim())
        .bind(&new.color)
        .execute(pool)
        .await
        .map_err(unique_violation("A category with this name already exists"))?;

    get_category(pool, result.last_insert_rowid())
        .await?
        .ok_or_else(|| AppError::Internal("Failed to retrieve created category".to_string()))
}

/// 카테고리를 삭제합니다.
///
/// 할 일의 카테고리를 먼저 비운 뒤 같은 트랜잭션에서 카테고리를 삭제합니다.
///
/// # 반환값
/// - `true`: 삭제 성공
/// - `false`: 해당 ID의 카테고리가 없음
pub async fn delete_category(pool: &SqlitePool, id: i64) -> Result<bool, AppError> {
    let mut tx = pool.begin().await?;

    let cleared = sqlx::query("UPDATE todos SET category_id = NULL WHERE category_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query("DELETE FROM categories WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    if result.rows_affected() > 0 {
        tracing::debug!(
            category_id = id,
            todos_cleared = cleared.rows_affected(),
            "category deleted"
        );
    }
    Ok(result.rows_affected() > 0)
}
