use sqlx::{PgPool, Result};
use uuid::Uuid;

use super::model::Task;

/// Escapes LIKE metacharacters so user input only matches literally, then
/// wraps it for substring search. An empty query matches every title.
fn search_pattern(q: &str) -> String {
    if q.is_empty() {
        return "%".to_string();
    }

    let escaped = q
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");

    format!("%{}%", escaped)
}

pub async fn count_tasks(pool: &PgPool, user_id: Uuid, q: &str) -> Result<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tasks WHERE user_id = $1 AND title ILIKE $2")
        .bind(user_id)
        .bind(search_pattern(q))
        .fetch_one(pool)
        .await
}

pub async fn list_tasks(
    pool: &PgPool,
    user_id: Uuid,
    q: &str,
    limit: i64,
    offset: i64,
) -> Result<Vec<Task>> {
    sqlx::query_as::<_, Task>(
        r#"
        SELECT id, user_id, title, done, created_at
        FROM tasks
        WHERE user_id = $1 AND title ILIKE $2
        ORDER BY done ASC, created_at DESC
        LIMIT $3 OFFSET $4
        "#,
    )
    .bind(user_id)
    .bind(search_pattern(q))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn insert_task(pool: &PgPool, user_id: Uuid, title: &str) -> Result<Task> {
    sqlx::query_as::<_, Task>(
        r#"
        INSERT INTO tasks (user_id, title)
        VALUES ($1, $2)
        RETURNING id, user_id, title, done, created_at
        "#,
    )
    .bind(user_id)
    .bind(title)
    .fetch_one(pool)
    .await
}

pub async fn find_task(pool: &PgPool, id: i64) -> Result<Option<Task>> {
    sqlx::query_as::<_, Task>("SELECT id, user_id, title, done, created_at FROM tasks WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// The store computes the negation; concurrent toggles serialize on the row.
pub async fn toggle_task(pool: &PgPool, id: i64, user_id: Uuid) -> Result<Option<Task>> {
    sqlx::query_as::<_, Task>(
        r#"
        UPDATE tasks
        SET done = NOT done
        WHERE id = $1 AND user_id = $2
        RETURNING id, user_id, title, done, created_at
        "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

pub async fn delete_task(pool: &PgPool, id: i64, user_id: Uuid) -> Result<u64> {
    let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::search_pattern;

    #[test]
    fn empty_query_matches_everything() {
        assert_eq!(search_pattern(""), "%");
    }

    #[test]
    fn plain_text_is_wrapped_for_substring_match() {
        assert_eq!(search_pattern("milk"), "%milk%");
    }

    #[test]
    fn like_metacharacters_are_escaped() {
        assert_eq!(search_pattern("100%"), "%100\\%%");
        assert_eq!(search_pattern("a_b"), "%a\\_b%");
        assert_eq!(search_pattern("back\\slash"), "%back\\\\slash%");
    }
}
