use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::error::ApiError;
use crate::routes::middleware_auth::AuthUser;
use crate::state::AppState;

use super::dto::{CreateTask, ListTasksParams, TaskPage};
use super::model::Task;
use super::queries;

const TITLE_MAX_CHARS: usize = 200;

fn validate_title(raw: Option<&str>) -> Result<String, ApiError> {
    let trimmed = raw.unwrap_or_default().trim();

    if trimmed.is_empty() {
        return Err(ApiError::validation(
            "Title is required and cannot be empty",
        ));
    }

    if trimmed.chars().count() > TITLE_MAX_CHARS {
        return Err(ApiError::validation(
            "Title must be between 1-200 characters",
        ));
    }

    Ok(trimmed.to_string())
}

fn parse_task_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::validation("Invalid task ID"))
}

pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<ListTasksParams>,
) -> Result<Json<TaskPage>, ApiError> {
    let window = params.window();
    let q = params.q.as_deref().unwrap_or_default();

    let total = queries::count_tasks(&state.db, user.id, q).await?;
    let items =
        queries::list_tasks(&state.db, user.id, q, window.page_size, window.offset()).await?;

    Ok(Json(TaskPage {
        items,
        page: window.page,
        page_size: window.page_size,
        total,
        total_pages: window.total_pages(total),
    }))
}

pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<CreateTask>,
) -> Result<impl IntoResponse, ApiError> {
    let title = validate_title(body.title.as_deref())?;

    let task = queries::insert_task(&state.db, user.id, &title).await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// Serves both `PATCH /api/tasks/{id}` and `PATCH /api/tasks/{id}/toggle`;
/// the stored value is always negated, any request body is ignored.
pub async fn toggle(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Task>, ApiError> {
    let id = parse_task_id(&id)?;

    let existing = queries::find_task(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound)?;

    if existing.user_id != user.id {
        return Err(ApiError::Forbidden);
    }

    let task = queries::toggle_task(&state.db, id, user.id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(task))
}

/// Existence and ownership are checked by the delete statement itself; a
/// foreign task is reported the same as a missing one.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = parse_task_id(&id)?;

    let deleted = queries::delete_task(&state.db, id, user.id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound);
    }

    Ok(Json(
        serde_json::json!({ "message": "Task deleted successfully" }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_are_trimmed() {
        assert_eq!(validate_title(Some("  Buy milk  ")).unwrap(), "Buy milk");
    }

    #[test]
    fn missing_or_blank_titles_are_rejected() {
        for raw in [None, Some(""), Some("   "), Some("\t\n")] {
            let err = validate_title(raw).unwrap_err();
            assert_eq!(err.to_string(), "Title is required and cannot be empty");
        }
    }

    #[test]
    fn two_hundred_chars_is_the_ceiling() {
        let max = "x".repeat(200);
        assert_eq!(validate_title(Some(&max)).unwrap(), max);

        let over = "x".repeat(201);
        let err = validate_title(Some(&over)).unwrap_err();
        assert_eq!(err.to_string(), "Title must be between 1-200 characters");
    }

    #[test]
    fn surrounding_whitespace_does_not_count_toward_the_limit() {
        let padded = format!("  {}  ", "x".repeat(200));
        assert_eq!(validate_title(Some(&padded)).unwrap(), "x".repeat(200));
    }

    #[test]
    fn task_ids_must_be_integers() {
        assert_eq!(parse_task_id("42").unwrap(), 42);
        assert!(parse_task_id("abc").is_err());
        assert!(parse_task_id("1.5").is_err());
        assert!(parse_task_id("").is_err());
    }
}
