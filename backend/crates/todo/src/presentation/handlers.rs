//! HTTP Handlers
//!
//! Every handler runs behind the bearer-token gate and reads the caller from
//! `Extension<AuthenticatedUser>`.

use axum::extract::{Extension, Query, State};
use axum::http::StatusCode;
use axum::Json;
use kernel::auth::AuthenticatedUser;
use kernel::id::Id;
use std::sync::Arc;

use crate::application::{
    AddCategoryUseCase, AddTodoInput, AddTodoUseCase, DeleteCategoryUseCase, DeleteTodoUseCase,
    EditTodoInput, EditTodoUseCase, ListCategoriesUseCase, ListTodosUseCase, MarkTodoUseCase,
};
use crate::domain::repository::{CategoryRepository, TodoRepository};
use crate::error::{TodoError, TodoResult};
use crate::presentation::dto::{
    AddCategoryRequest, AddTodoRequest, CategoryResponse, CreatedResponse, EditTodoRequest,
    IdQuery, MarkTodoRequest, MessageResponse, TodoResponse,
};

/// Shared state for todo handlers
#[derive(Clone)]
pub struct TodoAppState<R>
where
    R: TodoRepository + CategoryRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

/// Positive integer from `?id=`
pub fn parse_id_query<T>(query: &IdQuery) -> TodoResult<Id<T>> {
    let raw = query
        .id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| TodoError::Validation("Please provide a valid id".to_string()))?;

    let value = raw
        .parse::<i64>()
        .map_err(|_| TodoError::Validation(format!("Invalid id '{raw}'")))?;

    Ok(Id::new(value)?)
}

// ============================================================================
// Todos
// ============================================================================

/// POST /addtodo
pub async fn add_todo<R>(
    State(state): State<TodoAppState<R>>,
    Extension(caller): Extension<AuthenticatedUser>,
    Json(req): Json<AddTodoRequest>,
) -> TodoResult<(StatusCode, Json<CreatedResponse>)>
where
    R: TodoRepository + CategoryRepository + Clone + Send + Sync + 'static,
{
    let use_case = AddTodoUseCase::new(state.repo.clone(), state.repo.clone());

    let input = AddTodoInput {
        title: req.title,
        description: req.description,
        due_date: req.due_date,
        priority: req.priority,
        completed: req.completed,
        category: req.category,
    };

    let todo_id = use_case.execute(caller.user_id, input).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Todo Added Successfully".to_string(),
            id: todo_id.get(),
        }),
    ))
}

/// DELETE /deletetodo?id=
pub async fn delete_todo<R>(
    State(state): State<TodoAppState<R>>,
    Extension(caller): Extension<AuthenticatedUser>,
    Query(query): Query<IdQuery>,
) -> TodoResult<Json<MessageResponse>>
where
    R: TodoRepository + CategoryRepository + Clone + Send + Sync + 'static,
{
    let todo_id = parse_id_query(&query)?;

    DeleteTodoUseCase::new(state.repo.clone())
        .execute(caller.user_id, todo_id)
        .await?;

    Ok(Json(MessageResponse::new("Todo Deleted Successfully")))
}

/// PUT /edittodo
pub async fn edit_todo<R>(
    State(state): State<TodoAppState<R>>,
    Extension(caller): Extension<AuthenticatedUser>,
    Json(req): Json<EditTodoRequest>,
) -> TodoResult<Json<MessageResponse>>
where
    R: TodoRepository + CategoryRepository + Clone + Send + Sync + 'static,
{
    let use_case = EditTodoUseCase::new(state.repo.clone(), state.repo.clone());

    let input = EditTodoInput {
        todo_id: req.id,
        title: req.title,
        description: req.description,
        due_date: req.due_date,
        priority: req.priority,
        completed: req.completed,
        category: req.category,
    };

    use_case.execute(caller.user_id, input).await?;

    Ok(Json(MessageResponse::new("Todo Updated Successfully")))
}

/// GET /getalltodos
pub async fn get_all_todos<R>(
    State(state): State<TodoAppState<R>>,
    Extension(caller): Extension<AuthenticatedUser>,
) -> TodoResult<Json<Vec<TodoResponse>>>
where
    R: TodoRepository + CategoryRepository + Clone + Send + Sync + 'static,
{
    let todos = ListTodosUseCase::new(state.repo.clone(), state.repo.clone())
        .all(caller.user_id)
        .await?;

    Ok(Json(todos.into_iter().map(TodoResponse::from).collect()))
}

/// GET /gettodobycategory?id=
pub async fn get_todo_by_category<R>(
    State(state): State<TodoAppState<R>>,
    Extension(caller): Extension<AuthenticatedUser>,
    Query(query): Query<IdQuery>,
) -> TodoResult<Json<Vec<TodoResponse>>>
where
    R: TodoRepository + CategoryRepository + Clone + Send + Sync + 'static,
{
    let category_id = parse_id_query(&query)?;

    let todos = ListTodosUseCase::new(state.repo.clone(), state.repo.clone())
        .by_category(caller.user_id, category_id)
        .await?;

    Ok(Json(todos.into_iter().map(TodoResponse::from).collect()))
}

/// POST /marktodo
pub async fn mark_todo<R>(
    State(state): State<TodoAppState<R>>,
    Extension(caller): Extension<AuthenticatedUser>,
    Json(req): Json<MarkTodoRequest>,
) -> TodoResult<Json<MessageResponse>>
where
    R: TodoRepository + CategoryRepository + Clone + Send + Sync + 'static,
{
    let todo_id = Id::new(req.id)?;

    MarkTodoUseCase::new(state.repo.clone())
        .execute(caller.user_id, todo_id, req.completed)
        .await?;

    Ok(Json(MessageResponse::new("Todo Marked Successfully")))
}

// ============================================================================
// Categories
// ============================================================================

/// POST /addcategory
pub async fn add_category<R>(
    State(state): State<TodoAppState<R>>,
    Extension(caller): Extension<AuthenticatedUser>,
    Json(req): Json<AddCategoryRequest>,
) -> TodoResult<(StatusCode, Json<CreatedResponse>)>
where
    R: TodoRepository + CategoryRepository + Clone + Send + Sync + 'static,
{
    let category_id = AddCategoryUseCase::new(state.repo.clone())
        .execute(caller.user_id, req.name)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Category Added Successfully".to_string(),
            id: category_id.get(),
        }),
    ))
}

/// GET /getcategory
pub async fn get_categories<R>(
    State(state): State<TodoAppState<R>>,
    Extension(caller): Extension<AuthenticatedUser>,
) -> TodoResult<Json<Vec<CategoryResponse>>>
where
    R: TodoRepository + CategoryRepository + Clone + Send + Sync + 'static,
{
    let categories = ListCategoriesUseCase::new(state.repo.clone())
        .execute(caller.user_id)
        .await?;

    Ok(Json(
        categories.into_iter().map(CategoryResponse::from).collect(),
    ))
}

/// DELETE /deletecategory?id=
pub async fn delete_category<R>(
    State(state): State<TodoAppState<R>>,
    Extension(caller): Extension<AuthenticatedUser>,
    Query(query): Query<IdQuery>,
) -> TodoResult<Json<MessageResponse>>
where
    R: TodoRepository + CategoryRepository + Clone + Send + Sync + 'static,
{
    let category_id = parse_id_query(&query)?;

    DeleteCategoryUseCase::new(state.repo.clone())
        .execute(caller.user_id, category_id)
        .await?;

    Ok(Json(MessageResponse::new("Successfully Deleted Category")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::id::TodoId;

    fn query(id: Option<&str>) -> IdQuery {
        IdQuery {
            id: id.map(str::to_string),
        }
    }

    #[test]
    fn test_parse_id_query() {
        let id: TodoId = parse_id_query(&query(Some("42"))).unwrap();
        assert_eq!(id.get(), 42);
    }

    #[test]
    fn test_parse_id_query_rejects() {
        for bad in [None, Some(""), Some("abc"), Some("0"), Some("-5"), Some("1.5")] {
            let result: TodoResult<TodoId> = parse_id_query(&query(bad));
            assert!(matches!(result, Err(TodoError::Validation(_))), "{bad:?}");
        }
    }
}
