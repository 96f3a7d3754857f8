//! API DTOs (Data Transfer Objects)
//!
//! Field names are camelCase. Unknown fields such as a client-supplied
//! `userId` are ignored; the owner always comes from the bearer token.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Category, Todo};

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTodoRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub due_date: String,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub completed: bool,
    /// 0 or absent means uncategorized
    #[serde(default)]
    pub category: Option<i64>,
}

/// Every field except `id` may be omitted or empty to keep the stored value
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditTodoRequest {
    pub id: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub priority: Option<String>,
    pub completed: Option<bool>,
    pub category: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarkTodoRequest {
    pub id: i64,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddCategoryRequest {
    pub name: String,
}

/// `?id=` on delete and filter routes; parsed by hand so a bad value is a
/// problem-details 400 instead of a bare extractor rejection
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatedResponse {
    pub message: String,
    pub id: i64,
}

/// Unset optional fields render as `""` / `0`, matching the legacy wire format
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub priority: String,
    pub completed: bool,
    pub user_id: i64,
    pub category: i64,
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.todo_id.get(),
            title: todo.title.as_str().to_string(),
            description: todo.description.unwrap_or_default(),
            due_date: todo.due_date.to_string(),
            priority: todo.priority.unwrap_or_default(),
            completed: todo.completed,
            user_id: todo.user_id.get(),
            category: todo.category_id.map(|c| c.get()).unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
    pub user_id: i64,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.category_id.get(),
            name: category.name.as_str().to_string(),
            user_id: category.user_id.get(),
        }
    }
}
