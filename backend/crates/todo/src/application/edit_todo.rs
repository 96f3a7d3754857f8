//! Edit Todo Use Case
//!
//! Partial update: unset fields keep their stored values.

use std::sync::Arc;

use kernel::id::{CategoryId, TodoId, UserId};

use crate::domain::entities::TodoPatch;
use crate::domain::repository::{CategoryRepository, TodoRepository};
use crate::domain::services::{ensure_owner, merge_patch};
use crate::domain::value_objects::{DueDate, TodoTitle, optional_text};
use crate::error::{TodoError, TodoResult};

/// Empty strings, `None` and a zero category all mean "keep"
#[derive(Default)]
pub struct EditTodoInput {
    pub todo_id: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub priority: Option<String>,
    pub completed: Option<bool>,
    pub category: Option<i64>,
}

pub struct EditTodoUseCase<T, C>
where
    T: TodoRepository,
    C: CategoryRepository,
{
    todo_repo: Arc<T>,
    category_repo: Arc<C>,
}

impl<T, C> EditTodoUseCase<T, C>
where
    T: TodoRepository,
    C: CategoryRepository,
{
    pub fn new(todo_repo: Arc<T>, category_repo: Arc<C>) -> Self {
        Self {
            todo_repo,
            category_repo,
        }
    }

    pub async fn execute(&self, caller: UserId, input: EditTodoInput) -> TodoResult<()> {
        let todo_id = TodoId::new(input.todo_id)?;
        let patch = Self::parse_patch(input)?;

        let existing = self
            .todo_repo
            .find_by_id(todo_id)
            .await?
            .ok_or(TodoError::NotFound("Todo not found"))?;

        ensure_owner(caller, existing.user_id, "todo", todo_id.get())?;

        if let Some(category_id) = patch.category_id {
            self.category_repo
                .find_for_user(caller, category_id)
                .await?
                .ok_or(TodoError::InvalidReference)?;
        }

        let merged = merge_patch(existing, patch);

        if self.todo_repo.update(&merged).await? == 0 {
            return Err(TodoError::NotFound("Todo not found"));
        }

        tracing::info!(user_id = %caller, todo_id = %todo_id, "Todo updated");

        Ok(())
    }

    fn parse_patch(input: EditTodoInput) -> TodoResult<TodoPatch> {
        let title = optional_text(input.title)
            .map(TodoTitle::new)
            .transpose()?;
        let due_date = optional_text(input.due_date)
            .map(|d| DueDate::parse(&d))
            .transpose()?;

        Ok(TodoPatch {
            title,
            description: optional_text(input.description),
            due_date,
            priority: optional_text(input.priority),
            completed: input.completed,
            category_id: CategoryId::from_optional(input.category)?,
        })
    }
}
