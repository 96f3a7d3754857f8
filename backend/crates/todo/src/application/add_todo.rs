//! Add Todo Use Case

use std::sync::Arc;

use kernel::id::{CategoryId, TodoId, UserId};

use crate::domain::entities::NewTodo;
use crate::domain::repository::{CategoryRepository, TodoRepository};
use crate::domain::value_objects::{DueDate, TodoTitle, optional_text};
use crate::error::{TodoError, TodoResult};

/// Raw fields as received; the owner comes from the caller, never the body
pub struct AddTodoInput {
    pub title: String,
    pub description: Option<String>,
    pub due_date: String,
    pub priority: Option<String>,
    pub completed: bool,
    /// `None` or `Some(0)` means uncategorized
    pub category: Option<i64>,
}

pub struct AddTodoUseCase<T, C>
where
    T: TodoRepository,
    C: CategoryRepository,
{
    todo_repo: Arc<T>,
    category_repo: Arc<C>,
}

impl<T, C> AddTodoUseCase<T, C>
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

    pub async fn execute(&self, caller: UserId, input: AddTodoInput) -> TodoResult<TodoId> {
        let title = TodoTitle::new(&input.title)?;
        let due_date = DueDate::parse(&input.due_date)?;
        let category_id = CategoryId::from_optional(input.category)?;

        if let Some(category_id) = category_id {
            let owner = self.category_repo.find_owner(category_id).await?;
            if owner != Some(caller) {
                tracing::warn!(
                    caller_id = %caller,
                    category_id = %category_id,
                    "Todo references a category the caller does not own"
                );
                return Err(TodoError::InvalidReference);
            }
        }

        let todo = NewTodo {
            title,
            description: optional_text(input.description),
            due_date,
            priority: optional_text(input.priority),
            completed: input.completed,
            user_id: caller,
            category_id,
        };

        // The insert re-checks category ownership atomically
        let todo_id = self
            .todo_repo
            .add(&todo)
            .await?
            .ok_or(TodoError::InvalidReference)?;

        tracing::info!(user_id = %caller, todo_id = %todo_id, "Todo added");

        Ok(todo_id)
    }
}
