//! Delete Todo Use Case

use std::sync::Arc;

use kernel::id::{TodoId, UserId};

use crate::domain::repository::TodoRepository;
use crate::domain::services::ensure_owner;
use crate::error::{TodoError, TodoResult};

pub struct DeleteTodoUseCase<T>
where
    T: TodoRepository,
{
    todo_repo: Arc<T>,
}

impl<T> DeleteTodoUseCase<T>
where
    T: TodoRepository,
{
    pub fn new(todo_repo: Arc<T>) -> Self {
        Self { todo_repo }
    }

    pub async fn execute(&self, caller: UserId, todo_id: TodoId) -> TodoResult<()> {
        let todo = self
            .todo_repo
            .find_by_id(todo_id)
            .await?
            .ok_or(TodoError::NotFound("Todo not found"))?;

        ensure_owner(caller, todo.user_id, "todo", todo_id.get())?;

        if self.todo_repo.delete(caller, todo_id).await? == 0 {
            return Err(TodoError::NotFound("Todo not found"));
        }

        tracing::info!(user_id = %caller, todo_id = %todo_id, "Todo deleted");

        Ok(())
    }
}
