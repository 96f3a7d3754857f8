//! List Todos Use Case
//!
//! Both queries are filtered by owner in the store. An empty result is
//! `NotFound`, never an empty success.

use std::sync::Arc;

use kernel::id::{CategoryId, UserId};

use crate::domain::entities::Todo;
use crate::domain::repository::{CategoryRepository, TodoRepository};
use crate::domain::services::ensure_owner;
use crate::error::{TodoError, TodoResult};

pub struct ListTodosUseCase<T, C>
where
    T: TodoRepository,
    C: CategoryRepository,
{
    todo_repo: Arc<T>,
    category_repo: Arc<C>,
}

impl<T, C> ListTodosUseCase<T, C>
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

    pub async fn all(&self, caller: UserId) -> TodoResult<Vec<Todo>> {
        let todos = self.todo_repo.list_for_user(caller).await?;
        if todos.is_empty() {
            return Err(TodoError::NotFound("No todos found"));
        }
        Ok(todos)
    }

    pub async fn by_category(&self, caller: UserId, category_id: CategoryId) -> TodoResult<Vec<Todo>> {
        let owner = self
            .category_repo
            .find_owner(category_id)
            .await?
            .ok_or(TodoError::NotFound("Category not found"))?;

        ensure_owner(caller, owner, "category", category_id.get())?;

        let todos = self
            .todo_repo
            .list_for_user_and_category(caller, category_id)
            .await?;
        if todos.is_empty() {
            return Err(TodoError::NotFound("No todos found in this category"));
        }
        Ok(todos)
    }
}
