//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//!
//! Every mutation is scoped by owner and reports the affected-row count, so
//! a record that changed hands or vanished after the ownership check is never
//! written.

use kernel::id::{CategoryId, TodoId, UserId};

use crate::domain::entities::{Category, NewCategory, NewTodo, Todo};
use crate::error::TodoResult;

#[trait_variant::make(TodoRepository: Send)]
pub trait LocalTodoRepository {
    /// Insert unless the referenced category is missing or not owned by
    /// `todo.user_id`, in which case `None` is returned and nothing is written
    async fn add(&self, todo: &NewTodo) -> TodoResult<Option<TodoId>>;

    async fn find_by_id(&self, todo_id: TodoId) -> TodoResult<Option<Todo>>;

    async fn list_for_user(&self, user_id: UserId) -> TodoResult<Vec<Todo>>;

    async fn list_for_user_and_category(
        &self,
        user_id: UserId,
        category_id: CategoryId,
    ) -> TodoResult<Vec<Todo>>;

    /// Full replace of the row matching both `todo_id` and `user_id`
    async fn update(&self, todo: &Todo) -> TodoResult<u64>;

    async fn update_completed(
        &self,
        owner: UserId,
        todo_id: TodoId,
        completed: bool,
    ) -> TodoResult<u64>;

    async fn delete(&self, owner: UserId, todo_id: TodoId) -> TodoResult<u64>;
}

#[trait_variant::make(CategoryRepository: Send)]
pub trait LocalCategoryRepository {
    async fn add(&self, category: &NewCategory) -> TodoResult<CategoryId>;

    /// Owner of any category, regardless of caller
    async fn find_owner(&self, category_id: CategoryId) -> TodoResult<Option<UserId>>;

    /// Category only if it belongs to `user_id`
    async fn find_for_user(
        &self,
        user_id: UserId,
        category_id: CategoryId,
    ) -> TodoResult<Option<Category>>;

    async fn list_for_user(&self, user_id: UserId) -> TodoResult<Vec<Category>>;

    /// Todos referencing the category become uncategorized
    async fn delete(&self, owner: UserId, category_id: CategoryId) -> TodoResult<u64>;
}
