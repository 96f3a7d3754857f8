//! Application Layer
//!
//! One use case per operation. Each takes the authenticated caller as its
//! first argument and never trusts an owner id from the request body.

pub mod add_category;
pub mod add_todo;
pub mod delete_category;
pub mod delete_todo;
pub mod edit_todo;
pub mod list_categories;
pub mod list_todos;
pub mod mark_todo;

// Re-exports
pub use add_category::AddCategoryUseCase;
pub use add_todo::{AddTodoInput, AddTodoUseCase};
pub use delete_category::DeleteCategoryUseCase;
pub use delete_todo::DeleteTodoUseCase;
pub use edit_todo::{EditTodoInput, EditTodoUseCase};
pub use list_categories::ListCategoriesUseCase;
pub use list_todos::ListTodosUseCase;
pub use mark_todo::MarkTodoUseCase;
