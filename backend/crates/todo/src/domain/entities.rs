//! Domain Entities

use kernel::id::{CategoryId, TodoId, UserId};

use crate::domain::value_objects::{CategoryName, DueDate, TodoTitle};

/// Persisted todo
///
/// `user_id` never changes after creation. A set `category_id` always names
/// a category owned by the same user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub todo_id: TodoId,
    pub title: TodoTitle,
    pub description: Option<String>,
    pub due_date: DueDate,
    pub priority: Option<String>,
    pub completed: bool,
    pub user_id: UserId,
    pub category_id: Option<CategoryId>,
}

/// Todo not yet persisted; `user_id` is always the caller
#[derive(Debug, Clone)]
pub struct NewTodo {
    pub title: TodoTitle,
    pub description: Option<String>,
    pub due_date: DueDate,
    pub priority: Option<String>,
    pub completed: bool,
    pub user_id: UserId,
    pub category_id: Option<CategoryId>,
}

impl NewTodo {
    pub fn into_todo(self, todo_id: TodoId) -> Todo {
        Todo {
            todo_id,
            title: self.title,
            description: self.description,
            due_date: self.due_date,
            priority: self.priority,
            completed: self.completed,
            user_id: self.user_id,
            category_id: self.category_id,
        }
    }
}

/// Partial edit; `None` keeps the stored value
///
/// There is no owner field: the owner is always taken from the stored record.
#[derive(Debug, Clone, Default)]
pub struct TodoPatch {
    pub title: Option<TodoTitle>,
    pub description: Option<String>,
    pub due_date: Option<DueDate>,
    pub priority: Option<String>,
    pub completed: Option<bool>,
    pub category_id: Option<CategoryId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub category_id: CategoryId,
    pub name: CategoryName,
    pub user_id: UserId,
}

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: CategoryName,
    pub user_id: UserId,
}

impl NewCategory {
    pub fn into_category(self, category_id: CategoryId) -> Category {
        Category {
            category_id,
            name: self.name,
            user_id: self.user_id,
        }
    }
}
