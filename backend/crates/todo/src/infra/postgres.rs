//! PostgreSQL Repository Implementations

use chrono::NaiveDate;
use kernel::error::conversions::{PG_FOREIGN_KEY_VIOLATION, sqlstate};
use kernel::id::{CategoryId, TodoId, UserId};
use sqlx::PgPool;

use crate::domain::entities::{Category, NewCategory, NewTodo, Todo};
use crate::domain::repository::{CategoryRepository, TodoRepository};
use crate::domain::value_objects::{CategoryName, DueDate, TodoTitle};
use crate::error::{TodoError, TodoResult};

/// PostgreSQL-backed repository for todos and categories
#[derive(Clone)]
pub struct PgTodoRepository {
    pool: PgPool,
}

impl PgTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// A category deleted between check and write surfaces as a FK violation
fn map_reference_error(e: sqlx::Error) -> TodoError {
    match sqlstate(&e).as_deref() {
        Some(PG_FOREIGN_KEY_VIOLATION) => TodoError::InvalidReference,
        _ => TodoError::Database(e),
    }
}

const TODO_COLUMNS: &str = r#"
    todo_id,
    title,
    description,
    due_date,
    priority,
    completed,
    user_id,
    category_id
"#;

// ============================================================================
// Todo Repository Implementation
// ============================================================================

impl TodoRepository for PgTodoRepository {
    async fn add(&self, todo: &NewTodo) -> TodoResult<Option<TodoId>> {
        let todo_id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO todos (
                title,
                description,
                due_date,
                priority,
                completed,
                user_id,
                category_id
            )
            SELECT $1, $2, $3, $4, $5, $6, $7
            WHERE $7::BIGINT IS NULL
               OR EXISTS (
                    SELECT 1 FROM categories
                    WHERE category_id = $7 AND user_id = $6
               )
            RETURNING todo_id
            "#,
        )
        .bind(todo.title.as_str())
        .bind(todo.description.as_deref())
        .bind(todo.due_date.date())
        .bind(todo.priority.as_deref())
        .bind(todo.completed)
        .bind(todo.user_id.get())
        .bind(todo.category_id.map(|c| c.get()))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_reference_error)?;

        Ok(todo_id.map(TodoId::from_db))
    }

    async fn find_by_id(&self, todo_id: TodoId) -> TodoResult<Option<Todo>> {
        let row = sqlx::query_as::<_, TodoRow>(&format!(
            "SELECT {TODO_COLUMNS} FROM todos WHERE todo_id = $1"
        ))
        .bind(todo_id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(TodoRow::into_todo))
    }

    async fn list_for_user(&self, user_id: UserId) -> TodoResult<Vec<Todo>> {
        let rows = sqlx::query_as::<_, TodoRow>(&format!(
            "SELECT {TODO_COLUMNS} FROM todos WHERE user_id = $1 ORDER BY todo_id"
        ))
        .bind(user_id.get())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(TodoRow::into_todo).collect())
    }

    async fn list_for_user_and_category(
        &self,
        user_id: UserId,
        category_id: CategoryId,
    ) -> TodoResult<Vec<Todo>> {
        let rows = sqlx::query_as::<_, TodoRow>(&format!(
            "SELECT {TODO_COLUMNS} FROM todos \
             WHERE user_id = $1 AND category_id = $2 ORDER BY todo_id"
        ))
        .bind(user_id.get())
        .bind(category_id.get())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(TodoRow::into_todo).collect())
    }

    async fn update(&self, todo: &Todo) -> TodoResult<u64> {
        let updated = sqlx::query(
            r#"
            UPDATE todos SET
                title = $3,
                description = $4,
                due_date = $5,
                priority = $6,
                completed = $7,
                category_id = $8
            WHERE todo_id = $1 AND user_id = $2
            "#,
        )
        .bind(todo.todo_id.get())
        .bind(todo.user_id.get())
        .bind(todo.title.as_str())
        .bind(todo.description.as_deref())
        .bind(todo.due_date.date())
        .bind(todo.priority.as_deref())
        .bind(todo.completed)
        .bind(todo.category_id.map(|c| c.get()))
        .execute(&self.pool)
        .await
        .map_err(map_reference_error)?
        .rows_affected();

        Ok(updated)
    }

    async fn update_completed(
        &self,
        owner: UserId,
        todo_id: TodoId,
        completed: bool,
    ) -> TodoResult<u64> {
        let updated =
            sqlx::query("UPDATE todos SET completed = $3 WHERE todo_id = $1 AND user_id = $2")
                .bind(todo_id.get())
                .bind(owner.get())
                .bind(completed)
                .execute(&self.pool)
                .await?
                .rows_affected();

        Ok(updated)
    }

    async fn delete(&self, owner: UserId, todo_id: TodoId) -> TodoResult<u64> {
        let deleted = sqlx::query("DELETE FROM todos WHERE todo_id = $1 AND user_id = $2")
            .bind(todo_id.get())
            .bind(owner.get())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}

// ============================================================================
// Category Repository Implementation
// ============================================================================

impl CategoryRepository for PgTodoRepository {
    async fn add(&self, category: &NewCategory) -> TodoResult<CategoryId> {
        let category_id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO categories (category_name, user_id) VALUES ($1, $2) RETURNING category_id",
        )
        .bind(category.name.as_str())
        .bind(category.user_id.get())
        .fetch_one(&self.pool)
        .await?;

        Ok(CategoryId::from_db(category_id))
    }

    async fn find_owner(&self, category_id: CategoryId) -> TodoResult<Option<UserId>> {
        let owner =
            sqlx::query_scalar::<_, i64>("SELECT user_id FROM categories WHERE category_id = $1")
                .bind(category_id.get())
                .fetch_optional(&self.pool)
                .await?;

        Ok(owner.map(UserId::from_db))
    }

    async fn find_for_user(
        &self,
        user_id: UserId,
        category_id: CategoryId,
    ) -> TodoResult<Option<Category>> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT category_id, category_name, user_id
            FROM categories
            WHERE category_id = $1 AND user_id = $2
            "#,
        )
        .bind(category_id.get())
        .bind(user_id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CategoryRow::into_category))
    }

    async fn list_for_user(&self, user_id: UserId) -> TodoResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT category_id, category_name, user_id
            FROM categories
            WHERE user_id = $1
            ORDER BY category_id
            "#,
        )
        .bind(user_id.get())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CategoryRow::into_category).collect())
    }

    async fn delete(&self, owner: UserId, category_id: CategoryId) -> TodoResult<u64> {
        let deleted =
            sqlx::query("DELETE FROM categories WHERE category_id = $1 AND user_id = $2")
                .bind(category_id.get())
                .bind(owner.get())
                .execute(&self.pool)
                .await?
                .rows_affected();

        Ok(deleted)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct TodoRow {
    todo_id: i64,
    title: String,
    description: Option<String>,
    due_date: NaiveDate,
    priority: Option<String>,
    completed: bool,
    user_id: i64,
    category_id: Option<i64>,
}

impl TodoRow {
    fn into_todo(self) -> Todo {
        Todo {
            todo_id: TodoId::from_db(self.todo_id),
            title: TodoTitle::from_db(self.title),
            description: self.description,
            due_date: DueDate::from_db(self.due_date),
            priority: self.priority,
            completed: self.completed,
            user_id: UserId::from_db(self.user_id),
            category_id: self.category_id.map(CategoryId::from_db),
        }
    }
}

#[derive(sqlx::FromRow)]
struct CategoryRow {
    category_id: i64,
    category_name: String,
    user_id: i64,
}

impl CategoryRow {
    fn into_category(self) -> Category {
        Category {
            category_id: CategoryId::from_db(self.category_id),
            name: CategoryName::from_db(self.category_name),
            user_id: UserId::from_db(self.user_id),
        }
    }
}
