//! Domain Services
//!
//! Pure ownership and merge logic shared by the use cases.

use kernel::id::UserId;

use crate::domain::entities::{Todo, TodoPatch};
use crate::error::{TodoError, TodoResult};

/// Fails with `Forbidden` unless `owner` is the caller
pub fn ensure_owner(caller: UserId, owner: UserId, resource: &'static str, id: i64) -> TodoResult<()> {
    if caller == owner {
        return Ok(());
    }

    tracing::warn!(
        caller_id = %caller,
        owner_id = %owner,
        resource,
        record_id = id,
        "Ownership check failed"
    );
    Err(TodoError::Forbidden)
}

/// Full replacement record: patch fields where set, stored values elsewhere
///
/// Identity and owner always come from `existing`.
pub fn merge_patch(existing: Todo, patch: TodoPatch) -> Todo {
    Todo {
        todo_id: existing.todo_id,
        title: patch.title.unwrap_or(existing.title),
        description: patch.description.or(existing.description),
        due_date: patch.due_date.unwrap_or(existing.due_date),
        priority: patch.priority.or(existing.priority),
        completed: patch.completed.unwrap_or(existing.completed),
        user_id: existing.user_id,
        category_id: patch.category_id.or(existing.category_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{DueDate, TodoTitle};
    use kernel::id::{CategoryId, TodoId};

    fn stored() -> Todo {
        Todo {
            todo_id: TodoId::from_db(3),
            title: TodoTitle::from_db("Report"),
            description: Some("quarterly".to_string()),
            due_date: DueDate::parse("2024-06-30").unwrap(),
            priority: Some("high".to_string()),
            completed: true,
            user_id: UserId::from_db(1),
            category_id: Some(CategoryId::from_db(10)),
        }
    }

    #[test]
    fn test_ensure_owner() {
        let a = UserId::from_db(1);
        let b = UserId::from_db(2);
        assert!(ensure_owner(a, a, "todo", 3).is_ok());
        assert!(matches!(
            ensure_owner(b, a, "todo", 3),
            Err(TodoError::Forbidden)
        ));
    }

    #[test]
    fn test_empty_patch_keeps_everything() {
        assert_eq!(merge_patch(stored(), TodoPatch::default()), stored());
    }

    #[test]
    fn test_patch_overrides_set_fields_only() {
        let patch = TodoPatch {
            title: Some(TodoTitle::new("Final report").unwrap()),
            completed: Some(false),
            ..Default::default()
        };

        let merged = merge_patch(stored(), patch);
        assert_eq!(merged.title.as_str(), "Final report");
        assert!(!merged.completed);
        assert_eq!(merged.description.as_deref(), Some("quarterly"));
        assert_eq!(merged.priority.as_deref(), Some("high"));
        assert_eq!(merged.category_id, Some(CategoryId::from_db(10)));
        assert_eq!(merged.user_id, UserId::from_db(1));
    }
}
