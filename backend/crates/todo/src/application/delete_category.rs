//! Delete Category Use Case

use std::sync::Arc;

use kernel::id::{CategoryId, UserId};

use crate::domain::repository::CategoryRepository;
use crate::domain::services::ensure_owner;
use crate::error::{TodoError, TodoResult};

pub struct DeleteCategoryUseCase<C>
where
    C: CategoryRepository,
{
    category_repo: Arc<C>,
}

impl<C> DeleteCategoryUseCase<C>
where
    C: CategoryRepository,
{
    pub fn new(category_repo: Arc<C>) -> Self {
        Self { category_repo }
    }

    pub async fn execute(&self, caller: UserId, category_id: CategoryId) -> TodoResult<()> {
        let owner = self
            .category_repo
            .find_owner(category_id)
            .await?
            .ok_or(TodoError::NotFound("Category not found"))?;

        ensure_owner(caller, owner, "category", category_id.get())?;

        if self.category_repo.delete(caller, category_id).await? == 0 {
            return Err(TodoError::NotFound("Category not found"));
        }

        tracing::info!(user_id = %caller, category_id = %category_id, "Category deleted");

        Ok(())
    }
}
