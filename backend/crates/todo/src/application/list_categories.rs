//! List Categories Use Case

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entities::Category;
use crate::domain::repository::CategoryRepository;
use crate::error::{TodoError, TodoResult};

pub struct ListCategoriesUseCase<C>
where
    C: CategoryRepository,
{
    category_repo: Arc<C>,
}

impl<C> ListCategoriesUseCase<C>
where
    C: CategoryRepository,
{
    pub fn new(category_repo: Arc<C>) -> Self {
        Self { category_repo }
    }

    pub async fn execute(&self, caller: UserId) -> TodoResult<Vec<Category>> {
        let categories = self.category_repo.list_for_user(caller).await?;
        if categories.is_empty() {
            return Err(TodoError::NotFound("No categories found"));
        }
        Ok(categories)
    }
}
