//! Add Category Use Case

use std::sync::Arc;

use kernel::id::{CategoryId, UserId};

use crate::domain::entities::NewCategory;
use crate::domain::repository::CategoryRepository;
use crate::domain::value_objects::CategoryName;
use crate::error::TodoResult;

pub struct AddCategoryUseCase<C>
where
    C: CategoryRepository,
{
    category_repo: Arc<C>,
}

impl<C> AddCategoryUseCase<C>
where
    C: CategoryRepository,
{
    pub fn new(category_repo: Arc<C>) -> Self {
        Self { category_repo }
    }

    pub async fn execute(&self, caller: UserId, name: String) -> TodoResult<CategoryId> {
        let category = NewCategory {
            name: CategoryName::new(name)?,
            user_id: caller,
        };

        let category_id = self.category_repo.add(&category).await?;

        tracing::info!(user_id = %caller, category_id = %category_id, "Category added");

        Ok(category_id)
    }
}
