use std::sync::Arc;

use crate::domain::category::Category;
use crate::domain::repository::CategoryRepository;
use crate::CoreError;

/// Service for listing and creating categories.
///
/// Categories are never updated or deleted; the only write path is `create`.
pub struct CategoryService {
    /// Repository for categories
    categories: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    /// Create a new category service
    pub fn new(categories: Arc<dyn CategoryRepository>) -> Self {
        Self { categories }
    }

    /// List all categories
    pub async fn list(&self) -> Result<Vec<Category>, CoreError> {
        self.categories.list().await
    }

    /// Create a category.
    ///
    /// Name and slug must be non-empty after trimming; a duplicate slug
    /// surfaces as [`CoreError::Conflict`] from the store.
    pub async fn create(&self, name: &str, slug: &str) -> Result<Category, CoreError> {
        let name = name.trim();
        let slug = slug.trim();

        if name.is_empty() {
            return Err(CoreError::Validation(
                "category name must not be empty".to_string(),
            ));
        }
        if slug.is_empty() {
            return Err(CoreError::Validation(
                "category slug must not be empty".to_string(),
            ));
        }

        let category = self.categories.create(name, slug).await?;

        tracing::info!(
            category = %category.slug,
            "category created"
        );

        Ok(category)
    }
}
