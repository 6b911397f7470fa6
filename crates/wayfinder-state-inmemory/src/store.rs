use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use wayfinder_core::{
    Category, CategoryId, CategoryRepository, ConditionId, CoreError, FlowCondition, FlowOption,
    FlowRepository, FlowStep, OptionId, StepId,
};

/// Fields for inserting a step. The store assigns id, `order_index`, and
/// the creation timestamp.
#[derive(Debug, Clone)]
pub struct NewStep {
    /// Category the step belongs to
    pub category_id: CategoryId,
    /// Title shown to the end user
    pub title: String,
    /// Longer description, if any
    pub description: Option<String>,
    /// Option this step hangs off, for conditional branches
    pub parent_option_id: Option<OptionId>,
    /// Whether the step is a conditional branch target
    pub is_conditional: bool,
}

/// Fields for inserting an option. The store assigns id and the creation
/// timestamp.
#[derive(Debug, Clone)]
pub struct NewOption {
    /// Step the option belongs to
    pub step_id: StepId,
    /// Title shown to the end user
    pub title: String,
    /// Longer description, if any
    pub description: Option<String>,
}

/// In-memory implementation of the Wayfinder repository contracts.
///
/// Rows live in `RwLock`-guarded tables; reads clone out, matching the
/// query-style access of the remote store this stands in for.
pub struct InMemoryStore {
    categories: Arc<RwLock<Vec<Category>>>,
    steps: Arc<RwLock<Vec<FlowStep>>>,
    options: Arc<RwLock<Vec<FlowOption>>>,
    conditions: Arc<RwLock<Vec<FlowCondition>>>,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            categories: Arc::new(RwLock::new(Vec::new())),
            steps: Arc::new(RwLock::new(Vec::new())),
            options: Arc::new(RwLock::new(Vec::new())),
            conditions: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Insert a step, assigning `order_index` monotonically within its
    /// category (max existing + 1) so the total order never has ties.
    ///
    /// The category must exist.
    pub async fn insert_step(&self, new: NewStep) -> Result<FlowStep, CoreError> {
        {
            let categories = self.categories.read().await;
            if !categories.iter().any(|c| c.id == new.category_id) {
                return Err(CoreError::NotFound(format!(
                    "category: {}",
                    new.category_id.0
                )));
            }
        }

        if let Some(parent_option_id) = &new.parent_option_id {
            let options = self.options.read().await;
            if !options.iter().any(|o| &o.id == parent_option_id) {
                return Err(CoreError::NotFound(format!(
                    "parent option: {}",
                    parent_option_id.0
                )));
            }
        }

        let mut steps = self.steps.write().await;
        let order_index = steps
            .iter()
            .filter(|s| s.category_id == new.category_id)
            .map(|s| s.order_index)
            .max()
            .map_or(0, |max| max + 1);

        let step = FlowStep {
            id: StepId(Uuid::new_v4().to_string()),
            category_id: new.category_id,
            title: new.title,
            description: new.description,
            order_index,
            parent_option_id: new.parent_option_id,
            is_conditional: new.is_conditional,
            created_at: Utc::now(),
        };

        debug!(step = %step.id.0, order_index, "step inserted");
        steps.push(step.clone());
        Ok(step)
    }

    /// Insert an option. The step must exist.
    pub async fn insert_option(&self, new: NewOption) -> Result<FlowOption, CoreError> {
        {
            let steps = self.steps.read().await;
            if !steps.iter().any(|s| s.id == new.step_id) {
                return Err(CoreError::NotFound(format!("step: {}", new.step_id.0)));
            }
        }

        let option = FlowOption {
            id: OptionId(Uuid::new_v4().to_string()),
            step_id: new.step_id,
            title: new.title,
            description: new.description,
            created_at: Utc::now(),
        };

        debug!(option = %option.id.0, "option inserted");
        self.options.write().await.push(option.clone());
        Ok(option)
    }

    /// Insert a condition: a directed edge from an option to a step.
    ///
    /// Both endpoints must exist, and the option's step must belong to the
    /// same category as the target step; cross-category jumps are rejected
    /// with a validation error.
    pub async fn insert_condition(
        &self,
        option_id: OptionId,
        next_step_id: StepId,
    ) -> Result<FlowCondition, CoreError> {
        let source_category = {
            let options = self.options.read().await;
            let option = options
                .iter()
                .find(|o| o.id == option_id)
                .ok_or_else(|| CoreError::NotFound(format!("option: {}", option_id.0)))?;

            let steps = self.steps.read().await;
            steps
                .iter()
                .find(|s| s.id == option.step_id)
                .map(|s| s.category_id.clone())
                .ok_or_else(|| CoreError::NotFound(format!("step: {}", option.step_id.0)))?
        };

        let target_category = {
            let steps = self.steps.read().await;
            steps
                .iter()
                .find(|s| s.id == next_step_id)
                .map(|s| s.category_id.clone())
                .ok_or_else(|| CoreError::NotFound(format!("step: {}", next_step_id.0)))?
        };

        if source_category != target_category {
            return Err(CoreError::Validation(format!(
                "condition crosses categories: {} -> {}",
                source_category.0, target_category.0
            )));
        }

        let condition = FlowCondition {
            id: ConditionId(Uuid::new_v4().to_string()),
            option_id,
            next_step_id,
            created_at: Utc::now(),
        };

        debug!(condition = %condition.id.0, "condition inserted");
        self.conditions.write().await.push(condition.clone());
        Ok(condition)
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CategoryRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<Category>, CoreError> {
        let categories = self.categories.read().await;
        Ok(categories.clone())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, CoreError> {
        let categories = self.categories.read().await;
        Ok(categories.iter().find(|c| c.slug == slug).cloned())
    }

    async fn create(&self, name: &str, slug: &str) -> Result<Category, CoreError> {
        let mut categories = self.categories.write().await;

        if categories.iter().any(|c| c.slug == slug) {
            return Err(CoreError::Conflict(format!(
                "category slug already exists: {}",
                slug
            )));
        }

        let category = Category {
            id: CategoryId(Uuid::new_v4().to_string()),
            name: name.to_string(),
            slug: slug.to_string(),
            created_at: Utc::now(),
        };

        debug!(category = %category.slug, "category inserted");
        categories.push(category.clone());
        Ok(category)
    }
}

#[async_trait]
impl FlowRepository for InMemoryStore {
    async fn list_steps(&self, category_id: &CategoryId) -> Result<Vec<FlowStep>, CoreError> {
        let steps = self.steps.read().await;

        let mut result: Vec<FlowStep> = steps
            .iter()
            .filter(|s| &s.category_id == category_id)
            .cloned()
            .collect();

        // Stable sort: equal order_index keeps insertion order across calls.
        result.sort_by_key(|s| s.order_index);
        Ok(result)
    }

    async fn list_options(&self, step_id: &StepId) -> Result<Vec<FlowOption>, CoreError> {
        let options = self.options.read().await;

        Ok(options
            .iter()
            .filter(|o| &o.step_id == step_id)
            .cloned()
            .collect())
    }

    async fn list_conditions(&self) -> Result<Vec<FlowCondition>, CoreError> {
        let conditions = self.conditions.read().await;
        Ok(conditions.clone())
    }
}
