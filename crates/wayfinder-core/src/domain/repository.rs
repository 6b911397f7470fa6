//! Repository traits for the Wayfinder core
//!
//! These traits are the read contract against the backing relational store.
//! External crates implement them to provide different persistence
//! mechanisms; `wayfinder-state-inmemory` is the reference implementation.

use async_trait::async_trait;

use super::category::{Category, CategoryId};
use super::flow::{FlowCondition, FlowOption, FlowStep, StepId};
use crate::CoreError;

/// Repository for categories
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// List all categories
    async fn list(&self) -> Result<Vec<Category>, CoreError>;

    /// Find a category by its slug
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, CoreError>;

    /// Create a category. A duplicate slug surfaces as [`CoreError::Conflict`].
    async fn create(&self, name: &str, slug: &str) -> Result<Category, CoreError>;
}

/// Repository for the flow graph entities of the questionnaire
#[async_trait]
pub trait FlowRepository: Send + Sync {
    /// List the steps of a category, ordered by `order_index` ascending.
    /// The order must be stable across repeated calls.
    async fn list_steps(&self, category_id: &CategoryId) -> Result<Vec<FlowStep>, CoreError>;

    /// List the options attached to a step
    async fn list_options(&self, step_id: &StepId) -> Result<Vec<FlowOption>, CoreError>;

    /// List all conditions, unfiltered. Consumers filter client-side.
    async fn list_conditions(&self) -> Result<Vec<FlowCondition>, CoreError>;
}
