use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::CategoryId;

/// Value object: Step ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StepId(pub String);

/// Value object: Option ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OptionId(pub String);

/// Value object: Condition ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConditionId(pub String);

/// One screen of the questionnaire, ordered within its category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowStep {
    /// Unique identifier assigned by the backing store
    pub id: StepId,

    /// Category this step belongs to
    pub category_id: CategoryId,

    /// Title shown to the end user
    pub title: String,

    /// Longer description, if any
    pub description: Option<String>,

    /// Position within the category's total order. Assigned monotonically at
    /// creation; ties must not occur.
    pub order_index: i32,

    /// When set, this step is reachable only via that specific option
    pub parent_option_id: Option<OptionId>,

    /// Whether this step is a conditional branch target
    pub is_conditional: bool,

    /// Row creation timestamp
    pub created_at: DateTime<Utc>,
}

/// A selectable choice attached to a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowOption {
    /// Unique identifier assigned by the backing store
    pub id: OptionId,

    /// Step this option belongs to
    pub step_id: StepId,

    /// Title shown to the end user
    pub title: String,

    /// Longer description, if any
    pub description: Option<String>,

    /// Row creation timestamp
    pub created_at: DateTime<Utc>,
}

/// An authored directed edge: selecting `option_id` routes traversal to
/// `next_step_id`, overriding the default in-order progression.
///
/// Both endpoints must live in the same category; creation rejects
/// cross-category edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowCondition {
    /// Unique identifier assigned by the backing store
    pub id: ConditionId,

    /// The option whose selection triggers the jump
    pub option_id: OptionId,

    /// The step traversal jumps to
    pub next_step_id: StepId,

    /// Row creation timestamp
    pub created_at: DateTime<Utc>,
}
