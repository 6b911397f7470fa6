//!
//! Wayfinder Core - flow graph model for guided product selection
//!
//! This crate defines the relational flow schema (categories, steps,
//! options, conditions), the repository contracts against the backing
//! store, and the schema's two consumers: the traversal walker that drives
//! an end-user session and the graph projector that renders the same
//! entities as a node/edge diagram for authoring.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Domain layer - entities and repository contracts
pub mod domain;

/// Application services - walker, projector, category registry
pub mod application;

/// Error types
pub mod error;

// Re-export key types
pub use error::CoreError;

pub use domain::category::{Category, CategoryDisplay, CategoryIcon, CategoryId};
pub use domain::flow::{ConditionId, FlowCondition, FlowOption, FlowStep, OptionId, StepId};
pub use domain::repository::{CategoryRepository, FlowRepository};

pub use application::categories::CategoryService;
pub use application::projector::{
    project, FlowEdge, FlowGraph, FlowNode, NodePosition, StepNodeData, NODE_SPACING_X,
};
pub use application::walker::{
    AdvanceMode, OptionsTicket, SelectionOutcome, TraversalWalker, WalkerStatus,
};
