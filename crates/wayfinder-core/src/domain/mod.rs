//! Domain layer - entities and repository contracts

/// Category entity and display metadata
pub mod category;

/// Flow graph entities: steps, options, conditions
pub mod flow;

/// Repository traits implemented by backing stores
pub mod repository;
