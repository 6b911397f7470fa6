//! In-memory state store for the Wayfinder platform
//!
//! This crate provides an in-memory implementation of the repository
//! contracts defined in wayfinder-core. It stands in for the remote
//! relational data service and is primarily useful for development,
//! testing, and simple deployments where persistence is not required.
//!
//! The read traits are read-only by contract, so the authoring inserts
//! (steps, options, conditions) are inherent methods on the store. They
//! enforce the creation-time invariants: monotonic `order_index` per
//! category and same-category condition endpoints.

pub mod store;
pub use store::{InMemoryStore, NewOption, NewStep};
