//! Application services - the two consumers of the flow schema plus the
//! category registry

/// Category registry service
pub mod categories;

/// Graph projection for the authoring surface
pub mod projector;

/// End-user traversal state machine
pub mod walker;
