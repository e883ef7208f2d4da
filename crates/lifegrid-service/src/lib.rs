//! Operation boundary for Lifegrid game states.
//!
//! This crate exposes the verbs the transport layer (HTTP, CLI -- out of
//! scope here) calls into: `create_from_upload`, `advance`, `restore`,
//! `delete`, `get`, and `list`. Each verb is one indivisible unit of work:
//! read the record, run the engine, commit the result through the
//! repository. Nothing is retried -- content errors are deterministic, and
//! persistence failures carry enough detail for the caller to decide.
//!
//! Ownership scoping (which caller may touch which entity) belongs to the
//! external account subsystem; callers resolve authorization before
//! invoking these operations.
//!
//! # Modules
//!
//! - [`error`] -- [`ServiceError`], the unified failure surface
//! - [`service`] -- [`GameStateService`], generic over the repository
//!
//! [`ServiceError`]: error::ServiceError
//! [`GameStateService`]: service::GameStateService

pub mod error;
pub mod service;

// Re-export primary types at crate root.
pub use error::ServiceError;
pub use service::GameStateService;
