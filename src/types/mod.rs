//! Core type definitions
//!
//! Identity wrappers for the entities the enumerator queries, the per-command
//! query description, and the committer ranking model.

pub mod committer;
pub mod query_spec;
pub mod repository;
pub mod user;

pub use committer::*;
pub use query_spec::*;
pub use repository::*;
pub use user::*;
