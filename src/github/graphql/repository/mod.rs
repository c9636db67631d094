pub mod compare;
pub mod query;

pub use compare::*;
pub use query::*;
