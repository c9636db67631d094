pub mod comparison;
pub mod enumerate;
pub mod output;
pub mod pagination;

pub use comparison::*;
pub use enumerate::*;
pub use output::*;
pub use pagination::*;
