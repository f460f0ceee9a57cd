pub mod admin_operations;
pub mod check_in;
pub mod check_in_queries;
pub mod initialize;
pub mod ownership_operations;
pub mod upgrade_operations;

pub use admin_operations::*;
pub use check_in::*;
pub use check_in_queries::*;
pub use initialize::*;
