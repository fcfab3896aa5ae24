//! Route tables. Each function returns a stateful router ready to merge.

mod catalog;
mod common;
mod users;

pub use catalog::catalog_routes;
pub use common::common_routes;
pub use users::user_routes;
