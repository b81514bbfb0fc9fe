pub mod user;
pub mod query;
pub mod format;

pub use user::*;
pub use query::*;
