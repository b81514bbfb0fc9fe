//! System orchestration, startup, and shutdown logic.

pub mod user_system;
pub mod tracing;

pub use user_system::*;
pub use self::tracing::*;
