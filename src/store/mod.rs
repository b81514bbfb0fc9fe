//! In-memory record store with synchronous change notification.

mod observable;
mod user_store;

pub use observable::*;
pub use user_store::*;
