//! The user service: coordinates reads and writes against a [`UserApi`](crate::remote::UserApi)
//! and applies the results to the [`UserStore`](crate::store::UserStore).

mod error;
mod service;

pub use error::*;
pub use service::*;
