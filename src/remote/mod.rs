//! Remote user source: raw payloads, mapping into [`User`](crate::domain::User),
//! and the HTTP-backed fetcher.

mod api;
mod error;
mod http_api;
mod mapping;
mod raw;

pub use api::*;
pub use error::*;
pub use http_api::*;
pub use mapping::*;
pub use raw::*;
