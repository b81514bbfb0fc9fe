use async_trait::async_trait;

use super::{FetchError, RawUser};
use crate::domain::{User, UserFormData};

/// Source of user records.
///
/// Reads are a single attempt with no retry. Writes may be simulated by the
/// implementation; callers cannot tell the difference.
#[async_trait]
pub trait UserApi: Send + Sync {
    async fn fetch_users(&self) -> Result<Vec<RawUser>, FetchError>;

    async fn fetch_user(&self, id: u64) -> Result<RawUser, FetchError>;

    /// Returns the stored record, carrying a freshly assigned id.
    async fn create_user(&self, form: UserFormData) -> Result<User, FetchError>;

    async fn update_user(&self, id: u64, form: UserFormData) -> Result<User, FetchError>;

    async fn delete_user(&self, id: u64) -> Result<bool, FetchError>;
}
