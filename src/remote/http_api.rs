use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, instrument};

use super::{FetchError, RawUser, UserApi};
use crate::config::AppConfig;
use crate::domain::{User, UserFormData};

type IdGenerator = Box<dyn Fn() -> u64 + Send + Sync>;

/// [`UserApi`] backed by a read-only REST endpoint.
///
/// `GET {users_url}` and `GET {users_url}/{id}` go over the network with no
/// timeout. Create, update and delete never leave the process: they wait for
/// the configured mock delay and synthesize their result.
pub struct HttpUserApi {
    client: reqwest::Client,
    users_url: String,
    mock_delay: Duration,
    next_id: IdGenerator,
}

impl HttpUserApi {
    pub fn new(users_url: impl Into<String>, mock_delay: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            users_url: users_url.into(),
            mock_delay,
            next_id: Box::new(timestamp_ids()),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.full_api_url(), config.mock_delay())
    }

    /// Replaces the id source used by `create_user`.
    pub fn with_id_generator(mut self, next_id: impl Fn() -> u64 + Send + Sync + 'static) -> Self {
        self.next_id = Box::new(next_id);
        self
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            error!(error = %e, "Request failed");
            FetchError::Network(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            error!(%status, "Non-success response");
            return Err(FetchError::Remote {
                status: status.as_u16(),
                message: format!("Http failure response for {}: {}", url, status),
            });
        }

        response.json::<T>().await.map_err(|e| {
            error!(error = %e, "Response body could not be decoded");
            FetchError::Remote {
                status: status.as_u16(),
                message: format!("Http failure during parsing for {}", url),
            }
        })
    }

    async fn simulate_latency(&self) {
        if !self.mock_delay.is_zero() {
            tokio::time::sleep(self.mock_delay).await;
        }
    }
}

#[async_trait]
impl UserApi for HttpUserApi {
    #[instrument(skip(self))]
    async fn fetch_users(&self) -> Result<Vec<RawUser>, FetchError> {
        debug!(url = %self.users_url, "Fetching users");
        let users: Vec<RawUser> = self.get_json(&self.users_url).await?;
        info!(user_count = users.len(), "Fetched users");
        Ok(users)
    }

    #[instrument(skip(self))]
    async fn fetch_user(&self, id: u64) -> Result<RawUser, FetchError> {
        debug!("Fetching user");
        self.get_json(&format!("{}/{}", self.users_url, id)).await
    }

    #[instrument(skip(self, form), fields(user_name = %form.name))]
    async fn create_user(&self, form: UserFormData) -> Result<User, FetchError> {
        let id = (self.next_id)();
        self.simulate_latency().await;
        info!(user_id = id, "Simulated create");
        Ok(User::from_form(id, form))
    }

    #[instrument(skip(self, form))]
    async fn update_user(&self, id: u64, form: UserFormData) -> Result<User, FetchError> {
        self.simulate_latency().await;
        info!("Simulated update");
        Ok(User::from_form(id, form))
    }

    #[instrument(skip(self))]
    async fn delete_user(&self, id: u64) -> Result<bool, FetchError> {
        self.simulate_latency().await;
        info!("Simulated delete");
        Ok(true)
    }
}

/// Monotonic ids seeded from the current epoch milliseconds, so they sit far
/// above the small ids handed out by the remote source.
pub fn timestamp_ids() -> impl Fn() -> u64 + Send + Sync {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(1)
        .max(1);
    let counter = Arc::new(AtomicU64::new(seed));
    move || counter.fetch_add(1, Ordering::SeqCst)
}
