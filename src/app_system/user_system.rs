use std::sync::Arc;

use tracing::{error, info};

use crate::clients::UserClient;
use crate::config::AppConfig;
use crate::remote::{HttpUserApi, UserApi};
use crate::store::UserStore;
use crate::user_actor::UserService;

/// Wires the store, the fetcher and the user service together and owns the
/// service task.
pub struct UserSystem {
    pub user_client: UserClient,
    pub store: Arc<UserStore>,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl UserSystem {
    /// Starts the system against the configured REST endpoint.
    pub fn new(config: &AppConfig) -> Self {
        Self::with_api(config, Arc::new(HttpUserApi::from_config(config)))
    }

    pub fn with_api(config: &AppConfig, api: Arc<dyn UserApi>) -> Self {
        info!(production = config.production, url = %config.full_api_url(), "Starting user system");
        let store = Arc::new(UserStore::new());

        let (service, user_client) = UserService::new(32, store.clone(), api);
        let service = service.with_default_limit(config.pagination.default_page_size);
        let handle = tokio::spawn(service.run());

        Self {
            user_client,
            store,
            handles: vec![handle],
        }
    }

    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");
        self.user_client.shutdown().await.map_err(|e| e.to_string())?;

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
