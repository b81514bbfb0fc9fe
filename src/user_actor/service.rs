use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info, info_span, instrument, Instrument};

use crate::clients::UserClient;
use crate::domain::{User, UserFilters, UserFormData, UserListResponse};
use crate::messages::{Outcome, ServiceResponse, UserRequest};
use crate::query;
use crate::remote::{map_raw_user, map_raw_users, FetchError, UserApi};
use crate::store::UserStore;

/// Actor that turns user requests into fetcher calls and store updates.
///
/// Every request that touches the fetcher runs on its own spawned task, so
/// operations overlap freely. Each one raises the shared loading flag on
/// arrival and lowers it when it finishes; with two in flight the last one
/// to write wins. A failure writes its message to the store's error field
/// and leaves the collection untouched.
pub struct UserService {
    receiver: mpsc::Receiver<UserRequest>,
    store: Arc<UserStore>,
    api: Arc<dyn UserApi>,
    default_limit: usize,
}

impl UserService {
    pub fn new(buffer_size: usize, store: Arc<UserStore>, api: Arc<dyn UserApi>) -> (Self, UserClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            store,
            api,
            default_limit: query::DEFAULT_LIMIT,
        };
        (service, UserClient::new(sender))
    }

    /// Page size used by `LoadUsers` when the filters carry no limit.
    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit;
        self
    }

    #[instrument(name = "user_service", skip(self))]
    pub async fn run(mut self) {
        info!("UserService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                UserRequest::LoadUsers { filters, respond_to } => {
                    self.handle_load_users(filters, respond_to);
                }
                UserRequest::GetUser { id, respond_to } => {
                    self.handle_get_user(id, respond_to);
                }
                UserRequest::SearchUsers { query, respond_to } => {
                    self.handle_search_users(query, respond_to);
                }
                UserRequest::CreateUser { form, respond_to } => {
                    self.handle_create_user(form, respond_to);
                }
                UserRequest::UpdateUser { id, form, respond_to } => {
                    self.handle_update_user(id, form, respond_to);
                }
                UserRequest::DeleteUser { id, respond_to } => {
                    self.handle_delete_user(id, respond_to);
                }
                UserRequest::Shutdown => {
                    info!("UserService shutting down");
                    break;
                }
            }
        }

        info!("UserService stopped");
    }

    /// Marks the store busy, then runs `work` on its own task.
    fn begin<T, F>(&self, span: tracing::Span, respond_to: ServiceResponse<T>, work: F)
    where
        T: Send + 'static,
        F: Future<Output = Outcome<T>> + Send + 'static,
    {
        self.store.set_loading(true);
        self.store.clear_error();
        tokio::spawn(respond_unless_abandoned(respond_to, work).instrument(span));
    }

    fn handle_load_users(&self, filters: UserFilters, respond_to: ServiceResponse<UserListResponse>) {
        debug!("Processing load_users request");
        let mut filters = filters;
        if filters.limit.is_none() {
            filters.limit = Some(self.default_limit);
        }

        let (store, api) = (self.store.clone(), self.api.clone());
        let span = info_span!("load_users", page = ?filters.page, limit = ?filters.limit);
        self.begin(span, respond_to, async move {
            match api.fetch_users().await {
                Ok(raw) => {
                    let users = map_raw_users(raw);
                    let filtered = query::apply_filters(&users, &filters);
                    let response = query::paginate(&filtered, filters.page, filters.limit);
                    store.set_users(filtered);
                    store.set_filters(filters);
                    store.set_loading(false);
                    info!(total = response.total, returned = response.users.len(), "Users loaded");
                    Outcome::Succeeded(response)
                }
                Err(e) => record_failure(&store, e),
            }
        });
    }

    fn handle_get_user(&self, id: u64, respond_to: ServiceResponse<User>) {
        debug!("Processing get_user request");
        let (store, api) = (self.store.clone(), self.api.clone());
        self.begin(info_span!("get_user", user_id = id), respond_to, async move {
            match api.fetch_user(id).await {
                Ok(raw) => {
                    let user = map_raw_user(raw);
                    store.set_loading(false);
                    info!(user_name = %user.name, "User found");
                    Outcome::Succeeded(user)
                }
                Err(e) => record_failure(&store, e),
            }
        });
    }

    /// Sync handler: searches the store's current collection, no fetch and no
    /// pagination.
    #[instrument(skip(self, respond_to))]
    fn handle_search_users(&self, query: String, respond_to: ServiceResponse<Vec<User>>) {
        debug!("Processing search_users request");
        let matches = self.store.users().with(|users| query::search(users, &query));
        info!(match_count = matches.len(), "Search complete");
        let _ = respond_to.send(Outcome::Succeeded(matches));
    }

    fn handle_create_user(&self, form: UserFormData, respond_to: ServiceResponse<User>) {
        debug!("Processing create_user request");
        let (store, api) = (self.store.clone(), self.api.clone());
        let span = info_span!("create_user", user_name = %form.name);
        self.begin(span, respond_to, async move {
            match api.create_user(form).await {
                Ok(user) => {
                    store.add_user(user.clone());
                    store.set_loading(false);
                    info!(user_id = user.id, "User created");
                    Outcome::Succeeded(user)
                }
                Err(e) => record_failure(&store, e),
            }
        });
    }

    fn handle_update_user(&self, id: u64, form: UserFormData, respond_to: ServiceResponse<User>) {
        debug!("Processing update_user request");
        let (store, api) = (self.store.clone(), self.api.clone());
        self.begin(info_span!("update_user", user_id = id), respond_to, async move {
            match api.update_user(id, form).await {
                Ok(user) => {
                    store.replace_user(user.clone());
                    store.set_loading(false);
                    info!("User updated");
                    Outcome::Succeeded(user)
                }
                Err(e) => record_failure(&store, e),
            }
        });
    }

    fn handle_delete_user(&self, id: u64, respond_to: ServiceResponse<bool>) {
        debug!("Processing delete_user request");
        let (store, api) = (self.store.clone(), self.api.clone());
        self.begin(info_span!("delete_user", user_id = id), respond_to, async move {
            match api.delete_user(id).await {
                Ok(deleted) => {
                    store.remove_user(id);
                    store.set_loading(false);
                    info!("User deleted");
                    Outcome::Succeeded(deleted)
                }
                Err(e) => record_failure(&store, e),
            }
        });
    }
}

fn record_failure<T>(store: &UserStore, e: FetchError) -> Outcome<T> {
    let message = e.to_string();
    error!(error = %message, "Operation failed");
    store.set_error(Some(message.clone()));
    store.set_loading(false);
    Outcome::Failed(message)
}

/// Drives `work` to completion unless the caller stops waiting first. An
/// abandoned operation is dropped where it stands; nothing is rolled back.
async fn respond_unless_abandoned<T, F>(mut respond_to: ServiceResponse<T>, work: F)
where
    F: Future<Output = Outcome<T>>,
{
    let outcome = tokio::select! {
        outcome = work => Some(outcome),
        _ = respond_to.closed() => None,
    };

    match outcome {
        Some(outcome) => {
            let _ = respond_to.send(outcome);
        }
        None => debug!("Caller went away, operation abandoned"),
    }
}
