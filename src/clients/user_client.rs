use tokio::sync::mpsc;
use tracing::{debug, instrument};

use crate::domain::{User, UserFilters, UserFormData, UserListResponse};
use crate::messages::UserRequest;
use crate::user_actor::UserError;

/// Cloneable handle to the [`UserService`](crate::user_actor::UserService).
#[derive(Clone)]
pub struct UserClient {
    sender: mpsc::Sender<UserRequest>,
}

impl UserClient {
    pub fn new(sender: mpsc::Sender<UserRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), UserError> {
        debug!("Sending shutdown request");
        self.sender
            .send(UserRequest::Shutdown)
            .await
            .map_err(|e| UserError::ActorCommunicationError(e.to_string()))
    }
}

client_method!(UserClient => fn load_users(filters: UserFilters) -> UserListResponse as UserRequest::LoadUsers);
client_method!(UserClient => fn get_user(id: u64) -> User as UserRequest::GetUser);
client_method!(UserClient => fn search_users(query: String) -> Vec<User> as UserRequest::SearchUsers);
client_method!(UserClient => fn create_user(form: UserFormData) -> User as UserRequest::CreateUser);
client_method!(UserClient => fn update_user(id: u64, form: UserFormData) -> User as UserRequest::UpdateUser);
client_method!(UserClient => fn delete_user(id: u64) -> bool as UserRequest::DeleteUser);
