//! # Mock Framework
//!
//! A [`UserApi`] whose calls are answered by the test.
//!
//! Use [`create_mock_api`] to get the fake and a receiver. Each call arrives on
//! the receiver as an [`ApiRequest`]; helpers like [`expect_fetch_users`] or
//! [`expect_create`] pull the next one out so the test can assert on it, poke at
//! the store while the call is still in flight, and then reply.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use crate::domain::{User, UserFormData};
use crate::remote::{FetchError, RawUser, UserApi};

pub type ApiResponse<T> = oneshot::Sender<Result<T, FetchError>>;

#[derive(Debug)]
pub enum ApiRequest {
    FetchUsers {
        respond_to: ApiResponse<Vec<RawUser>>,
    },
    FetchUser {
        id: u64,
        respond_to: ApiResponse<RawUser>,
    },
    CreateUser {
        form: UserFormData,
        respond_to: ApiResponse<User>,
    },
    UpdateUser {
        id: u64,
        form: UserFormData,
        respond_to: ApiResponse<User>,
    },
    DeleteUser {
        id: u64,
        respond_to: ApiResponse<bool>,
    },
}

pub struct MockUserApi {
    sender: mpsc::Sender<ApiRequest>,
}

impl MockUserApi {
    async fn call<T>(&self, request: impl FnOnce(ApiResponse<T>) -> ApiRequest) -> Result<T, FetchError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(request(respond_to))
            .await
            .map_err(|_| FetchError::Network("mock receiver closed".to_string()))?;
        response
            .await
            .map_err(|_| FetchError::Network("mock responder dropped".to_string()))?
    }
}

#[async_trait]
impl UserApi for MockUserApi {
    async fn fetch_users(&self) -> Result<Vec<RawUser>, FetchError> {
        self.call(|respond_to| ApiRequest::FetchUsers { respond_to }).await
    }

    async fn fetch_user(&self, id: u64) -> Result<RawUser, FetchError> {
        self.call(|respond_to| ApiRequest::FetchUser { id, respond_to }).await
    }

    async fn create_user(&self, form: UserFormData) -> Result<User, FetchError> {
        self.call(|respond_to| ApiRequest::CreateUser { form, respond_to }).await
    }

    async fn update_user(&self, id: u64, form: UserFormData) -> Result<User, FetchError> {
        self.call(|respond_to| ApiRequest::UpdateUser { id, form, respond_to }).await
    }

    async fn delete_user(&self, id: u64) -> Result<bool, FetchError> {
        self.call(|respond_to| ApiRequest::DeleteUser { id, respond_to }).await
    }
}

/// Creates a fake fetcher and the receiver its calls arrive on.
pub fn create_mock_api(buffer_size: usize) -> (Arc<MockUserApi>, mpsc::Receiver<ApiRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (Arc::new(MockUserApi { sender }), receiver)
}

/// Helper to verify that the next call is `fetch_users`
pub async fn expect_fetch_users(receiver: &mut mpsc::Receiver<ApiRequest>) -> Option<ApiResponse<Vec<RawUser>>> {
    match receiver.recv().await {
        Some(ApiRequest::FetchUsers { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next call is `fetch_user`
pub async fn expect_fetch_user(receiver: &mut mpsc::Receiver<ApiRequest>) -> Option<(u64, ApiResponse<RawUser>)> {
    match receiver.recv().await {
        Some(ApiRequest::FetchUser { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

pub async fn expect_create(receiver: &mut mpsc::Receiver<ApiRequest>) -> Option<(UserFormData, ApiResponse<User>)> {
    match receiver.recv().await {
        Some(ApiRequest::CreateUser { form, respond_to }) => Some((form, respond_to)),
        _ => None,
    }
}

pub async fn expect_update(
    receiver: &mut mpsc::Receiver<ApiRequest>,
) -> Option<(u64, UserFormData, ApiResponse<User>)> {
    match receiver.recv().await {
        Some(ApiRequest::UpdateUser { id, form, respond_to }) => Some((id, form, respond_to)),
        _ => None,
    }
}

pub async fn expect_delete(receiver: &mut mpsc::Receiver<ApiRequest>) -> Option<(u64, ApiResponse<bool>)> {
    match receiver.recv().await {
        Some(ApiRequest::DeleteUser { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserStatus;

    #[tokio::test]
    async fn test_mock_api() {
        let (api, mut receiver) = create_mock_api(10);

        let create_task = tokio::spawn(async move {
            let form = UserFormData::new("Test", "test@example.com", UserStatus::Active);
            api.create_user(form).await
        });

        let (form, responder) = expect_create(&mut receiver).await.expect("Expected CreateUser call");
        assert_eq!(form.name, "Test");
        responder.send(Ok(User::from_form(7, form))).unwrap();

        let user = create_task.await.unwrap().unwrap();
        assert_eq!(user.id, 7);
    }

    #[tokio::test]
    async fn dropped_responder_reads_as_network_error() {
        let (api, mut receiver) = create_mock_api(10);
        let task = tokio::spawn(async move { api.delete_user(1).await });

        let (_, responder) = expect_delete(&mut receiver).await.expect("Expected DeleteUser call");
        drop(responder);

        assert!(matches!(task.await.unwrap(), Err(FetchError::Network(_))));
    }
}
