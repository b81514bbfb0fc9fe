use tokio::sync::oneshot;

use crate::domain::{User, UserFilters, UserFormData, UserListResponse};

/// Result of one coordinated operation.
///
/// A failed fetch is not an `Err`: its message has already been written to the
/// store's error field, and the caller gets the same text back here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Succeeded(T),
    Failed(String),
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Succeeded(_))
    }

    pub fn ok(self) -> Option<T> {
        match self {
            Outcome::Succeeded(value) => Some(value),
            Outcome::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Outcome::Succeeded(_) => None,
            Outcome::Failed(message) => Some(message),
        }
    }
}

pub type ServiceResponse<T> = oneshot::Sender<Outcome<T>>;

/// Typed messages for the user service. Each variant carries its parameters
/// and a oneshot channel for the outcome.
#[derive(Debug)]
pub enum UserRequest {
    LoadUsers {
        filters: UserFilters,
        respond_to: ServiceResponse<UserListResponse>,
    },
    GetUser {
        id: u64,
        respond_to: ServiceResponse<User>,
    },
    SearchUsers {
        query: String,
        respond_to: ServiceResponse<Vec<User>>,
    },
    CreateUser {
        form: UserFormData,
        respond_to: ServiceResponse<User>,
    },
    UpdateUser {
        id: u64,
        form: UserFormData,
        respond_to: ServiceResponse<User>,
    },
    DeleteUser {
        id: u64,
        respond_to: ServiceResponse<bool>,
    },
    Shutdown,
}
