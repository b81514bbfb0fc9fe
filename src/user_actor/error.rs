use thiserror::Error;

/// Errors a [`UserClient`](crate::clients::UserClient) call can return.
///
/// Fetch failures are not here; they come back as
/// [`Outcome::Failed`](crate::messages::Outcome::Failed).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserError {
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
