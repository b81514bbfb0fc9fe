use thiserror::Error;

/// Failures surfaced by a [`UserApi`](super::UserApi). The `Display` text is the
/// human-readable message stored on the record store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// Transport failure: connection refused, DNS, offline.
    #[error("Error: {0}")]
    Network(String),
    /// The server answered with a non-2xx status, or with a body that could not be read.
    #[error("Error Code: {status}\nMessage: {message}")]
    Remote { status: u16, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_the_displayed_format() {
        let network = FetchError::Network("connection refused".to_string());
        assert_eq!(network.to_string(), "Error: connection refused");

        let remote = FetchError::Remote {
            status: 0,
            message: "Unknown Error".to_string(),
        };
        assert_eq!(remote.to_string(), "Error Code: 0\nMessage: Unknown Error");
    }
}
