use std::fmt;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;

/// Identity/secret pair read from the login form at submit time.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub identity: String,
    pub secret: String,
}

impl Credentials {
    pub fn new(identity: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identity", &self.identity)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Failures reported by the connection service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectionError {
    #[error("connection.passwordRequired")]
    PasswordRequired,
    #[error("connection.droppedError")]
    ConnectionDropped,
    #[error("connection.serverError")]
    ServerError,
    #[error("connection.notAllowed")]
    NotAllowed,
    #[error("{0}")]
    Other(String),
}

impl ConnectionError {
    /// Raw tag of the error, as it is passed into message formatting.
    pub fn code(&self) -> String {
        self.to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionStatus {
    Connected(String),
    Connecting,
    Disconnected,
    Cancelled,
    Error(String),
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionStatus::Connected(identity) => write!(f, "Connected as {identity}"),
            ConnectionStatus::Connecting => write!(f, "Connecting"),
            ConnectionStatus::Disconnected => write!(f, "Disconnected"),
            ConnectionStatus::Cancelled => write!(f, "Cancelled"),
            ConnectionStatus::Error(code) => write!(f, "Error ({code})"),
        }
    }
}

/// Coarse progress and completion events of a connection attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionEvent {
    Status(String),
    Connected(String),
    Failed(ConnectionError),
}

pub type StatusSender = UnboundedSender<ConnectionEvent>;

#[async_trait]
pub trait ConnectionService: Send + Sync {
    /// Performs the credentialed handshake. Progress is reported on `status`
    /// while the attempt runs.
    async fn connect(&self, credentials: Credentials, status: StatusSender) -> Result<(), ConnectionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn other_errors_pass_their_code_through() {
        assert_eq!(ConnectionError::Other("some-other-code".into()).code(), "some-other-code");
        assert_eq!(ConnectionError::PasswordRequired.code(), "connection.passwordRequired");
    }

    #[test]
    fn credentials_debug_hides_secret() {
        let creds = Credentials::new("alice@example.org", "p@ss");
        let printed = format!("{creds:?}");
        assert!(printed.contains("alice@example.org"));
        assert!(!printed.contains("p@ss"));
    }
}
