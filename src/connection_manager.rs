use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{error, info};

use crate::client::{ConnectionError, ConnectionEvent, ConnectionService, Credentials, StatusSender};
use crate::config::{HostConfig, ServiceConfig};
use crate::identity::domain_of;

/// In-process stand-in for a conference server's authentication handshake.
pub struct SimulatedConnection {
    accounts: BTreeMap<String, String>,
    domains: Vec<String>,
    step_latency: Duration,
    unreachable: bool,
    denied: Vec<String>,
}

impl SimulatedConnection {
    pub fn new(service: &ServiceConfig, hosts: &HostConfig) -> Self {
        let domains = [hosts.authdomain.as_ref(), hosts.domain.as_ref()]
            .into_iter()
            .flatten()
            .cloned()
            .collect();
        Self {
            accounts: service.accounts.clone(),
            domains,
            step_latency: Duration::from_millis(service.step_latency_ms),
            unreachable: service.unreachable,
            denied: service.denied.clone(),
        }
    }

    fn knows_domain(&self, identity: &str) -> bool {
        match domain_of(identity) {
            Some(domain) => self.domains.iter().any(|d| d == domain),
            // Bare identities are only valid when no domain is configured.
            None => self.domains.is_empty(),
        }
    }

    fn status(status: &StatusSender, key: &str) {
        let _ = status.send(ConnectionEvent::Status(key.to_string()));
    }
}

#[async_trait]
impl ConnectionService for SimulatedConnection {
    async fn connect(&self, credentials: Credentials, status: StatusSender) -> Result<(), ConnectionError> {
        Self::status(&status, "connection.CONNECTING");
        tokio::time::sleep(self.step_latency).await;

        if self.unreachable {
            return Err(ConnectionError::ConnectionDropped);
        }
        if !self.knows_domain(&credentials.identity) {
            return Err(ConnectionError::ServerError);
        }

        Self::status(&status, "connection.AUTHENTICATING");
        tokio::time::sleep(self.step_latency).await;

        match self.accounts.get(&credentials.identity) {
            Some(secret) if *secret == credentials.secret => {
                if self.denied.contains(&credentials.identity) {
                    return Err(ConnectionError::NotAllowed);
                }
                Self::status(&status, "connection.CONNECTED");
                Ok(())
            }
            _ => Err(ConnectionError::PasswordRequired),
        }
    }
}

/// Runs one attempt in the background and reports its outcome on `events`.
pub fn spawn_attempt(
    service: Arc<dyn ConnectionService>,
    credentials: Credentials,
    events: StatusSender,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let identity = credentials.identity.clone();
        let outcome = match service.connect(credentials, events.clone()).await {
            Ok(()) => {
                info!("Connected as {identity}");
                ConnectionEvent::Connected(identity)
            }
            Err(e) => {
                error!("Connection attempt for {identity} failed: {e}");
                ConnectionEvent::Failed(e)
            }
        };
        let _ = events.send(outcome);
    })
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;

    use super::*;

    fn service(unreachable: bool) -> SimulatedConnection {
        service_with(ServiceConfig {
            unreachable,
            ..ServiceConfig::default()
        })
    }

    fn service_with(config: ServiceConfig) -> SimulatedConnection {
        let hosts = HostConfig {
            domain: Some("meet.example.org".to_string()),
            authdomain: Some("auth.meet.example.org".to_string()),
        };
        SimulatedConnection::new(&config, &hosts)
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<ConnectionEvent>) -> Vec<ConnectionEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[tokio::test(start_paused = true)]
    async fn valid_account_connects_with_progress() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let result = service(false)
            .connect(Credentials::new("alice@auth.meet.example.org", "p@ss"), tx)
            .await;
        assert_eq!(result, Ok(()));
        assert_eq!(
            drain(&mut rx),
            vec![
                ConnectionEvent::Status("connection.CONNECTING".into()),
                ConnectionEvent::Status("connection.AUTHENTICATING".into()),
                ConnectionEvent::Status("connection.CONNECTED".into()),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn wrong_secret_requires_password() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let result = service(false)
            .connect(Credentials::new("alice@auth.meet.example.org", "nope"), tx)
            .await;
        assert_eq!(result, Err(ConnectionError::PasswordRequired));
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_domain_is_server_error() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let result = service(false)
            .connect(Credentials::new("alice@elsewhere.org", "p@ss"), tx)
            .await;
        assert_eq!(result, Err(ConnectionError::ServerError));
    }

    #[tokio::test(start_paused = true)]
    async fn denied_account_is_not_allowed() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let result = service_with(ServiceConfig {
            denied: vec!["alice@auth.meet.example.org".to_string()],
            ..ServiceConfig::default()
        })
        .connect(Credentials::new("alice@auth.meet.example.org", "p@ss"), tx)
        .await;
        assert_eq!(result, Err(ConnectionError::NotAllowed));
        assert!(!drain(&mut rx).contains(&ConnectionEvent::Status("connection.CONNECTED".into())));
    }

    #[tokio::test(start_paused = true)]
    async fn unreachable_server_drops() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let result = service(true)
            .connect(Credentials::new("alice@auth.meet.example.org", "p@ss"), tx)
            .await;
        assert_eq!(result, Err(ConnectionError::ConnectionDropped));
    }

    #[tokio::test(start_paused = true)]
    async fn spawned_attempt_reports_outcome_last() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let service: Arc<dyn ConnectionService> = Arc::new(service(false));
        spawn_attempt(service, Credentials::new("alice@auth.meet.example.org", "bad"), tx)
            .await
            .unwrap();
        let events = drain(&mut rx);
        assert_eq!(events.last(), Some(&ConnectionEvent::Failed(ConnectionError::PasswordRequired)));
    }
}
