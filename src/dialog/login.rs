use log::{debug, info, warn};

use super::constants::{keys, ERROR_MSG_OPTION};
use super::state::SubmitOutcome;
use super::AuthStateMachine;
use super::types::*;
use crate::client::{ConnectionError, Credentials};
use crate::config::HostConfig;
use crate::identity::to_identity;
use crate::modal::{ModalHost, ModalId, ModalOptions, ModalSession};

pub type SuccessCallback = Box<dyn FnMut(Credentials) + Send>;
pub type CancelCallback = Box<dyn FnMut() + Send>;

/// Login / connecting / finished dialog driving a credentialed connection.
///
/// The dialog starts the connection attempt itself (through `on_success`),
/// but learns about its outcome only when the surrounding code calls
/// [`AuthDialog::display_error`], [`AuthDialog::display_connection_status`]
/// or [`AuthDialog::close`].
pub struct AuthDialog {
    session: Box<dyn ModalSession>,
    table: StateTable,
    hosts: HostConfig,
    on_success: SuccessCallback,
    on_cancel: Option<CancelCallback>,
}

impl AuthDialog {
    /// Opens the dialog in the `Login` state. Without `on_cancel` the user
    /// is never offered a cancel button.
    pub fn open(
        host: &mut dyn ModalHost,
        hosts: HostConfig,
        on_success: SuccessCallback,
        on_cancel: Option<CancelCallback>,
    ) -> Self {
        let table = AuthStateMachine::state_table(on_cancel.is_some());
        let session = host.open_with_states(table.clone(), ModalOptions { persistent: true });
        debug!(
            "Opened authentication dialog {:?} (cancel offered: {})",
            session.id(),
            on_cancel.is_some()
        );

        Self {
            session,
            table,
            hosts,
            on_success,
            on_cancel,
        }
    }

    pub fn modal_id(&self) -> ModalId {
        self.session.id()
    }

    pub fn is_open(&self) -> bool {
        self.session.is_open()
    }

    pub fn current_state(&self) -> Option<DialogStateId> {
        self.session.current_state()
    }

    /// Handles a button activation in the active state.
    pub fn submit(&mut self, value: ButtonValue) {
        if !self.session.is_open() {
            return;
        }
        let Some(current) = self.session.current_state() else {
            return;
        };
        let offered = self
            .table
            .get(current)
            .is_some_and(|state| state.offers(value));
        if !offered {
            debug!("Ignoring {value:?}: not offered in state '{}'", current.name());
            return;
        }

        match AuthStateMachine::on_submit(current, value) {
            SubmitOutcome::Authenticate => self.authenticate(),
            SubmitOutcome::Cancel => {
                if let Some(on_cancel) = self.on_cancel.as_mut() {
                    info!("Authentication cancelled by user");
                    on_cancel();
                }
            }
            SubmitOutcome::GoTo(state) => self.session.go_to_state(state),
            SubmitOutcome::Ignore => {}
        }
    }

    fn authenticate(&mut self) {
        let raw_identity = self.session.field_value(FormField::Identity);
        let secret = self.session.field_value(FormField::Secret);
        if raw_identity.is_empty() || secret.is_empty() {
            debug!("Login submitted with an empty field, staying in login");
            return;
        }

        let identity = to_identity(&raw_identity, &self.hosts);
        // The form must be gone before the attempt starts.
        self.session.go_to_state(DialogStateId::Connecting);
        info!("Authenticating as {identity}");
        (self.on_success)(Credentials::new(identity, secret));
    }

    /// Reports a failed attempt and moves to `Finished`, whatever the current state.
    pub fn display_error(&mut self, error: &ConnectionError, options: MessageOptions) {
        let message = Self::error_message(error, options);
        warn!("Authentication failed: {error}");
        self.session.set_message(DialogStateId::Finished, message);
        self.session.go_to_state(DialogStateId::Finished);
    }

    /// Reaching this dialog again with `PasswordRequired` means the previous
    /// credentials were rejected.
    pub fn error_message(error: &ConnectionError, mut options: MessageOptions) -> Message {
        match error {
            ConnectionError::PasswordRequired => Message::with_options(keys::INCORRECT_PASSWORD, options),
            other => {
                options.insert(ERROR_MSG_OPTION.to_string(), other.code());
                Message::with_options(keys::CONNECT_ERROR_WITH_MSG, options)
            }
        }
    }

    /// Writes the `Connecting` status line. Does not change state.
    pub fn display_connection_status(&mut self, message_key: &str) {
        self.session
            .set_message(DialogStateId::Connecting, Message::new(message_key));
    }

    pub fn close(&mut self) {
        if self.session.is_open() {
            debug!("Closing authentication dialog {:?}", self.session.id());
        }
        self.session.close();
    }
}
