use log::{info, warn};

use super::constants::{keys, popup};
use super::login::{AuthDialog, CancelCallback, SuccessCallback};
use super::types::*;
use crate::config::HostConfig;
use crate::modal::{ModalHandle, ModalHost, ModalId, Notice};
use crate::popup::{PopupClosed, PopupHandle, PopupOpener};

pub fn show_auth_dialog(
    host: &mut dyn ModalHost,
    hosts: HostConfig,
    on_success: SuccessCallback,
    on_cancel: Option<CancelCallback>,
) -> AuthDialog {
    AuthDialog::open(host, hosts, on_success, on_cancel)
}

/// Opens the external authentication page. When no popup can be opened a
/// popup-blocked notice is shown instead and `None` is returned.
pub fn show_external_auth_dialog(
    host: &mut dyn ModalHost,
    popups: &mut dyn PopupOpener,
    url: &str,
    on_closed: PopupClosed,
) -> Option<PopupHandle> {
    let handle = popups.open(url, popup::WIDTH, popup::HEIGHT, on_closed);
    if handle.is_none() {
        warn!("Authentication popup for {url} could not be opened");
        host.open_notice(Notice {
            title_key: keys::POPUP_ERROR_TITLE,
            message: Message::new(keys::POPUP_ERROR),
            buttons: vec![ButtonSpec::new(keys::OK, ButtonValue::Dismiss, 'o')],
            persistent: false,
        });
    }
    handle
}

/// Persistent "waiting for host" notice. Its only button asks the caller to
/// authenticate now; it does not close the notice.
pub struct WaitingForHostNotice {
    handle: Box<dyn ModalHandle>,
    on_authenticate_now: Box<dyn FnMut() + Send>,
}

impl WaitingForHostNotice {
    pub fn modal_id(&self) -> ModalId {
        self.handle.id()
    }

    pub fn is_open(&self) -> bool {
        self.handle.is_open()
    }

    pub fn submit(&mut self, value: ButtonValue) {
        if value == ButtonValue::AuthenticateNow && self.handle.is_open() {
            info!("Host chose to authenticate");
            (self.on_authenticate_now)();
        }
    }

    pub fn close(&mut self) {
        self.handle.close();
    }
}

pub fn show_auth_required_dialog(
    host: &mut dyn ModalHost,
    room: &str,
    on_authenticate_now: Box<dyn FnMut() + Send>,
) -> WaitingForHostNotice {
    let handle = host.open_notice(Notice {
        title_key: keys::WAITING_FOR_HOST,
        message: Message::new(keys::WAIT_FOR_HOST_MSG).with_option("room", room),
        buttons: vec![ButtonSpec::new(keys::I_AM_HOST, ButtonValue::AuthenticateNow, 'h')],
        persistent: true,
    });
    WaitingForHostNotice {
        handle,
        on_authenticate_now,
    }
}
