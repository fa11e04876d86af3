pub mod keys {
    pub const LOGIN_TITLE: &str = "dialog.passwordRequired";
    pub const CONNECTING_TITLE: &str = "dialog.connecting";
    pub const FINISHED_TITLE: &str = "dialog.error";
    pub const OK: &str = "dialog.Ok";
    pub const CANCEL: &str = "dialog.Cancel";
    pub const RETRY: &str = "dialog.retry";
    pub const IDENTITY_LABEL: &str = "dialog.user";
    pub const SECRET_LABEL: &str = "dialog.userPassword";
    pub const IDENTITY_PLACEHOLDER: &str = "dialog.userIdentifier";

    pub const INCORRECT_PASSWORD: &str = "dialog.incorrectPassword";
    pub const CONNECT_ERROR_WITH_MSG: &str = "dialog.connectErrorWithMsg";
    pub const CONNECTING_STATUS: &str = "connection.CONNECTING";

    pub const POPUP_ERROR_TITLE: &str = "dialog.popupErrorTitle";
    pub const POPUP_ERROR: &str = "dialog.popupError";
    pub const WAITING_FOR_HOST: &str = "dialog.WaitingForHost";
    pub const WAIT_FOR_HOST_MSG: &str = "dialog.WaitForHostMsg";
    pub const I_AM_HOST: &str = "dialog.IamHost";
}

pub mod popup {
    pub const WIDTH: u16 = 910;
    pub const HEIGHT: u16 = 660;
}

/// Option name that carries the raw error code into the generic error message.
pub const ERROR_MSG_OPTION: &str = "msg";
