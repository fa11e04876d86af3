//! Authentication dialogs: the login/connecting/finished state machine and
//! the thin entry points that open it and its companion notices.

pub mod constants;
mod facade;
mod login;
mod state;
pub mod types;

pub use facade::{show_auth_dialog, show_auth_required_dialog, show_external_auth_dialog, WaitingForHostNotice};
pub use login::{AuthDialog, CancelCallback, SuccessCallback};
pub use state::AuthStateMachine;
