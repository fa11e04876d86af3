//! Modal host abstraction used by the dialogs.
//!
//! A host presents named, multi-state modals. Dialog code only talks to the
//! traits below, so tests can substitute a recording host and the terminal UI
//! plugs in [`TerminalModalHost`].

use std::sync::atomic::{AtomicU64, Ordering};

use crate::dialog::types::{ButtonSpec, ButtonValue, DialogStateId, FormField, Message, StateTable};

mod render;
mod terminal;
mod view;

pub use terminal::TerminalModalHost;

static NEXT_MODAL_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModalId(u64);

impl ModalId {
    pub fn next() -> Self {
        ModalId(NEXT_MODAL_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalOptions {
    /// A persistent modal can only be left through its own buttons.
    pub persistent: bool,
}

impl Default for ModalOptions {
    fn default() -> Self {
        Self { persistent: true }
    }
}

/// Single-state informational dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub title_key: &'static str,
    pub message: Message,
    pub buttons: Vec<ButtonSpec>,
    pub persistent: bool,
}

/// A button activation reported by the host for one of its modals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalEvent {
    pub modal: ModalId,
    pub value: ButtonValue,
}

/// Handle to any open modal.
pub trait ModalHandle: Send {
    fn id(&self) -> ModalId;
    fn close(&mut self);
    fn is_open(&self) -> bool;
}

/// Handle to a modal opened with a state table.
pub trait ModalSession: ModalHandle {
    fn go_to_state(&mut self, state: DialogStateId);
    fn current_state(&self) -> Option<DialogStateId>;
    /// Writes the message region of `state`. Writing a state that is not
    /// active is allowed; the text shows once that state becomes active.
    fn set_message(&mut self, state: DialogStateId, message: Message);
    fn field_value(&self, field: FormField) -> String;
}

pub trait ModalHost {
    fn open_with_states(&mut self, table: StateTable, options: ModalOptions) -> Box<dyn ModalSession>;
    fn open_notice(&mut self, notice: Notice) -> Box<dyn ModalHandle>;
}

#[cfg(test)]
pub mod testing {
    //! Recording host shared by dialog tests.

    use std::collections::HashMap;
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum HostCall {
        Opened(ModalId),
        NoticeOpened(ModalId, &'static str),
        GoTo(DialogStateId),
        SetMessage(DialogStateId, Message),
        Closed(ModalId),
        Callback(&'static str),
    }

    #[derive(Default)]
    pub struct Recorded {
        pub calls: Vec<HostCall>,
        pub tables: Vec<StateTable>,
        pub notices: Vec<Notice>,
        pub fields: HashMap<FormField, String>,
        pub state: Option<DialogStateId>,
        pub messages: HashMap<DialogStateId, Message>,
        pub close_count: usize,
    }

    /// Host whose sessions write into one shared log.
    #[derive(Clone, Default)]
    pub struct RecordingHost {
        pub log: Arc<Mutex<Recorded>>,
    }

    impl RecordingHost {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set_field(&self, field: FormField, value: &str) {
            self.log.lock().fields.insert(field, value.to_string());
        }

        pub fn record(&self, call: HostCall) {
            self.log.lock().calls.push(call);
        }

        pub fn calls(&self) -> Vec<HostCall> {
            self.log.lock().calls.clone()
        }

        pub fn state(&self) -> Option<DialogStateId> {
            self.log.lock().state
        }

        pub fn message(&self, state: DialogStateId) -> Option<Message> {
            self.log.lock().messages.get(&state).cloned()
        }

        pub fn table(&self) -> StateTable {
            self.log.lock().tables.last().cloned().expect("no table opened")
        }
    }

    struct RecordingSession {
        id: ModalId,
        open: bool,
        log: Arc<Mutex<Recorded>>,
    }

    impl ModalHandle for RecordingSession {
        fn id(&self) -> ModalId {
            self.id
        }

        fn close(&mut self) {
            let mut log = self.log.lock();
            log.close_count += 1;
            if self.open {
                self.open = false;
                log.calls.push(HostCall::Closed(self.id));
            }
        }

        fn is_open(&self) -> bool {
            self.open
        }
    }

    impl ModalSession for RecordingSession {
        fn go_to_state(&mut self, state: DialogStateId) {
            let mut log = self.log.lock();
            log.state = Some(state);
            log.calls.push(HostCall::GoTo(state));
        }

        fn current_state(&self) -> Option<DialogStateId> {
            self.log.lock().state
        }

        fn set_message(&mut self, state: DialogStateId, message: Message) {
            let mut log = self.log.lock();
            log.messages.insert(state, message.clone());
            log.calls.push(HostCall::SetMessage(state, message));
        }

        fn field_value(&self, field: FormField) -> String {
            self.log.lock().fields.get(&field).cloned().unwrap_or_default()
        }
    }

    impl ModalHost for RecordingHost {
        fn open_with_states(&mut self, table: StateTable, _options: ModalOptions) -> Box<dyn ModalSession> {
            let id = ModalId::next();
            let mut log = self.log.lock();
            log.state = table.initial().map(|s| s.id);
            log.tables.push(table);
            log.calls.push(HostCall::Opened(id));
            Box::new(RecordingSession {
                id,
                open: true,
                log: Arc::clone(&self.log),
            })
        }

        fn open_notice(&mut self, notice: Notice) -> Box<dyn ModalHandle> {
            let id = ModalId::next();
            let mut log = self.log.lock();
            log.calls.push(HostCall::NoticeOpened(id, notice.title_key));
            log.notices.push(notice);
            Box::new(RecordingSession {
                id,
                open: true,
                log: Arc::clone(&self.log),
            })
        }
    }
}
