use std::sync::Arc;

use crossterm::event::{KeyCode, KeyModifiers};
use log::debug;
use parking_lot::RwLock;
use ratatui::{layout::Rect, Frame};

use super::view::ModalView;
use super::{ModalEvent, ModalHandle, ModalHost, ModalId, ModalOptions, ModalSession, Notice};
use crate::dialog::types::{DialogStateId, FormField, Message, StateTable};
use crate::i18n::Translator;

type SharedView = Arc<RwLock<ModalView>>;

/// Modal host drawing into a ratatui frame. Modals stack; only the topmost
/// open one is interactive.
pub struct TerminalModalHost {
    views: Vec<SharedView>,
    translator: Arc<dyn Translator>,
}

impl TerminalModalHost {
    pub fn new(translator: Arc<dyn Translator>) -> Self {
        Self {
            views: Vec::new(),
            translator,
        }
    }

    fn prune(&mut self) {
        self.views.retain(|view| view.read().open);
    }

    fn top(&mut self) -> Option<SharedView> {
        self.prune();
        self.views.last().cloned()
    }

    pub fn has_open_modal(&mut self) -> bool {
        self.top().is_some()
    }

    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> Option<ModalEvent> {
        let view = self.top()?;
        let mut view = view.write();
        let value = view.handle_key(key, modifiers)?;
        Some(Self::activate(&mut view, value))
    }

    pub fn handle_mouse_click(&mut self, column: u16, row: u16) -> Option<ModalEvent> {
        let view = self.top()?;
        let mut view = view.write();
        let value = view.handle_mouse_click(column, row)?;
        Some(Self::activate(&mut view, value))
    }

    fn activate(view: &mut ModalView, value: crate::dialog::types::ButtonValue) -> ModalEvent {
        debug!("Modal {:?} activated {value:?}", view.id);
        if !view.options.persistent {
            view.open = false;
        }
        ModalEvent { modal: view.id, value }
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect) {
        self.prune();
        for view in &self.views {
            view.write().render(f, area);
        }
    }
}

impl ModalHost for TerminalModalHost {
    fn open_with_states(&mut self, table: StateTable, options: ModalOptions) -> Box<dyn ModalSession> {
        let view = Arc::new(RwLock::new(ModalView::with_states(
            table,
            options,
            Arc::clone(&self.translator),
        )));
        self.views.push(Arc::clone(&view));
        Box::new(TerminalSession { view })
    }

    fn open_notice(&mut self, notice: Notice) -> Box<dyn ModalHandle> {
        let view = Arc::new(RwLock::new(ModalView::notice(notice, Arc::clone(&self.translator))));
        self.views.push(Arc::clone(&view));
        Box::new(TerminalSession { view })
    }
}

struct TerminalSession {
    view: SharedView,
}

impl ModalHandle for TerminalSession {
    fn id(&self) -> ModalId {
        self.view.read().id
    }

    fn close(&mut self) {
        self.view.write().open = false;
    }

    fn is_open(&self) -> bool {
        self.view.read().open
    }
}

impl ModalSession for TerminalSession {
    fn go_to_state(&mut self, state: DialogStateId) {
        self.view.write().enter_state(state);
    }

    fn current_state(&self) -> Option<DialogStateId> {
        self.view.read().current_state().map(|s| s.id)
    }

    fn set_message(&mut self, state: DialogStateId, message: Message) {
        self.view.write().set_message(state, message);
    }

    fn field_value(&self, field: FormField) -> String {
        self.view.read().field_value(field)
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::dialog::types::{ButtonSpec, ButtonValue};
    use crate::dialog::{AuthDialog, AuthStateMachine};
    use crate::i18n::Catalog;

    fn host() -> TerminalModalHost {
        TerminalModalHost::new(Arc::new(Catalog::english()))
    }

    fn screen(host: &mut TerminalModalHost) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| host.render(f, f.area())).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn type_text(host: &mut TerminalModalHost, text: &str) {
        for c in text.chars() {
            host.handle_key(KeyCode::Char(c), KeyModifiers::NONE);
        }
    }

    #[test]
    fn renders_login_form_and_masks_secret() {
        let mut host = host();
        let _session = host.open_with_states(AuthStateMachine::state_table(true), ModalOptions::default());
        type_text(&mut host, "alice");
        host.handle_key(KeyCode::Tab, KeyModifiers::NONE);
        type_text(&mut host, "p@ss");

        let text = screen(&mut host);
        assert!(text.contains("Password required"));
        assert!(text.contains("alice"));
        assert!(text.contains("****"));
        assert!(!text.contains("p@ss"));
        assert!(text.contains("Cancel"));
    }

    #[test]
    fn session_reflects_state_changes_and_messages() {
        let mut host = host();
        let mut session = host.open_with_states(AuthStateMachine::state_table(false), ModalOptions::default());
        session.set_message(DialogStateId::Finished, Message::new("dialog.incorrectPassword"));
        session.go_to_state(DialogStateId::Finished);

        assert_eq!(session.current_state(), Some(DialogStateId::Finished));
        let text = screen(&mut host);
        assert!(text.contains("Incorrect username or password"));
        assert!(text.contains("Retry"));
        assert!(!text.contains("Cancel"));
    }

    #[test]
    fn key_events_are_tagged_with_modal_id() {
        let mut host = host();
        let session = host.open_with_states(AuthStateMachine::state_table(true), ModalOptions::default());
        let event = host.handle_key(KeyCode::Esc, KeyModifiers::NONE).unwrap();
        assert_eq!(event.modal, session.id());
        assert_eq!(event.value, ButtonValue::Cancel);
        // Persistent modals stay open after activation.
        assert!(session.is_open());
    }

    #[test]
    fn notice_on_top_receives_input_and_closes_itself() {
        let mut host = host();
        let dialog_session = host.open_with_states(AuthStateMachine::state_table(true), ModalOptions::default());
        let notice = host.open_notice(Notice {
            title_key: "dialog.popupErrorTitle",
            message: Message::new("dialog.popupError"),
            buttons: vec![ButtonSpec::new("dialog.Ok", ButtonValue::Dismiss, 'o')],
            persistent: false,
        });

        let event = host.handle_key(KeyCode::Enter, KeyModifiers::NONE).unwrap();
        assert_eq!(event.modal, notice.id());
        assert!(!notice.is_open());

        let event = host.handle_key(KeyCode::Enter, KeyModifiers::NONE).unwrap();
        assert_eq!(event.modal, dialog_session.id());
        assert_eq!(event.value, ButtonValue::Confirm);
    }

    #[test]
    fn closed_session_disappears_and_double_close_is_fine() {
        let mut host = host();
        let mut session = host.open_with_states(AuthStateMachine::state_table(true), ModalOptions::default());
        session.close();
        session.close();
        assert!(!host.has_open_modal());
        assert!(host.handle_key(KeyCode::Enter, KeyModifiers::NONE).is_none());
    }

    #[test]
    fn auth_dialog_drives_terminal_host() {
        let mut host = host();
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let mut dialog = AuthDialog::open(
            &mut host,
            crate::config::HostConfig::default(),
            Box::new(move |creds| {
                let _ = tx.send(creds);
            }),
            None,
        );

        type_text(&mut host, "alice");
        host.handle_key(KeyCode::Tab, KeyModifiers::NONE);
        type_text(&mut host, "p@ss");
        let event = host.handle_key(KeyCode::Enter, KeyModifiers::NONE).unwrap();
        assert_eq!(event.modal, dialog.modal_id());
        dialog.submit(event.value);

        assert_eq!(dialog.current_state(), Some(DialogStateId::Connecting));
        let creds = rx.try_recv().unwrap();
        assert_eq!(creds.identity, "alice");
        assert_eq!(creds.secret, "p@ss");

        dialog.display_connection_status("connection.AUTHENTICATING");
        assert!(screen(&mut host).contains("Authenticating..."));
    }
}
