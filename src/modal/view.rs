use std::collections::HashMap;
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyModifiers};
use tui_input::{Input, InputRequest};

use super::{ModalId, ModalOptions, Notice};
use crate::components::{Button, ButtonManager};
use crate::dialog::types::*;
use crate::i18n::Translator;

pub(super) enum ViewKind {
    States {
        table: StateTable,
        current: DialogStateId,
        messages: HashMap<DialogStateId, Message>,
    },
    Notice(Notice),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Focus {
    Field(FormField),
    Button(usize),
}

/// Everything the terminal host needs to draw and drive one open modal.
pub(super) struct ModalView {
    pub id: ModalId,
    pub kind: ViewKind,
    pub options: ModalOptions,
    pub open: bool,
    pub identity: Input,
    pub secret: Input,
    pub focus: Option<Focus>,
    pub buttons: ButtonManager,
    pub translator: Arc<dyn Translator>,
}

impl ModalView {
    pub fn with_states(table: StateTable, options: ModalOptions, translator: Arc<dyn Translator>) -> Self {
        let initial = table.initial().map(|s| s.id).unwrap_or(DialogStateId::Login);
        let mut view = Self {
            id: ModalId::next(),
            kind: ViewKind::States {
                table,
                current: initial,
                messages: HashMap::new(),
            },
            options,
            open: true,
            identity: Input::default(),
            secret: Input::default(),
            focus: None,
            buttons: ButtonManager::new(),
            translator,
        };
        view.enter_state(initial);
        view
    }

    pub fn notice(notice: Notice, translator: Arc<dyn Translator>) -> Self {
        let options = ModalOptions {
            persistent: notice.persistent,
        };
        let mut view = Self {
            id: ModalId::next(),
            kind: ViewKind::Notice(notice),
            options,
            open: true,
            identity: Input::default(),
            secret: Input::default(),
            focus: None,
            buttons: ButtonManager::new(),
            translator,
        };
        view.setup_buttons();
        if !view.buttons.is_empty() {
            view.set_focus(Some(Focus::Button(0)));
        }
        view
    }

    pub fn current_state(&self) -> Option<&DialogStateSpec> {
        match &self.kind {
            ViewKind::States { table, current, .. } => table.get(*current),
            ViewKind::Notice(_) => None,
        }
    }

    fn has_form(&self) -> bool {
        self.current_state()
            .is_some_and(|s| s.body == StateBody::CredentialForm)
    }

    fn button_specs(&self) -> Vec<ButtonSpec> {
        match &self.kind {
            ViewKind::States { .. } => self
                .current_state()
                .map(|s| s.buttons.clone())
                .unwrap_or_default(),
            ViewKind::Notice(notice) => notice.buttons.clone(),
        }
    }

    fn default_value(&self) -> Option<ButtonValue> {
        match &self.kind {
            ViewKind::States { .. } => self.current_state().and_then(DialogStateSpec::default_value),
            ViewKind::Notice(notice) => notice.buttons.first().map(|b| b.value),
        }
    }

    fn offers(&self, value: ButtonValue) -> bool {
        self.button_specs().iter().any(|b| b.value == value)
    }

    fn setup_buttons(&mut self) {
        self.buttons.clear();
        for spec in self.button_specs() {
            let label = self.translator.text(spec.label_key);
            self.buttons
                .add_button(Button::new(spec.value, &label).with_hotkey(spec.hotkey));
        }
    }

    /// Switches state, rebuilding buttons and focus. Typed field values are kept.
    pub fn enter_state(&mut self, state: DialogStateId) {
        let focus = match &mut self.kind {
            ViewKind::States { table, current, .. } => {
                let Some(spec) = table.get(state) else {
                    log::warn!("Modal {:?} has no state '{}'", self.id, state.name());
                    return;
                };
                *current = state;
                spec.focus
            }
            ViewKind::Notice(_) => return,
        };
        self.setup_buttons();
        self.sync_confirm_enabled();
        let focus = match focus {
            Some(field) => Some(Focus::Field(field)),
            None if !self.buttons.is_empty() => Some(Focus::Button(0)),
            None => None,
        };
        self.set_focus(focus);
    }

    pub fn set_message(&mut self, state: DialogStateId, message: Message) {
        if let ViewKind::States { messages, .. } = &mut self.kind {
            messages.insert(state, message);
        }
    }

    pub fn message(&self, state: DialogStateId) -> Option<&Message> {
        match &self.kind {
            ViewKind::States { messages, .. } => messages.get(&state),
            ViewKind::Notice(_) => None,
        }
    }

    pub fn field_value(&self, field: FormField) -> String {
        match field {
            FormField::Identity => self.identity.value().to_string(),
            FormField::Secret => self.secret.value().to_string(),
        }
    }

    /// Ok stays disabled until both credential fields hold text.
    fn sync_confirm_enabled(&mut self) {
        if self.has_form() {
            let filled = !self.identity.value().is_empty() && !self.secret.value().is_empty();
            self.buttons.set_button_enabled(ButtonValue::Confirm, filled);
        }
    }

    fn set_focus(&mut self, focus: Option<Focus>) {
        self.focus = focus;
        match focus {
            Some(Focus::Button(idx)) => self.buttons.focus(Some(idx)),
            _ => self.buttons.focus(None),
        }
    }

    fn focus_order(&self) -> Vec<Focus> {
        let mut order = Vec::new();
        if self.has_form() {
            order.push(Focus::Field(FormField::Identity));
            order.push(Focus::Field(FormField::Secret));
        }
        order.extend((0..self.buttons.len()).map(Focus::Button));
        order
    }

    fn cycle_focus(&mut self, forward: bool) {
        let order = self.focus_order();
        if order.is_empty() {
            return;
        }
        let pos = self.focus.and_then(|f| order.iter().position(|o| *o == f));
        let next = match (pos, forward) {
            (None, _) => 0,
            (Some(p), true) => (p + 1) % order.len(),
            (Some(p), false) => (p + order.len() - 1) % order.len(),
        };
        self.set_focus(Some(order[next]));
    }

    fn focused_input(&mut self) -> Option<&mut Input> {
        if !self.has_form() {
            return None;
        }
        match self.focus {
            Some(Focus::Field(FormField::Identity)) => Some(&mut self.identity),
            Some(Focus::Field(FormField::Secret)) => Some(&mut self.secret),
            _ => None,
        }
    }

    /// Routes a key to focus, field editing or buttons. Returns the value of
    /// an activated button.
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> Option<ButtonValue> {
        if !self.open {
            return None;
        }
        if let Some(value) = self.buttons.handle_key_input(key, modifiers) {
            return Some(value);
        }

        match key {
            KeyCode::Tab => {
                self.cycle_focus(!modifiers.contains(KeyModifiers::SHIFT));
                None
            }
            KeyCode::BackTab => {
                self.cycle_focus(false);
                None
            }
            KeyCode::Enter => match self.focus {
                Some(Focus::Button(_)) => self.buttons.focused_value(),
                _ => self.default_value(),
            },
            KeyCode::Esc => {
                if self.offers(ButtonValue::Cancel) {
                    Some(ButtonValue::Cancel)
                } else if !self.options.persistent {
                    Some(ButtonValue::Dismiss)
                } else {
                    None
                }
            }
            _ => {
                let request = match key {
                    KeyCode::Char(c) if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                        Some(InputRequest::InsertChar(c))
                    }
                    KeyCode::Backspace => Some(InputRequest::DeletePrevChar),
                    KeyCode::Delete => Some(InputRequest::DeleteNextChar),
                    KeyCode::Left => Some(InputRequest::GoToPrevChar),
                    KeyCode::Right => Some(InputRequest::GoToNextChar),
                    KeyCode::Home => Some(InputRequest::GoToStart),
                    KeyCode::End => Some(InputRequest::GoToEnd),
                    _ => None,
                };
                if let (Some(request), Some(input)) = (request, self.focused_input()) {
                    input.handle(request);
                    self.sync_confirm_enabled();
                }
                None
            }
        }
    }

    pub fn handle_mouse_click(&mut self, column: u16, row: u16) -> Option<ButtonValue> {
        if !self.open {
            return None;
        }
        let value = self.buttons.handle_mouse_click(column, row);
        if value.is_some() {
            self.focus = self.buttons.focused().map(Focus::Button);
        }
        value
    }
}
