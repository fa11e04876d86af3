use std::collections::BTreeMap;

/// States of the authentication dialog. Exactly one is active per open session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogStateId {
    Login,
    Connecting,
    Finished,
}

impl DialogStateId {
    pub fn name(self) -> &'static str {
        match self {
            DialogStateId::Login => "login",
            DialogStateId::Connecting => "connecting",
            DialogStateId::Finished => "finished",
        }
    }
}

/// Outcome carried by a dialog button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonValue {
    Confirm,
    Cancel,
    Retry,
    Dismiss,
    AuthenticateNow,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ButtonSpec {
    pub label_key: &'static str,
    pub value: ButtonValue,
    pub hotkey: char, // Alt+key shortcut
}

impl ButtonSpec {
    pub fn new(label_key: &'static str, value: ButtonValue, hotkey: char) -> Self {
        Self {
            label_key,
            value,
            hotkey,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Identity,
    Secret,
}

/// What a state shows between its title and its buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateBody {
    CredentialForm,
    StatusRegion,
    ErrorRegion,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DialogStateSpec {
    pub id: DialogStateId,
    pub title_key: &'static str,
    pub body: StateBody,
    pub buttons: Vec<ButtonSpec>,
    pub default_button: Option<usize>,
    pub focus: Option<FormField>,
}

impl DialogStateSpec {
    pub fn button(&self, value: ButtonValue) -> Option<&ButtonSpec> {
        self.buttons.iter().find(|b| b.value == value)
    }

    pub fn offers(&self, value: ButtonValue) -> bool {
        self.button(value).is_some()
    }

    pub fn default_value(&self) -> Option<ButtonValue> {
        self.default_button
            .and_then(|idx| self.buttons.get(idx))
            .map(|b| b.value)
    }
}

/// Ordered set of states handed to a modal host. The first state is the initial one.
#[derive(Debug, Clone, PartialEq)]
pub struct StateTable {
    states: Vec<DialogStateSpec>,
}

impl StateTable {
    pub fn new(states: Vec<DialogStateSpec>) -> Self {
        Self { states }
    }

    pub fn initial(&self) -> Option<&DialogStateSpec> {
        self.states.first()
    }

    pub fn get(&self, id: DialogStateId) -> Option<&DialogStateSpec> {
        self.states.iter().find(|s| s.id == id)
    }
}

pub type MessageOptions = BTreeMap<String, String>;

/// A translation key plus the values interpolated into it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Message {
    pub key: String,
    pub options: MessageOptions,
}

impl Message {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            options: MessageOptions::new(),
        }
    }

    pub fn with_options(key: impl Into<String>, options: MessageOptions) -> Self {
        Self {
            key: key.into(),
            options,
        }
    }

    pub fn with_option(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(name.into(), value.into());
        self
    }
}
