use std::collections::{BTreeMap, HashMap};

use crate::dialog::types::{Message, MessageOptions};

pub trait Translator: Send + Sync {
    fn translate(&self, key: &str, options: &MessageOptions) -> String;

    fn message(&self, message: &Message) -> String {
        self.translate(&message.key, &message.options)
    }

    fn text(&self, key: &str) -> String {
        self.translate(key, &MessageOptions::new())
    }
}

const ENGLISH: &[(&str, &str)] = &[
    ("dialog.passwordRequired", "Password required"),
    ("dialog.connecting", "Connecting"),
    ("dialog.error", "Error"),
    ("dialog.Ok", "OK"),
    ("dialog.Cancel", "Cancel"),
    ("dialog.retry", "Retry"),
    ("dialog.user", "Username"),
    ("dialog.userPassword", "Password"),
    ("dialog.userIdentifier", "user@domain.net"),
    ("dialog.incorrectPassword", "Incorrect username or password"),
    (
        "dialog.connectErrorWithMsg",
        "Oops! Something went wrong and we couldn't connect to the conference: {{msg}}",
    ),
    ("dialog.popupErrorTitle", "Pop-up blocked"),
    (
        "dialog.popupError",
        "The authentication window could not be opened. Check the configured browser command and try again.",
    ),
    ("dialog.WaitingForHost", "Waiting for the host ..."),
    (
        "dialog.WaitForHostMsg",
        "The conference {{room}} has not yet started. If you are the host then please authenticate. Otherwise, please wait for the host to arrive.",
    ),
    ("dialog.IamHost", "I am the host"),
    ("connection.CONNECTING", "Establishing connection..."),
    ("connection.AUTHENTICATING", "Authenticating..."),
    ("connection.CONNECTED", "Connected"),
    ("toolbar.login", "Log in"),
    ("toolbar.externalLogin", "External login"),
    ("toolbar.waitForHost", "Wait for host"),
    ("toolbar.quit", "Quit"),
];

/// Built-in English messages with optional per-key overrides.
pub struct Catalog {
    messages: HashMap<String, String>,
}

impl Catalog {
    pub fn english() -> Self {
        Self {
            messages: ENGLISH
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn with_overrides(mut self, overrides: &BTreeMap<String, String>) -> Self {
        for (key, text) in overrides {
            self.messages.insert(key.clone(), text.clone());
        }
        self
    }
}

impl Translator for Catalog {
    fn translate(&self, key: &str, options: &MessageOptions) -> String {
        let template = self.messages.get(key).map(String::as_str).unwrap_or(key);
        interpolate(template, options)
    }
}

/// Replaces `{{name}}` placeholders. Unknown placeholders are left as written.
fn interpolate(template: &str, options: &MessageOptions) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let name = after[..end].trim();
                match options.get(name) {
                    Some(value) => out.push_str(value),
                    None => out.push_str(&rest[start..start + 2 + end + 2]),
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}
