use std::process::Stdio;

use log::{debug, info, warn};
use tokio::process::Command;

pub type PopupClosed = Box<dyn FnOnce() + Send>;

/// A window opened for external authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupHandle {
    pub url: String,
    pub pid: Option<u32>,
}

pub trait PopupOpener {
    /// Opens `url` in a `width`×`height` window. Returns `None` when no window
    /// could be opened; `on_closed` then never fires.
    fn open(&mut self, url: &str, width: u16, height: u16, on_closed: PopupClosed) -> Option<PopupHandle>;
}

/// Opens popups by spawning an external browser command with the URL as its
/// last argument. `on_closed` fires when that process exits.
pub struct CommandPopupOpener {
    program: String,
    args: Vec<String>,
}

impl CommandPopupOpener {
    /// Splits a command line such as `"firefox --new-window"` on whitespace.
    pub fn from_command_line(command: &str) -> Self {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next().unwrap_or_default();
        Self {
            program,
            args: parts.collect(),
        }
    }
}

impl PopupOpener for CommandPopupOpener {
    fn open(&mut self, url: &str, width: u16, height: u16, on_closed: PopupClosed) -> Option<PopupHandle> {
        if self.program.is_empty() {
            warn!("No popup command configured");
            return None;
        }

        let spawned = Command::new(&self.program)
            .args(&self.args)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        let mut child = match spawned {
            Ok(child) => child,
            Err(e) => {
                warn!("Failed to open popup with '{}': {e}", self.program);
                return None;
            }
        };

        let pid = child.id();
        info!("Opened authentication popup ({width}x{height}) for {url}");
        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) => debug!("Popup process exited with {status}"),
                Err(e) => warn!("Waiting for popup process failed: {e}"),
            }
            on_closed();
        });

        Some(PopupHandle {
            url: url.to_string(),
            pid,
        })
    }
}
