use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

use log::LevelFilter;

static TUI_MODE: AtomicBool = AtomicBool::new(false);

/// Console logger that also feeds tui-logger, so records emitted before the
/// terminal UI starts still show up in its log pane.
pub fn init_logger(level: LevelFilter) {
    let drain = tui_logger::Drain::new();
    let result = env_logger::Builder::default()
        .filter_level(level)
        .format(move |buf, record| {
            // Always forward to tui-logger for the log pane
            drain.log(record);

            if TUI_MODE.load(Ordering::Relaxed) {
                return Ok(());
            }

            let timestamp = chrono::Local::now().format("%H:%M:%S");
            let target = record.target();
            if target != record.module_path().unwrap_or("unknown") {
                writeln!(buf, "[{timestamp}] {} [{target}]: {}", record.level(), record.args())
            } else {
                writeln!(buf, "[{timestamp}] {}: {}", record.level(), record.args())
            }
        })
        .try_init();

    if let Err(e) = result {
        eprintln!("Logger already initialized: {e}");
        return;
    }
    tui_logger::set_default_level(level);

    log::debug!("Logger initialized with {level} level");
}

/// Stops console output; records keep flowing into the tui-logger pane.
pub fn switch_to_tui_logging() {
    TUI_MODE.store(true, Ordering::Relaxed);
    log::debug!("Switched to TUI logging mode");
}

pub fn switch_to_console_logging() {
    TUI_MODE.store(false, Ordering::Relaxed);
}
