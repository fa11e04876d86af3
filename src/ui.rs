use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{debug, info, warn};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tui_logger::{TuiLoggerLevelOutput, TuiLoggerWidget, TuiWidgetEvent, TuiWidgetState};

use crate::client::{ConnectionEvent, ConnectionService, ConnectionStatus};
use crate::config::AppConfig;
use crate::connection_manager::spawn_attempt;
use crate::dialog::types::{DialogStateId, MessageOptions};
use crate::dialog::{
    show_auth_dialog, show_auth_required_dialog, show_external_auth_dialog, AuthDialog, CancelCallback,
    SuccessCallback, WaitingForHostNotice,
};
use crate::i18n::{Catalog, Translator};
use crate::logging;
use crate::menu::{MenuAction, MenuRenderer};
use crate::modal::{ModalEvent, TerminalModalHost};
use crate::popup::PopupOpener;
use crate::statusbar::StatusBarRenderer;
use crate::ui_utils::LayoutUtils;

/// Events fed back into the UI loop from callbacks and background tasks.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    AuthCancelled,
    AuthenticateNow,
    PopupClosed,
}

pub struct App {
    config: AppConfig,
    allow_cancel: bool,
    translator: Arc<dyn Translator>,
    modal_host: TerminalModalHost,
    popups: Box<dyn PopupOpener>,
    service: Arc<dyn ConnectionService>,
    connection_tx: UnboundedSender<ConnectionEvent>,
    connection_rx: UnboundedReceiver<ConnectionEvent>,
    app_tx: UnboundedSender<AppEvent>,
    app_rx: UnboundedReceiver<AppEvent>,
    // At most one live authentication dialog
    auth_dialog: Option<AuthDialog>,
    waiting_notice: Option<WaitingForHostNotice>,
    menu_renderer: MenuRenderer,
    statusbar_renderer: StatusBarRenderer,
    logger_widget_state: TuiWidgetState,
    should_quit: bool,
}

impl App {
    pub fn new(
        config: AppConfig,
        allow_cancel: bool,
        service: Arc<dyn ConnectionService>,
        popups: Box<dyn PopupOpener>,
    ) -> Self {
        let translator: Arc<dyn Translator> = Arc::new(Catalog::english().with_overrides(&config.messages));
        let (connection_tx, connection_rx) = mpsc::unbounded_channel();
        let (app_tx, app_rx) = mpsc::unbounded_channel();
        let menu_renderer = MenuRenderer::new(translator.as_ref(), config.auth.external_auth_url.is_some());

        Self {
            allow_cancel,
            modal_host: TerminalModalHost::new(Arc::clone(&translator)),
            translator,
            popups,
            service,
            connection_tx,
            connection_rx,
            app_tx,
            app_rx,
            auth_dialog: None,
            waiting_notice: None,
            menu_renderer,
            statusbar_renderer: StatusBarRenderer::new(),
            logger_widget_state: TuiWidgetState::new(),
            should_quit: false,
            config,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode().context("enabling raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, event::EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        logging::switch_to_tui_logging();

        let result = self.run_app(&mut terminal).await;

        logging::switch_to_console_logging();
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), event::DisableMouseCapture, LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    async fn run_app(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let tick_rate = Duration::from_millis(100);
        let mut last_tick = Instant::now();
        info!("Ready. Choose '{}' to authenticate", self.translator.text("toolbar.login"));

        loop {
            terminal.draw(|f| self.ui(f))?;

            let timeout = tick_rate.saturating_sub(last_tick.elapsed());
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key.code, key.modifiers),
                    Event::Mouse(mouse) => self.handle_mouse_event(mouse),
                    _ => {}
                }
            }

            if last_tick.elapsed() >= tick_rate {
                self.drain_events();
                last_tick = Instant::now();
                tokio::task::yield_now().await;
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        if let Some(event) = self.modal_host.handle_key(key, modifiers) {
            self.handle_modal_event(event);
            return;
        }
        if self.modal_host.has_open_modal() {
            return;
        }

        match key {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('x') if modifiers.contains(KeyModifiers::ALT) => self.should_quit = true,
            KeyCode::Up => self.menu_renderer.select_previous(),
            KeyCode::Down => self.menu_renderer.select_next(),
            KeyCode::Enter => {
                if let Some(action) = self.menu_renderer.activate_selected() {
                    self.handle_menu_action(action);
                }
            }
            KeyCode::PageUp => self.logger_widget_state.transition(TuiWidgetEvent::PrevPageKey),
            KeyCode::PageDown => self.logger_widget_state.transition(TuiWidgetEvent::NextPageKey),
            KeyCode::End => self.logger_widget_state.transition(TuiWidgetEvent::EscapeKey),
            _ => {}
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        if let Some(event) = self.modal_host.handle_mouse_click(mouse.column, mouse.row) {
            self.handle_modal_event(event);
            return;
        }
        if self.modal_host.has_open_modal() {
            return;
        }
        if let Some(action) = self.menu_renderer.handle_click(mouse.column, mouse.row) {
            self.handle_menu_action(action);
        }
    }

    fn handle_menu_action(&mut self, action: MenuAction) {
        debug!("Menu entry '{}' activated", self.menu_renderer.button_id(action).unwrap_or("?"));
        match action {
            MenuAction::Login => self.open_auth_dialog(),
            MenuAction::ExternalLogin => self.open_external_auth(),
            MenuAction::WaitForHost => self.open_waiting_for_host(),
            MenuAction::Quit => self.should_quit = true,
        }
    }

    fn handle_modal_event(&mut self, event: ModalEvent) {
        if let Some(dialog) = self.auth_dialog.as_mut().filter(|d| d.modal_id() == event.modal) {
            dialog.submit(event.value);
            if dialog.current_state() == Some(DialogStateId::Connecting) {
                self.statusbar_renderer
                    .set_connection_status(ConnectionStatus::Connecting);
            }
            return;
        }
        if let Some(notice) = self.waiting_notice.as_mut().filter(|n| n.modal_id() == event.modal) {
            notice.submit(event.value);
            return;
        }
        debug!("Modal {:?} answered {:?}", event.modal, event.value);
    }

    fn open_auth_dialog(&mut self) {
        if let Some(mut previous) = self.auth_dialog.take() {
            previous.close();
        }

        let service = Arc::clone(&self.service);
        let connection_tx = self.connection_tx.clone();
        let on_success: SuccessCallback = Box::new(move |credentials| {
            let _ = spawn_attempt(Arc::clone(&service), credentials, connection_tx.clone());
        });

        let on_cancel: Option<CancelCallback> = if self.allow_cancel {
            let app_tx = self.app_tx.clone();
            Some(Box::new(move || {
                let _ = app_tx.send(AppEvent::AuthCancelled);
            }))
        } else {
            None
        };

        self.auth_dialog = Some(show_auth_dialog(
            &mut self.modal_host,
            self.config.hosts.clone(),
            on_success,
            on_cancel,
        ));
        self.statusbar_renderer.set_status_message("Enter your credentials");
    }

    fn open_external_auth(&mut self) {
        let Some(url) = self.config.auth.external_auth_url.clone() else {
            warn!("No external authentication URL configured");
            return;
        };
        let app_tx = self.app_tx.clone();
        let popup = show_external_auth_dialog(
            &mut self.modal_host,
            self.popups.as_mut(),
            &url,
            Box::new(move || {
                let _ = app_tx.send(AppEvent::PopupClosed);
            }),
        );
        if let Some(popup) = popup {
            info!("Opened {} in external window (pid {:?})", popup.url, popup.pid);
            self.statusbar_renderer
                .set_status_message("Complete authentication in the opened window");
        }
    }

    fn open_waiting_for_host(&mut self) {
        if self.waiting_notice.as_ref().is_some_and(WaitingForHostNotice::is_open) {
            return;
        }
        let app_tx = self.app_tx.clone();
        self.waiting_notice = Some(show_auth_required_dialog(
            &mut self.modal_host,
            &self.config.auth.room,
            Box::new(move || {
                let _ = app_tx.send(AppEvent::AuthenticateNow);
            }),
        ));
    }

    /// Applies everything reported by callbacks and background attempts since the last call.
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.app_rx.try_recv() {
            self.handle_app_event(event);
        }
        while let Ok(event) = self.connection_rx.try_recv() {
            self.handle_connection_event(event);
        }
    }

    fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::AuthCancelled => {
                if let Some(mut dialog) = self.auth_dialog.take() {
                    dialog.close();
                }
                self.statusbar_renderer
                    .set_connection_status(ConnectionStatus::Cancelled);
                self.statusbar_renderer.set_status_message("Authentication cancelled");
            }
            AppEvent::AuthenticateNow => self.open_auth_dialog(),
            AppEvent::PopupClosed => {
                info!("External authentication window closed");
                self.statusbar_renderer
                    .set_status_message("External authentication window closed");
            }
        }
    }

    fn handle_connection_event(&mut self, event: ConnectionEvent) {
        match event {
            ConnectionEvent::Status(key) => {
                if let Some(dialog) = self.auth_dialog.as_mut() {
                    dialog.display_connection_status(&key);
                }
                self.statusbar_renderer
                    .set_status_message(self.translator.text(&key));
            }
            ConnectionEvent::Connected(identity) => {
                if let Some(mut dialog) = self.auth_dialog.take() {
                    dialog.close();
                }
                if let Some(mut notice) = self.waiting_notice.take() {
                    notice.close();
                }
                self.statusbar_renderer
                    .set_connection_status(ConnectionStatus::Connected(identity));
            }
            ConnectionEvent::Failed(error) => {
                if let Some(dialog) = self.auth_dialog.as_mut() {
                    dialog.display_error(&error, MessageOptions::new());
                }
                self.statusbar_renderer
                    .set_connection_status(ConnectionStatus::Error(error.code()));
            }
        }
    }

    fn ui(&mut self, f: &mut Frame) {
        tui_logger::move_events();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(0),    // Body
                Constraint::Length(1), // Status bar
            ])
            .split(f.area());

        let room = format!(" Conference: {}", self.config.auth.room);
        f.render_widget(LayoutUtils::create_title_paragraph(&room), chunks[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(26), Constraint::Min(0)])
            .split(chunks[1]);
        let menu_focused = !self.modal_host.has_open_modal();
        self.menu_renderer.render(f, body[0], menu_focused);
        self.render_main_panel(f, body[1]);

        self.statusbar_renderer.render_status_bar(f, chunks[2]);

        let area = f.area();
        self.modal_host.render(f, area);
    }

    fn render_main_panel(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(0)])
            .split(area);

        let summary = match &self.statusbar_renderer.connection_status {
            ConnectionStatus::Connected(identity) => format!("Signed in as {identity}."),
            _ => "Not signed in. Use the menu to log in (↑↓, Enter) or press q to quit.".to_string(),
        };
        let summary = Paragraph::new(summary)
            .wrap(Wrap { trim: true })
            .block(Block::default().title(" Session ").borders(Borders::ALL));
        f.render_widget(summary, chunks[0]);

        let logger_widget = TuiLoggerWidget::default()
            .block(Block::default().title(" Connection Log ").borders(Borders::ALL))
            .output_timestamp(Some("%H:%M:%S".to_string()))
            .output_level(Some(TuiLoggerLevelOutput::Long))
            .output_target(false)
            .output_file(false)
            .output_line(false)
            .output_separator(' ')
            .style_info(Style::default().fg(Color::White))
            .style_warn(Style::default().fg(Color::Yellow))
            .style_error(Style::default().fg(Color::Red))
            .style_debug(Style::default().fg(Color::DarkGray))
            .state(&self.logger_widget_state);
        f.render_widget(logger_widget, chunks[1]);
    }
}
