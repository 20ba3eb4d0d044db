//! Interactive terminal calculator for the `run` command

use std::io;
use std::path::Path;

use crate::error::{CliError, CliResult};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use pocketcalc::core::CalculatorState;
use pocketcalc::mobile::{render, InputHandler, KeyAction, MobileApp};
use pocketcalc::storage::{JsonFileStore, Persisted, StorageError, CALCULATOR_KEY};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use tracing::{debug, warn};

/// Mobile app plus the optional state file it saves to
#[derive(Debug)]
pub struct TerminalSession {
    app: MobileApp,
    handler: InputHandler,
    persisted: Option<Persisted<CalculatorState, JsonFileStore>>,
    save_error: Option<StorageError>,
}

impl TerminalSession {
    /// Session with nothing saved
    #[must_use]
    pub fn new() -> Self {
        Self {
            app: MobileApp::new(),
            handler: InputHandler::new(),
            persisted: None,
            save_error: None,
        }
    }

    /// Session resumed from `path`
    pub fn open(path: &Path) -> CliResult<Self> {
        let store = JsonFileStore::open(path)?;
        let persisted = Persisted::new(store, CALCULATOR_KEY, CalculatorState::new());
        let state = persisted.load();
        debug!(path = %path.display(), display = %state.display(), "resumed terminal session");
        Ok(Self {
            app: MobileApp::with_state(state),
            handler: InputHandler::new(),
            persisted: Some(persisted),
            save_error: None,
        })
    }

    /// The app
    #[must_use]
    pub fn app(&self) -> &MobileApp {
        &self.app
    }

    /// Most recent failed save
    #[must_use]
    pub fn save_error(&self) -> Option<&StorageError> {
        self.save_error.as_ref()
    }

    /// Applies one terminal event; `area` is the last drawn frame size
    pub fn handle_event(&mut self, event: &Event, area: Rect) {
        let pressed = match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let action = self.handler.handle_key(*key);
                self.app.handle_key_action(action)
            }
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                self.app.click(area, mouse.column, mouse.row)
            }
            _ => None,
        };
        if pressed.is_some() {
            self.save();
        }
    }

    /// Handles a key action directly
    pub fn handle_action(&mut self, action: KeyAction) {
        if self.app.handle_key_action(action).is_some() {
            self.save();
        }
    }

    fn save(&mut self) {
        let Some(persisted) = self.persisted.as_mut() else {
            return;
        };
        match persisted.set(Some(self.app.state())) {
            Ok(()) => self.save_error = None,
            Err(e) => {
                warn!(key = %persisted.key(), error = %e, "failed to persist calculator state");
                self.save_error = Some(e);
            }
        }
    }
}

impl Default for TerminalSession {
    fn default() -> Self {
        Self::new()
    }
}

fn terminal_error(e: io::Error) -> CliError {
    CliError::terminal(e.to_string())
}

/// Runs the interactive calculator until the user quits
pub fn run_terminal(state_file: Option<&Path>) -> CliResult<()> {
    let mut session = match state_file {
        Some(path) => TerminalSession::open(path)?,
        None => TerminalSession::new(),
    };

    // Setup terminal
    enable_raw_mode().map_err(terminal_error)?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
        let _ = disable_raw_mode();
        return Err(terminal_error(e));
    }
    let backend = CrosstermBackend::new(stdout);
    let result = Terminal::new(backend).and_then(|mut terminal| {
        let result = run_loop(&mut terminal, &mut session);
        let restored = restore(&mut terminal);
        result.and(restored)
    });
    // Restoring the mode must happen even when the terminal never came up
    let _ = disable_raw_mode();

    // Reported after the screen is back so the message is readable
    if let Some(e) = session.save_error() {
        warn!(error = %e, "last calculator state was not saved");
    }
    result.map_err(terminal_error)
}

fn restore<B: ratatui::backend::Backend + io::Write>(terminal: &mut Terminal<B>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()
}

fn run_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    session: &mut TerminalSession,
) -> io::Result<()> {
    let mut area = Rect::default();
    loop {
        terminal.draw(|f| {
            area = f.area();
            render(session.app(), f);
        })?;

        let event = event::read()?;
        session.handle_event(&event, area);

        if session.app().should_quit() {
            break;
        }
    }
    Ok(())
}
