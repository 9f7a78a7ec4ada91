//! TUI effects boundary: event loop, terminal lifecycle, key mapping.
//!
//! This is the only module with side effects. It wires the pure layers
//! (state, update, view) to the real terminal via crossterm and ratatui.
//!
//! Single-threaded: the loop waits for input with a timeout that ends at
//! the pending tick deadline, if any. A scheduled tick replaces the previous
//! deadline, so at most one tick is ever pending.

use std::io;
use std::time::{Duration, Instant};

use crossterm::ExecutableCommand;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::banner::GlyphSource;
use crate::config::SessionConfig;
use crate::error::AppError;

use super::state::{Action, Command, Session};
use super::update::update;
use super::view::render;

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map a crossterm key event to an Action.
///
/// Command keys win over text entry; anything unmatched becomes an edit of
/// the focused field. Chords with Ctrl or Alt are never commands, except
/// Ctrl+C.
pub fn map_key(key: KeyEvent) -> Action {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    let chord = key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);

    match key.code {
        KeyCode::Esc => Action::Quit,
        KeyCode::Tab => Action::FocusNext,
        KeyCode::BackTab => Action::FocusPrev,
        KeyCode::Left => Action::FontPrev,
        KeyCode::Right => Action::FontNext,

        KeyCode::Char(c) if !chord => match c {
            'q' => Action::Quit,
            '[' => Action::FontPrev,
            ']' => Action::FontNext,
            'm' => Action::CycleMode,
            'a' => Action::ToggleAnimate,
            '+' | '=' => Action::SpeedUp,
            '-' | '_' => Action::SlowDown,
            _ => Action::Edit(key),
        },

        _ => Action::Edit(key),
    }
}

/// Translate a raw terminal event. Key releases and repeats, mouse and
/// focus events produce nothing.
pub fn map_event(event: Event) -> Option<Action> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(map_key(key)),
        Event::Resize(width, height) => Some(Action::Resize { width, height }),
        _ => None,
    }
}

// ============================================================================
// TICK SCHEDULE
// ============================================================================

/// At most one pending tick deadline.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickSchedule {
    deadline: Option<Instant>,
}

impl TickSchedule {
    /// Apply a command's scheduling part. Returns true if the loop should quit.
    pub fn apply(&mut self, command: Command, now: Instant) -> bool {
        match command {
            Command::None => false,
            Command::ScheduleTick(after) => {
                self.deadline = Some(now + after);
                false
            }
            Command::Quit => {
                self.deadline = None;
                true
            }
        }
    }

    /// How long to wait for input before the tick is due.
    /// None means wait indefinitely.
    pub fn timeout(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }

    /// Consume the tick if its deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(d) if d <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

/// Set up the terminal for TUI mode.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Run the interactive session until the user quits.
pub fn run(config: &SessionConfig, glyphs: &dyn GlyphSource) -> Result<(), AppError> {
    install_panic_hook();
    let mut terminal = setup_terminal()?;

    let result = event_loop(&mut terminal, config, glyphs);

    // Restore even when the loop failed; report the loop's error first
    let restored = restore_terminal();
    result?;
    restored?;
    Ok(())
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: &SessionConfig,
    glyphs: &dyn GlyphSource,
) -> Result<(), AppError> {
    let mut session = Session::new(config, glyphs);
    let mut schedule = TickSchedule::default();
    schedule.apply(session.init_command(), Instant::now());

    let size = terminal.size()?;
    session = update(
        session,
        &Action::Resize {
            width: size.width,
            height: size.height,
        },
        glyphs,
    )
    .session;

    tracing::info!(
        font = session.font_name(),
        mode = session.mode.label(),
        animate = session.animate,
        interval_ms = session.interval.as_millis() as u64,
        "session started"
    );

    loop {
        terminal.draw(|frame| render(&session, frame))?;

        let action = match next_action(&mut schedule)? {
            Some(action) => action,
            None => continue,
        };

        let transition = update(session, &action, glyphs);
        session = transition.session;
        if schedule.apply(transition.command, Instant::now()) {
            break;
        }
    }

    tracing::info!("session ended");
    Ok(())
}

/// Wait for the next input event or the pending tick, whichever comes
/// first. Returns None when an event arrived that maps to nothing.
fn next_action(schedule: &mut TickSchedule) -> io::Result<Option<Action>> {
    let ready = match schedule.timeout(Instant::now()) {
        Some(timeout) => event::poll(timeout)?,
        None => true, // no tick pending: block in read()
    };

    if ready {
        return Ok(map_event(event::read()?));
    }

    if schedule.take_due(Instant::now()) {
        Ok(Some(Action::Tick))
    } else {
        Ok(None)
    }
}

// ============================================================================
// TESTS
// ============================================================================
