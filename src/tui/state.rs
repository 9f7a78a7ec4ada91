//! TUI state algebra: pure types, zero effects.
//!
//! [`Session`] is the single long-lived mutable entity. It is only ever
//! replaced by the transition function in `update`, which consumes a session
//! and an [`Action`] and returns the next session plus a [`Command`] for the
//! driver. Nothing here touches the terminal.

use std::time::Duration;

use crossterm::event::KeyEvent;

use crate::banner::{self, BannerGrid, GlyphSource};
use crate::color::{Rgb, parse_hex};
use crate::compositor::{self, ColoredFrame, RenderMode};
use crate::config::{self, SessionConfig};
use crate::fonts::FontCatalog;

use super::field::TextField;

// ============================================================================
// ACTIONS
// ============================================================================

/// Everything the driver can deliver to the transition function.
///
/// Key presses are mapped to these by `run::map_key`; keys with no command
/// meaning become [`Action::Edit`] and go to the focused field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Leave the program.
    Quit,
    /// Move input focus to the next field.
    FocusNext,
    /// Move input focus to the previous field.
    FocusPrev,
    /// Next font in the catalog.
    FontNext,
    /// Previous font in the catalog.
    FontPrev,
    /// Next render mode.
    CycleMode,
    /// Start or stop hue cycling.
    ToggleAnimate,
    /// More degrees per tick.
    SpeedUp,
    /// Fewer degrees per tick.
    SlowDown,
    /// Terminal was resized.
    Resize { width: u16, height: u16 },
    /// Animation timer fired.
    Tick,
    /// Any other key, delegated to the focused field.
    Edit(KeyEvent),
}

// ============================================================================
// COMMANDS
// ============================================================================

/// What the driver must do after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Nothing beyond repainting.
    None,
    /// Deliver exactly one `Action::Tick` after this delay, replacing any
    /// previously scheduled tick.
    ScheduleTick(Duration),
    /// Stop the loop.
    Quit,
}

/// Result of a pure transition: the next session and the driver's orders.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub session: Session,
    pub command: Command,
}

impl Transition {
    pub fn stay(session: Session) -> Self {
        Transition { session, command: Command::None }
    }
}

// ============================================================================
// FOCUS
// ============================================================================

/// Which of the three input fields has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Text,
    Start,
    End,
}

impl Focus {
    pub const ALL: [Focus; 3] = [Focus::Text, Focus::Start, Focus::End];

    pub fn index(self) -> usize {
        match self {
            Focus::Text => 0,
            Focus::Start => 1,
            Focus::End => 2,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

// ============================================================================
// SESSION
// ============================================================================

/// Last known terminal size. Zero until the first resize arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn is_known(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// All session state.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Text, start-hex and end-hex fields, indexed by [`Focus::index`].
    pub fields: [TextField; 3],
    pub focus: Focus,

    pub catalog: FontCatalog,
    pub font_index: usize,

    /// Last successfully parsed gradient endpoints.
    pub base_start: Rgb,
    pub base_end: Rgb,

    pub mode: RenderMode,

    pub animate: bool,
    /// Accumulated rotation in degrees, always in [0, 360).
    pub hue_shift: f64,
    /// Degrees per tick, always in [MIN_STEP_DEG, MAX_STEP_DEG].
    pub step_deg: f64,
    pub interval: Duration,

    /// Cached banner for (text, font). Rebuilt whole, never patched.
    pub grid: BannerGrid,

    pub viewport: Viewport,
}

impl Session {
    /// Create a session from `config`, building the initial banner.
    ///
    /// Unparseable colors in `config` fall back to the documented defaults.
    pub fn new(config: &SessionConfig, glyphs: &dyn GlyphSource) -> Self {
        let mut fields = [
            TextField::new("text", config.text.as_str()),
            TextField::new("start hex", config.start_hex.as_str()),
            TextField::new("end hex", config.end_hex.as_str()),
        ];
        fields[Focus::Text.index()].focus();

        let font_index = config.font_index % config.catalog.len();
        let grid = banner::build(&config.text, config.catalog.name(font_index), glyphs);

        Session {
            fields,
            focus: Focus::Text,
            catalog: config.catalog.clone(),
            font_index,
            base_start: parse_hex(&config.start_hex).unwrap_or(config::DEFAULT_START),
            base_end: parse_hex(&config.end_hex).unwrap_or(config::DEFAULT_END),
            mode: config.mode,
            animate: config.animate,
            hue_shift: 0.0,
            step_deg: config::clamp_step(config.step_deg),
            interval: config.interval,
            grid,
            viewport: Viewport::default(),
        }
    }

    /// Command to issue before the first event: arm the timer if animating.
    pub fn init_command(&self) -> Command {
        if self.animate {
            Command::ScheduleTick(self.interval)
        } else {
            Command::None
        }
    }

    pub fn field(&self, focus: Focus) -> &TextField {
        &self.fields[focus.index()]
    }

    pub fn field_mut(&mut self, focus: Focus) -> &mut TextField {
        &mut self.fields[focus.index()]
    }

    pub fn text(&self) -> &str {
        self.field(Focus::Text).value()
    }

    pub fn font_name(&self) -> &str {
        self.catalog.name(self.font_index)
    }

    /// Endpoints as drawn this frame.
    pub fn effective_endpoints(&self) -> (Rgb, Rgb) {
        compositor::effective_endpoints(self.base_start, self.base_end, self.animate, self.hue_shift)
    }

    /// Composite the cached banner with the current colors and mode.
    pub fn frame(&self) -> ColoredFrame {
        let (start, end) = self.effective_endpoints();
        compositor::compose(&self.grid, start, end, self.mode)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    impl GlyphSource for Echo {
        fn render(&self, text: &str, _font: &str) -> String {
            text.to_string()
        }
    }

    #[test]
    fn new_session_uses_config_defaults() {
        let session = Session::new(&SessionConfig::default(), &Echo);
        assert_eq!(session.text(), "glam dm");
        assert_eq!(session.base_start, config::DEFAULT_START);
        assert_eq!(session.base_end, config::DEFAULT_END);
        assert_eq!(session.font_name(), "standard");
        assert_eq!(session.mode, RenderMode::Glyph);
        assert!(session.animate);
        assert_eq!(session.hue_shift, 0.0);
        assert_eq!(session.step_deg, 3.0);
        assert_eq!(session.grid.lines, vec!["glam dm"]);
        assert!(!session.viewport.is_known());
    }

    #[test]
    fn exactly_one_field_focused_at_start() {
        let session = Session::new(&SessionConfig::default(), &Echo);
        let focused = session.fields.iter().filter(|f| f.is_focused()).count();
        assert_eq!(focused, 1);
        assert!(session.field(Focus::Text).is_focused());
    }

    #[test]
    fn invalid_config_colors_fall_back() {
        let config = SessionConfig {
            start_hex: "nope".into(),
            ..Default::default()
        };
        let session = Session::new(&config, &Echo);
        assert_eq!(session.base_start, config::DEFAULT_START);
        assert_eq!(session.field(Focus::Start).value(), "nope");
    }

    #[test]
    fn init_command_arms_timer_only_when_animating() {
        let session = Session::new(&SessionConfig::default(), &Echo);
        assert_eq!(session.init_command(), Command::ScheduleTick(config::DEFAULT_INTERVAL));

        let config = SessionConfig {
            animate: false,
            ..Default::default()
        };
        assert_eq!(Session::new(&config, &Echo).init_command(), Command::None);
    }

    #[test]
    fn out_of_range_config_values_are_normalized() {
        let config = SessionConfig {
            font_index: 10_000,
            step_deg: 500.0,
            ..Default::default()
        };
        let session = Session::new(&config, &Echo);
        assert!(session.font_index < session.catalog.len());
        assert_eq!(session.step_deg, config::MAX_STEP_DEG);
    }

    #[test]
    fn focus_cycles_both_ways() {
        assert_eq!(Focus::Text.next(), Focus::Start);
        assert_eq!(Focus::End.next(), Focus::Text);
        assert_eq!(Focus::Text.prev(), Focus::End);
        assert_eq!(Focus::Start.prev(), Focus::Text);
    }

    #[test]
    fn frame_is_unrotated_when_not_animating() {
        let config = SessionConfig {
            animate: false,
            ..Default::default()
        };
        let mut session = Session::new(&config, &Echo);
        session.hue_shift = 90.0;
        assert_eq!(session.effective_endpoints(), (config::DEFAULT_START, config::DEFAULT_END));
        assert_eq!(session.frame().rows[0][0].color, Some(config::DEFAULT_START));
    }
}
