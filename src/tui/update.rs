//! Pure state transitions: (Session, Action) → Transition.
//!
//! This is the core logic of the TUI. Fully testable without a terminal.
//! The only outside input is the glyph source used to rebuild the banner
//! when the text or font changes.

use crate::banner::{self, GlyphSource};
use crate::color::parse_hex;
use crate::config::{MAX_STEP_DEG, MIN_STEP_DEG, STEP_INCREMENT_DEG};

use super::state::{Action, Command, Focus, Session, Transition, Viewport};

/// Pure state transition function.
///
/// Consumes the current session and returns the next one together with the
/// command the driver must carry out.
pub fn update(session: Session, action: &Action, glyphs: &dyn GlyphSource) -> Transition {
    match action {
        Action::Quit => Transition {
            session,
            command: Command::Quit,
        },
        Action::FocusNext => Transition::stay(set_focus(session, |f| f.next())),
        Action::FocusPrev => Transition::stay(set_focus(session, |f| f.prev())),
        Action::FontNext => Transition::stay(change_font(session, glyphs, |s| s.catalog.next(s.font_index))),
        Action::FontPrev => Transition::stay(change_font(session, glyphs, |s| s.catalog.prev(s.font_index))),
        Action::CycleMode => Transition::stay(cycle_mode(session)),
        Action::ToggleAnimate => toggle_animate(session),
        Action::SpeedUp => Transition::stay(adjust_step(session, STEP_INCREMENT_DEG)),
        Action::SlowDown => Transition::stay(adjust_step(session, -STEP_INCREMENT_DEG)),
        Action::Resize { width, height } => Transition::stay(Session {
            viewport: Viewport {
                width: *width,
                height: *height,
            },
            ..session
        }),
        Action::Tick => tick(session),
        Action::Edit(key) => {
            let mut session = session;
            let focus = session.focus;
            session.field_mut(focus).handle_key(*key);
            let session = rebuild_banner(session, glyphs);
            Transition::stay(adopt_colors(session))
        }
    }
}

// ============================================================================
// PER-ACTION HANDLERS
// ============================================================================

/// Move focus; exactly one field ends up focused.
fn set_focus(mut session: Session, step: impl Fn(Focus) -> Focus) -> Session {
    let current = step(session.focus);
    session.focus = current;
    for focus in Focus::ALL {
        let field = session.field_mut(focus);
        if focus == current {
            field.focus();
        } else {
            field.blur();
        }
    }
    session
}

fn change_font(
    mut session: Session,
    glyphs: &dyn GlyphSource,
    pick: impl Fn(&Session) -> usize,
) -> Session {
    session.font_index = pick(&session);
    tracing::debug!(font = session.font_name(), index = session.font_index, "font changed");
    rebuild_banner(session, glyphs)
}

fn cycle_mode(session: Session) -> Session {
    let mode = session.mode.next();
    tracing::debug!(mode = mode.label(), "render mode changed");
    Session { mode, ..session }
}

/// Turning animation on re-arms the timer from scratch. Turning it off
/// freezes `hue_shift` where it is.
fn toggle_animate(session: Session) -> Transition {
    let animate = !session.animate;
    tracing::debug!(animate, hue_shift = session.hue_shift, "animation toggled");
    let session = Session { animate, ..session };

    if animate {
        let command = Command::ScheduleTick(session.interval);
        Transition { session, command }
    } else {
        Transition::stay(session)
    }
}

fn adjust_step(session: Session, delta: f64) -> Session {
    let step_deg = (session.step_deg + delta).clamp(MIN_STEP_DEG, MAX_STEP_DEG);
    Session { step_deg, ..session }
}

/// Advance the hue while animating and ask for the next tick. A tick that
/// arrives after animation was switched off is dropped.
fn tick(session: Session) -> Transition {
    if !session.animate {
        return Transition::stay(session);
    }

    let hue_shift = (session.hue_shift + session.step_deg) % 360.0;
    tracing::trace!(hue_shift, "tick");
    let session = Session { hue_shift, ..session };
    let command = Command::ScheduleTick(session.interval);
    Transition { session, command }
}

// ============================================================================
// DERIVED-STATE PHASES
// ============================================================================

/// Recompute the banner grid from the current text and font.
pub fn rebuild_banner(session: Session, glyphs: &dyn GlyphSource) -> Session {
    let grid = banner::build(session.text(), session.font_name(), glyphs);
    Session { grid, ..session }
}

/// Adopt whatever color fields currently parse; keep the last good base
/// color for any that don't. Never fails and never reports.
pub fn adopt_colors(session: Session) -> Session {
    let base_start = parse_hex(session.field(Focus::Start).value()).unwrap_or(session.base_start);
    let base_end = parse_hex(session.field(Focus::End).value()).unwrap_or(session.base_end);
    Session {
        base_start,
        base_end,
        ..session
    }
}

// ============================================================================
// TESTS
// ============================================================================
