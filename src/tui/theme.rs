//! TUI style constants.
//!
//! Pure data, consumed by the rendering layer. The banner itself is colored
//! by the compositor; these styles only dress the controls panel.

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// CONTROLS PANEL
// ============================================================================

/// Field labels ("Text:", "Start:", ...).
pub const STYLE_LABEL: Style = Style::new().add_modifier(Modifier::DIM);

/// Label of the focused field.
pub const STYLE_LABEL_FOCUSED: Style = Style::new().fg(Color::Indexed(212)).add_modifier(Modifier::BOLD);

/// Keybinding hints next to chips.
pub const STYLE_HINT: Style = Style::new().fg(Color::DarkGray);

/// De-emphasized text (placeholders, loading message).
pub const STYLE_DIM: Style = Style::new().fg(Color::DarkGray);

/// Text cursor inside a focused field.
pub const STYLE_CURSOR: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Panel border.
pub const STYLE_BORDER: Style = Style::new().fg(Color::Indexed(8));

// ============================================================================
// CHIPS
// ============================================================================

/// Current font name.
pub const CHIP_FONT: Style = Style::new().fg(Color::Indexed(212)).bg(Color::Indexed(57));

/// Current render mode.
pub const CHIP_MODE: Style = Style::new().fg(Color::Indexed(118)).bg(Color::Indexed(237));

/// Hue cycle state.
pub const CHIP_ANIMATION: Style = Style::new().fg(Color::Indexed(51)).bg(Color::Indexed(240));

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chips_have_foreground_and_background() {
        for chip in [CHIP_FONT, CHIP_MODE, CHIP_ANIMATION] {
            assert!(chip.fg.is_some());
            assert!(chip.bg.is_some());
        }
    }

    #[test]
    fn cursor_style_is_reversed() {
        assert!(STYLE_CURSOR.add_modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn labels_are_dim_unless_focused() {
        assert!(STYLE_LABEL.add_modifier.contains(Modifier::DIM));
        assert!(STYLE_LABEL_FOCUSED.add_modifier.contains(Modifier::BOLD));
    }
}
