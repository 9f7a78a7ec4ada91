//! Pure rendering: map Session state to ratatui widget trees.
//!
//! Widget-building functions are pure (state in, widgets out); the only
//! effect is Frame::render_widget() which writes to the terminal buffer.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::color::Rgb;
use crate::compositor::ColoredFrame;

use super::state::{Focus, Session};
use super::theme;

const TITLE: &str = "bannerglow";
const HELP: &str = "[q] quit  [Tab] next field  [←/→] font  [m] mode  [a] hue cycle  [+/-] speed";

// ============================================================================
// DISPATCH
// ============================================================================

/// Render the whole screen.
pub fn render(session: &Session, frame: &mut Frame) {
    let area = frame.area();

    if !session.viewport.is_known() {
        frame.render_widget(Paragraph::new(Span::styled("  loading…", theme::STYLE_DIM)), area);
        return;
    }

    // Common layout: title bar at top, content in middle, help at bottom
    let [title_area, content_area, help_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(Paragraph::new(Span::styled(TITLE, theme::STYLE_LABEL_FOCUSED)), title_area);
    frame.render_widget(Paragraph::new(Span::styled(HELP, theme::STYLE_HINT)), help_area);

    render_content(session, frame, content_area);
}

/// Controls panel stacked above the banner, centered as a block.
fn render_content(session: &Session, frame: &mut Frame, area: Rect) {
    let controls = controls_lines(session);
    // borders (2) + horizontal padding (2)
    let controls_width = controls.iter().map(Line::width).max().unwrap_or(0) as u16 + 4;
    let controls_height = controls.len() as u16 + 2;

    let art = banner_lines(&session.frame());
    let art_width = session.grid.width as u16;
    let art_height = art.len() as u16;

    let [_, controls_area, art_area, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(controls_height),
        Constraint::Length(art_height),
        Constraint::Fill(1),
    ])
    .areas(area);

    let panel = Paragraph::new(controls).block(
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(theme::STYLE_BORDER)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(panel, center_horizontally(controls_area, controls_width));
    frame.render_widget(Paragraph::new(art), center_horizontally(art_area, art_width));
}

fn center_horizontally(area: Rect, width: u16) -> Rect {
    let [_, middle, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width),
        Constraint::Fill(1),
    ])
    .areas(area);
    middle
}

// ============================================================================
// CONTROLS PANEL
// ============================================================================

fn label(text: &'static str, focused: bool) -> Span<'static> {
    let style = if focused {
        theme::STYLE_LABEL_FOCUSED
    } else {
        theme::STYLE_LABEL
    };
    Span::styled(text, style)
}

fn chip(text: String, style: Style) -> Span<'static> {
    Span::styled(format!(" {} ", text), style)
}

/// Status text for the hue cycle chip.
pub fn animation_status(session: &Session) -> String {
    if session.animate {
        format!("on ({:.1}°/tick)", session.step_deg)
    } else {
        "off".to_string()
    }
}

fn controls_lines(session: &Session) -> Vec<Line<'static>> {
    let field_line = |name: &'static str, focus: Focus| {
        let mut spans = vec![label(name, session.focus == focus), Span::raw(" ")];
        spans.extend(session.field(focus).view().spans);
        Line::from(spans)
    };

    vec![
        field_line("Text:", Focus::Text),
        field_line("Start:", Focus::Start),
        field_line("End:", Focus::End),
        Line::from(vec![
            label("Font:", false),
            Span::raw(" "),
            chip(session.font_name().to_string(), theme::CHIP_FONT),
            Span::styled("  (←/→ or [/])", theme::STYLE_HINT),
        ]),
        Line::from(vec![
            label("Mode:", false),
            Span::raw(" "),
            chip(session.mode.label().to_string(), theme::CHIP_MODE),
            Span::styled("  (m)", theme::STYLE_HINT),
        ]),
        Line::from(vec![
            label("Hue cycle:", false),
            Span::raw(" "),
            chip(animation_status(session), theme::CHIP_ANIMATION),
            Span::styled("  (a, +/-)", theme::STYLE_HINT),
        ]),
    ]
}

// ============================================================================
// BANNER
// ============================================================================

fn term_color(c: Rgb) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

/// One styled line per frame row; runs of equal color share a span.
pub fn banner_lines(colored: &ColoredFrame) -> Vec<Line<'static>> {
    colored
        .rows
        .iter()
        .map(|row| {
            let mut spans: Vec<Span<'static>> = Vec::new();
            let mut run = String::new();
            let mut run_color: Option<Rgb> = None;

            for cell in row {
                if cell.color != run_color && !run.is_empty() {
                    spans.push(styled_run(std::mem::take(&mut run), run_color));
                }
                run_color = cell.color;
                run.push(cell.ch);
            }
            if !run.is_empty() {
                spans.push(styled_run(run, run_color));
            }
            Line::from(spans)
        })
        .collect()
}

fn styled_run(run: String, color: Option<Rgb>) -> Span<'static> {
    match color {
        Some(c) => Span::styled(run, Style::new().fg(term_color(c))),
        None => Span::raw(run),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::banner::GlyphSource;
    use crate::compositor::Cell;
    use crate::config::SessionConfig;
    use crate::tui::state::Viewport;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    struct Echo;

    impl GlyphSource for Echo {
        fn render(&self, text: &str, _font: &str) -> String {
            format!("{0}\n{0}", text)
        }
    }

    fn make_terminal() -> Terminal<TestBackend> {
        let backend = TestBackend::new(100, 24);
        Terminal::new(backend).unwrap()
    }

    fn sized_session(config: SessionConfig) -> Session {
        let mut session = Session::new(&config, &Echo);
        session.viewport = Viewport { width: 100, height: 24 };
        session
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol().to_string())
            .collect()
    }

    #[test]
    fn shows_loading_before_first_resize() {
        let mut terminal = make_terminal();
        let session = Session::new(&SessionConfig::default(), &Echo);
        terminal.draw(|frame| render(&session, frame)).unwrap();
        assert!(buffer_text(&terminal).contains("loading"));
    }

    #[test]
    fn renders_controls_panel() {
        let mut terminal = make_terminal();
        let session = sized_session(SessionConfig::default());
        terminal
            .draw(|frame| render(&session, frame))
            .expect("render should not panic");

        let content = buffer_text(&terminal);
        assert!(content.contains("Text:"));
        assert!(content.contains("#8A2BE2"));
        assert!(content.contains("#00FFFF"));
        assert!(content.contains("standard"));
        assert!(content.contains("GLYPH"));
        assert!(content.contains("on (3.0°/tick)"));
    }

    #[test]
    fn banner_cells_are_truecolor() {
        let mut terminal = make_terminal();
        let config = SessionConfig {
            text: "XYZ".into(),
            animate: false,
            ..Default::default()
        };
        let session = sized_session(config);
        terminal.draw(|frame| render(&session, frame)).unwrap();

        let buffer = terminal.backend().buffer();
        let colored: Vec<Color> = buffer
            .content()
            .iter()
            .filter(|c| c.symbol() == "X" || c.symbol() == "Z")
            .map(|c| c.fg)
            .collect();
        assert!(colored.contains(&Color::Rgb(138, 43, 226)));
        assert!(colored.contains(&Color::Rgb(0, 255, 255)));
    }

    #[test]
    fn animation_status_text() {
        let mut session = sized_session(SessionConfig::default());
        assert_eq!(animation_status(&session), "on (3.0°/tick)");
        session.animate = false;
        assert_eq!(animation_status(&session), "off");
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let mut terminal = Terminal::new(TestBackend::new(8, 3)).unwrap();
        let session = sized_session(SessionConfig::default());
        terminal
            .draw(|frame| render(&session, frame))
            .expect("render should not panic");
    }

    #[test]
    fn banner_lines_coalesce_runs() {
        let red = Some(Rgb::new(255, 0, 0));
        let frame = ColoredFrame {
            rows: vec![vec![
                Cell { ch: 'a', color: red },
                Cell { ch: 'b', color: red },
                Cell::BLANK,
                Cell { ch: 'c', color: Some(Rgb::BLACK) },
            ]],
        };
        let lines = banner_lines(&frame);
        assert_eq!(lines[0].spans.len(), 3);
        assert_eq!(lines[0].to_string(), "ab c");
        assert_eq!(lines[0].spans[0].style.fg, Some(Color::Rgb(255, 0, 0)));
        assert_eq!(lines[0].spans[1].style.fg, None);
    }
}
