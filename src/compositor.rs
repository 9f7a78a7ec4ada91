//! Frame compositor: banner grid + gradient + render mode → colored cells.
//!
//! The gradient is horizontal and per-column: every row shares the same
//! color at a given column. Blank cells never receive a color, so the
//! terminal background shows through. Glyph substitution is independent of
//! coloring.

use crossterm::style::{Color as TermColor, Stylize};
use serde::Serialize;

use crate::banner::BannerGrid;
use crate::color::{Rgb, lerp, rotate_hue};

// ============================================================================
// RENDER MODES
// ============================================================================

/// How non-blank cells are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Full block `█`.
    Block,
    /// The font's own glyph.
    #[default]
    Glyph,
    /// Medium shade `▓`.
    Light,
    /// Center dot `·`.
    Dots,
}

impl RenderMode {
    /// Cycling order.
    pub const ALL: [RenderMode; 4] = [
        RenderMode::Block,
        RenderMode::Glyph,
        RenderMode::Light,
        RenderMode::Dots,
    ];

    pub fn index(self) -> usize {
        match self {
            RenderMode::Block => 0,
            RenderMode::Glyph => 1,
            RenderMode::Light => 2,
            RenderMode::Dots => 3,
        }
    }

    /// The next mode, wrapping after the last.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            RenderMode::Block => "BLOCK █",
            RenderMode::Glyph => "GLYPH",
            RenderMode::Light => "LIGHT ▓",
            RenderMode::Dots => "DOTS ·",
        }
    }

    /// Character drawn for a non-blank source character.
    pub fn substitute(self, source: char) -> char {
        match self {
            RenderMode::Block => '█',
            RenderMode::Glyph => source,
            RenderMode::Light => '▓',
            RenderMode::Dots => '·',
        }
    }
}

// ============================================================================
// FRAME
// ============================================================================

/// One terminal cell. `color` is None for blank cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub ch: char,
    pub color: Option<Rgb>,
}

impl Cell {
    pub const BLANK: Cell = Cell { ch: ' ', color: None };
}

/// A composited banner, one row of cells per grid line.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ColoredFrame {
    pub rows: Vec<Vec<Cell>>,
}

impl ColoredFrame {
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }
}

// ============================================================================
// COMPOSITING
// ============================================================================

/// Gradient endpoints actually drawn: hue-rotated by `hue_shift` degrees
/// when animating, unchanged otherwise.
pub fn effective_endpoints(start: Rgb, end: Rgb, animate: bool, hue_shift: f64) -> (Rgb, Rgb) {
    if animate {
        (rotate_hue(start, hue_shift), rotate_hue(end, hue_shift))
    } else {
        (start, end)
    }
}

/// Gradient position of column `x` in a grid `width` columns wide.
pub fn gradient_position(x: usize, width: usize) -> f64 {
    if width <= 1 {
        0.0
    } else {
        x as f64 / (width - 1) as f64
    }
}

/// Color every non-blank cell of `grid` along the `start` → `end` gradient.
pub fn compose(grid: &BannerGrid, start: Rgb, end: Rgb, mode: RenderMode) -> ColoredFrame {
    let column_colors: Vec<Rgb> = (0..grid.width)
        .map(|x| lerp(start, end, gradient_position(x, grid.width)))
        .collect();

    let rows = grid
        .lines
        .iter()
        .map(|line| {
            line.chars()
                .chain(std::iter::repeat(' '))
                .take(grid.width)
                .zip(&column_colors)
                .map(|(ch, &color)| {
                    if ch.is_whitespace() {
                        Cell::BLANK
                    } else {
                        Cell {
                            ch: mode.substitute(ch),
                            color: Some(color),
                        }
                    }
                })
                .collect()
        })
        .collect();

    ColoredFrame { rows }
}

// ============================================================================
// ANSI OUTPUT
// ============================================================================

/// Serialize a frame as truecolor ANSI text, one line per row.
///
/// Runs of identically colored cells share one escape sequence.
/// Trailing blank cells are dropped.
pub fn to_ansi(frame: &ColoredFrame) -> String {
    let mut out = String::new();

    for row in &frame.rows {
        let visible = row
            .iter()
            .rposition(|c| c.color.is_some())
            .map_or(0, |last| last + 1);

        let mut run = String::new();
        let mut run_color: Option<Rgb> = None;

        for cell in &row[..visible] {
            if cell.color != run_color && !run.is_empty() {
                push_run(&mut out, std::mem::take(&mut run), run_color);
            }
            run_color = cell.color;
            run.push(cell.ch);
        }
        push_run(&mut out, run, run_color);
        out.push('\n');
    }

    out
}

fn push_run(out: &mut String, run: String, color: Option<Rgb>) {
    if run.is_empty() {
        return;
    }
    match color {
        Some(c) => {
            let styled = run.with(TermColor::Rgb { r: c.r, g: c.g, b: c.b });
            out.push_str(&styled.to_string());
        }
        None => out.push_str(&run),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(text: &str) -> BannerGrid {
        BannerGrid::from_rendered(text)
    }

    #[test]
    fn mode_cycle_wraps() {
        let mut mode = RenderMode::Block;
        for _ in 0..RenderMode::ALL.len() {
            mode = mode.next();
        }
        assert_eq!(mode, RenderMode::Block);
        assert_eq!(RenderMode::Dots.next(), RenderMode::Block);
        assert_eq!(RenderMode::default(), RenderMode::Glyph);
    }

    #[test]
    fn substitution_by_mode() {
        assert_eq!(RenderMode::Block.substitute('/'), '█');
        assert_eq!(RenderMode::Light.substitute('/'), '▓');
        assert_eq!(RenderMode::Dots.substitute('/'), '·');
        assert_eq!(RenderMode::Glyph.substitute('/'), '/');
    }

    #[test]
    fn blank_cells_stay_uncolored() {
        let frame = compose(&grid("a b"), Rgb::BLACK, Rgb::WHITE, RenderMode::Glyph);
        assert_eq!(frame.rows[0][1], Cell::BLANK);
        assert!(frame.rows[0][0].color.is_some());
    }

    #[test]
    fn endpoints_map_to_first_and_last_column() {
        let frame = compose(&grid("#####"), Rgb::BLACK, Rgb::WHITE, RenderMode::Block);
        assert_eq!(frame.rows[0][0].color, Some(Rgb::BLACK));
        assert_eq!(frame.rows[0][4].color, Some(Rgb::WHITE));
        assert_eq!(frame.rows[0][2].color, Some(Rgb::new(127, 127, 127)));
    }

    #[test]
    fn gradient_is_per_column_not_per_row() {
        let frame = compose(&grid("ab\ncd\nef"), Rgb::new(255, 0, 0), Rgb::new(0, 0, 255), RenderMode::Glyph);
        for row in &frame.rows {
            assert_eq!(row[0].color, frame.rows[0][0].color);
            assert_eq!(row[1].color, frame.rows[0][1].color);
        }
    }

    #[test]
    fn single_column_uses_start_color() {
        let frame = compose(&grid("x\ny"), Rgb::new(9, 8, 7), Rgb::WHITE, RenderMode::Glyph);
        assert_eq!(frame.rows[0][0].color, Some(Rgb::new(9, 8, 7)));
        assert_eq!(gradient_position(0, 1), 0.0);
        assert_eq!(gradient_position(0, 0), 0.0);
    }

    #[test]
    fn empty_grid_composes_to_empty_row() {
        let frame = compose(&grid(""), Rgb::BLACK, Rgb::WHITE, RenderMode::Block);
        assert_eq!(frame.height(), 1);
        assert_eq!(frame.width(), 0);
    }

    #[test]
    fn color_is_independent_of_mode() {
        let g = grid("/\\_|");
        let colors = |mode| -> Vec<Option<Rgb>> {
            compose(&g, Rgb::new(10, 200, 30), Rgb::new(250, 5, 90), mode).rows[0]
                .iter()
                .map(|c| c.color)
                .collect()
        };
        let glyph = colors(RenderMode::Glyph);
        for mode in RenderMode::ALL {
            assert_eq!(colors(mode), glyph);
        }
    }

    #[test]
    fn effective_endpoints_rotate_only_when_animating() {
        let red = Rgb::new(255, 0, 0);
        let blue = Rgb::new(0, 0, 255);
        assert_eq!(effective_endpoints(red, blue, false, 120.0), (red, blue));
        assert_eq!(
            effective_endpoints(red, blue, true, 120.0),
            (Rgb::new(0, 255, 0), Rgb::new(255, 0, 0))
        );
    }

    #[test]
    fn ansi_output_keeps_glyphs_on_one_line() {
        let frame = compose(&grid("ab "), Rgb::BLACK, Rgb::WHITE, RenderMode::Glyph);
        let ansi = to_ansi(&frame);
        assert!(ansi.contains('a'));
        assert!(ansi.contains('b'));
        assert!(ansi.ends_with('\n'));
        assert_eq!(ansi.lines().count(), 1);
    }

    #[test]
    fn ansi_output_drops_trailing_blanks() {
        let frame = ColoredFrame {
            rows: vec![vec![Cell::BLANK, Cell::BLANK]],
        };
        assert_eq!(to_ansi(&frame), "\n");
    }

    #[test]
    fn frame_serializes_cells() {
        let frame = compose(&grid("x "), Rgb::new(1, 2, 3), Rgb::new(1, 2, 3), RenderMode::Dots);
        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(json["rows"][0][0]["ch"], "·");
        assert_eq!(json["rows"][0][0]["color"], "#010203");
        assert!(json["rows"][0][1]["color"].is_null());
    }
}
