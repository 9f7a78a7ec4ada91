//! Banner grid construction.
//!
//! Glyph shaping is delegated to a [`GlyphSource`]; this module only turns
//! its multi-line output into a rectangular, space-padded grid. `build` is a
//! pure function of (text, font name): callers rebuild the whole grid when
//! either changes.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use figlet_rs::FIGfont;

use crate::error::AppError;
use crate::platform::locate_font;

/// The font compiled into figlet-rs, always available.
pub const STANDARD_FONT: &str = "standard";

/// Characters every FIGlet font defines, in file order.
const REQUIRED_GLYPHS: usize = 102;

// ============================================================================
// GLYPH SOURCE
// ============================================================================

/// Renders text in a named display font.
///
/// Implementations must accept every name in the font catalog without
/// failing; an unavailable font degrades to some fallback rendering.
pub trait GlyphSource {
    /// Multi-line rendering of `text` in `font`, lines separated by `\n`.
    fn render(&self, text: &str, font: &str) -> String;
}

/// FIGlet renderer backed by figlet-rs.
///
/// Fonts other than the built-in `standard` are loaded lazily from the
/// configured directories and cached, including failures, so each font
/// file is read at most once.
pub struct FigletSource {
    dirs: Vec<PathBuf>,
    standard: FIGfont,
    cache: RefCell<HashMap<String, Option<FIGfont>>>,
}

impl FigletSource {
    /// Create a source searching `dirs` (in order) for `.flf` files.
    ///
    /// # Errors
    /// Returns an error if the built-in standard font cannot be parsed.
    pub fn new(dirs: Vec<PathBuf>) -> Result<Self, AppError> {
        let standard = FIGfont::standard().map_err(AppError::FontLoad)?;
        Ok(FigletSource {
            dirs,
            standard,
            cache: RefCell::new(HashMap::new()),
        })
    }

    /// Directories searched for font files.
    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Whether `font` resolves to something other than the fallback.
    pub fn is_available(&self, font: &str) -> bool {
        self.ensure_loaded(font);
        font == STANDARD_FONT || matches!(self.cache.borrow().get(font), Some(Some(_)))
    }

    fn ensure_loaded(&self, font: &str) {
        if self.cache.borrow().contains_key(font) {
            return;
        }

        let loaded = match locate_font(&self.dirs, font) {
            Some(path) => match load_font_file(&path) {
                Ok(f) => {
                    tracing::debug!(font, path = %path.display(), "loaded font");
                    Some(f)
                }
                Err(e) => {
                    tracing::warn!(font, path = %path.display(), error = %e, "unreadable font, using standard");
                    None
                }
            },
            None => {
                if font != STANDARD_FONT {
                    tracing::warn!(font, "font not found in search path, using standard");
                }
                None
            }
        };

        self.cache.borrow_mut().insert(font.to_string(), loaded);
    }
}

/// Read and parse one `.flf` file.
///
/// figlet-rs indexes into the file without bounds checks, so the layout is
/// checked first and anything it would choke on is an error.
fn load_font_file(path: &Path) -> Result<FIGfont, String> {
    let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
    check_font_layout(&content)?;
    FIGfont::from_content(&content)
}

/// Structural preconditions figlet-rs relies on when parsing `content`:
/// a well-formed header, a positive height, every required character
/// present, and glyph lines long enough to drop their end marks on a
/// character boundary.
fn check_font_layout(content: &str) -> Result<(), String> {
    let lines: Vec<&str> = content.lines().collect();
    let header = lines.first().ok_or("empty font file")?;

    let fields: Vec<&str> = header.trim().split(' ').collect();
    if fields.len() < 6 {
        return Err("header has too few fields".to_string());
    }
    let signature = fields[0];
    if signature.len() < 6 || !signature.is_char_boundary(signature.len() - 1) {
        return Err("malformed signature".to_string());
    }

    let number = |i: usize, name: &str| -> Result<usize, String> {
        fields[i]
            .parse::<usize>()
            .map_err(|_| format!("bad {} field {:?}", name, fields[i]))
    };
    let height = number(1, "height")?;
    let comment_lines = number(5, "comment lines")?;
    if height == 0 {
        return Err("height must be positive".to_string());
    }

    // header + comments + 95 ASCII + 7 German characters
    let required = REQUIRED_GLYPHS
        .checked_mul(height)
        .and_then(|n| n.checked_add(comment_lines))
        .and_then(|n| n.checked_add(1))
        .ok_or("header sizes overflow")?;
    if lines.len() < required {
        return Err(format!("expected at least {} lines, found {}", required, lines.len()));
    }

    let min_len = if height == 1 { 1 } else { 2 };
    for (offset, line) in lines[1 + comment_lines..].iter().enumerate() {
        let cut_ok = line.len() >= min_len
            && line.is_char_boundary(line.len() - 1)
            && (line.len() < 2 || line.is_char_boundary(line.len() - 2));
        if !cut_ok {
            return Err(format!("malformed glyph line {}", 2 + comment_lines + offset));
        }
    }

    Ok(())
}

impl GlyphSource for FigletSource {
    fn render(&self, text: &str, font: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        self.ensure_loaded(font);
        let cache = self.cache.borrow();
        let figfont = match cache.get(font) {
            Some(Some(f)) => f,
            _ => &self.standard,
        };

        // None when no char of `text` exists in the font
        figfont
            .convert(text)
            .map(|figure| figure.to_string())
            .unwrap_or_default()
    }
}

// ============================================================================
// GRID
// ============================================================================

/// Rectangular character grid: every line has exactly `width` chars.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BannerGrid {
    pub lines: Vec<String>,
    pub width: usize,
}

impl BannerGrid {
    /// Normalize raw glyph output into a grid.
    ///
    /// Trailing blank lines are dropped (at least one line is kept), columns
    /// that are blank in every line are cut from both edges, and every line
    /// is right-padded with spaces to the grid width. The first and last
    /// columns of a non-blank grid therefore always hold a glyph.
    pub fn from_rendered(rendered: &str) -> Self {
        let mut rows: Vec<Vec<char>> = rendered
            .split('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l).chars().collect())
            .collect();

        while rows.len() > 1 && rows.last().is_some_and(|r| is_blank_row(r)) {
            rows.pop();
        }

        let full_width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let inked = |x: usize| rows.iter().any(|r| r.get(x).is_some_and(|c| !c.is_whitespace()));

        let Some(left) = (0..full_width).find(|&x| inked(x)) else {
            return BannerGrid {
                lines: vec![String::new()],
                width: 0,
            };
        };
        let right = (left..full_width).rev().find(|&x| inked(x)).unwrap_or(left) + 1;

        let lines = rows
            .iter()
            .map(|r| (left..right).map(|x| r.get(x).copied().unwrap_or(' ')).collect())
            .collect();

        BannerGrid {
            lines,
            width: right - left,
        }
    }

    pub fn height(&self) -> usize {
        self.lines.len()
    }

    /// True when no cell holds a visible glyph.
    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|l| l.trim().is_empty())
    }
}

fn is_blank_row(row: &[char]) -> bool {
    row.iter().all(|c| c.is_whitespace())
}

/// Shape `text` in `font` and normalize the result into a grid.
pub fn build(text: &str, font: &str, glyphs: &dyn GlyphSource) -> BannerGrid {
    let grid = BannerGrid::from_rendered(&glyphs.render(text, font));
    tracing::debug!(font, width = grid.width, height = grid.height(), "rebuilt banner grid");
    grid
}

// ============================================================================
// TESTS
// ============================================================================
