//! Startup and driver failures.
//!
//! Malformed color text typed into the session is not an error (it is simply
//! not adopted); everything here is fatal and ends the process non-zero.

use std::io;

/// Fatal error surfaced to `main`.
#[derive(Debug)]
pub enum AppError {
    /// Terminal setup, drawing, or event reading failed.
    Terminal(io::Error),

    /// A color given on the command line is not `#RGB` / `#RRGGBB`.
    InvalidColor(String),

    /// A font given on the command line is not in the catalog.
    UnknownFont(String),

    /// The built-in FIGlet font could not be parsed.
    FontLoad(String),

    /// The log file could not be opened or the subscriber installed.
    Logging(String),

    /// JSON output could not be serialized.
    Output(serde_json::Error),
}

impl From<io::Error> for AppError {
    fn from(e: io::Error) -> Self {
        AppError::Terminal(e)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Output(e)
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Terminal(e) => write!(f, "Terminal error: {}", e),
            AppError::InvalidColor(s) => {
                write!(f, "Invalid color '{}' (expected #RGB or #RRGGBB)", s)
            }
            AppError::UnknownFont(name) => {
                write!(f, "Unknown font '{}' (run `bannerglow fonts` for the list)", name)
            }
            AppError::FontLoad(e) => write!(f, "Could not load built-in font: {}", e),
            AppError::Logging(e) => write!(f, "Could not set up logging: {}", e),
            AppError::Output(e) => write!(f, "Could not serialize output: {}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Terminal(e) => Some(e),
            AppError::Output(e) => Some(e),
            _ => None,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
