//! bannerglow: animated gradient FIGlet banners for the terminal.

pub mod banner;
pub mod color;
pub mod compositor;
pub mod config;
pub mod error;
pub mod fonts;
pub mod logging;
pub mod platform;
pub mod tui;
