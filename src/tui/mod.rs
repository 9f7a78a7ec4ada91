//! TUI module for the interactive banner editor.
//!
//! Organized along FP/Unix boundaries:
//! - `state`: Pure data types (Session, Action, Command)
//! - `update`: Pure state transitions
//! - `view`: Pure rendering (state in, widgets out)
//! - `field`: Single-line text input used by the controls panel
//! - `theme`: Style constants
//! - `run`: Effects boundary (terminal, events, tick scheduling)

pub mod field;
pub mod run;
pub mod state;
pub mod theme;
pub mod update;
pub mod view;
