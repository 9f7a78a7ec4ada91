//! bannerglow CLI
//!
//! Animated gradient FIGlet banners in the terminal.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde::Serialize;

use bannerglow::banner::{self, FigletSource};
use bannerglow::color::Rgb;
use bannerglow::compositor::{self, ColoredFrame, RenderMode};
use bannerglow::config::{self, SessionConfig};
use bannerglow::error::AppError;
use bannerglow::fonts::FontCatalog;
use bannerglow::logging;
use bannerglow::platform::detect_font_dirs;

#[derive(Parser)]
#[command(name = "bannerglow")]
#[command(about = "Animated gradient FIGlet banners in the terminal")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Initial banner text
    #[arg(long, default_value = config::DEFAULT_TEXT)]
    text: String,

    /// Gradient start color (#RRGGBB or #RGB)
    #[arg(long, global = true, default_value = config::DEFAULT_START_HEX)]
    start: String,

    /// Gradient end color (#RRGGBB or #RGB)
    #[arg(long, global = true, default_value = config::DEFAULT_END_HEX)]
    end: String,

    /// FIGlet font name from the catalog
    #[arg(long, global = true, default_value = banner::STANDARD_FONT)]
    font: String,

    /// How banner cells are drawn
    #[arg(long, global = true, value_enum, default_value = "glyph")]
    mode: ModeArg,

    /// Start with hue cycling off
    #[arg(long)]
    no_animate: bool,

    /// Hue degrees advanced per tick (clamped to 0.5..=30)
    #[arg(long, default_value_t = config::DEFAULT_STEP_DEG)]
    step: f64,

    /// Milliseconds between animation ticks
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u64).range(1..))]
    interval_ms: u64,

    /// Extra directory to search for .flf font files (repeatable)
    #[arg(long, global = true)]
    font_dir: Vec<PathBuf>,

    /// Append logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Log level when RUST_LOG is unset
    #[arg(long, global = true, default_value = logging::DEFAULT_LEVEL)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a banner once and exit
    Print {
        /// Text to render
        text: String,

        /// Output format
        #[arg(long, value_enum, default_value = "ansi")]
        format: PrintFormatArg,

        /// Rotate both gradient endpoints by this many hue degrees
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        hue: f64,
    },

    /// List the font catalog
    Fonts {
        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: ListFormatArg,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum ModeArg {
    Block,
    Glyph,
    Light,
    Dots,
}

impl From<ModeArg> for RenderMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Block => RenderMode::Block,
            ModeArg::Glyph => RenderMode::Glyph,
            ModeArg::Light => RenderMode::Light,
            ModeArg::Dots => RenderMode::Dots,
        }
    }
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum PrintFormatArg {
    Ansi,
    Json,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum ListFormatArg {
    Human,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match dispatch(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn dispatch(cli: Cli) -> Result<(), AppError> {
    if let Some(path) = &cli.log_file {
        logging::init_file_logging(path, &cli.log_level)?;
    }

    let config = session_config(&cli)?;

    match cli.command {
        None => cmd_interactive(&config),
        Some(Commands::Print { text, format, hue }) => cmd_print(&config, &text, format, hue),
        Some(Commands::Fonts { format }) => cmd_fonts(&config, format),
    }
}

// ============================================================================
// CONFIG
// ============================================================================

/// Overlay command-line values on the defaults and validate them.
fn session_config(cli: &Cli) -> Result<SessionConfig, AppError> {
    let config = SessionConfig {
        text: cli.text.clone(),
        start_hex: cli.start.clone(),
        end_hex: cli.end.clone(),
        mode: cli.mode.into(),
        animate: !cli.no_animate,
        step_deg: config::clamp_step(cli.step),
        interval: Duration::from_millis(cli.interval_ms),
        font_dirs: cli.font_dir.clone(),
        ..Default::default()
    }
    .with_font(&cli.font)?;

    config.validate()?;
    Ok(config)
}

fn glyph_source(config: &SessionConfig) -> Result<FigletSource, AppError> {
    let dirs = detect_font_dirs(&config.font_dirs);
    tracing::debug!(dirs = ?dirs, "font search path");
    FigletSource::new(dirs)
}

// ============================================================================
// COMMANDS
// ============================================================================

fn cmd_interactive(config: &SessionConfig) -> Result<(), AppError> {
    tracing::info!(
        text = %config.text,
        start = %config.start_hex,
        end = %config.end_hex,
        font = config.catalog.name(config.font_index),
        "starting interactive session"
    );

    let glyphs = glyph_source(config)?;
    bannerglow::tui::run::run(config, &glyphs)
}

/// Machine-readable `print` output.
#[derive(Serialize)]
struct PrintReport<'a> {
    text: &'a str,
    font: &'a str,
    mode: RenderMode,
    start: Rgb,
    end: Rgb,
    hue: f64,
    width: usize,
    height: usize,
    frame: ColoredFrame,
}

fn cmd_print(
    config: &SessionConfig,
    text: &str,
    format: PrintFormatArg,
    hue: f64,
) -> Result<(), AppError> {
    let glyphs = glyph_source(config)?;
    let font = config.catalog.name(config.font_index);
    let grid = banner::build(text, font, &glyphs);

    let (start, end) = compositor::effective_endpoints(
        config.start_color()?,
        config.end_color()?,
        hue != 0.0,
        hue,
    );
    let frame = compositor::compose(&grid, start, end, config.mode);

    match format {
        PrintFormatArg::Ansi => print!("{}", compositor::to_ansi(&frame)),
        PrintFormatArg::Json => {
            let report = PrintReport {
                text,
                font,
                mode: config.mode,
                start,
                end,
                hue,
                width: frame.width(),
                height: frame.height(),
                frame,
            };
            let json = serde_json::to_string_pretty(&report)?;
            println!("{}", json);
        }
    }

    Ok(())
}

/// One catalog entry in `fonts --format json`.
#[derive(Serialize)]
struct FontEntry<'a> {
    index: usize,
    name: &'a str,
    /// False when the font falls back to `standard`.
    available: bool,
}

fn cmd_fonts(config: &SessionConfig, format: ListFormatArg) -> Result<(), AppError> {
    let glyphs = glyph_source(config)?;
    let catalog: &FontCatalog = &config.catalog;

    match format {
        ListFormatArg::Human => {
            for (index, name) in catalog.iter().enumerate() {
                let marker = if glyphs.is_available(name) { "" } else { "  (fallback)" };
                println!("{}\t{}{}", index, name, marker);
            }
        }
        ListFormatArg::Json => {
            let entries: Vec<FontEntry> = catalog
                .iter()
                .enumerate()
                .map(|(index, name)| FontEntry {
                    index,
                    name,
                    available: glyphs.is_available(name),
                })
                .collect();
            let json = serde_json::to_string_pretty(&entries)?;
            println!("{}", json);
        }
    }

    Ok(())
}
