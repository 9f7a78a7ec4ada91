//! Font directory resolution.
//!
//! FIGlet fonts (`.flf` files) live in a handful of conventional places.
//! Path construction is pure; only [`detect_font_dirs`] reads the
//! environment and filesystem.

use std::env;
use std::path::{Path, PathBuf};

/// Environment variable honoured by the reference `figlet` tool.
pub const FONTDIR_ENV: &str = "FIGLET_FONTDIR";

/// System locations, checked after user-specific ones.
pub const SYSTEM_FONT_DIRS: &[&str] = &[
    "/usr/share/figlet",
    "/usr/local/share/figlet",
    "/opt/homebrew/share/figlet/fonts",
    "/usr/local/share/figlet/fonts",
];

/// File extension for FIGlet fonts.
pub const FONT_EXTENSION: &str = "flf";

// ============================================================================
// PURE FUNCTIONS (Path Construction)
// ============================================================================

/// Compute the user font directory from a data directory.
///
/// Pure function, no I/O.
pub fn user_font_dir(data_dir: &Path) -> PathBuf {
    data_dir.join("figlet")
}

/// Compute the file path of a named font inside a directory.
///
/// Pure function, no I/O.
pub fn font_file(dir: &Path, font_name: &str) -> PathBuf {
    dir.join(format!("{}.{}", font_name, FONT_EXTENSION))
}

/// Ordered search path: explicit dirs, then `$FIGLET_FONTDIR`, the user
/// data dir, and system dirs. Duplicates are dropped, first wins.
///
/// Pure function, no I/O.
pub fn search_path(
    explicit: &[PathBuf],
    env_dir: Option<PathBuf>,
    data_dir: Option<PathBuf>,
) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = Vec::new();
    let candidates = explicit
        .iter()
        .cloned()
        .chain(env_dir)
        .chain(data_dir.map(|d| user_font_dir(&d)))
        .chain(SYSTEM_FONT_DIRS.iter().map(PathBuf::from));

    for dir in candidates {
        if !dirs.contains(&dir) {
            dirs.push(dir);
        }
    }
    dirs
}

// ============================================================================
// EFFECT FUNCTIONS (Detection)
// ============================================================================

/// Build the font search path from the environment, keeping only
/// directories that exist.
pub fn detect_font_dirs(explicit: &[PathBuf]) -> Vec<PathBuf> {
    let env_dir = env::var_os(FONTDIR_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from);

    search_path(explicit, env_dir, dirs::data_dir())
        .into_iter()
        .filter(|d| d.is_dir())
        .collect()
}

/// Find the first existing file for `font_name` along `dirs`.
pub fn locate_font(dirs: &[PathBuf], font_name: &str) -> Option<PathBuf> {
    dirs.iter()
        .map(|d| font_file(d, font_name))
        .find(|p| p.is_file())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_font_file() {
        let path = font_file(Path::new("/usr/share/figlet"), "slant");
        assert_eq!(path, PathBuf::from("/usr/share/figlet/slant.flf"));
    }

    #[test]
    fn test_user_font_dir() {
        let dir = user_font_dir(Path::new("/home/u/.local/share"));
        assert_eq!(dir, PathBuf::from("/home/u/.local/share/figlet"));
    }

    #[test]
    fn test_search_path_order() {
        let dirs = search_path(
            &[PathBuf::from("/explicit")],
            Some(PathBuf::from("/env")),
            Some(PathBuf::from("/data")),
        );
        assert_eq!(dirs[0], PathBuf::from("/explicit"));
        assert_eq!(dirs[1], PathBuf::from("/env"));
        assert_eq!(dirs[2], PathBuf::from("/data/figlet"));
        assert_eq!(dirs[3], PathBuf::from(SYSTEM_FONT_DIRS[0]));
    }

    #[test]
    fn test_search_path_dedupes() {
        let dirs = search_path(
            &[PathBuf::from("/usr/share/figlet")],
            Some(PathBuf::from("/usr/share/figlet")),
            None,
        );
        let count = dirs
            .iter()
            .filter(|d| d.as_path() == Path::new("/usr/share/figlet"))
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_detect_keeps_existing_explicit_dir() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing");
        let dirs = detect_font_dirs(&[temp.path().to_path_buf(), missing.clone()]);
        assert_eq!(dirs[0], temp.path());
        assert!(!dirs.contains(&missing));
    }

    #[test]
    fn test_locate_font_first_match_wins() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        fs::write(font_file(second.path(), "doom"), "x").unwrap();

        let dirs = vec![first.path().to_path_buf(), second.path().to_path_buf()];
        assert_eq!(locate_font(&dirs, "doom"), Some(font_file(second.path(), "doom")));

        fs::write(font_file(first.path(), "doom"), "x").unwrap();
        assert_eq!(locate_font(&dirs, "doom"), Some(font_file(first.path(), "doom")));
        assert_eq!(locate_font(&dirs, "slant"), None);
    }
}
