//! Model cache discovery
//!
//! Decides where fastembed downloads and caches ONNX model files.

use std::path::{Path, PathBuf};

/// Environment variable overriding the model cache directory
pub const CACHE_DIR_ENV: &str = "SIMPLERAG_CACHE_DIR";

/// Find the model cache directory with priority:
/// 1. Explicit path (command line)
/// 2. SIMPLERAG_CACHE_DIR environment variable
/// 3. User home directory (~/.simplerag/models)
///
/// Returns `None` when nothing applies; fastembed then uses its own default.
pub fn find_cache_dir(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        log::info!("Using model cache: {}", path.display());
        return Some(path.to_path_buf());
    }

    if let Ok(dir) = std::env::var(CACHE_DIR_ENV) {
        if !dir.trim().is_empty() {
            log::info!("Using {}: {}", CACHE_DIR_ENV, dir);
            return Some(PathBuf::from(dir));
        }
        log::warn!("{} set but empty, ignoring", CACHE_DIR_ENV);
    }

    home_cache_dir()
}

fn home_cache_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(|home| PathBuf::from(home).join(".simplerag").join("models"))
}
