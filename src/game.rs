//! The Witcher 3 game record and install-time setup.

use std::fs;
use std::io;
use std::path::PathBuf;

use crate::logging::{log_error, log_install};

// ============================================================================
// Types
// ============================================================================

/// Static registration data for a supported game, in the shape the host's
/// game registry expects.
#[derive(Debug, Clone)]
pub struct GameRegistration {
    /// Host-wide game identifier
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Whether installed mods may be merged into one deployment tree
    pub merge_mods: bool,
    /// Mod deployment directory, relative to the install root
    pub mod_path: &'static str,
    /// Main executable, relative to the install root
    pub executable: &'static str,
    /// Files that must exist for a directory to count as this game
    pub required_files: &'static [&'static str],
    /// Steam App ID
    pub steam_app_id: u32,
    /// Artwork asset shown by the host
    pub logo: &'static str,
}

/// The Witcher 3 registration record
pub const WITCHER3: GameRegistration = GameRegistration {
    id: "witcher3",
    name: "The Witcher 3",
    merge_mods: true,
    mod_path: "Mods",
    executable: "bin/x64/witcher3.exe",
    required_files: &["bin/x64/witcher3.exe"],
    steam_app_id: 292030,
    logo: "gameart.png",
};

/// A game installation the host has already located on disk.
///
/// Discovery itself (registry lookup, store-front search) is the host's job;
/// everything here receives the resolved record as an argument and never
/// fetches it from ambient state.
#[derive(Debug, Clone)]
pub struct GameDiscovery {
    /// Absolute path to the game's install root
    pub path: PathBuf,
}

impl GameDiscovery {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

// ============================================================================
// Setup
// ============================================================================

/// Ensures the `Mods` directory exists under the discovered install.
///
/// Idempotent; the host runs it once per setup before the first
/// installation.
pub fn prepare_for_modding(discovery: &GameDiscovery) -> io::Result<()> {
    let mods_dir = discovery.path.join(WITCHER3.mod_path);
    if let Err(e) = fs::create_dir_all(&mods_dir) {
        log_error(&format!(
            "Failed to create mods directory '{}': {}",
            mods_dir.display(),
            e
        ));
        return Err(e);
    }
    log_install(&format!("Mods directory ready at {}", mods_dir.display()));
    Ok(())
}
