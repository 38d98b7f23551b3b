//! Archive installers and the priority-ordered strategy registry.

mod witcher3;

pub use witcher3::{resolve_mods_prefix, ContentInstaller, TranslationInstaller};

use serde::{Deserialize, Serialize};

use crate::logging::{log_info, log_warning};

// ============================================================================
// Wire Types
// ============================================================================

/// A single installation directive, in the host's wire shape:
/// `{"type": "copy", "source": …, "destination": …}`.
///
/// `source` is archive-relative; `destination` is relative to the install
/// root (or to a per-type subroot such as `mod<name>`). Directory entries
/// never produce one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Instruction {
    Copy { source: String, destination: String },
}

impl Instruction {
    pub fn copy(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Instruction::Copy {
            source: source.into(),
            destination: destination.into(),
        }
    }

    pub fn source(&self) -> &str {
        match self {
            Instruction::Copy { source, .. } => source,
        }
    }

    pub fn destination(&self) -> &str {
        match self {
            Instruction::Copy { destination, .. } => destination,
        }
    }
}

/// Result of probing a strategy against an archive listing.
#[derive(Debug, Clone, Default)]
pub struct Support {
    pub supported: bool,
    /// Fixed files the strategy needs the host to extract up front.
    /// Both Witcher 3 strategies are structural and leave this empty.
    pub required_files: Vec<String>,
}

impl Support {
    pub fn yes() -> Self {
        Self {
            supported: true,
            required_files: Vec::new(),
        }
    }

    pub fn no() -> Self {
        Self::default()
    }
}

/// The ordered copy instructions a strategy produced for one archive.
///
/// An empty list is a valid outcome, not an error.
#[derive(Debug, Clone, Default)]
pub struct InstallPlan {
    pub instructions: Vec<Instruction>,
}

/// Progress callback the host passes to `build`. Nothing in these builders
/// runs long enough to report, so it is accepted and never invoked.
pub type Progress<'a> = &'a dyn Fn(f32);

// ============================================================================
// Strategy Contract
// ============================================================================

/// One way of interpreting an archive listing as an installation.
///
/// `test` must be cheap, pure and total: the host probes every registered
/// strategy against every archive, and malformed input degrades to
/// "not supported" rather than an error.
pub trait InstallerStrategy {
    fn id(&self) -> &'static str;

    /// Lower values are probed first; the more specific strategy gets the
    /// smaller number.
    fn priority(&self) -> u32;

    fn test(&self, files: &[String], game_id: &str) -> Support;

    fn build(
        &self,
        files: &[String],
        destination_path: &str,
        game_id: &str,
        progress: Progress<'_>,
    ) -> InstallPlan;
}

// ============================================================================
// Registry
// ============================================================================

/// Priority-ordered collection of installer strategies.
///
/// Mirrors the host's installer registration contract: strategies are probed
/// in ascending priority order and the first supported one wins.
#[derive(Default)]
pub struct InstallerRegistry {
    strategies: Vec<Box<dyn InstallerStrategy>>,
}

impl InstallerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding both Witcher 3 strategies in probe order.
    pub fn witcher3() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(TranslationInstaller));
        registry.register(Box::new(ContentInstaller));
        registry
    }

    /// Inserts the strategy keeping ascending priority order; strategies
    /// registered earlier win ties.
    pub fn register(&mut self, strategy: Box<dyn InstallerStrategy>) {
        let at = self
            .strategies
            .partition_point(|s| s.priority() <= strategy.priority());
        self.strategies.insert(at, strategy);
    }

    /// First strategy whose test supports the listing, or `None`, in which
    /// case the host falls back to its default installer.
    pub fn dispatch(&self, files: &[String], game_id: &str) -> Option<&dyn InstallerStrategy> {
        for strategy in &self.strategies {
            if strategy.test(files, game_id).supported {
                log_info(&format!(
                    "Installer '{}' selected for {} ({} files)",
                    strategy.id(),
                    game_id,
                    files.len()
                ));
                return Some(strategy.as_ref());
            }
        }
        log_warning(&format!("No installer matched archive for {}", game_id));
        None
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn InstallerStrategy> {
        self.strategies.iter().map(|s| s.as_ref())
    }
}
