//! Post-install mod-type classification
//!
//! After the host has applied an instruction set, these rules re-derive a
//! semantic category from where the files ended up, so later deployment
//! ordering and conflict grouping can route the mod correctly. The two
//! predicates are independent; if both match, precedence is the host's call.

use std::path::PathBuf;

use crate::archive::starts_with_component;
use crate::game::{GameDiscovery, WITCHER3};
use crate::installer::Instruction;

const MODS_DIR: &str = "mods";
const DLC_DIR: &str = "dlc";

// ============================================================================
// Destination Predicates
// ============================================================================

/// True if any destination descends into a top-level `mods` directory.
/// Total over any instruction list; empty destinations never match.
pub fn has_translation_destination(instructions: &[Instruction]) -> bool {
    instructions
        .iter()
        .any(|i| starts_with_component(i.destination(), MODS_DIR))
}

/// True if any destination descends into a top-level `dlc` directory.
pub fn has_dlc_destination(instructions: &[Instruction]) -> bool {
    instructions
        .iter()
        .any(|i| starts_with_component(i.destination(), DLC_DIR))
}

// ============================================================================
// Mod Type Rules
// ============================================================================

/// A post-hoc semantic category for an installed mod.
///
/// `resolve_root` receives the discovery record explicitly; rules never
/// reach into ambient host state.
pub trait ModType {
    fn id(&self) -> &'static str;

    fn priority(&self) -> u32;

    fn applies_to_game(&self, game_id: &str) -> bool;

    /// Absolute root the host deploys this type under.
    fn resolve_root(&self, discovery: &GameDiscovery) -> PathBuf;

    fn classify(&self, instructions: &[Instruction]) -> bool;
}

/// Translation packs deploy directly under the install root.
pub struct TranslationModType;

impl ModType for TranslationModType {
    fn id(&self) -> &'static str {
        "witcher3tl"
    }

    fn priority(&self) -> u32 {
        25
    }

    fn applies_to_game(&self, game_id: &str) -> bool {
        game_id == WITCHER3.id
    }

    fn resolve_root(&self, discovery: &GameDiscovery) -> PathBuf {
        discovery.path.clone()
    }

    fn classify(&self, instructions: &[Instruction]) -> bool {
        has_translation_destination(instructions)
    }
}

/// DLC-style mods deploy under the install root's `DLC` directory.
pub struct DlcModType;

impl ModType for DlcModType {
    fn id(&self) -> &'static str {
        "witcher3dlc"
    }

    fn priority(&self) -> u32 {
        25
    }

    fn applies_to_game(&self, game_id: &str) -> bool {
        game_id == WITCHER3.id
    }

    fn resolve_root(&self, discovery: &GameDiscovery) -> PathBuf {
        discovery.path.join("DLC")
    }

    fn classify(&self, instructions: &[Instruction]) -> bool {
        has_dlc_destination(instructions)
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Priority-ordered collection of mod-type rules, mirroring the host's
/// mod-type registration contract.
#[derive(Default)]
pub struct ModTypeRegistry {
    rules: Vec<Box<dyn ModType>>,
}

impl ModTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding both Witcher 3 rules.
    pub fn witcher3() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(TranslationModType));
        registry.register(Box::new(DlcModType));
        registry
    }

    /// Inserts the rule keeping ascending priority order; rules registered
    /// earlier win ties.
    pub fn register(&mut self, rule: Box<dyn ModType>) {
        let at = self.rules.partition_point(|r| r.priority() <= rule.priority());
        self.rules.insert(at, rule);
    }

    /// Ids of every applicable rule whose classifier matches, in priority
    /// order. Which one wins when several match is the host's decision.
    pub fn classify(&self, game_id: &str, instructions: &[Instruction]) -> Vec<&'static str> {
        self.rules
            .iter()
            .filter(|r| r.applies_to_game(game_id) && r.classify(instructions))
            .map(|r| r.id())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn ModType> {
        self.rules.iter().map(|r| r.as_ref())
    }
}
