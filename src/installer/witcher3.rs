//! Witcher 3 installer strategies
//!
//! Two competing interpretations of an arbitrary archive listing:
//!
//! - Translation packs ship a `mods` directory somewhere in the tree,
//!   possibly wrapped in arbitrary outer folders that must be stripped.
//!   More specific, probed first (priority 25).
//! - Raw content archives ship a top-level `content` directory whose
//!   payload is installed under a per-mod `mod<name>` subroot (priority 50).

use crate::archive::{
    component_index, is_dir_entry, is_separator, skip_first_component, starts_with_component,
    strip_prefix_ignore_case,
};
use crate::game::WITCHER3;

use super::{InstallPlan, Instruction, InstallerStrategy, Progress, Support};

const MODS_DIR: &str = "mods";
const CONTENT_DIR: &str = "content";

// ============================================================================
// Prefix Resolver
// ============================================================================

/// Finds the wrapper prefix preceding the shallowest `mods` directory.
///
/// Files where `mods` is the first component need no stripping and files
/// without a `mods` component are ignored. Among the rest, the prefix with
/// the fewest components wins (first seen on ties); taking the shallowest
/// occurrence keeps nested `mods` folders inside the payload intact. The
/// result is the witness file's original text up to the marker, trailing
/// separator included, or `""` when no file qualifies.
pub fn resolve_mods_prefix(files: &[String]) -> String {
    let mut best: Option<(usize, &str)> = None;
    for file in files {
        let Some(idx) = component_index(file, MODS_DIR) else {
            continue;
        };
        if idx == 0 {
            continue;
        }
        if best.is_none_or(|(depth, _)| idx < depth) {
            best = Some((idx, prefix_text(file, idx)));
        }
    }
    best.map(|(_, prefix)| prefix.to_string()).unwrap_or_default()
}

/// Original text of the first `components` path components, trailing
/// separator included.
fn prefix_text(file: &str, components: usize) -> &str {
    let mut seen = 0;
    for (i, c) in file.char_indices() {
        if is_separator(c) {
            seen += 1;
            if seen == components {
                return &file[..i + c.len_utf8()];
            }
        }
    }
    file
}

// ============================================================================
// Translation Packs
// ============================================================================

/// Installer for translation packs: any archive with a `mods` directory.
pub struct TranslationInstaller;

impl InstallerStrategy for TranslationInstaller {
    fn id(&self) -> &'static str {
        "witcher3tl"
    }

    fn priority(&self) -> u32 {
        25
    }

    fn test(&self, files: &[String], game_id: &str) -> Support {
        if game_id != WITCHER3.id {
            return Support::no();
        }
        // Structural, not file-name-based: no fixed file is required.
        if files
            .iter()
            .any(|f| component_index(f, MODS_DIR).is_some())
        {
            Support::yes()
        } else {
            Support::no()
        }
    }

    fn build(
        &self,
        files: &[String],
        _destination_path: &str,
        _game_id: &str,
        _progress: Progress<'_>,
    ) -> InstallPlan {
        let prefix = resolve_mods_prefix(files);
        let instructions = files
            .iter()
            .filter(|f| !is_dir_entry(f))
            .filter_map(|f| {
                strip_prefix_ignore_case(f, &prefix)
                    .map(|rest| Instruction::copy(f.clone(), rest))
            })
            .collect();
        InstallPlan { instructions }
    }
}

// ============================================================================
// Raw Content Archives
// ============================================================================

/// Installer for raw content archives: a top-level `content` directory whose
/// remainder lands under `mod<name>`, where `<name>` is the final component
/// of the host's destination path for this mod.
pub struct ContentInstaller;

impl InstallerStrategy for ContentInstaller {
    fn id(&self) -> &'static str {
        "witcher3content"
    }

    fn priority(&self) -> u32 {
        50
    }

    fn test(&self, files: &[String], game_id: &str) -> Support {
        if game_id != WITCHER3.id {
            return Support::no();
        }
        if files.iter().any(|f| starts_with_component(f, CONTENT_DIR)) {
            Support::yes()
        } else {
            Support::no()
        }
    }

    fn build(
        &self,
        files: &[String],
        destination_path: &str,
        _game_id: &str,
        _progress: Progress<'_>,
    ) -> InstallPlan {
        let subroot = content_subroot(destination_path);
        let instructions = files
            .iter()
            .filter(|f| !is_dir_entry(f) && starts_with_component(f, CONTENT_DIR))
            .map(|f| {
                let remainder = skip_first_component(f);
                Instruction::copy(f.clone(), format!("{}/{}", subroot, remainder))
            })
            .collect();
        InstallPlan { instructions }
    }
}

/// Per-type subroot for raw content: `mod` + the mod's folder name. Only the
/// final component of the host's staging path names the mod; the rest of the
/// path must never leak into a destination.
fn content_subroot(destination_path: &str) -> String {
    let name = destination_path
        .split(is_separator)
        .filter(|c| !c.is_empty())
        .next_back()
        .unwrap_or_default();
    format!("mod{}", name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::installer::InstallerRegistry;

    fn listing(paths: &[&str]) -> Vec<String> {
        paths.iter().map(|p| p.to_string()).collect()
    }

    fn no_progress() -> impl Fn(f32) {
        |_| {}
    }

    // ------------------------------------------------------------------
    // Translation test
    // ------------------------------------------------------------------

    #[test]
    fn translation_test_supports_mods_component_at_any_depth() {
        let strategy = TranslationInstaller;
        let files = listing(&["Wrapper/Deeper/Mods/MyMod/cfg.xml"]);
        let support = strategy.test(&files, "witcher3");
        assert!(support.supported);
        assert!(support.required_files.is_empty());
    }

    #[test]
    fn translation_test_rejects_listing_without_mods() {
        let strategy = TranslationInstaller;
        let files = listing(&["bin/x64/readme.txt", "textures/a.dds"]);
        assert!(!strategy.test(&files, "witcher3").supported);
    }

    #[test]
    fn translation_test_rejects_other_games() {
        let strategy = TranslationInstaller;
        let files = listing(&["Mods/MyMod/cfg.xml"]);
        assert!(!strategy.test(&files, "morrowind").supported);
    }

    #[test]
    fn translation_test_rejects_empty_listing() {
        let strategy = TranslationInstaller;
        assert!(!strategy.test(&[], "witcher3").supported);
    }

    // ------------------------------------------------------------------
    // Prefix resolver
    // ------------------------------------------------------------------

    #[test]
    fn prefix_is_empty_when_mods_is_top_level() {
        let files = listing(&["Mods/MyMod/cfg.xml", "Mods/MyMod/script.ws"]);
        assert_eq!(resolve_mods_prefix(&files), "");
    }

    #[test]
    fn prefix_strips_single_wrapper_folder() {
        let files = listing(&["WrapperFolder/Mods/MyMod/cfg.xml"]);
        assert_eq!(resolve_mods_prefix(&files), "WrapperFolder/");
    }

    #[test]
    fn prefix_keeps_shallowest_occurrence() {
        let files = listing(&[
            "a/b/Mods/deep.ws",
            "Wrapper/Mods/shallow.ws",
            "no-marker/readme.txt",
        ]);
        assert_eq!(resolve_mods_prefix(&files), "Wrapper/");
    }

    #[test]
    fn prefix_is_empty_when_no_file_qualifies() {
        let files = listing(&["readme.txt", "textures/a.dds"]);
        assert_eq!(resolve_mods_prefix(&files), "");
    }

    #[test]
    fn prefix_resolution_is_idempotent() {
        let files = listing(&["Wrapper/Mods/MyMod/cfg.xml", "Wrapper/Mods/MyMod/a.ws"]);
        let prefix = resolve_mods_prefix(&files);
        let stripped: Vec<String> = files
            .iter()
            .filter_map(|f| strip_prefix_ignore_case(f, &prefix))
            .map(|rest| rest.to_string())
            .collect();
        assert_eq!(stripped.len(), files.len());
        assert_eq!(resolve_mods_prefix(&stripped), "");
    }

    // ------------------------------------------------------------------
    // Translation build
    // ------------------------------------------------------------------

    #[test]
    fn translation_build_without_wrapper_copies_verbatim() {
        let strategy = TranslationInstaller;
        let files = listing(&["Mods/MyMod/cfg.xml", "Mods/MyMod/script.ws"]);
        let plan = strategy.build(&files, "/staging/MyMod", "witcher3", &no_progress());
        assert_eq!(
            plan.instructions,
            vec![
                Instruction::copy("Mods/MyMod/cfg.xml", "Mods/MyMod/cfg.xml"),
                Instruction::copy("Mods/MyMod/script.ws", "Mods/MyMod/script.ws"),
            ]
        );
    }

    #[test]
    fn translation_build_strips_wrapper_folder() {
        let strategy = TranslationInstaller;
        let files = listing(&["WrapperFolder/Mods/MyMod/cfg.xml"]);
        let plan = strategy.build(&files, "/staging/MyMod", "witcher3", &no_progress());
        assert_eq!(
            plan.instructions,
            vec![Instruction::copy(
                "WrapperFolder/Mods/MyMod/cfg.xml",
                "Mods/MyMod/cfg.xml"
            )]
        );
    }

    #[test]
    fn translation_build_skips_directory_entries_and_outsiders() {
        let strategy = TranslationInstaller;
        let files = listing(&[
            "Wrapper/Mods/",
            "Wrapper/Mods/MyMod/cfg.xml",
            "Elsewhere/readme.txt",
        ]);
        let plan = strategy.build(&files, "/staging/MyMod", "witcher3", &no_progress());
        assert_eq!(
            plan.instructions,
            vec![Instruction::copy(
                "Wrapper/Mods/MyMod/cfg.xml",
                "Mods/MyMod/cfg.xml"
            )]
        );
    }

    #[test]
    fn translation_build_roundtrips_prefix_plus_destination() {
        let files = listing(&[
            "Some Wrapper/Mods/MyMod/cfg.xml",
            "Some Wrapper/Mods/MyMod/sub/script.ws",
        ]);
        let prefix = resolve_mods_prefix(&files);
        let plan =
            TranslationInstaller.build(&files, "/staging/MyMod", "witcher3", &no_progress());
        for instruction in &plan.instructions {
            let rebuilt = format!("{}{}", prefix, instruction.destination());
            assert!(rebuilt.eq_ignore_ascii_case(instruction.source()));
        }
    }

    #[test]
    fn translation_build_on_empty_listing_is_empty_not_an_error() {
        let plan = TranslationInstaller.build(&[], "/staging/MyMod", "witcher3", &no_progress());
        assert!(plan.instructions.is_empty());
    }

    // ------------------------------------------------------------------
    // Content test
    // ------------------------------------------------------------------

    #[test]
    fn content_test_supports_top_level_content_dir() {
        let strategy = ContentInstaller;
        let files = listing(&["Content/blob0.bundle", "readme.txt"]);
        assert!(strategy.test(&files, "witcher3").supported);
    }

    #[test]
    fn content_archive_without_content_dir_is_not_supported() {
        // A matching game id alone is not enough: the archive must actually
        // descend into a top-level `content` directory.
        let strategy = ContentInstaller;
        let files = listing(&["Mods/MyMod/cfg.xml", "readme.txt"]);
        assert!(!strategy.test(&files, "witcher3").supported);
        assert!(!strategy.test(&[], "witcher3").supported);
    }

    #[test]
    fn content_test_rejects_other_games() {
        let strategy = ContentInstaller;
        let files = listing(&["content/blob0.bundle"]);
        assert!(!strategy.test(&files, "fallout4").supported);
    }

    // ------------------------------------------------------------------
    // Content build
    // ------------------------------------------------------------------

    #[test]
    fn content_build_places_remainder_under_mod_subroot() {
        let strategy = ContentInstaller;
        let files = listing(&["content/blob0.bundle", "content/scripts/a.ws"]);
        let plan = strategy.build(&files, "/staging/MyMod", "witcher3", &no_progress());
        assert_eq!(
            plan.instructions,
            vec![
                Instruction::copy("content/blob0.bundle", "modMyMod/blob0.bundle"),
                Instruction::copy("content/scripts/a.ws", "modMyMod/scripts/a.ws"),
            ]
        );
    }

    #[test]
    fn content_destination_never_embeds_staging_path() {
        // The staging directory only contributes its final component; its
        // parent directories must not appear in any destination.
        let strategy = ContentInstaller;
        let files = listing(&["content/blob0.bundle"]);
        let plan = strategy.build(&files, "/staging/area/MyMod", "witcher3", &no_progress());
        let destination = plan.instructions[0].destination();
        assert_eq!(destination, "modMyMod/blob0.bundle");
        assert!(!destination.contains("staging"));
    }

    #[test]
    fn content_build_ignores_files_outside_content() {
        let strategy = ContentInstaller;
        let files = listing(&["content/", "content/blob0.bundle", "docs/readme.txt"]);
        let plan = strategy.build(&files, "/staging/MyMod", "witcher3", &no_progress());
        assert_eq!(
            plan.instructions,
            vec![Instruction::copy(
                "content/blob0.bundle",
                "modMyMod/blob0.bundle"
            )]
        );
    }

    // ------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------

    #[test]
    fn dispatch_prefers_translation_over_content() {
        // A listing both strategies would accept goes to the lower priority
        // number.
        let registry = InstallerRegistry::witcher3();
        let files = listing(&["Mods/MyMod/cfg.xml", "content/blob0.bundle"]);
        let strategy = registry
            .dispatch(&files, "witcher3")
            .expect("some strategy should match");
        assert_eq!(strategy.id(), "witcher3tl");
    }

    #[test]
    fn dispatch_falls_through_to_content() {
        let registry = InstallerRegistry::witcher3();
        let files = listing(&["content/blob0.bundle"]);
        let strategy = registry
            .dispatch(&files, "witcher3")
            .expect("content strategy should match");
        assert_eq!(strategy.id(), "witcher3content");
    }

    #[test]
    fn dispatch_returns_none_when_nothing_matches() {
        let registry = InstallerRegistry::witcher3();
        let files = listing(&["bin/x64/patch.dll", "readme.txt"]);
        assert!(registry.dispatch(&files, "witcher3").is_none());
    }
}
