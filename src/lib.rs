//! Witcher 3 mod support core
//!
//! Library crate implementing the installer strategies and post-install
//! mod-type classification for The Witcher 3. The host owns archive
//! unpacking, strategy dispatch timing, and applying the resulting copy
//! instructions to disk; this crate decides which strategy applies to an
//! archive listing, turns the listing into an installation plan, and
//! re-derives the mod's semantic type from the applied plan.

pub mod archive;
pub mod game;
pub mod installer;
pub mod logging;
pub mod modtype;
