//! Tideline: the Ocean Flow portfolio page as a Rust crate
//!
//! Sections reveal once when scrolled into view, list items animate in with
//! index-derived stagger delays, and a theme controller resolves light/dark
//! from a stored choice or the ambient color scheme.

pub mod config;
pub mod core;
pub mod error;
pub mod types;

pub use error::{FolioError, Result};

// =============================================================================
// REVEAL THRESHOLDS - fraction of a section that must be visible
// =============================================================================

/// Threshold used by most observed sections
pub const REVEAL_THRESHOLD_DEFAULT: f64 = 0.2;

/// About is taller and text heavy, so it waits for more of itself
pub const REVEAL_THRESHOLD_ABOUT: f64 = 0.3;

// =============================================================================
// STAGGER STEPS (milliseconds)
// =============================================================================

/// Cards in projects, experience, certifications and contact socials
pub const STAGGER_STEP_MS: u64 = 200;

/// Skill cards drift in more slowly than other lists
pub const SKILL_STAGGER_STEP_MS: u64 = 500;

/// Skill level bars fill after the card lands
pub const SKILL_BAR_STEP_MS: u64 = 100;
pub const SKILL_BAR_OFFSET_MS: u64 = 500;

/// Skill categories (frontend, backend, tools)
pub const SKILL_CATEGORY_STEP_MS: u64 = 200;
pub const SKILL_CATEGORY_OFFSET_MS: u64 = 200;

// =============================================================================
// CONTACT
// =============================================================================

/// Simulated round trip for the contact form
pub const CONTACT_SUBMIT_DELAY_MS: u64 = 2000;

/// Collapsed project cards show this many characters of the description
pub const PROJECT_EXCERPT_CHARS: usize = 80;

// =============================================================================
// THEME
// =============================================================================

/// Storage key holding an explicit theme choice
pub const THEME_STORAGE_KEY: &str = "theme";

// =============================================================================
// PREVIEW SESSIONS
// =============================================================================

/// Mounted pages the preview API keeps before evicting the least recent
pub const MAX_SESSIONS: usize = 64;

/// Sessions untouched for this long are dropped on the next mount
pub const SESSION_IDLE_SECS: u64 = 30 * 60;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
