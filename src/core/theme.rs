//! Theme preference controller
//!
//! Resolution order on init: stored choice, then the ambient color scheme.
//! A toggle writes an explicit choice; from then on ambient changes are
//! ignored until the stored key is cleared.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use crate::config::Config;
use crate::error::{FolioError, Result};
use crate::types::{ReasonCode, Theme};
use crate::THEME_STORAGE_KEY;

// =============================================================================
// STORAGE
// =============================================================================

/// Client-local key/value storage
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory store, one per preview session
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a theme choice
    pub fn with_theme(theme: Theme) -> Self {
        let mut values = BTreeMap::new();
        values.insert(THEME_STORAGE_KEY.to_string(), theme.as_str().to_string());
        Self { values }
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// JSON object on disk, rewritten on every change
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// Open a store; a missing file is an empty store
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(json) if json.trim().is_empty() => BTreeMap::new(),
            Ok(json) => serde_json::from_str(&json).map_err(|e| {
                FolioError::Storage(format!("{}: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.values.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

// =============================================================================
// SURFACE
// =============================================================================

/// Where the resolved theme is applied
pub trait ThemeSurface: Send + Sync {
    fn apply(&mut self, theme: Theme);
}

/// Class list of the document root element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootClasses {
    classes: BTreeSet<String>,
}

impl RootClasses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn add(&mut self, class: &str) {
        self.classes.insert(class.to_string());
    }

    pub fn remove(&mut self, class: &str) {
        self.classes.remove(class);
    }

    /// Space-separated `class` attribute value
    pub fn to_attribute(&self) -> String {
        self.classes.iter().map(String::as_str).collect::<Vec<_>>().join(" ")
    }
}

impl ThemeSurface for RootClasses {
    fn apply(&mut self, theme: Theme) {
        if theme.is_dark() {
            self.add("dark");
        } else {
            self.remove("dark");
        }
    }
}

// =============================================================================
// CONTROLLER
// =============================================================================

/// Process-wide light/dark state
#[derive(Debug)]
pub struct ThemeController<S, D> {
    store: S,
    surface: D,
    theme: Theme,
}

impl<S: PreferenceStore, D: ThemeSurface> ThemeController<S, D> {
    /// Resolve the initial theme and apply it
    pub fn init(store: S, surface: D, ambient_dark: bool) -> (Self, ReasonCode) {
        let (theme, reason) = match explicit_choice(&store) {
            Some(stored) => {
                if stored != "light" && stored != "dark" {
                    warn!(value = %stored, "unrecognised stored theme, treating as light");
                }
                (Theme::from_stored(&stored), ReasonCode::R201_THEME_FROM_STORAGE)
            }
            None => (Theme::from_dark(ambient_dark), ReasonCode::R202_THEME_FROM_AMBIENT),
        };

        let mut controller = Self { store, surface, theme };
        controller.surface.apply(theme);
        debug!(theme = %theme, reason = reason.code(), "theme initialised");
        (controller, reason)
    }

    /// Flip the theme and persist the explicit choice
    ///
    /// Nothing changes if the store rejects the write.
    pub fn toggle(&mut self) -> Result<Theme> {
        let next = self.theme.flipped();
        self.store.set(THEME_STORAGE_KEY, next.as_str())?;
        self.theme = next;
        self.surface.apply(next);
        info!(theme = %next, reason = ReasonCode::R203_THEME_TOGGLED.code(), "theme toggled");
        Ok(next)
    }

    /// Ambient color scheme changed
    pub fn ambient_changed(&mut self, dark: bool) -> ReasonCode {
        if self.has_explicit_choice() {
            debug!(dark, reason = ReasonCode::R205_AMBIENT_IGNORED.code(), "ambient change ignored");
            return ReasonCode::R205_AMBIENT_IGNORED;
        }
        self.theme = Theme::from_dark(dark);
        self.surface.apply(self.theme);
        debug!(theme = %self.theme, reason = ReasonCode::R204_AMBIENT_APPLIED.code(), "ambient change applied");
        ReasonCode::R204_AMBIENT_APPLIED
    }

    /// Forget the explicit choice and follow `ambient_dark` again
    pub fn clear_preference(&mut self, ambient_dark: bool) -> Result<ReasonCode> {
        self.store.remove(THEME_STORAGE_KEY)?;
        self.theme = Theme::from_dark(ambient_dark);
        self.surface.apply(self.theme);
        info!(theme = %self.theme, reason = ReasonCode::R206_PREFERENCE_CLEARED.code(), "stored theme cleared");
        Ok(ReasonCode::R206_PREFERENCE_CLEARED)
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn has_explicit_choice(&self) -> bool {
        explicit_choice(&self.store).is_some()
    }

    /// Raw stored value, if any
    pub fn stored(&self) -> Option<String> {
        self.store.get(THEME_STORAGE_KEY)
    }

    pub fn surface(&self) -> &D {
        &self.surface
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl ThemeController<FileStore, RootClasses> {
    /// Controller over the preference file the CLI modes share
    pub fn from_config(config: &Config, ambient_dark: bool) -> Result<(Self, ReasonCode)> {
        let store = FileStore::open(config.storage.resolved_preferences_path())?;
        Ok(Self::init(store, RootClasses::new(), ambient_dark))
    }
}

/// Stored choice; a blank value counts as none
fn explicit_choice<S: PreferenceStore>(store: &S) -> Option<String> {
    store.get(THEME_STORAGE_KEY).filter(|v| !v.trim().is_empty())
}

// =============================================================================
// TESTS
// =============================================================================
