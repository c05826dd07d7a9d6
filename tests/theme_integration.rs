//! Integration tests for theme preference
//!
//! Tests stored choice vs ambient scheme across reloads with a file store

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use tideline::config::Config;
use tideline::core::{FileStore, MemoryStore, PreferenceStore, RootClasses, ThemeController};
use tideline::types::{ReasonCode, Theme};
use tideline::{FolioError, THEME_STORAGE_KEY};

fn store_in(dir: &TempDir) -> FileStore {
    FileStore::open(dir.path().join("prefs").join("preferences.json")).unwrap()
}

#[test]
fn test_first_visit_follows_ambient() {
    let dir = TempDir::new().unwrap();
    let (ctl, reason) = ThemeController::init(store_in(&dir), RootClasses::new(), true);
    assert_eq!(reason, ReasonCode::R202_THEME_FROM_AMBIENT);
    assert_eq!(ctl.theme(), Theme::Dark);
    assert!(ctl.surface().contains("dark"));
    assert!(!ctl.has_explicit_choice());
}

#[test]
fn test_toggle_persists_across_reload() {
    let dir = TempDir::new().unwrap();
    {
        let (mut ctl, _) = ThemeController::init(store_in(&dir), RootClasses::new(), false);
        assert_eq!(ctl.toggle().unwrap(), Theme::Dark);
    }

    // Reload with a light ambient scheme: the stored choice wins
    let (ctl, reason) = ThemeController::init(store_in(&dir), RootClasses::new(), false);
    assert_eq!(reason, ReasonCode::R201_THEME_FROM_STORAGE);
    assert_eq!(ctl.theme(), Theme::Dark);
    assert_eq!(ctl.surface().to_attribute(), "dark");
}

#[test]
fn test_ambient_ignored_after_explicit_choice() {
    let (mut ctl, _) = ThemeController::init(MemoryStore::new(), RootClasses::new(), false);
    assert_eq!(ctl.ambient_changed(true), ReasonCode::R204_AMBIENT_APPLIED);
    assert_eq!(ctl.theme(), Theme::Dark);

    ctl.toggle().unwrap();
    assert_eq!(ctl.theme(), Theme::Light);
    assert_eq!(ctl.ambient_changed(true), ReasonCode::R205_AMBIENT_IGNORED);
    assert_eq!(ctl.theme(), Theme::Light);
    assert!(!ctl.surface().contains("dark"));
}

#[test]
fn test_reset_resumes_ambient_tracking() {
    let dir = TempDir::new().unwrap();
    let (mut ctl, _) = ThemeController::init(store_in(&dir), RootClasses::new(), true);
    ctl.toggle().unwrap();
    assert_eq!(ctl.theme(), Theme::Light);

    assert_eq!(ctl.clear_preference(true).unwrap(), ReasonCode::R206_PREFERENCE_CLEARED);
    assert_eq!(ctl.theme(), Theme::Dark);
    assert_eq!(ctl.ambient_changed(false), ReasonCode::R204_AMBIENT_APPLIED);
    assert_eq!(ctl.theme(), Theme::Light);

    let reopened = store_in(&dir);
    assert_eq!(reopened.get(THEME_STORAGE_KEY), None);
}

#[test]
fn test_unrecognised_stored_value_means_light() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);
    store.set(THEME_STORAGE_KEY, "sepia").unwrap();

    let (ctl, reason) = ThemeController::init(store_in(&dir), RootClasses::new(), true);
    assert_eq!(reason, ReasonCode::R201_THEME_FROM_STORAGE);
    assert_eq!(ctl.theme(), Theme::Light);
    assert_eq!(ctl.stored().as_deref(), Some("sepia"));
}

#[test]
fn test_corrupt_preference_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("preferences.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(FileStore::open(&path), Err(FolioError::Storage(_))));
}

#[test]
fn test_repeated_toggles_alternate() {
    let (mut ctl, _) = ThemeController::init(MemoryStore::new(), RootClasses::new(), false);
    let seen: Vec<Theme> = (0..4).map(|_| ctl.toggle().unwrap()).collect();
    assert_eq!(seen, vec![Theme::Dark, Theme::Light, Theme::Dark, Theme::Light]);
    assert_eq!(ctl.store().get(THEME_STORAGE_KEY).as_deref(), Some("light"));
}

#[test]
fn test_configured_preference_file_survives_restart() {
    let dir = TempDir::new().unwrap();
    let mut config = Config::default();
    config.storage.preferences_path = Some(dir.path().join("tideline").join("preferences.json"));

    {
        let (mut ctl, reason) = ThemeController::from_config(&config, false).unwrap();
        assert_eq!(reason, ReasonCode::R202_THEME_FROM_AMBIENT);
        assert_eq!(ctl.toggle().unwrap(), Theme::Dark);
    }

    let (ctl, reason) = ThemeController::from_config(&config, false).unwrap();
    assert_eq!(reason, ReasonCode::R201_THEME_FROM_STORAGE);
    assert_eq!(ctl.theme(), Theme::Dark);
    assert_eq!(store_in_path(&config).get(THEME_STORAGE_KEY).as_deref(), Some("dark"));
}

#[test]
fn test_blank_file_entry_is_no_choice() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);
    store.set(THEME_STORAGE_KEY, " ").unwrap();

    let (mut ctl, reason) = ThemeController::init(store_in(&dir), RootClasses::new(), true);
    assert_eq!(reason, ReasonCode::R202_THEME_FROM_AMBIENT);
    assert_eq!(ctl.theme(), Theme::Dark);
    assert_eq!(ctl.ambient_changed(false), ReasonCode::R204_AMBIENT_APPLIED);
    assert_eq!(ctl.theme(), Theme::Light);
}

fn store_in_path(config: &Config) -> FileStore {
    FileStore::open(config.storage.resolved_preferences_path()).unwrap()
}
