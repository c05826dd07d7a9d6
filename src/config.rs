use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::Stagger;
use crate::error::{FolioError, Result};
use crate::types::SectionId;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub motion: MotionConfig,
    #[serde(default)]
    pub reveal: RevealConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
}

impl Config {
    /// Explicit path, then `TIDELINE_CONFIG`, then the user config dir
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("TIDELINE_CONFIG").ok().map(PathBuf::from));

        let mut config = match explicit {
            Some(path) => Self::load_file(&path)?,
            None => match Self::global_path() {
                Some(path) if path.exists() => Self::load_file(&path)?,
                _ => Self::default(),
            },
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| FolioError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    fn global_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tideline").join("config.toml"))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(addr) = std::env::var("TIDELINE_ADDR") {
            if !addr.trim().is_empty() {
                self.server.addr = addr;
            }
        }
        if let Ok(path) = std::env::var("TIDELINE_CONTENT") {
            if !path.trim().is_empty() {
                self.content.path = Some(PathBuf::from(path));
            }
        }
    }

    fn validate(&self) -> Result<()> {
        for (name, value) in [("reveal.default", self.reveal.default), ("reveal.about", self.reveal.about)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(FolioError::Config(format!("{} must be within 0..=1, got {}", name, value)));
            }
        }
        if self.layout.viewport_height <= 0.0 {
            return Err(FolioError::Config("layout.viewport_height must be positive".to_string()));
        }
        if self.server.max_sessions == 0 {
            return Err(FolioError::Config("server.max_sessions must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub addr: String,
    /// Cap on mounted preview sessions
    pub max_sessions: usize,
    pub session_idle_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:3000".to_string(),
            max_sessions: crate::MAX_SESSIONS,
            session_idle_secs: crate::SESSION_IDLE_SECS,
        }
    }
}

impl ServerConfig {
    pub fn session_idle(&self) -> Duration {
        Duration::from_secs(self.session_idle_secs)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentConfig {
    /// JSON content file; the compiled-in portfolio when unset
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Preference file for the CLI theme commands
    pub preferences_path: Option<PathBuf>,
}

impl StorageConfig {
    pub fn resolved_preferences_path(&self) -> PathBuf {
        self.preferences_path.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("tideline")
                .join("preferences.json")
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub stagger_step_ms: u64,
    pub skill_step_ms: u64,
    pub skill_bar_step_ms: u64,
    pub skill_bar_offset_ms: u64,
    pub skill_category_step_ms: u64,
    pub skill_category_offset_ms: u64,
    pub submit_delay_ms: u64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            stagger_step_ms: crate::STAGGER_STEP_MS,
            skill_step_ms: crate::SKILL_STAGGER_STEP_MS,
            skill_bar_step_ms: crate::SKILL_BAR_STEP_MS,
            skill_bar_offset_ms: crate::SKILL_BAR_OFFSET_MS,
            skill_category_step_ms: crate::SKILL_CATEGORY_STEP_MS,
            skill_category_offset_ms: crate::SKILL_CATEGORY_OFFSET_MS,
            submit_delay_ms: crate::CONTACT_SUBMIT_DELAY_MS,
        }
    }
}

impl MotionConfig {
    pub fn cards(&self) -> Stagger {
        Stagger::new(self.stagger_step_ms)
    }

    pub fn skill_cards(&self) -> Stagger {
        Stagger::new(self.skill_step_ms)
    }

    pub fn skill_bars(&self) -> Stagger {
        Stagger::new(self.skill_bar_step_ms).with_offset(self.skill_bar_offset_ms)
    }

    pub fn skill_categories(&self) -> Stagger {
        Stagger::new(self.skill_category_step_ms).with_offset(self.skill_category_offset_ms)
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub default: f64,
    pub about: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            default: crate::REVEAL_THRESHOLD_DEFAULT,
            about: crate::REVEAL_THRESHOLD_ABOUT,
        }
    }
}

impl RevealConfig {
    pub fn threshold_for(&self, section: SectionId) -> f64 {
        match section {
            SectionId::About => self.about,
            _ => self.default,
        }
    }
}

/// Section heights for the headless viewport
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub viewport_height: f64,
    pub heights: BTreeMap<SectionId, f64>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let heights = [
            (SectionId::Hero, 900.0),
            (SectionId::About, 1000.0),
            (SectionId::Skills, 1600.0),
            (SectionId::Projects, 1400.0),
            (SectionId::Experience, 1300.0),
            (SectionId::Certifications, 900.0),
            (SectionId::Contact, 1100.0),
            (SectionId::Footer, 400.0),
        ]
        .into_iter()
        .collect();
        Self {
            viewport_height: 900.0,
            heights,
        }
    }
}

impl LayoutConfig {
    pub fn height_of(&self, section: SectionId) -> f64 {
        self.heights.get(&section).copied().unwrap_or(self.viewport_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.addr, "127.0.0.1:3000");
        assert_eq!(config.reveal.threshold_for(SectionId::About), 0.3);
        assert_eq!(config.reveal.threshold_for(SectionId::Skills), 0.2);
        assert_eq!(config.motion.submit_delay(), Duration::from_millis(2000));
        assert_eq!(config.layout.height_of(SectionId::Skills), 1600.0);
    }

    #[test]
    fn test_partial_toml() {
        let config = Config::from_toml(
            r#"
            [server]
            addr = "0.0.0.0:8080"

            [motion]
            submit_delay_ms = 50

            [layout.heights]
            about = 500.0
            "#,
        )
        .unwrap();
        assert_eq!(config.server.addr, "0.0.0.0:8080");
        assert_eq!(config.server.max_sessions, 64);
        assert_eq!(config.server.session_idle(), Duration::from_secs(1800));
        assert_eq!(config.motion.submit_delay_ms, 50);
        assert_eq!(config.motion.stagger_step_ms, 200);
        assert_eq!(config.layout.height_of(SectionId::About), 500.0);
        // Unlisted sections fall back to the viewport height
        assert_eq!(config.layout.height_of(SectionId::Hero), 900.0);
    }

    #[test]
    fn test_zero_session_cap_rejected() {
        let config = Config::from_toml("[server]\nmax_sessions = 0\n").unwrap();
        assert!(matches!(config.validate(), Err(FolioError::Config(_))));
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let config = Config::from_toml("[reveal]\ndefault = 1.5\n").unwrap();
        assert!(matches!(config.validate(), Err(FolioError::Config(_))));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tideline.toml");
        std::fs::write(&path, "[content]\npath = \"site.json\"\n").unwrap();
        let config = Config::load_file(&path).unwrap();
        assert_eq!(config.content.path, Some(PathBuf::from("site.json")));
    }
}
