//! Output structures for terminal display

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use crate::types::{ReasonCode, SectionId, Theme};

/// One reveal decision worth reporting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealEvent {
    pub timestamp: DateTime<Utc>,
    pub section: SectionId,
    /// Intersection ratio that triggered the reveal (1.0 for load reveals)
    pub ratio: f64,
    pub reason: ReasonCode,
}

impl RevealEvent {
    pub fn new(section: SectionId, ratio: f64, reason: ReasonCode) -> Self {
        Self {
            timestamp: Utc::now(),
            section,
            ratio,
            reason,
        }
    }

    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        format!(
            "{} {} ratio={:.2} | {}",
            self.section.emoji(),
            self.section.anchor().bold().cyan(),
            self.ratio,
            self.reason.code().dimmed()
        )
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "section={} | ratio={:.2} | reason={}",
            self.section,
            self.ratio,
            self.reason.code()
        )
    }
}

/// Theme decision worth reporting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeEvent {
    pub timestamp: DateTime<Utc>,
    pub theme: Theme,
    pub reason: ReasonCode,
}

impl ThemeEvent {
    pub fn new(theme: Theme, reason: ReasonCode) -> Self {
        Self {
            timestamp: Utc::now(),
            theme,
            reason,
        }
    }

    pub fn to_terminal_string(&self) -> String {
        let name = match self.theme {
            Theme::Dark => self.theme.as_str().bright_blue(),
            Theme::Light => self.theme.as_str().yellow(),
        };
        format!("{} theme={} | {}", self.theme.emoji(), name, self.reason.code().dimmed())
    }

    pub fn to_parseable_string(&self) -> String {
        format!("theme={} | reason={}", self.theme, self.reason.code())
    }
}

/// Anything the page reports to observers (terminal, websocket)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageEvent {
    Reveal(RevealEvent),
    Theme(ThemeEvent),
}

impl PageEvent {
    pub fn to_terminal_string(&self) -> String {
        match self {
            PageEvent::Reveal(e) => e.to_terminal_string(),
            PageEvent::Theme(e) => e.to_terminal_string(),
        }
    }

    pub fn to_parseable_string(&self) -> String {
        match self {
            PageEvent::Reveal(e) => e.to_parseable_string(),
            PageEvent::Theme(e) => e.to_parseable_string(),
        }
    }
}
