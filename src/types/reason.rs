//! Reason codes for reveal, theme and contact decisions

use serde::{Deserialize, Serialize};

/// Reason codes attached to every controller decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum ReasonCode {
    // =========================================================================
    // R1xx: Reveal
    // =========================================================================
    /// Intersection ratio reached the threshold, section revealed
    R101_REVEAL_THRESHOLD_MET,
    /// Intersection reported but below threshold
    R102_REVEAL_BELOW_THRESHOLD,
    /// Section already revealed, entry ignored
    R103_REVEAL_ALREADY_LATCHED,
    /// Controller detached, entry ignored
    R104_REVEAL_DETACHED,
    /// Entry addressed to another observer
    R105_REVEAL_FOREIGN_ENTRY,
    /// Root element absent at attach, controller inert
    R110_ATTACH_ELEMENT_MISSING,
    /// Platform cannot observe intersections, controller inert
    R111_ATTACH_UNSUPPORTED,
    /// Revealed on mount without an observer
    R112_REVEAL_ON_LOAD,

    // =========================================================================
    // R2xx: Theme
    // =========================================================================
    /// Initial theme taken from the stored preference
    R201_THEME_FROM_STORAGE,
    /// Initial theme taken from the ambient color scheme
    R202_THEME_FROM_AMBIENT,
    /// User toggled, choice persisted
    R203_THEME_TOGGLED,
    /// Ambient change applied (no stored preference)
    R204_AMBIENT_APPLIED,
    /// Ambient change ignored (explicit preference wins)
    R205_AMBIENT_IGNORED,
    /// Stored preference cleared, ambient tracking resumed
    R206_PREFERENCE_CLEARED,

    // =========================================================================
    // R3xx: Contact
    // =========================================================================
    /// Submission accepted, simulated delay running
    R301_CONTACT_SUBMITTING,
    /// Simulated delivery completed
    R302_CONTACT_DELIVERED,
    /// Completion arrived after teardown and was dropped
    R303_CONTACT_DISCARDED,
    /// Submission rejected by field checks
    R304_CONTACT_REJECTED,
}

impl ReasonCode {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::R101_REVEAL_THRESHOLD_MET => "R101_REVEAL_THRESHOLD_MET",
            Self::R102_REVEAL_BELOW_THRESHOLD => "R102_REVEAL_BELOW_THRESHOLD",
            Self::R103_REVEAL_ALREADY_LATCHED => "R103_REVEAL_ALREADY_LATCHED",
            Self::R104_REVEAL_DETACHED => "R104_REVEAL_DETACHED",
            Self::R105_REVEAL_FOREIGN_ENTRY => "R105_REVEAL_FOREIGN_ENTRY",
            Self::R110_ATTACH_ELEMENT_MISSING => "R110_ATTACH_ELEMENT_MISSING",
            Self::R111_ATTACH_UNSUPPORTED => "R111_ATTACH_UNSUPPORTED",
            Self::R112_REVEAL_ON_LOAD => "R112_REVEAL_ON_LOAD",
            Self::R201_THEME_FROM_STORAGE => "R201_THEME_FROM_STORAGE",
            Self::R202_THEME_FROM_AMBIENT => "R202_THEME_FROM_AMBIENT",
            Self::R203_THEME_TOGGLED => "R203_THEME_TOGGLED",
            Self::R204_AMBIENT_APPLIED => "R204_AMBIENT_APPLIED",
            Self::R205_AMBIENT_IGNORED => "R205_AMBIENT_IGNORED",
            Self::R206_PREFERENCE_CLEARED => "R206_PREFERENCE_CLEARED",
            Self::R301_CONTACT_SUBMITTING => "R301_CONTACT_SUBMITTING",
            Self::R302_CONTACT_DELIVERED => "R302_CONTACT_DELIVERED",
            Self::R303_CONTACT_DISCARDED => "R303_CONTACT_DISCARDED",
            Self::R304_CONTACT_REJECTED => "R304_CONTACT_REJECTED",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::R101_REVEAL_THRESHOLD_MET => "Section revealed",
            Self::R102_REVEAL_BELOW_THRESHOLD => "Not visible enough yet",
            Self::R103_REVEAL_ALREADY_LATCHED => "Already revealed",
            Self::R104_REVEAL_DETACHED => "Observer detached",
            Self::R105_REVEAL_FOREIGN_ENTRY => "Entry for another observer",
            Self::R110_ATTACH_ELEMENT_MISSING => "Root element missing",
            Self::R111_ATTACH_UNSUPPORTED => "Intersection observation unavailable",
            Self::R112_REVEAL_ON_LOAD => "Revealed on load",
            Self::R201_THEME_FROM_STORAGE => "Theme from stored preference",
            Self::R202_THEME_FROM_AMBIENT => "Theme from system preference",
            Self::R203_THEME_TOGGLED => "Theme toggled",
            Self::R204_AMBIENT_APPLIED => "System theme change applied",
            Self::R205_AMBIENT_IGNORED => "System theme change ignored",
            Self::R206_PREFERENCE_CLEARED => "Stored theme cleared",
            Self::R301_CONTACT_SUBMITTING => "Sending message",
            Self::R302_CONTACT_DELIVERED => "Message sent",
            Self::R303_CONTACT_DISCARDED => "Completion discarded after teardown",
            Self::R304_CONTACT_REJECTED => "Message rejected",
        }
    }

    /// True for codes that flip a reveal latch
    pub fn is_reveal(&self) -> bool {
        matches!(self, Self::R101_REVEAL_THRESHOLD_MET | Self::R112_REVEAL_ON_LOAD)
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}
