//! Page section identities

use serde::{Deserialize, Serialize};

/// The sections of the page, in scroll order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    /// Full-height banner, revealed on page load
    Hero,
    About,
    Skills,
    Projects,
    Experience,
    Certifications,
    Contact,
    /// Closing block with navigation, never observed
    Footer,
}

impl SectionId {
    /// Every section in page order
    pub const ALL: [SectionId; 8] = [
        SectionId::Hero,
        SectionId::About,
        SectionId::Skills,
        SectionId::Projects,
        SectionId::Experience,
        SectionId::Certifications,
        SectionId::Contact,
        SectionId::Footer,
    ];

    /// Sections that own a reveal controller
    pub const OBSERVED: [SectionId; 6] = [
        SectionId::About,
        SectionId::Skills,
        SectionId::Projects,
        SectionId::Experience,
        SectionId::Certifications,
        SectionId::Contact,
    ];

    /// Stable element id, the target of `#anchor` navigation
    pub fn anchor(&self) -> &'static str {
        match self {
            SectionId::Hero => "hero",
            SectionId::About => "about",
            SectionId::Skills => "skills",
            SectionId::Projects => "projects",
            SectionId::Experience => "experience",
            SectionId::Certifications => "certifications",
            SectionId::Contact => "contact",
            SectionId::Footer => "footer",
        }
    }

    /// Resolve an anchor id (case-insensitive, optional leading `#`)
    pub fn from_anchor(anchor: &str) -> Option<SectionId> {
        let anchor = anchor.trim().trim_start_matches('#');
        Self::ALL
            .into_iter()
            .find(|s| s.anchor().eq_ignore_ascii_case(anchor))
    }

    /// Whether the section reveals through an intersection observer
    pub fn is_observed(&self) -> bool {
        Self::OBSERVED.contains(self)
    }

    /// Label used in navigation links
    pub fn nav_label(&self) -> &'static str {
        match self {
            SectionId::Hero => "Home",
            SectionId::About => "About",
            SectionId::Skills => "Skills",
            SectionId::Projects => "Projects",
            SectionId::Experience => "Experience",
            SectionId::Certifications => "Certifications",
            SectionId::Contact => "Contact",
            SectionId::Footer => "Footer",
        }
    }

    /// Emoji for terminal output
    pub fn emoji(&self) -> &'static str {
        match self {
            SectionId::Hero => "🌅",
            SectionId::About => "🐚",
            SectionId::Skills => "🫧",
            SectionId::Projects => "🌊",
            SectionId::Experience => "🧭",
            SectionId::Certifications => "🏅",
            SectionId::Contact => "🍶",
            SectionId::Footer => "⚓",
        }
    }
}

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.anchor())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_round_trip() {
        for section in SectionId::ALL {
            assert_eq!(SectionId::from_anchor(section.anchor()), Some(section));
        }
        assert_eq!(SectionId::from_anchor("#Projects"), Some(SectionId::Projects));
        assert_eq!(SectionId::from_anchor("blog"), None);
    }

    #[test]
    fn test_hero_and_footer_not_observed() {
        assert!(!SectionId::Hero.is_observed());
        assert!(!SectionId::Footer.is_observed());
        assert!(SectionId::Contact.is_observed());
    }
}
