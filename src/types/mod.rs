//! Core types for Tideline

mod content;
mod output;
mod reason;
mod section;
mod theme;

pub use content::{
    format_month, Certification, ExperienceEntry, PortfolioContent, Profile, Project, Skill,
    SkillGroups, SocialLink, TimelinePhase,
};
pub use output::{PageEvent, RevealEvent, ThemeEvent};
pub use reason::ReasonCode;
pub use section::SectionId;
pub use theme::Theme;
