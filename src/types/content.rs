//! Static portfolio content
//!
//! Loaded once and treated as read-only for the lifetime of the page.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Everything the page displays
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioContent {
    pub profile: Profile,
    pub skills: SkillGroups,
    pub projects: Vec<Project>,
    pub experience: Vec<ExperienceEntry>,
    pub certifications: Vec<Certification>,
}

impl PortfolioContent {
    /// Find a project by id
    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }
}

/// Owner of the portfolio
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub greeting: String,
    pub tagline: String,
    pub summary: String,
    pub email: String,
    pub availability: String,
    pub response_time: String,
    /// Wordmark shown in the footer
    pub brand: String,
    pub brand_blurb: String,
    /// About section paragraphs
    pub about: Vec<String>,
    #[serde(default)]
    pub timeline: Vec<TimelinePhase>,
    #[serde(default)]
    pub socials: Vec<SocialLink>,
}

/// One milestone in the About timeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelinePhase {
    pub phase: String,
    pub year: String,
    pub description: String,
}

/// External profile link
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialLink {
    pub label: String,
    pub href: String,
}

/// Skills grouped the way the page lays them out
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillGroups {
    pub frontend: Vec<Skill>,
    pub backend: Vec<Skill>,
    pub tools: Vec<Skill>,
}

impl SkillGroups {
    /// Categories with their headings, in display order
    pub fn categories(&self) -> [(&'static str, &[Skill]); 3] {
        [
            ("Frontend Development", &self.frontend),
            ("Backend & Database", &self.backend),
            ("Tools & Platforms", &self.tools),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub icon: String,
    /// Proficiency in percent, 0..=100
    pub level: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub technologies: Vec<String>,
    /// Live demo URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live: Option<String>,
    /// Source repository URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

impl Project {
    /// Description as shown on a collapsed card
    ///
    /// Cuts at `max_chars` characters and appends `...`; short descriptions
    /// are left whole.
    pub fn excerpt(&self, max_chars: usize) -> String {
        if self.description.chars().count() <= max_chars {
            return self.description.clone();
        }
        let cut: String = self.description.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    /// `YYYY-MM` or `YYYY-MM-DD`
    pub start_date: String,
    /// Same shape as `start_date`, or `present`
    pub end_date: String,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
}

impl ExperienceEntry {
    /// "Jan 2022 - Present"
    pub fn period_label(&self) -> String {
        format!("{} - {}", format_month(&self.start_date), format_month(&self.end_date))
    }

    /// Two-digit start year shown on the timeline dot
    pub fn year_badge(&self) -> String {
        let year = self.start_date.split('-').next().unwrap_or_default();
        let skip = year.chars().count().saturating_sub(2);
        year.chars().skip(skip).collect()
    }
}

/// Format a content date as `Mon YYYY`
///
/// `present` becomes `Present`; anything unparseable is shown verbatim.
pub fn format_month(date: &str) -> String {
    if date.eq_ignore_ascii_case("present") {
        return "Present".to_string();
    }
    let full = if date.len() == 7 { format!("{}-01", date) } else { date.to_string() };
    match NaiveDate::parse_from_str(&full, "%Y-%m-%d") {
        Ok(d) => d.format("%b %Y").to_string(),
        Err(_) => date.to_string(),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    pub id: String,
    pub title: String,
    pub issuer: String,
    pub date: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(start: &str, end: &str) -> ExperienceEntry {
        ExperienceEntry {
            id: "e1".into(),
            title: "Engineer".into(),
            company: "Reef".into(),
            location: "Remote".into(),
            start_date: start.into(),
            end_date: end.into(),
            description: String::new(),
            technologies: vec![],
        }
    }

    #[test]
    fn test_format_month() {
        assert_eq!(format_month("2022-01"), "Jan 2022");
        assert_eq!(format_month("2019-11-15"), "Nov 2019");
        assert_eq!(format_month("present"), "Present");
        assert_eq!(format_month("someday"), "someday");
    }

    #[test]
    fn test_period_and_badge() {
        let e = entry("2021-06", "present");
        assert_eq!(e.period_label(), "Jun 2021 - Present");
        assert_eq!(e.year_badge(), "21");
    }

    #[test]
    fn test_excerpt_truncates_long_descriptions() {
        let p = Project {
            id: "p".into(),
            title: "T".into(),
            description: "a".repeat(100),
            technologies: vec![],
            live: None,
            github: None,
            featured: false,
        };
        let ex = p.excerpt(80);
        assert_eq!(ex.len(), 83);
        assert!(ex.ends_with("..."));

        let short = Project { description: "short".into(), ..p };
        assert_eq!(short.excerpt(80), "short");
    }
}
