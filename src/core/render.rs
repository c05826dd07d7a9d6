//! HTML rendering of the page
//!
//! Markup only; styling lives in the class names. Every section root carries
//! its anchor id, observed sections also carry the threshold their controller
//! uses. Entrance classes follow the reveal state and list items get their
//! stagger delay inline.

use chrono::{Datelike, Utc};
use crate::config::{Config, MotionConfig};
use crate::core::page::PageState;
use crate::core::stagger::Stagger;
use crate::types::{PortfolioContent, Project, SectionId, Theme};
use crate::PROJECT_EXCERPT_CHARS;

/// One-shot entrance animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entrance {
    FadeUp,
    FromLeft,
    FromRight,
    Scale,
}

impl Entrance {
    /// Transition classes before and after the reveal
    pub fn classes(&self, revealed: bool) -> &'static str {
        match (self, revealed) {
            (Entrance::FadeUp, true) => "opacity-100 translate-y-0",
            (Entrance::FadeUp, false) => "opacity-0 translate-y-8",
            (Entrance::FromLeft, true) => "opacity-100 translate-x-0",
            (Entrance::FromLeft, false) => "opacity-0 -translate-x-8",
            (Entrance::FromRight, true) => "opacity-100 translate-x-0",
            (Entrance::FromRight, false) => "opacity-0 translate-x-8",
            (Entrance::Scale, true) => "opacity-100 scale-100",
            (Entrance::Scale, false) => "opacity-0 scale-95",
        }
    }
}

/// Escape text for element content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders one page state
#[derive(Debug)]
pub struct Renderer<'a> {
    content: &'a PortfolioContent,
    state: &'a PageState,
    motion: &'a MotionConfig,
    theme: Theme,
    root_classes: String,
    year: i32,
}

impl<'a> Renderer<'a> {
    pub fn new(content: &'a PortfolioContent, state: &'a PageState, motion: &'a MotionConfig) -> Self {
        Self {
            content,
            state,
            motion,
            theme: Theme::Light,
            root_classes: String::new(),
            year: Utc::now().year(),
        }
    }

    /// Theme for the toggle label plus the root class attribute
    pub fn with_theme(mut self, theme: Theme, root_classes: impl Into<String>) -> Self {
        self.theme = theme;
        self.root_classes = root_classes.into();
        self
    }

    /// Pin the footer year
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    /// Whole document
    pub fn render(&self) -> String {
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n");
        if self.root_classes.is_empty() {
            html.push_str("<html lang=\"en\">\n");
        } else {
            html.push_str(&format!("<html lang=\"en\" class=\"{}\">\n", escape(&self.root_classes)));
        }
        html.push_str(&format!(
            "<head>\n<meta charset=\"utf-8\">\n<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n<title>{} | {}</title>\n</head>\n",
            escape(&self.content.profile.name),
            escape(&self.content.profile.tagline)
        ));
        html.push_str("<body class=\"loaded\">\n");
        html.push_str(&self.navigation());
        html.push_str("<main class=\"relative\">\n");
        for section in SectionId::ALL {
            if section != SectionId::Footer {
                html.push_str(&self.section(section));
            }
        }
        html.push_str("</main>\n");
        html.push_str(&self.footer());
        html.push_str("</body>\n</html>\n");
        html
    }

    /// Markup for one section
    pub fn section(&self, section: SectionId) -> String {
        match section {
            SectionId::Hero => self.hero(),
            SectionId::About => self.about(),
            SectionId::Skills => self.skills(),
            SectionId::Projects => self.projects(),
            SectionId::Experience => self.experience(),
            SectionId::Certifications => self.certifications(),
            SectionId::Contact => self.contact(),
            SectionId::Footer => self.footer(),
        }
    }

    fn revealed(&self, section: SectionId) -> bool {
        self.state.is_revealed(section)
    }

    fn open_section(&self, section: SectionId, class: &str) -> String {
        let threshold = match self.state.threshold(section) {
            Some(t) => format!(" data-reveal-threshold=\"{}\"", t),
            None => String::new(),
        };
        format!(
            "<section id=\"{}\" class=\"{}\"{} data-revealed=\"{}\">\n",
            section.anchor(),
            class,
            threshold,
            self.revealed(section)
        )
    }

    fn header(&self, section: SectionId, title: &str, blurb: &str) -> String {
        format!(
            "<div class=\"text-center mb-16 transition-all duration-1000 {}\">\n<h2>{}</h2>\n<p>{}</p>\n</div>\n",
            Entrance::FadeUp.classes(self.revealed(section)),
            escape(title),
            escape(blurb)
        )
    }

    fn navigation(&self) -> String {
        let mut nav = String::from("<nav class=\"fixed top-0 inset-x-0 z-50\">\n");
        nav.push_str(&format!("<a href=\"#hero\" class=\"brand\">{}</a>\n", escape(&self.content.profile.brand)));
        for section in SectionId::OBSERVED {
            nav.push_str(&format!("<a href=\"#{}\">{}</a>\n", section.anchor(), section.nav_label()));
        }
        nav.push_str(&format!(
            "<button type=\"button\" class=\"theme-toggle\" aria-label=\"{}\">{}</button>\n",
            self.theme.toggle_label(),
            self.theme.flipped().emoji()
        ));
        nav.push_str("</nav>\n");
        nav
    }

    fn hero(&self) -> String {
        let p = &self.content.profile;
        let mut html = self.open_section(SectionId::Hero, "relative min-h-screen flex items-center justify-center");
        html.push_str(&format!(
            "<div class=\"transition-all duration-1000 {}\">\n",
            Entrance::Scale.classes(self.revealed(SectionId::Hero))
        ));
        let intro = Stagger::new(self.motion.stagger_step_ms).with_offset(self.motion.stagger_step_ms);
        let lines = [
            ("p", "greeting", &p.greeting),
            ("h1", "name", &p.name),
            ("p", "tagline", &p.tagline),
            ("p", "summary", &p.summary),
        ];
        let (cta, socials) = (intro.css(lines.len()), intro.css(lines.len() + 1));
        for (i, (tag, class, text)) in lines.iter().enumerate() {
            html.push_str(&format!(
                "<{tag} class=\"{class} animate-fade-in-up\" style=\"animation-delay: {}\">{}</{tag}>\n",
                intro.css(i),
                escape(text),
            ));
        }
        html.push_str(&format!(
            "<div class=\"cta animate-fade-in-up\" style=\"animation-delay: {}\">\n<a href=\"#projects\" class=\"btn btn-cta\">View My Work</a>\n<a href=\"#contact\" class=\"btn btn-secondary\">Get In Touch</a>\n</div>\n",
            cta
        ));
        html.push_str(&self.social_links("hero-socials animate-fade-in-up", Some(socials)));
        html.push_str("</div>\n<a href=\"#projects\" class=\"scroll-cue\" aria-label=\"Scroll to projects\">⌄</a>\n</section>\n");
        html
    }

    fn about(&self) -> String {
        let p = &self.content.profile;
        let revealed = self.revealed(SectionId::About);
        let mut html = self.open_section(SectionId::About, "py-20 lg:py-32");
        html.push_str(&format!(
            "<div class=\"space-y-8 transition-all duration-1000 {}\">\n<h2>About Me</h2>\n",
            Entrance::FromLeft.classes(revealed)
        ));
        for para in &p.about {
            html.push_str(&format!("<p>{}</p>\n", escape(para)));
        }
        html.push_str(&format!(
            "<div class=\"grid grid-cols-2 gap-6 transition-all duration-700 {}\">\n<div class=\"stat\"><strong>50+</strong> Projects Completed</div>\n<div class=\"stat\"><strong>5+</strong> Years Experience</div>\n</div>\n</div>\n",
            Entrance::FadeUp.classes(revealed)
        ));

        html.push_str(&format!(
            "<div class=\"transition-all duration-1000 {}\" style=\"animation-delay: 0.3s\">\n<h3>From Ripples to Waves</h3>\n<ol class=\"timeline\">\n",
            Entrance::FromRight.classes(revealed)
        ));
        let stagger = self.motion.cards();
        for (i, item) in p.timeline.iter().enumerate() {
            let year_tail: String = {
                let skip = item.year.chars().count().saturating_sub(2);
                item.year.chars().skip(skip).collect()
            };
            html.push_str(&format!(
                "<li style=\"transition-delay: {}\"><span class=\"dot\">{}</span><h4>{}</h4><p>{}</p></li>\n",
                stagger.css(i),
                escape(&year_tail),
                escape(&item.phase),
                escape(&item.description)
            ));
        }
        html.push_str("</ol>\n</div>\n</section>\n");
        html
    }

    fn skills(&self) -> String {
        let revealed = self.revealed(SectionId::Skills);
        let mut html = self.open_section(SectionId::Skills, "py-20 lg:py-32 bg-depth-gradient");
        html.push_str(&self.header(
            SectionId::Skills,
            "Tech Stack",
            "Like ocean currents that power marine ecosystems, these technologies flow together to create powerful, scalable applications.",
        ));

        let categories = self.motion.skill_categories();
        let cards = self.motion.skill_cards();
        let bars = self.motion.skill_bars();
        for (c, (title, skills)) in self.content.skills.categories().iter().enumerate() {
            html.push_str(&format!(
                "<div class=\"skill-category transition-all duration-1000 {}\" style=\"animation-delay: {}\">\n<h3>{}</h3>\n",
                Entrance::FadeUp.classes(revealed),
                categories.css(c),
                escape(title)
            ));
            for (i, skill) in skills.iter().enumerate() {
                let width = if revealed { skill.level.min(100) } else { 0 };
                html.push_str(&format!(
                    "<div class=\"skill-card {}\" style=\"animation-delay: {}\">\n<div class=\"icon\">{}</div>\n<h4>{}</h4>\n<div class=\"bar\"><div class=\"fill\" style=\"width: {}%; transition-delay: {}\"></div></div>\n<span>{}%</span>\n</div>\n",
                    Entrance::FadeUp.classes(revealed),
                    cards.css(i),
                    escape(&skill.icon),
                    escape(&skill.name),
                    width,
                    bars.css(i),
                    skill.level.min(100)
                ));
            }
            html.push_str("</div>\n");
        }
        html.push_str("</section>\n");
        html
    }

    fn projects(&self) -> String {
        let revealed = self.revealed(SectionId::Projects);
        let mut html = self.open_section(SectionId::Projects, "py-20 lg:py-32");
        html.push_str(&self.header(
            SectionId::Projects,
            "My Ocean of Work",
            "Dive into my collection of projects, each crafted with attention to detail and flowing user experiences.",
        ));
        html.push_str("<div class=\"grid md:grid-cols-2 lg:grid-cols-3 gap-8\">\n");
        let stagger = self.motion.cards();
        for (i, project) in self.content.projects.iter().enumerate() {
            html.push_str(&self.project_card(project, stagger.css(i), revealed));
        }
        html.push_str("</div>\n");

        let github = self
            .content
            .profile
            .socials
            .iter()
            .find(|s| s.label.eq_ignore_ascii_case("github"));
        html.push_str(&format!(
            "<div class=\"view-all text-center mt-16 transition-all duration-1000 {}\" style=\"animation-delay: 0.8s\">\n",
            Entrance::FadeUp.classes(revealed)
        ));
        match github {
            Some(social) => html.push_str(&format!(
                "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\" class=\"btn btn-outline\">View All Projects on GitHub</a>\n",
                escape(&social.href)
            )),
            None => html.push_str("<button type=\"button\" class=\"btn btn-outline\">View All Projects on GitHub</button>\n"),
        }
        html.push_str("</div>\n</section>\n");
        html
    }

    fn project_card(&self, project: &Project, delay: String, revealed: bool) -> String {
        let expanded = self.state.is_expanded(&project.id);
        let mut html = format!(
            "<article id=\"project-{}\" class=\"project-card {}{}\" style=\"animation-delay: {}\" data-expanded=\"{}\">\n<h3>{}</h3>\n",
            escape(&project.id),
            Entrance::FadeUp.classes(revealed),
            if expanded { " md:col-span-2 lg:col-span-3" } else { "" },
            delay,
            expanded,
            escape(&project.title)
        );
        if project.featured {
            html.push_str("<span class=\"badge\">Featured</span>\n");
        }

        if !expanded {
            html.push_str(&format!(
                "<p>{}</p>\n<button type=\"button\" data-toggle=\"{}\">View Details</button>\n</article>\n",
                escape(&project.excerpt(PROJECT_EXCERPT_CHARS)),
                escape(&project.id)
            ));
            return html;
        }

        html.push_str(&format!(
            "<button type=\"button\" data-toggle=\"{}\">Show Less</button>\n<div class=\"details animate-fade-in-up\">\n<h4>About This Project</h4>\n<p>{}</p>\n<h4>Technologies Used</h4>\n<ul class=\"tags\">\n",
            escape(&project.id),
            escape(&project.description)
        ));
        for tech in &project.technologies {
            html.push_str(&format!("<li class=\"badge\">{}</li>\n", escape(tech)));
        }
        html.push_str("</ul>\n<div class=\"links\">\n");
        if let Some(live) = &project.live {
            html.push_str(&format!(
                "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">Live Demo</a>\n",
                escape(live)
            ));
        }
        if let Some(github) = &project.github {
            html.push_str(&format!(
                "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">View Code</a>\n",
                escape(github)
            ));
        }
        html.push_str("</div>\n</div>\n</article>\n");
        html
    }

    fn experience(&self) -> String {
        let revealed = self.revealed(SectionId::Experience);
        let mut html = self.open_section(SectionId::Experience, "py-20 lg:py-32 bg-depth-gradient");
        html.push_str(&self.header(
            SectionId::Experience,
            "Professional Journey",
            "Like tides that shape the coastline, each role has molded my expertise and deepened my understanding of crafting exceptional digital experiences.",
        ));
        let stagger = self.motion.cards();
        for (i, entry) in self.content.experience.iter().enumerate() {
            html.push_str(&format!(
                "<article class=\"experience-card {}\" style=\"animation-delay: {}\">\n<span class=\"dot\">{}</span>\n<h3>{}</h3>\n<h4>{}</h4>\n<p class=\"meta\"><span>{}</span> <span>{}</span></p>\n<p>{}</p>\n<ul class=\"tags\">\n",
                Entrance::FromRight.classes(revealed),
                stagger.css(i),
                escape(&entry.year_badge()),
                escape(&entry.title),
                escape(&entry.company),
                escape(&entry.period_label()),
                escape(&entry.location),
                escape(&entry.description)
            ));
            for tech in &entry.technologies {
                html.push_str(&format!("<li class=\"badge\">{}</li>\n", escape(tech)));
            }
            html.push_str("</ul>\n</article>\n");
        }
        html.push_str("</section>\n");
        html
    }

    fn certifications(&self) -> String {
        let revealed = self.revealed(SectionId::Certifications);
        let mut html = self.open_section(SectionId::Certifications, "py-20 lg:py-32");
        html.push_str(&self.header(
            SectionId::Certifications,
            "Certifications",
            "Professional certifications that validate my expertise and commitment to continuous learning in the ever-evolving tech ocean.",
        ));
        html.push_str("<div class=\"grid md:grid-cols-2 lg:grid-cols-4 gap-6\">\n");
        let stagger = self.motion.cards();
        for (i, cert) in self.content.certifications.iter().enumerate() {
            html.push_str(&format!(
                "<article class=\"cert-card {}\" style=\"animation-delay: {}\">\n<h3>{}</h3>\n<span class=\"badge\">{}</span>\n<p class=\"date\">{}</p>\n<p>{}</p>\n",
                Entrance::FadeUp.classes(revealed),
                stagger.css(i),
                escape(&cert.title),
                escape(&cert.issuer),
                escape(&cert.date),
                escape(&cert.description)
            ));
            if let Some(url) = &cert.verification_url {
                html.push_str(&format!(
                    "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">Verify Certificate</a>\n",
                    escape(url)
                ));
            }
            html.push_str("</article>\n");
        }
        html.push_str("</div>\n</section>\n");
        html
    }

    fn contact(&self) -> String {
        let p = &self.content.profile;
        let revealed = self.revealed(SectionId::Contact);
        let submitting = self.state.is_submitting();
        let draft = self.state.contact.as_ref().map(|c| c.draft.clone()).unwrap_or_default();

        let mut html = self.open_section(SectionId::Contact, "py-20 lg:py-32");
        html.push_str(&self.header(
            SectionId::Contact,
            "Let's Create Waves Together",
            "Ready to dive into your next project? Send me a message in a bottle, and let's make something beautiful flow together.",
        ));
        html.push_str(&format!(
            "<div class=\"transition-all duration-1000 {}\" style=\"animation-delay: 0.2s\">\n<h3>🍶 Message in a Bottle</h3>\n<form method=\"post\" action=\"#contact\">\n",
            Entrance::FromLeft.classes(revealed)
        ));
        html.push_str(&format!(
            "<label for=\"name\">Your Name</label>\n<input id=\"name\" name=\"name\" required placeholder=\"Captain Nemo\" value=\"{}\">\n",
            escape(&draft.name)
        ));
        html.push_str(&format!(
            "<label for=\"email\">Email Address</label>\n<input id=\"email\" name=\"email\" type=\"email\" required placeholder=\"captain@ocean.com\" value=\"{}\">\n",
            escape(&draft.email)
        ));
        html.push_str(&format!(
            "<label for=\"message\">Your Message</label>\n<textarea id=\"message\" name=\"message\" required rows=\"6\">{}</textarea>\n",
            escape(&draft.message)
        ));
        if submitting {
            html.push_str("<button type=\"submit\" disabled>Sending your bottle to sea... 🌊</button>\n");
        } else {
            html.push_str("<button type=\"submit\">Cast Your Message</button>\n");
        }
        html.push_str("</form>\n</div>\n");

        html.push_str(&format!(
            "<div class=\"space-y-8 transition-all duration-1000 {}\" style=\"animation-delay: 0.4s\">\n<h3>Quick Contact</h3>\n<a href=\"mailto:{}\">{}</a>\n<p>🌊 {}</p>\n<p>⏰ {}</p>\n<h3>Find Me in the Digital Ocean</h3>\n",
            Entrance::FromRight.classes(revealed),
            escape(&p.email),
            escape(&p.email),
            escape(&p.availability),
            escape(&p.response_time)
        ));
        html.push_str(&self.social_links("contact-socials", None));
        html.push_str("</div>\n");

        if let Some(toast) = self.state.contact.as_ref().and_then(|c| c.toasts.last()) {
            html.push_str(&format!(
                "<div role=\"status\" class=\"toast\"><strong>{}</strong> {}</div>\n",
                escape(&toast.title),
                escape(&toast.description)
            ));
        }
        html.push_str("</section>\n");
        html
    }

    fn social_links(&self, class: &str, delay: Option<String>) -> String {
        let stagger = self.motion.cards();
        let mut html = match delay {
            Some(delay) => format!("<div class=\"{}\" style=\"animation-delay: {}\">\n", class, delay),
            None => format!("<div class=\"{}\">\n", class),
        };
        for (i, social) in self.content.profile.socials.iter().enumerate() {
            html.push_str(&format!(
                "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\" aria-label=\"{}\" style=\"animation-delay: {}\">{}</a>\n",
                escape(&social.href),
                escape(&social.label),
                stagger.css(i),
                escape(&social.label)
            ));
        }
        html.push_str("</div>\n");
        html
    }

    fn footer(&self) -> String {
        let p = &self.content.profile;
        let mut html = format!(
            "<footer id=\"{}\" class=\"relative bg-depth-gradient\">\n<a href=\"#hero\" class=\"brand\">{}</a>\n<p>{}</p>\n<nav>\n",
            SectionId::Footer.anchor(),
            escape(&p.brand),
            escape(&p.brand_blurb)
        );
        for section in [
            SectionId::About,
            SectionId::Skills,
            SectionId::Projects,
            SectionId::Experience,
            SectionId::Contact,
        ] {
            html.push_str(&format!("<a href=\"#{}\">{}</a>\n", section.anchor(), section.nav_label()));
        }
        html.push_str("</nav>\n");
        html.push_str(&self.social_links("footer-socials", None));
        html.push_str(&format!(
            "<p class=\"legal\">© {} {}. Made with ❤️ and 🌊 for the web.</p>\n<a href=\"#hero\">Back to Surface ↑</a>\n</footer>\n",
            self.year,
            escape(&p.brand)
        ));
        html
    }
}

/// Static export: every section in its revealed state
pub fn render_static(content: &PortfolioContent, config: &Config, theme: Theme) -> String {
    let state = PageState::fully_revealed(&config.reveal);
    let root = if theme.is_dark() { "dark" } else { "" };
    Renderer::new(content, &state, &config.motion).with_theme(theme, root).render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::content::default_content;
    use crate::config::RevealConfig;
    use std::collections::{BTreeMap, BTreeSet};

    fn hidden_state() -> PageState {
        PageState {
            revealed: [SectionId::Hero].into_iter().collect(),
            expanded: BTreeSet::new(),
            contact: None,
            thresholds: BTreeMap::new(),
        }
    }

    fn revealed_state() -> PageState {
        PageState::fully_revealed(&RevealConfig::default())
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("<a href=\"x\">&'"), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn test_sections_carry_anchor_ids() {
        let content = default_content().unwrap();
        let html = render_static(&content, &Config::default(), Theme::Light);
        for section in SectionId::ALL {
            assert!(html.contains(&format!("id=\"{}\"", section.anchor())), "missing #{}", section);
        }
        assert!(html.contains("data-reveal-threshold=\"0.3\""));
    }

    #[test]
    fn test_threshold_attribute_follows_config() {
        let content = default_content().unwrap();
        let mut config = Config::default();
        config.reveal.about = 0.5;
        let html = render_static(&content, &config, Theme::Light);
        assert!(html.contains("<section id=\"about\" class=\"py-20 lg:py-32\" data-reveal-threshold=\"0.5\""));
        assert!(!html.contains("data-reveal-threshold=\"0.3\""));
        assert!(html.contains("<section id=\"hero\" class=\"relative min-h-screen flex items-center justify-center\" data-revealed=\"true\">"));
    }

    #[test]
    fn test_hero_actions_follow_intro_lines() {
        let content = default_content().unwrap();
        let state = revealed_state();
        let motion = MotionConfig::default();
        let html = Renderer::new(&content, &state, &motion).section(SectionId::Hero);
        assert!(html.contains("<div class=\"cta animate-fade-in-up\" style=\"animation-delay: 1s\">"));
        assert!(html.contains("<div class=\"hero-socials animate-fade-in-up\" style=\"animation-delay: 1.2s\">"));
    }

    #[test]
    fn test_projects_link_to_github() {
        let content = default_content().unwrap();
        let motion = MotionConfig::default();
        let shown = revealed_state();
        let html = Renderer::new(&content, &shown, &motion).section(SectionId::Projects);
        assert!(html.contains("opacity-100 translate-y-0\" style=\"animation-delay: 0.8s\">"));
        assert!(html.contains("<a href=\"https://github.com\" target=\"_blank\" rel=\"noopener noreferrer\" class=\"btn btn-outline\">View All Projects on GitHub</a>"));

        let hidden = hidden_state();
        let html = Renderer::new(&content, &hidden, &motion).section(SectionId::Projects);
        assert!(html.contains("view-all text-center mt-16 transition-all duration-1000 opacity-0 translate-y-8"));
    }

    #[test]
    fn test_project_delays_follow_index() {
        let content = default_content().unwrap();
        let state = revealed_state();
        let motion = MotionConfig::default();
        let html = Renderer::new(&content, &state, &motion).section(SectionId::Projects);
        let delays: Vec<&str> = html
            .lines()
            .filter(|l| l.starts_with("<article"))
            .filter_map(|l| l.split("animation-delay: ").nth(1))
            .map(|rest| rest.split('"').next().unwrap_or_default())
            .collect();
        assert_eq!(delays, vec!["0s", "0.2s", "0.4s"]);
    }

    #[test]
    fn test_hidden_sections_use_pre_reveal_classes() {
        let content = default_content().unwrap();
        let state = hidden_state();
        let motion = MotionConfig::default();
        let renderer = Renderer::new(&content, &state, &motion);

        let skills = renderer.section(SectionId::Skills);
        assert!(skills.contains("opacity-0 translate-y-8"));
        assert!(skills.contains("width: 0%"));
        assert!(!skills.contains("opacity-100"));

        let about = renderer.section(SectionId::About);
        assert!(about.contains("opacity-0 -translate-x-8"));
    }

    #[test]
    fn test_project_expand_in_place() {
        let content = default_content().unwrap();
        let motion = MotionConfig::default();
        let mut state = revealed_state();

        let collapsed = Renderer::new(&content, &state, &motion).section(SectionId::Projects);
        assert!(collapsed.contains("View Details"));
        assert!(!collapsed.contains("Technologies Used"));

        state.expanded.insert("tide-tracker".to_string());
        let expanded = Renderer::new(&content, &state, &motion).section(SectionId::Projects);
        assert!(expanded.contains("Show Less"));
        assert!(expanded.contains("Live Demo"));
        assert!(expanded.contains("data-expanded=\"true\""));
    }

    #[test]
    fn test_theme_and_footer_year() {
        let content = default_content().unwrap();
        let state = revealed_state();
        let motion = MotionConfig::default();
        let html = Renderer::new(&content, &state, &motion)
            .with_theme(Theme::Dark, "dark")
            .with_year(2031)
            .render();
        assert!(html.contains("<html lang=\"en\" class=\"dark\">"));
        assert!(html.contains("Switch to light mode"));
        assert!(html.contains("© 2031 Ocean Flow"));
    }

    #[test]
    fn test_experience_dates() {
        let content = default_content().unwrap();
        let state = revealed_state();
        let motion = MotionConfig::default();
        let html = Renderer::new(&content, &state, &motion).section(SectionId::Experience);
        assert!(html.contains("Mar 2022 - Present"));
        assert!(html.contains("<span class=\"dot\">22</span>"));
    }
}
