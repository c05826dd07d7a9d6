//! Page model: every section mounted over one platform
//!
//! The page is the only call site of the reveal controller. Each observed
//! section gets its own controller keyed by anchor id and threshold; the
//! hero reveals on mount; the footer is never animated.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use crate::config::{Config, RevealConfig};
use crate::core::contact::{ContactForm, ContactView};
use crate::core::reveal::{IntersectionPlatform, ObserverHandle, RevealController};
use crate::core::viewport::SimulatedViewport;
use crate::error::{FolioError, Result};
use crate::types::{PortfolioContent, ReasonCode, RevealEvent, SectionId};

/// Everything rendering needs to know about a mounted page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageState {
    pub revealed: BTreeSet<SectionId>,
    pub expanded: BTreeSet<String>,
    pub contact: Option<ContactView>,
    /// Threshold each observed section's controller was attached with
    #[serde(default)]
    pub thresholds: BTreeMap<SectionId, f64>,
}

impl PageState {
    /// State of a page scrolled all the way through, used for static export
    pub fn fully_revealed(reveal: &RevealConfig) -> Self {
        Self {
            revealed: SectionId::ALL.into_iter().collect(),
            expanded: BTreeSet::new(),
            contact: None,
            thresholds: SectionId::OBSERVED
                .into_iter()
                .map(|s| (s, reveal.threshold_for(s)))
                .collect(),
        }
    }

    pub fn threshold(&self, section: SectionId) -> Option<f64> {
        self.thresholds.get(&section).copied()
    }

    pub fn is_revealed(&self, section: SectionId) -> bool {
        self.revealed.contains(&section)
    }

    pub fn is_expanded(&self, project_id: &str) -> bool {
        self.expanded.contains(project_id)
    }

    pub fn is_submitting(&self) -> bool {
        self.contact
            .as_ref()
            .map(|c| c.state == crate::core::contact::SubmissionState::Submitting)
            .unwrap_or(false)
    }
}

/// A mounted portfolio page
#[derive(Debug)]
pub struct Page<P: IntersectionPlatform> {
    platform: P,
    content: Arc<PortfolioContent>,
    controllers: BTreeMap<SectionId, RevealController>,
    handles: BTreeMap<ObserverHandle, SectionId>,
    hero_revealed: bool,
    expanded: BTreeSet<String>,
    contact: ContactForm,
    mounted: bool,
    /// Load-time reveals waiting for the first pump
    queued: Vec<RevealEvent>,
}

impl<P: IntersectionPlatform> Page<P> {
    /// Mount without a reveal listener
    pub fn mount(platform: P, content: Arc<PortfolioContent>, config: &Config) -> Self {
        Self::mount_with(platform, content, config, |_| {})
    }

    /// Mount every section; `on_reveal` hears each section reveal once
    pub fn mount_with<F>(mut platform: P, content: Arc<PortfolioContent>, config: &Config, on_reveal: F) -> Self
    where
        F: Fn(SectionId) + Clone + Send + Sync + 'static,
    {
        let mut controllers = BTreeMap::new();
        let mut handles = BTreeMap::new();

        for section in SectionId::OBSERVED {
            let notify = on_reveal.clone();
            let controller = RevealController::attach(
                &mut platform,
                section.anchor(),
                config.reveal.threshold_for(section),
                move || notify(section),
            );
            if let Some(handle) = controller.handle() {
                handles.insert(handle, section);
            }
            controllers.insert(section, controller);
        }

        on_reveal(SectionId::Hero);
        let queued = vec![RevealEvent::new(SectionId::Hero, 1.0, ReasonCode::R112_REVEAL_ON_LOAD)];
        debug!(observed = handles.len(), "page mounted");

        Self {
            platform,
            content,
            controllers,
            handles,
            hero_revealed: true,
            expanded: BTreeSet::new(),
            contact: ContactForm::new(config.motion.submit_delay()),
            mounted: true,
            queued,
        }
    }

    /// Deliver pending platform entries; returns the reveals they caused
    pub fn pump(&mut self) -> Vec<RevealEvent> {
        let mut events = std::mem::take(&mut self.queued);
        if !self.mounted {
            return events;
        }

        for entry in self.platform.take_entries() {
            let Some(section) = self.handles.get(&entry.handle).copied() else { continue };
            let Some(controller) = self.controllers.get_mut(&section) else { continue };
            let reason = controller.on_intersection(entry);
            if reason.is_reveal() {
                events.push(RevealEvent::new(section, entry.ratio, reason));
            }
        }
        events
    }

    /// Tear everything down; no reveal or contact completion happens after
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        for controller in self.controllers.values_mut() {
            controller.detach(&mut self.platform);
        }
        self.handles.clear();
        self.queued.clear();
        self.contact.unmount();
        self.mounted = false;
        info!("page unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_revealed(&self, section: SectionId) -> bool {
        match section {
            SectionId::Hero => self.hero_revealed,
            SectionId::Footer => true,
            _ => self.controllers.get(&section).map(|c| c.is_revealed()).unwrap_or(false),
        }
    }

    pub fn revealed_sections(&self) -> Vec<SectionId> {
        SectionId::ALL.into_iter().filter(|s| self.is_revealed(*s)).collect()
    }

    pub fn controller(&self, section: SectionId) -> Option<&RevealController> {
        self.controllers.get(&section)
    }

    /// Expand or collapse a project card; returns the new expanded state
    pub fn toggle_project(&mut self, project_id: &str) -> Result<bool> {
        if self.content.project(project_id).is_none() {
            return Err(FolioError::UnknownProject(project_id.to_string()));
        }
        let expanded = if self.expanded.remove(project_id) {
            false
        } else {
            self.expanded.insert(project_id.to_string());
            true
        };
        Ok(expanded)
    }

    pub fn is_expanded(&self, project_id: &str) -> bool {
        self.expanded.contains(project_id)
    }

    pub fn contact(&self) -> &ContactForm {
        &self.contact
    }

    pub fn contact_mut(&mut self) -> &mut ContactForm {
        &mut self.contact
    }

    pub fn content(&self) -> &PortfolioContent {
        &self.content
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub fn state(&self) -> PageState {
        PageState {
            revealed: self.revealed_sections().into_iter().collect(),
            expanded: self.expanded.clone(),
            contact: Some(self.contact.snapshot()),
            thresholds: self
                .controllers
                .iter()
                .map(|(section, c)| (*section, c.threshold()))
                .collect(),
        }
    }
}

impl Page<SimulatedViewport> {
    /// Lay the sections out as configured and mount over them
    pub fn simulated(content: Arc<PortfolioContent>, config: &Config) -> Self {
        Self::simulated_with(content, config, |_| {})
    }

    pub fn simulated_with<F>(content: Arc<PortfolioContent>, config: &Config, on_reveal: F) -> Self
    where
        F: Fn(SectionId) + Clone + Send + Sync + 'static,
    {
        let viewport = layout_viewport(config);
        Self::mount_with(viewport, content, config, on_reveal)
    }

    /// Scroll and deliver whatever crossed a threshold
    pub fn scroll_to(&mut self, offset: f64) -> Vec<RevealEvent> {
        self.platform.scroll_to(offset);
        self.pump()
    }

    pub fn scroll_by(&mut self, delta: f64) -> Vec<RevealEvent> {
        self.platform.scroll_by(delta);
        self.pump()
    }

    /// Follow a `#anchor` link
    pub fn navigate(&mut self, section: SectionId) -> Result<Vec<RevealEvent>> {
        self.platform
            .scroll_to_element(section.anchor())
            .ok_or_else(|| FolioError::UnknownSection(section.anchor().to_string()))?;
        Ok(self.pump())
    }

    pub fn scroll_top(&self) -> f64 {
        self.platform.scroll_top()
    }
}

/// Headless document with one box per section
pub fn layout_viewport(config: &Config) -> SimulatedViewport {
    SimulatedViewport::stacked(
        config.layout.viewport_height,
        SectionId::ALL
            .into_iter()
            .map(|s| (s.anchor(), config.layout.height_of(s))),
    )
}

// =============================================================================
// TESTS
// =============================================================================
