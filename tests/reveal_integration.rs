//! Integration tests for scroll reveals
//!
//! Tests the full path: viewport scroll → platform entries → page → render

use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tideline::config::Config;
use tideline::core::{
    default_content, IntersectionPlatform, NoIntersection, Page, Renderer, RevealController,
    SimulatedViewport, Stagger,
};
use tideline::types::{PortfolioContent, ReasonCode, SectionId};

fn content() -> Arc<PortfolioContent> {
    Arc::new(default_content().unwrap())
}

fn page() -> Page<SimulatedViewport> {
    let mut page = Page::simulated(content(), &Config::default());
    page.pump();
    page
}

/// About starts at 900px and is 1000px tall; it needs 300px on screen
#[test]
fn test_about_threshold_is_inclusive() {
    let mut page = page();

    assert!(page.scroll_to(200.0).is_empty());
    assert!(!page.is_revealed(SectionId::About));

    let events = page.scroll_to(300.0);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].section, SectionId::About);
    assert_eq!(events[0].reason, ReasonCode::R101_REVEAL_THRESHOLD_MET);
    assert!(page.is_revealed(SectionId::About));
}

/// Skills starts at 1900px and is 1600px tall; 20% is 320px
#[test]
fn test_skills_needs_a_fifth_visible() {
    let mut page = page();

    page.scroll_to(1319.0);
    assert!(!page.is_revealed(SectionId::Skills));

    let events = page.scroll_to(1320.0);
    assert!(events.iter().any(|e| e.section == SectionId::Skills));
}

#[test]
fn test_reveal_survives_scrolling_away() {
    let mut page = page();
    page.navigate(SectionId::Experience).unwrap();
    assert!(page.is_revealed(SectionId::Experience));

    for offset in [0.0, 7000.0, 100.0, 4900.0] {
        let events = page.scroll_to(offset);
        assert!(events.iter().all(|e| e.section != SectionId::Experience));
        assert!(page.is_revealed(SectionId::Experience));
    }
}

#[test]
fn test_jump_to_bottom_reveals_only_what_was_seen() {
    let mut page = page();
    let max = page.platform().max_scroll();
    page.scroll_to(max);

    // Sections in view at the bottom reveal; the ones skipped over do not
    assert!(page.is_revealed(SectionId::Contact));
    assert!(!page.is_revealed(SectionId::Skills));
    assert!(!page.is_revealed(SectionId::About));
    assert!(page.is_revealed(SectionId::Footer));
}

#[test]
fn test_section_in_view_at_mount_reveals_on_first_pump() {
    let mut config = Config::default();
    // Hero short enough that About is fully on screen at load
    config.layout.heights.insert(SectionId::Hero, 100.0);

    let mut page = Page::simulated(content(), &config);
    let events = page.pump();
    let sections: Vec<SectionId> = events.iter().map(|e| e.section).collect();
    assert_eq!(sections, vec![SectionId::Hero, SectionId::About]);
    assert_eq!(events[1].reason, ReasonCode::R101_REVEAL_THRESHOLD_MET);
}

#[test]
fn test_missing_root_element_never_reveals() {
    let mut viewport = SimulatedViewport::stacked(900.0, [("hero", 900.0), ("about", 900.0)]);
    let fired = Arc::new(AtomicUsize::new(0));
    let f = Arc::clone(&fired);
    let ctl = RevealController::attach(&mut viewport, "skills", 0.2, move || {
        f.fetch_add(1, Ordering::SeqCst);
    });

    assert_eq!(ctl.inert_reason(), Some(ReasonCode::R110_ATTACH_ELEMENT_MISSING));
    viewport.scroll_to(10_000.0);
    assert!(viewport.take_entries().is_empty());
    assert_eq!(fired.load(Ordering::SeqCst), 0);
}

#[test]
fn test_detach_before_crossing() {
    let mut viewport = SimulatedViewport::stacked(900.0, [("hero", 900.0), ("contact", 900.0)]);
    let fired = Arc::new(AtomicUsize::new(0));
    let f = Arc::clone(&fired);
    let mut ctl = RevealController::attach(&mut viewport, "contact", 0.2, move || {
        f.fetch_add(1, Ordering::SeqCst);
    });
    for entry in viewport.take_entries() {
        ctl.on_intersection(entry);
    }

    ctl.detach(&mut viewport);
    viewport.scroll_to(900.0);
    for entry in viewport.take_entries() {
        ctl.on_intersection(entry);
    }
    assert!(!ctl.is_revealed());
    assert_eq!(fired.load(Ordering::SeqCst), 0);
    assert_eq!(viewport.observer_count(), 0);
}

#[test]
fn test_degraded_platform_renders_hidden_sections() {
    let mut page = Page::mount(NoIntersection, content(), &Config::default());
    page.pump();
    assert_eq!(page.revealed_sections(), vec![SectionId::Hero, SectionId::Footer]);

    let state = page.state();
    let motion = Config::default().motion;
    let html = Renderer::new(page.content(), &state, &motion).section(SectionId::Projects);
    assert!(html.contains("opacity-0 translate-y-8"));
    assert!(html.contains("data-revealed=\"false\""));
}

#[test]
fn test_render_follows_reveals() {
    let mut page = page();
    let motion = Config::default().motion;

    let before = Renderer::new(page.content(), &page.state(), &motion).section(SectionId::Projects);
    assert!(before.contains("data-revealed=\"false\""));

    page.navigate(SectionId::Projects).unwrap();
    let after = Renderer::new(page.content(), &page.state(), &motion).section(SectionId::Projects);
    assert!(after.contains("data-revealed=\"true\""));
    assert!(after.contains("opacity-100 translate-y-0"));
}

#[test]
fn test_stagger_scenarios() {
    let projects = Stagger::new(200);
    assert_eq!(
        (0..3).map(|i| projects.css(i)).collect::<Vec<_>>(),
        vec!["0s", "0.2s", "0.4s"]
    );

    let skills = Stagger::new(500);
    assert_eq!(skills.css(2), "1s");

    let empty: Vec<String> = (0..0).map(|i| projects.css(i)).collect();
    assert!(empty.is_empty());
}

#[test]
fn test_unmount_mid_scroll() {
    let mut page = page();
    page.scroll_to(600.0);
    page.unmount();

    assert!(page.scroll_to(5000.0).is_empty());
    assert!(page.is_revealed(SectionId::About));
    assert!(!page.is_revealed(SectionId::Projects));
    assert_eq!(page.platform().observer_count(), 0);
}

#[test]
fn test_rendered_threshold_matches_controller() {
    let mut config = Config::default();
    config.reveal.about = 0.5;
    let page = Page::simulated(content(), &config);
    assert_eq!(page.controller(SectionId::About).unwrap().threshold(), 0.5);

    let html = Renderer::new(page.content(), &page.state(), &config.motion).section(SectionId::About);
    assert!(html.contains("data-reveal-threshold=\"0.5\""));
    assert!(!html.contains("data-reveal-threshold=\"0.3\""));
}
