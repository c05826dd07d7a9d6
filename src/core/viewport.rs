//! Intersection platforms
//!
//! `SimulatedViewport` lays sections out top to bottom and reports
//! intersection entries the way a browser observer does: one entry right
//! after `observe`, then one each time an element's ratio crosses its
//! threshold in either direction. `NoIntersection` is a document without
//! observation support.

use std::collections::BTreeMap;
use tracing::trace;
use crate::core::reveal::{IntersectionEntry, IntersectionPlatform, ObserverHandle};

/// Vertical extent of one element, in CSS pixels
#[derive(Debug, Clone, PartialEq)]
pub struct ElementBox {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl ElementBox {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

#[derive(Debug, Clone)]
struct Registration {
    element: String,
    threshold: f64,
    /// Was the ratio at/above threshold on the last delivery?
    above: bool,
}

/// Headless viewport over a stacked document
#[derive(Debug, Clone)]
pub struct SimulatedViewport {
    viewport_height: f64,
    scroll_top: f64,
    elements: Vec<ElementBox>,
    observers: BTreeMap<ObserverHandle, Registration>,
    next_handle: u64,
    pending: Vec<IntersectionEntry>,
}

impl SimulatedViewport {
    /// Empty document seen through a viewport of `viewport_height` pixels
    pub fn new(viewport_height: f64) -> Self {
        Self {
            viewport_height: viewport_height.max(1.0),
            scroll_top: 0.0,
            elements: Vec::new(),
            observers: BTreeMap::new(),
            next_handle: 0,
            pending: Vec::new(),
        }
    }

    /// Append an element below the current document end
    pub fn push_element(&mut self, id: impl Into<String>, height: f64) -> &mut Self {
        let top = self.document_height();
        self.elements.push(ElementBox {
            id: id.into(),
            top,
            height: height.max(0.0),
        });
        self
    }

    /// Build a document from `(id, height)` pairs in order
    pub fn stacked<I, S>(viewport_height: f64, elements: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut viewport = Self::new(viewport_height);
        for (id, height) in elements {
            viewport.push_element(id, height);
        }
        viewport
    }

    pub fn element(&self, id: &str) -> Option<&ElementBox> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn document_height(&self) -> f64 {
        self.elements.last().map(|e| e.bottom()).unwrap_or(0.0)
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    pub fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    /// Largest reachable scroll offset
    pub fn max_scroll(&self) -> f64 {
        (self.document_height() - self.viewport_height).max(0.0)
    }

    /// Visible fraction of an element at the current scroll offset
    pub fn ratio(&self, id: &str) -> Option<f64> {
        self.element(id).map(|e| self.ratio_of(e))
    }

    fn ratio_of(&self, element: &ElementBox) -> f64 {
        let view_top = self.scroll_top;
        let view_bottom = self.scroll_top + self.viewport_height;

        if element.height <= 0.0 {
            let inside = element.top >= view_top && element.top <= view_bottom;
            return if inside { 1.0 } else { 0.0 };
        }

        let overlap = element.bottom().min(view_bottom) - element.top.max(view_top);
        (overlap.max(0.0) / element.height).clamp(0.0, 1.0)
    }

    /// Scroll to an absolute offset, clamped to the document
    pub fn scroll_to(&mut self, offset: f64) {
        let offset = if offset.is_finite() { offset } else { 0.0 };
        self.scroll_top = offset.clamp(0.0, self.max_scroll());
        self.collect_crossings();
    }

    pub fn scroll_by(&mut self, delta: f64) {
        self.scroll_to(self.scroll_top + delta);
    }

    /// Bring an element's top edge to the top of the viewport
    ///
    /// Returns the resulting offset, or `None` if no element has that id.
    pub fn scroll_to_element(&mut self, id: &str) -> Option<f64> {
        let top = self.element(id)?.top;
        self.scroll_to(top);
        Some(self.scroll_top)
    }

    /// Number of live observer registrations
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn collect_crossings(&mut self) {
        let mut crossings = Vec::new();
        for (handle, reg) in &self.observers {
            let Some(element) = self.element(&reg.element) else { continue };
            let ratio = self.ratio_of(element);
            let above = ratio >= reg.threshold;
            if above != reg.above {
                crossings.push((*handle, ratio, above));
            }
        }
        for (handle, ratio, above) in crossings {
            if let Some(reg) = self.observers.get_mut(&handle) {
                reg.above = above;
            }
            trace!(handle = handle.raw(), ratio, above, "threshold crossed");
            self.pending.push(IntersectionEntry { handle, ratio });
        }
    }
}

impl IntersectionPlatform for SimulatedViewport {
    fn has_element(&self, element: &str) -> bool {
        self.element(element).is_some()
    }

    fn observe(&mut self, element: &str, threshold: f64) -> Option<ObserverHandle> {
        let ratio = self.ratio(element)?;
        self.next_handle += 1;
        let handle = ObserverHandle::new(self.next_handle);
        self.observers.insert(
            handle,
            Registration {
                element: element.to_string(),
                threshold,
                above: ratio >= threshold,
            },
        );
        // Browsers report the current state right after observe()
        self.pending.push(IntersectionEntry { handle, ratio });
        Some(handle)
    }

    fn disconnect(&mut self, handle: ObserverHandle) {
        self.observers.remove(&handle);
        self.pending.retain(|e| e.handle != handle);
    }

    fn take_entries(&mut self) -> Vec<IntersectionEntry> {
        std::mem::take(&mut self.pending)
    }
}

/// A document whose platform has no intersection observation
///
/// Every element exists, but nothing can be observed, so sections stay in
/// their pre-reveal state.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIntersection;

impl IntersectionPlatform for NoIntersection {
    fn has_element(&self, _element: &str) -> bool {
        true
    }

    fn observe(&mut self, _element: &str, _threshold: f64) -> Option<ObserverHandle> {
        None
    }

    fn disconnect(&mut self, _handle: ObserverHandle) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> SimulatedViewport {
        SimulatedViewport::stacked(1000.0, [("hero", 1000.0), ("about", 800.0), ("skills", 1200.0)])
    }

    #[test]
    fn test_layout_and_ratio() {
        let mut vp = doc();
        assert_eq!(vp.document_height(), 3000.0);
        assert_eq!(vp.ratio("hero"), Some(1.0));
        assert_eq!(vp.ratio("about"), Some(0.0));

        vp.scroll_to(400.0);
        assert_eq!(vp.ratio("about"), Some(0.5));
        assert_eq!(vp.ratio("missing"), None);
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut vp = doc();
        vp.scroll_to(10_000.0);
        assert_eq!(vp.scroll_top(), 2000.0);
        vp.scroll_by(-5000.0);
        assert_eq!(vp.scroll_top(), 0.0);
    }

    #[test]
    fn test_observe_reports_initial_state() {
        let mut vp = doc();
        let h = vp.observe("hero", 0.2).unwrap();
        assert_eq!(vp.take_entries(), vec![IntersectionEntry { handle: h, ratio: 1.0 }]);
        assert!(vp.take_entries().is_empty());
    }

    #[test]
    fn test_entries_only_on_crossing() {
        let mut vp = doc();
        let h = vp.observe("about", 0.3).unwrap();
        vp.take_entries();

        vp.scroll_to(100.0); // 0.125 visible, still below
        assert!(vp.take_entries().is_empty());

        vp.scroll_to(300.0); // 0.375 visible, crossed upward
        let entries = vp.take_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].handle, h);
        assert!(entries[0].ratio >= 0.3);

        vp.scroll_to(350.0); // still above, nothing new
        assert!(vp.take_entries().is_empty());

        vp.scroll_to(0.0); // crossed back down
        assert_eq!(vp.take_entries().len(), 1);
    }

    #[test]
    fn test_disconnect_drops_pending() {
        let mut vp = doc();
        let h = vp.observe("skills", 0.2).unwrap();
        vp.disconnect(h);
        assert!(vp.take_entries().is_empty());
        assert_eq!(vp.observer_count(), 0);
        vp.scroll_to(2000.0);
        assert!(vp.take_entries().is_empty());
    }

    #[test]
    fn test_scroll_to_element() {
        let mut vp = doc();
        assert_eq!(vp.scroll_to_element("about"), Some(1000.0));
        assert_eq!(vp.scroll_to_element("skills"), Some(2000.0));
        assert_eq!(vp.scroll_to_element("nowhere"), None);
    }

    #[test]
    fn test_no_intersection_platform() {
        let mut p = NoIntersection;
        assert!(p.has_element("anything"));
        assert!(p.observe("anything", 0.2).is_none());
    }
}
