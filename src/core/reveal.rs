//! Reveal controller: one-shot visibility latch per section
//!
//! A controller watches one root element through an [`IntersectionPlatform`].
//! The first entry whose ratio reaches the threshold flips the latch and
//! fires the reveal callback. Nothing un-reveals a section.
//!
//! Lifecycle:
//! - attach: element missing or platform without observation → inert
//! - entry below threshold → still hidden
//! - entry at/above threshold → revealed (latched, callback consumed)
//! - detach → observer disconnected, callback dropped

use std::fmt;
use tracing::{debug, trace};
use crate::REVEAL_THRESHOLD_DEFAULT;
use crate::types::ReasonCode;

/// Registration issued by a platform for one observed element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverHandle(u64);

impl ObserverHandle {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// A visibility report delivered by the platform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub handle: ObserverHandle,
    /// Visible fraction of the element, 0.0..=1.0
    pub ratio: f64,
}

/// Whatever can tell us how much of an element is on screen
///
/// Platforms deliver an entry right after `observe` with the element's
/// current ratio, and again whenever the ratio crosses the threshold.
pub trait IntersectionPlatform {
    /// Does the document contain this element?
    fn has_element(&self, element: &str) -> bool;

    /// Start observing; `None` when the platform cannot observe at all
    fn observe(&mut self, element: &str, threshold: f64) -> Option<ObserverHandle>;

    /// Stop delivering entries for `handle` and release it
    fn disconnect(&mut self, handle: ObserverHandle);

    /// Entries queued since the last call, in delivery order
    fn take_entries(&mut self) -> Vec<IntersectionEntry> {
        Vec::new()
    }
}

/// Monotonic one-way flag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RevealLatch(bool);

impl RevealLatch {
    pub fn new() -> Self {
        Self(false)
    }

    /// Set the latch; true only on the call that actually flipped it
    pub fn set(&mut self) -> bool {
        let flipped = !self.0;
        self.0 = true;
        flipped
    }

    pub fn is_set(&self) -> bool {
        self.0
    }
}

type RevealCallback = Box<dyn FnOnce() + Send + Sync>;

/// Reveal controller for one section
pub struct RevealController {
    element: String,
    threshold: f64,
    handle: Option<ObserverHandle>,
    latch: RevealLatch,
    on_reveal: Option<RevealCallback>,
    attach_reason: Option<ReasonCode>,
}

impl fmt::Debug for RevealController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RevealController")
            .field("element", &self.element)
            .field("threshold", &self.threshold)
            .field("handle", &self.handle)
            .field("revealed", &self.latch.is_set())
            .field("callback_pending", &self.on_reveal.is_some())
            .finish()
    }
}

impl RevealController {
    /// Begin observing `element`
    ///
    /// Never fails: a missing element or an incapable platform yields an
    /// inert controller that simply never reveals.
    pub fn attach<P, F>(platform: &mut P, element: impl Into<String>, threshold: f64, on_reveal: F) -> Self
    where
        P: IntersectionPlatform + ?Sized,
        F: FnOnce() + Send + Sync + 'static,
    {
        let element = element.into();
        let threshold = normalize_threshold(threshold);

        let mut controller = Self {
            element,
            threshold,
            handle: None,
            latch: RevealLatch::new(),
            on_reveal: None,
            attach_reason: None,
        };

        if !platform.has_element(&controller.element) {
            debug!(element = %controller.element, reason = ReasonCode::R110_ATTACH_ELEMENT_MISSING.code(), "reveal controller inert");
            controller.attach_reason = Some(ReasonCode::R110_ATTACH_ELEMENT_MISSING);
            return controller;
        }

        match platform.observe(&controller.element, threshold) {
            Some(handle) => {
                trace!(element = %controller.element, handle = handle.raw(), threshold, "observing");
                controller.handle = Some(handle);
                controller.on_reveal = Some(Box::new(on_reveal));
            }
            None => {
                debug!(element = %controller.element, reason = ReasonCode::R111_ATTACH_UNSUPPORTED.code(), "reveal controller inert");
                controller.attach_reason = Some(ReasonCode::R111_ATTACH_UNSUPPORTED);
            }
        }

        controller
    }

    /// Feed one platform entry; returns what was decided
    pub fn on_intersection(&mut self, entry: IntersectionEntry) -> ReasonCode {
        let Some(handle) = self.handle else {
            return if self.latch.is_set() {
                ReasonCode::R103_REVEAL_ALREADY_LATCHED
            } else {
                ReasonCode::R104_REVEAL_DETACHED
            };
        };

        if entry.handle != handle {
            return ReasonCode::R105_REVEAL_FOREIGN_ENTRY;
        }

        if self.latch.is_set() {
            return ReasonCode::R103_REVEAL_ALREADY_LATCHED;
        }

        if entry.ratio < self.threshold {
            return ReasonCode::R102_REVEAL_BELOW_THRESHOLD;
        }

        self.latch.set();
        if let Some(callback) = self.on_reveal.take() {
            callback();
        }
        debug!(element = %self.element, ratio = entry.ratio, reason = ReasonCode::R101_REVEAL_THRESHOLD_MET.code(), "revealed");
        ReasonCode::R101_REVEAL_THRESHOLD_MET
    }

    /// Stop observing and release the platform registration
    ///
    /// Idempotent. The reveal state is kept as-is.
    pub fn detach<P>(&mut self, platform: &mut P)
    where
        P: IntersectionPlatform + ?Sized,
    {
        if let Some(handle) = self.handle.take() {
            platform.disconnect(handle);
            trace!(element = %self.element, handle = handle.raw(), "detached");
        }
        self.on_reveal = None;
    }

    pub fn is_revealed(&self) -> bool {
        self.latch.is_set()
    }

    /// Is the controller still receiving entries?
    pub fn is_attached(&self) -> bool {
        self.handle.is_some()
    }

    /// Why the controller is inert, if it is
    pub fn inert_reason(&self) -> Option<ReasonCode> {
        self.attach_reason
    }

    pub fn handle(&self) -> Option<ObserverHandle> {
        self.handle
    }

    pub fn element(&self) -> &str {
        &self.element
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

/// Clamp to 0..=1; non-finite values fall back to the default
fn normalize_threshold(threshold: f64) -> f64 {
    if threshold.is_finite() {
        threshold.clamp(0.0, 1.0)
    } else {
        REVEAL_THRESHOLD_DEFAULT
    }
}

// =============================================================================
// TESTS
// =============================================================================
