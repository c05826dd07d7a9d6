//! Contact form with a simulated submission
//!
//! Submitting starts a timer task standing in for a network round trip.
//! Nothing leaves the process. Unmounting aborts the task, and a completion
//! that still races in finds the view unmounted and is dropped.

use std::sync::Arc;
use std::time::Duration;
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use parking_lot::Mutex;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use crate::error::{FolioError, Result};
use crate::types::ReasonCode;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

pub const TOAST_TITLE: &str = "Message sent! 🌊";
pub const TOAST_DESCRIPTION: &str = "Thanks for reaching out! I'll get back to you soon.";

/// What the visitor typed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactMessage {
    pub fn new(name: impl Into<String>, email: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    /// Required fields and email shape
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [("name", &self.name), ("email", &self.email), ("message", &self.message)] {
            if value.trim().is_empty() {
                return Err(FolioError::InvalidSubmission(format!("{} is required", field)));
            }
        }
        if !EMAIL_RE.is_match(self.email.trim()) {
            return Err(FolioError::InvalidSubmission(format!("'{}' is not an email address", self.email)));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    Idle,
    Submitting,
}

/// Confirmation popup raised on delivery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

/// State the form renders from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactView {
    pub mounted: bool,
    pub state: SubmissionState,
    /// Field values; cleared when a message is delivered
    pub draft: ContactMessage,
    pub toasts: Vec<Toast>,
    pub delivered: u32,
}

impl ContactView {
    fn mounted() -> Self {
        Self {
            mounted: true,
            state: SubmissionState::Idle,
            draft: ContactMessage::default(),
            toasts: Vec::new(),
            delivered: 0,
        }
    }
}

/// The contact section's form
#[derive(Debug)]
pub struct ContactForm {
    view: Arc<Mutex<ContactView>>,
    delay: Duration,
    pending: Option<JoinHandle<ReasonCode>>,
}

impl ContactForm {
    /// A mounted, idle form
    pub fn new(delay: Duration) -> Self {
        Self {
            view: Arc::new(Mutex::new(ContactView::mounted())),
            delay,
            pending: None,
        }
    }

    /// Start the simulated send
    ///
    /// The delivery task runs on the current tokio runtime; without one the
    /// submit fails and the form stays idle. The submit button is disabled
    /// while a message is in flight, so a second submit is rejected.
    pub fn submit(&mut self, message: ContactMessage) -> Result<ReasonCode> {
        let runtime = {
            let mut view = self.view.lock();
            if !view.mounted {
                return Err(FolioError::NotMounted);
            }
            if view.state == SubmissionState::Submitting {
                return Err(FolioError::SubmissionInFlight);
            }
            if let Err(e) = message.validate() {
                debug!(reason = ReasonCode::R304_CONTACT_REJECTED.code(), error = %e, "contact rejected");
                return Err(e);
            }
            let runtime = Handle::try_current().map_err(|e| FolioError::NoRuntime(e.to_string()))?;
            view.state = SubmissionState::Submitting;
            view.draft = message;
            runtime
        };

        let view = Arc::clone(&self.view);
        let delay = self.delay;
        self.pending = Some(runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            complete(&view)
        }));

        info!(delay_ms = delay.as_millis() as u64, reason = ReasonCode::R301_CONTACT_SUBMITTING.code(), "contact submitting");
        Ok(ReasonCode::R301_CONTACT_SUBMITTING)
    }

    /// Wait for an in-flight submission, if any
    ///
    /// `None` when nothing was pending or the task was aborted.
    pub async fn settle(&mut self) -> Option<ReasonCode> {
        let handle = self.pending.take()?;
        handle.await.ok()
    }

    /// Tear the form down; any pending completion is discarded
    pub fn unmount(&mut self) {
        let was_pending = {
            let mut view = self.view.lock();
            view.mounted = false;
            view.state == SubmissionState::Submitting
        };
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        if was_pending {
            info!(reason = ReasonCode::R303_CONTACT_DISCARDED.code(), "pending contact completion discarded");
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.view.lock().mounted
    }

    pub fn state(&self) -> SubmissionState {
        self.view.lock().state
    }

    /// Copy of the current view
    pub fn snapshot(&self) -> ContactView {
        self.view.lock().clone()
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Drop for ContactForm {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

/// Apply a finished round trip, unless the form is gone
fn complete(view: &Mutex<ContactView>) -> ReasonCode {
    let mut view = view.lock();
    if !view.mounted {
        debug!(reason = ReasonCode::R303_CONTACT_DISCARDED.code(), "completion after teardown");
        return ReasonCode::R303_CONTACT_DISCARDED;
    }
    view.state = SubmissionState::Idle;
    view.draft = ContactMessage::default();
    view.delivered += 1;
    view.toasts.push(Toast {
        title: TOAST_TITLE.to_string(),
        description: TOAST_DESCRIPTION.to_string(),
        timestamp: Utc::now(),
    });
    info!(reason = ReasonCode::R302_CONTACT_DELIVERED.code(), "contact delivered");
    ReasonCode::R302_CONTACT_DELIVERED
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn bottle() -> ContactMessage {
        ContactMessage::new("Captain Nemo", "captain@ocean.com", "Ahoy")
    }

    #[test]
    fn test_submit_without_runtime_stays_idle() {
        let mut form = ContactForm::new(Duration::from_millis(10));
        let err = form.submit(bottle()).unwrap_err();
        assert!(matches!(err, FolioError::NoRuntime(_)));

        let view = form.snapshot();
        assert_eq!(view.state, SubmissionState::Idle);
        assert_eq!(view.draft, ContactMessage::default());
        // Rejected before any state changed, so a later submit is not in flight
        assert!(matches!(form.submit(bottle()), Err(FolioError::NoRuntime(_))));
    }

    #[test]
    fn test_validation() {
        assert!(bottle().validate().is_ok());
        assert!(ContactMessage::new("", "a@b.co", "hi").validate().is_err());
        assert!(ContactMessage::new("N", "a@b.co", "   ").validate().is_err());
        assert!(ContactMessage::new("N", "not-an-email", "hi").validate().is_err());
        assert!(ContactMessage::new("N", "a@b", "hi").validate().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_submission_completes_after_delay() {
        let mut form = ContactForm::new(Duration::from_millis(2000));
        assert_eq!(form.submit(bottle()).unwrap(), ReasonCode::R301_CONTACT_SUBMITTING);
        assert_eq!(form.state(), SubmissionState::Submitting);
        assert_eq!(form.snapshot().draft, bottle());

        assert_eq!(form.settle().await, Some(ReasonCode::R302_CONTACT_DELIVERED));
        let view = form.snapshot();
        assert_eq!(view.state, SubmissionState::Idle);
        assert_eq!(view.delivered, 1);
        assert_eq!(view.toasts.len(), 1);
        assert_eq!(view.toasts[0].title, TOAST_TITLE);
        assert_eq!(view.draft, ContactMessage::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_submit_rejected() {
        let mut form = ContactForm::new(Duration::from_millis(2000));
        form.submit(bottle()).unwrap();
        assert!(matches!(form.submit(bottle()), Err(FolioError::SubmissionInFlight)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unmount_discards_completion() {
        let mut form = ContactForm::new(Duration::from_millis(2000));
        form.submit(bottle()).unwrap();
        tokio::time::sleep(Duration::from_millis(500)).await;
        form.unmount();

        tokio::time::sleep(Duration::from_millis(5000)).await;
        let view = form.snapshot();
        assert!(!view.mounted);
        assert_eq!(view.delivered, 0);
        assert!(view.toasts.is_empty());
        assert_eq!(form.settle().await, None);
        assert!(matches!(form.submit(bottle()), Err(FolioError::NotMounted)));
    }

    #[test]
    fn test_late_completion_is_dropped() {
        let view = Mutex::new(ContactView::mounted());
        view.lock().state = SubmissionState::Submitting;
        view.lock().mounted = false;

        assert_eq!(complete(&view), ReasonCode::R303_CONTACT_DISCARDED);
        assert_eq!(view.lock().delivered, 0);
        assert_eq!(view.lock().state, SubmissionState::Submitting);
    }
}
