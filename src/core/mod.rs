//! Core modules for Tideline

pub mod reveal;
pub mod viewport;
pub mod stagger;
pub mod theme;
pub mod contact;
pub mod content;
pub mod page;
pub mod render;
pub mod api;

pub use reveal::{IntersectionEntry, IntersectionPlatform, ObserverHandle, RevealController, RevealLatch};
pub use viewport::{ElementBox, NoIntersection, SimulatedViewport};
pub use stagger::{css_seconds, Stagger};
pub use theme::{FileStore, MemoryStore, PreferenceStore, RootClasses, ThemeController, ThemeSurface};
pub use contact::{ContactForm, ContactMessage, ContactView, SubmissionState, Toast};
pub use content::{default_content, fingerprint, load_content, parse_content, resolve_content};
pub use page::{layout_viewport, Page, PageState};
pub use render::{escape, render_static, Entrance, Renderer};
pub use api::{create_router, run_server};
