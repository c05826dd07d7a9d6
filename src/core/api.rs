//! HTTP + WebSocket preview API
//!
//! Endpoints:
//! - GET /health - Health check
//! - GET / - Fully revealed page (etag)
//! - GET /content - Portfolio content as JSON
//! - POST /session/new - Mount a page in a headless viewport
//! - GET /session/{id} - Session status
//! - POST /session/{id}/scroll - Scroll by offset or to a section
//! - POST /session/{id}/theme/toggle - Flip the theme
//! - POST /session/{id}/theme/ambient - Report an ambient scheme change
//! - POST /session/{id}/projects/{project}/toggle - Expand/collapse a card
//! - POST /session/{id}/contact - Submit the contact form
//! - GET /session/{id}/page - Page HTML in its current state
//! - DELETE /session/{id} - Unmount and drop the session
//! - WS /ws/{id} - Live reveal and theme events

use axum::{
    extract::{Path, State, WebSocketUpgrade, ws::{Message, WebSocket}},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use futures_util::{SinkExt, StreamExt};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, RwLock};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::core::contact::{ContactMessage, ContactView};
use crate::core::content::fingerprint;
use crate::core::page::Page;
use crate::core::render::{render_static, Renderer};
use crate::core::theme::{MemoryStore, RootClasses, ThemeController};
use crate::core::viewport::SimulatedViewport;
use crate::error::FolioError;
use crate::types::{PageEvent, PortfolioContent, ReasonCode, RevealEvent, SectionId, Theme, ThemeEvent};

/// One mounted page
#[derive(Debug)]
pub struct Session {
    pub id: String,
    pub page: Page<SimulatedViewport>,
    pub theme: ThemeController<MemoryStore, RootClasses>,
    pub update_tx: broadcast::Sender<PageEvent>,
    last_active: Mutex<Instant>,
}

impl Session {
    /// Mark the session as in use
    fn touch(&self) {
        *self.last_active.lock() = Instant::now();
    }

    fn idle_for(&self, now: Instant) -> Duration {
        now.saturating_duration_since(*self.last_active.lock())
    }

    fn publish_reveals(&self, events: &[RevealEvent]) {
        for event in events {
            let _ = self.update_tx.send(PageEvent::Reveal(event.clone()));
        }
    }

    fn publish_theme(&self, reason: ReasonCode) {
        let _ = self.update_tx.send(PageEvent::Theme(ThemeEvent::new(self.theme.theme(), reason)));
    }

    fn status(&self) -> SessionStatusResponse {
        SessionStatusResponse {
            session_id: self.id.clone(),
            scroll_top: self.page.scroll_top(),
            max_scroll: self.page.platform().max_scroll(),
            revealed: self.page.revealed_sections(),
            expanded: self.page.state().expanded.into_iter().collect(),
            theme: self.theme.theme(),
            explicit_theme: self.theme.has_explicit_choice(),
            contact: self.page.contact().snapshot(),
        }
    }
}

/// App state
pub struct AppState {
    pub sessions: RwLock<HashMap<String, Session>>,
    pub content: Arc<PortfolioContent>,
    pub config: Config,
}

/// Create new session request
#[derive(Debug, Default, Deserialize)]
pub struct NewSessionRequest {
    /// Ambient color scheme of the simulated visitor
    #[serde(default)]
    pub prefers_dark: bool,
    /// Theme already stored by an earlier visit
    pub stored_theme: Option<Theme>,
}

/// Create new session response
#[derive(Debug, Serialize, Deserialize)]
pub struct NewSessionResponse {
    pub session_id: String,
    pub websocket_url: String,
    pub theme: Theme,
    pub events: Vec<RevealEvent>,
}

/// Session status response
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionStatusResponse {
    pub session_id: String,
    pub scroll_top: f64,
    pub max_scroll: f64,
    pub revealed: Vec<SectionId>,
    pub expanded: Vec<String>,
    pub theme: Theme,
    pub explicit_theme: bool,
    pub contact: ContactView,
}

/// Scroll request: an absolute offset, a relative delta, or a section anchor
#[derive(Debug, Deserialize)]
pub struct ScrollRequest {
    pub to: Option<f64>,
    pub by: Option<f64>,
    pub section: Option<String>,
}

/// Scroll response
#[derive(Debug, Serialize, Deserialize)]
pub struct ScrollResponse {
    pub scroll_top: f64,
    pub events: Vec<RevealEvent>,
}

/// Ambient scheme change
#[derive(Debug, Deserialize)]
pub struct AmbientRequest {
    pub dark: bool,
}

/// Theme response
#[derive(Debug, Serialize, Deserialize)]
pub struct ThemeResponse {
    pub theme: Theme,
    pub reason: ReasonCode,
    pub root_class: String,
}

/// Project toggle response
#[derive(Debug, Serialize, Deserialize)]
pub struct ToggleResponse {
    pub project: String,
    pub expanded: bool,
}

/// Contact submission response
#[derive(Debug, Serialize, Deserialize)]
pub struct ContactResponse {
    pub reason: ReasonCode,
    pub delay_ms: u64,
}

/// Health response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub sessions_active: usize,
}

/// Error body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Failed request: status plus a JSON error body
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse { error: self.message })).into_response()
    }
}

impl From<FolioError> for ApiError {
    fn from(err: FolioError) -> Self {
        let status = match &err {
            FolioError::InvalidSubmission(_) => StatusCode::UNPROCESSABLE_ENTITY,
            FolioError::SubmissionInFlight | FolioError::NotMounted => StatusCode::CONFLICT,
            FolioError::UnknownSection(_) | FolioError::UnknownProject(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        reject(status, err.to_string())
    }
}

fn reject(status: StatusCode, message: impl Into<String>) -> ApiError {
    ApiError {
        status,
        message: message.into(),
    }
}

fn not_found(id: &str) -> ApiError {
    reject(StatusCode::NOT_FOUND, format!("no session '{}'", id))
}

/// Create the API router
pub fn create_router(config: Config, content: Arc<PortfolioContent>) -> Router {
    let state = Arc::new(AppState {
        sessions: RwLock::new(HashMap::new()),
        content,
        config,
    });

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/content", get(get_content))
        .route("/session/new", post(create_session))
        .route("/session/:id", get(get_session).delete(delete_session))
        .route("/session/:id/scroll", post(scroll))
        .route("/session/:id/theme/toggle", post(toggle_theme))
        .route("/session/:id/theme/ambient", post(ambient_theme))
        .route("/session/:id/projects/:project/toggle", post(toggle_project))
        .route("/session/:id/contact", post(submit_contact))
        .route("/session/:id/page", get(get_page))
        .route("/ws/:id", get(websocket_handler))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let sessions = state.sessions.read().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        sessions_active: sessions.len(),
    })
}

/// Static export of the page, every section revealed
async fn index(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let html = render_static(&state.content, &state.config, Theme::Light);
    let etag = format!("\"{}\"", fingerprint(html.as_bytes()));

    let matches = headers
        .get(header::IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .map(|v| v == etag)
        .unwrap_or(false);
    if matches {
        return (StatusCode::NOT_MODIFIED, [(header::ETAG, etag)]).into_response();
    }

    ([(header::ETAG, etag)], Html(html)).into_response()
}

async fn get_content(State(state): State<Arc<AppState>>) -> Json<PortfolioContent> {
    Json(state.content.as_ref().clone())
}

/// Mount a page for a simulated visitor
async fn create_session(
    State(state): State<Arc<AppState>>,
    body: Option<Json<NewSessionRequest>>,
) -> Result<Json<NewSessionResponse>, ApiError> {
    let req = body.map(|Json(r)| r).unwrap_or_default();
    let session_id = generate_session_id();
    let (tx, _) = broadcast::channel(100);

    let store = match req.stored_theme {
        Some(theme) => MemoryStore::with_theme(theme),
        None => MemoryStore::new(),
    };
    let (theme, reason) = ThemeController::init(store, RootClasses::new(), req.prefers_dark);

    let mut page = Page::simulated(Arc::clone(&state.content), &state.config);
    let events = page.pump();

    let session = Session {
        id: session_id.clone(),
        page,
        theme,
        update_tx: tx,
        last_active: Mutex::new(Instant::now()),
    };
    session.publish_theme(reason);
    let current = session.theme.theme();

    let mut sessions = state.sessions.write().await;
    let evicted = evict_sessions(&mut sessions, &state.config);
    sessions.insert(session_id.clone(), session);
    info!(session = %session_id, theme = %current, evicted, "session mounted");

    Ok(Json(NewSessionResponse {
        session_id: session_id.clone(),
        websocket_url: format!("/ws/{}", session_id),
        theme: current,
        events,
    }))
}

/// Get session status
async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SessionStatusResponse>, ApiError> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or_else(|| not_found(&id))?;
    session.touch();
    Ok(Json(session.status()))
}

/// Unmount and forget a session
async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let mut sessions = state.sessions.write().await;
    let mut session = sessions.remove(&id).ok_or_else(|| not_found(&id))?;
    session.page.unmount();
    info!(session = %id, "session unmounted");
    Ok(StatusCode::NO_CONTENT)
}

async fn scroll(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<ScrollRequest>,
) -> Result<Json<ScrollResponse>, ApiError> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or_else(|| not_found(&id))?;
    session.touch();

    let events = match (req.section, req.to, req.by) {
        (Some(anchor), _, _) => {
            let section = SectionId::from_anchor(&anchor)
                .ok_or_else(|| FolioError::UnknownSection(anchor.clone()))?;
            session.page.navigate(section)?
        }
        (None, Some(offset), _) => session.page.scroll_to(offset),
        (None, None, Some(delta)) => session.page.scroll_by(delta),
        (None, None, None) => {
            return Err(reject(StatusCode::BAD_REQUEST, "expected one of 'to', 'by' or 'section'"))
        }
    };

    session.publish_reveals(&events);
    debug!(session = %id, revealed = events.len(), "scrolled");
    Ok(Json(ScrollResponse {
        scroll_top: session.page.scroll_top(),
        events,
    }))
}

async fn toggle_theme(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ThemeResponse>, ApiError> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or_else(|| not_found(&id))?;
    session.touch();

    let theme = session.theme.toggle()?;
    session.publish_theme(ReasonCode::R203_THEME_TOGGLED);
    Ok(Json(ThemeResponse {
        theme,
        reason: ReasonCode::R203_THEME_TOGGLED,
        root_class: session.theme.surface().to_attribute(),
    }))
}

async fn ambient_theme(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<AmbientRequest>,
) -> Result<Json<ThemeResponse>, ApiError> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or_else(|| not_found(&id))?;
    session.touch();

    let reason = session.theme.ambient_changed(req.dark);
    if reason == ReasonCode::R204_AMBIENT_APPLIED {
        session.publish_theme(reason);
    }
    Ok(Json(ThemeResponse {
        theme: session.theme.theme(),
        reason,
        root_class: session.theme.surface().to_attribute(),
    }))
}

async fn toggle_project(
    State(state): State<Arc<AppState>>,
    Path((id, project)): Path<(String, String)>,
) -> Result<Json<ToggleResponse>, ApiError> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or_else(|| not_found(&id))?;
    session.touch();
    let expanded = session.page.toggle_project(&project)?;
    Ok(Json(ToggleResponse { project, expanded }))
}

async fn submit_contact(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(message): Json<ContactMessage>,
) -> Result<(StatusCode, Json<ContactResponse>), ApiError> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or_else(|| not_found(&id))?;
    session.touch();

    let reason = session.page.contact_mut().submit(message)?;
    Ok((
        StatusCode::ACCEPTED,
        Json(ContactResponse {
            reason,
            delay_ms: session.page.contact().delay().as_millis() as u64,
        }),
    ))
}

/// The page as this session currently sees it
async fn get_page(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Html<String>, ApiError> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or_else(|| not_found(&id))?;
    session.touch();

    let page_state = session.page.state();
    let html = Renderer::new(&state.content, &page_state, &state.config.motion)
        .with_theme(session.theme.theme(), session.theme.surface().to_attribute())
        .render();
    Ok(Html(html))
}

/// WebSocket handler for live updates
async fn websocket_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ws: WebSocketUpgrade,
) -> Result<impl IntoResponse, ApiError> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or_else(|| not_found(&id))?;
    session.touch();
    let rx = session.update_tx.subscribe();
    drop(sessions);

    Ok(ws.on_upgrade(move |socket| async move {
        handle_websocket(socket, rx).await;
    }))
}

/// Forward page events until either side goes away
async fn handle_websocket(socket: WebSocket, mut rx: broadcast::Receiver<PageEvent>) {
    let (mut sender, mut receiver) = socket.split();

    let mut forward = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    let json = serde_json::to_string(&event).unwrap_or_default();
                    if sender.send(Message::Text(json)).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "websocket subscriber lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    let mut drain = tokio::spawn(async move {
        while let Some(Ok(message)) = receiver.next().await {
            if matches!(message, Message::Close(_)) {
                break;
            }
        }
    });

    tokio::select! {
        _ = &mut forward => drain.abort(),
        _ = &mut drain => forward.abort(),
    }
}

/// Make room for one more session
///
/// Idle sessions go first; past the cap the least recently used are
/// unmounted. Returns how many were dropped.
fn evict_sessions(sessions: &mut HashMap<String, Session>, config: &Config) -> usize {
    let now = Instant::now();
    let idle = config.server.session_idle();
    let mut expired: Vec<String> = sessions
        .iter()
        .filter(|(_, s)| s.idle_for(now) >= idle)
        .map(|(id, _)| id.clone())
        .collect();

    let max = config.server.max_sessions.max(1);
    let remaining = sessions.len() - expired.len();
    if remaining >= max {
        let mut live: Vec<(&String, Duration)> = sessions
            .iter()
            .filter(|(id, _)| !expired.contains(id))
            .map(|(id, s)| (id, s.idle_for(now)))
            .collect();
        live.sort_by(|a, b| b.1.cmp(&a.1));
        expired.extend(live.into_iter().take(remaining + 1 - max).map(|(id, _)| id.clone()));
    }

    for id in &expired {
        if let Some(mut session) = sessions.remove(id) {
            session.page.unmount();
            debug!(session = %id, "session evicted");
        }
    }
    expired.len()
}

/// Generate session ID
fn generate_session_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("session_{:x}{:04x}", nanos, seq & 0xffff)
}

/// Run the API server
pub async fn run_server(addr: &str, config: Config, content: Arc<PortfolioContent>) -> crate::Result<()> {
    let router = create_router(config, content);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr, "preview API listening");
    println!("🌊 Tideline preview running on {}", addr);
    println!("  GET    /                         - Static page");
    println!("  GET    /content                  - Portfolio content");
    println!("  POST   /session/new              - Mount a page");
    println!("  GET    /session/:id              - Get status");
    println!("  POST   /session/:id/scroll       - Scroll");
    println!("  POST   /session/:id/theme/toggle - Flip theme");
    println!("  POST   /session/:id/contact      - Send a message");
    println!("  GET    /session/:id/page         - Current HTML");
    println!("  DELETE /session/:id              - Unmount");
    println!("  WS     /ws/:id                   - Live updates");
    println!("  GET    /health                   - Health check");
    axum::serve(listener, router).await?;
    Ok(())
}
