// 🌐 Web Layer - Axum router and request handlers
// GET / renders the record list, POST /calculate validates, computes, appends and persists

use crate::presentation::{Presenter, ViewModel};
use crate::record::Record;
use crate::store::RecordStore;
use axum::{
    extract::{rejection::FormRejection, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tower_http::services::ServeDir;

/// Where a successful submission lands
pub const SUCCESS_REDIRECT: &str = "/?status=success";

// ============================================================================
// SHARED STATE
// ============================================================================

/// Shared application state
///
/// The store mutex is the single critical section for append + persist.
#[derive(Clone)]
pub struct AppState {
    store: Arc<Mutex<RecordStore>>,
    presenter: Arc<Presenter>,
}

impl AppState {
    pub fn new(store: RecordStore, presenter: Presenter) -> Self {
        AppState {
            store: Arc::new(Mutex::new(store)),
            presenter: Arc::new(presenter),
        }
    }

    /// Lock the store
    ///
    /// The store is append-only, so a panic in another holder cannot leave
    /// it half-updated and a poisoned lock is safe to reuse.
    pub fn store(&self) -> MutexGuard<'_, RecordStore> {
        self.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug)]
pub enum WebError {
    /// Body could not be decoded as a form
    MalformedForm(String),
    /// Weight or height not a positive number
    InvalidInput,
    /// Template rendering failed
    Render(String),
    MethodNotAllowed,
    NotFound,
}

impl WebError {
    pub fn status(&self) -> StatusCode {
        match self {
            WebError::MalformedForm(_) | WebError::InvalidInput => StatusCode::BAD_REQUEST,
            WebError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
            WebError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            WebError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl std::fmt::Display for WebError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WebError::MalformedForm(reason) => write!(f, "Error parsing form data: {}", reason),
            WebError::InvalidInput => f.write_str(crate::record::INVALID_INPUT_MESSAGE),
            WebError::Render(reason) => write!(f, "Error rendering template: {}", reason),
            WebError::MethodNotAllowed => f.write_str("Method not allowed"),
            WebError::NotFound => f.write_str("Not found"),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

// ============================================================================
// HANDLERS
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub status: Option<String>,
}

/// Form fields; absent fields read as empty and fail numeric validation
#[derive(Debug, Deserialize)]
pub struct CalculateForm {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub weight: String,

    #[serde(default)]
    pub height: String,
}

/// Confirmation shown after a redirect from /calculate
pub fn success_message(record: &Record) -> String {
    format!(
        "Success! {}'s BMI ({:.2}) calculated and saved.",
        record.name(),
        record.bmi()
    )
}

/// GET / - Render the record list
async fn render_page(
    State(state): State<AppState>,
    query: Option<Query<PageQuery>>,
) -> Result<Html<String>, WebError> {
    let show_success = query
        .as_ref()
        .and_then(|Query(q)| q.status.as_deref())
        .is_some_and(|status| status == "success");

    let store = state.store();
    let message = if show_success {
        store.latest().map(success_message)
    } else {
        None
    };

    let view = ViewModel {
        records: store.records(),
        message,
    };

    state.presenter.render(&view).map(Html).map_err(|e| {
        log::error!("Failed to render page: {:#}", e);
        WebError::Render(format!("{:#}", e))
    })
}

/// POST /calculate - Validate, compute, append, persist, redirect
async fn calculate(
    State(state): State<AppState>,
    form: Result<Form<CalculateForm>, FormRejection>,
) -> Result<Redirect, WebError> {
    let Form(form) = form.map_err(|rejection| {
        log::warn!("Rejected malformed form: {}", rejection.body_text());
        WebError::MalformedForm(rejection.body_text())
    })?;

    let record = Record::from_input(&form.name, &form.weight, &form.height).map_err(|_| {
        log::warn!(
            "Rejected submission: weight={:?} height={:?}",
            form.weight,
            form.height
        );
        WebError::InvalidInput
    })?;

    log::info!(
        "{}: BMI {:.2} ({})",
        record.name(),
        record.bmi(),
        record.category()
    );

    let mut store = state.store();
    store.append(record);

    // A failed write keeps the in-memory append and still reports success
    if let Err(e) = store.save() {
        log::error!("Failed to save data: {:#}", e);
    }

    Ok(Redirect::to(SUCCESS_REDIRECT))
}

async fn method_not_allowed() -> WebError {
    WebError::MethodNotAllowed
}

async fn not_found() -> WebError {
    WebError::NotFound
}

// ============================================================================
// ROUTER
// ============================================================================

/// Build the application router
pub fn router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/", get(render_page))
        .route("/calculate", post(calculate).fallback(method_not_allowed))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(not_found)
        .with_state(state)
}

// ============================================================================
// TESTS
// ============================================================================
