//! HTTP routes
//!
//! Thin axum layer over [`Wiki`]: extract request data, run the wiki
//! operation on the blocking pool, and turn its outcome into a page or a
//! redirect.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Form, Router};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use encyclopedia_core::{
    AddOutcome, EditOutcome, EditPage, EntryForm, SearchOutcome, Wiki, WikiError,
};

use crate::templates;

/// Shared state for all handlers
pub struct AppState {
    pub wiki: Wiki,
}

/// Build the router with all routes
pub fn router(wiki: Wiki) -> Router {
    let state = Arc::new(AppState { wiki });

    Router::new()
        .route("/", get(index))
        .route("/wiki/{title}", get(view_entry))
        .route("/wiki/{title}/edit", get(edit_page).post(edit_submit))
        .route("/search", get(search))
        .route("/add", get(add_page).post(add_submit))
        .route("/random", get(random))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// A failed request, answered with 500
pub struct AppError(anyhow::Error);

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("Request failed: {:#}", self.0);
        if let Some(hint) = recovery_hint(&self.0) {
            tracing::error!("Hint: {}", hint);
        }
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Internal error: {}", self.0),
        )
            .into_response()
    }
}

fn recovery_hint(err: &anyhow::Error) -> Option<&'static str> {
    match err.downcast_ref::<WikiError>()? {
        WikiError::Storage(storage) => storage.recovery_suggestion(),
        WikiError::EmptyStore => Some("Create an entry first."),
    }
}

type HandlerResult<T> = Result<T, AppError>;

/// Run a wiki operation off the async runtime
async fn with_wiki<T, F>(state: &Arc<AppState>, op: F) -> HandlerResult<T>
where
    F: FnOnce(&Wiki) -> Result<T, WikiError> + Send + 'static,
    T: Send + 'static,
{
    let state = Arc::clone(state);
    let result = tokio::task::spawn_blocking(move || op(&state.wiki)).await?;
    Ok(result?)
}

fn to_entry(title: &str) -> Redirect {
    Redirect::to(&templates::entry_url(title))
}

// -- / --

async fn index(State(state): State<Arc<AppState>>) -> HandlerResult<Html<String>> {
    let names = with_wiki(&state, |wiki| wiki.list()).await?;
    Ok(Html(templates::index(&names)))
}

// -- /wiki/{title} --

async fn view_entry(
    State(state): State<Arc<AppState>>,
    Path(title): Path<String>,
) -> HandlerResult<Html<String>> {
    let page = with_wiki(&state, move |wiki| Ok(wiki.view(&title))).await?;
    Ok(Html(templates::entry(&page)))
}

// -- /search --

#[derive(Deserialize)]
struct SearchParams {
    q: Option<String>,
}

async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> HandlerResult<Response> {
    let query = params.q;
    let lookup = query.clone();
    let outcome = with_wiki(&state, move |wiki| wiki.search(lookup.as_deref())).await?;

    Ok(match outcome {
        SearchOutcome::Redirect(title) => to_entry(&title).into_response(),
        SearchOutcome::Results(results) => {
            Html(templates::search(query.as_deref().unwrap_or(""), &results)).into_response()
        }
    })
}

// -- /add --

async fn add_page() -> Html<String> {
    Html(templates::add(&EntryForm::default(), None))
}

async fn add_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<EntryForm>,
) -> HandlerResult<Response> {
    let outcome = with_wiki(&state, move |wiki| wiki.add(form)).await?;

    Ok(match outcome {
        AddOutcome::Created(title) => to_entry(&title).into_response(),
        AddOutcome::Rejected { form, error } => {
            Html(templates::add(&form, Some(error))).into_response()
        }
    })
}

// -- /wiki/{title}/edit --

async fn edit_page(
    State(state): State<Arc<AppState>>,
    Path(title): Path<String>,
) -> HandlerResult<Html<String>> {
    let page = with_wiki(&state, move |wiki| wiki.edit_form(&title)).await?;
    Ok(Html(templates::edit(&page, None)))
}

async fn edit_submit(
    State(state): State<Arc<AppState>>,
    Path(title): Path<String>,
    Form(form): Form<EntryForm>,
) -> HandlerResult<Response> {
    let outcome = with_wiki(&state, move |wiki| wiki.edit(&title, form)).await?;

    Ok(match outcome {
        EditOutcome::Saved(title) => to_entry(&title).into_response(),
        EditOutcome::Rejected { title, form, error } => {
            let page = EditPage {
                title,
                content: form.content,
            };
            Html(templates::edit(&page, Some(error))).into_response()
        }
    })
}

// -- /random --

async fn random(State(state): State<Arc<AppState>>) -> HandlerResult<Redirect> {
    let title = with_wiki(&state, |wiki| wiki.random()).await?;
    Ok(to_entry(&title))
}
