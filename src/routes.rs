//! HTTP handlers for pages, sign-in and the bookmark API.

use std::convert::Infallible;
use std::time::Duration;

use axum::{
    extract::{FromRequestParts, Path, Query, Request, State},
    http::{header, request::Parts, HeaderMap, StatusCode},
    middleware::Next,
    response::{
        sse::{Event, KeepAlive},
        Html, IntoResponse, Redirect, Response, Sse,
    },
    Form, Json,
};
use futures::Stream;
use serde::Deserialize;
use tokio_stream::StreamExt;
use tracing::{error, warn};

use crate::app::AppState;
use crate::services::actions::{add_bookmark_action, delete_bookmark_action, update_bookmark_action};
use crate::services::bookmark_service::BookmarkServiceTrait;
use crate::types::action::{ActionResult, FailureKind};
use crate::types::bookmark::BookmarkForm;
use crate::types::errors::BookmarkError;
use crate::types::user::User;
use crate::ui::pages;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "smartmark_session";

/// Reads the session token from the `Cookie` header, if present.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, token)| token.to_string())
        .filter(|token| !token.is_empty())
}

fn session_cookie(token: &str, max_age: i64, secure: bool) -> String {
    let mut cookie = format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// The signed-in user for this request, if any.
pub struct Caller(pub Option<User>);

impl FromRequestParts<AppState> for Caller {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = session_token(&parts.headers);
        Ok(Caller(state.auth.current_user(token.as_deref())))
    }
}

/// Redirects `/dashboard*` to `/login` without a session, and `/login` to
/// `/dashboard` with one.
pub async fn route_gate(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let path = request.uri().path();
    let protected = path.starts_with("/dashboard");
    let login = path == "/login";

    if protected || login {
        let token = session_token(request.headers());
        let signed_in = state.auth.current_user(token.as_deref()).is_some();
        if protected && !signed_in {
            return Redirect::to("/login").into_response();
        }
        if login && signed_in {
            return Redirect::to("/dashboard").into_response();
        }
    }

    next.run(request).await
}

fn status_for(result: &ActionResult) -> StatusCode {
    match result.failure {
        None => StatusCode::OK,
        Some(FailureKind::Validation) => StatusCode::BAD_REQUEST,
        Some(FailureKind::Unauthorized) => StatusCode::UNAUTHORIZED,
        Some(FailureKind::NotFound) => StatusCode::NOT_FOUND,
        Some(FailureKind::Unexpected) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn action_response(result: ActionResult) -> Response {
    (status_for(&result), Json(result)).into_response()
}

fn unauthorized() -> Response {
    action_response(ActionResult::failed(
        FailureKind::Unauthorized,
        BookmarkError::Unauthorized.to_string(),
    ))
}

// ─── Pages ───

pub async fn index(Caller(user): Caller) -> Redirect {
    match user {
        Some(_) => Redirect::to("/dashboard"),
        None => Redirect::to("/login"),
    }
}

#[derive(Deserialize)]
pub struct LoginQuery {
    error: Option<String>,
}

pub async fn login_page(State(state): State<AppState>, Query(query): Query<LoginQuery>) -> Html<String> {
    let notice = query
        .error
        .map(|_| "Sign-in failed. Please try again.");
    Html(pages::login_page(&state.auth.authorize_url(), notice))
}

pub async fn dashboard(State(state): State<AppState>, Caller(user): Caller) -> Response {
    let Some(user) = user else {
        return Redirect::to("/login").into_response();
    };

    match state.bookmarks.get_bookmarks(Some(&user)) {
        Ok(bookmarks) => Html(pages::dashboard_page(&user, &bookmarks)).into_response(),
        Err(e) => {
            error!(user_id = %user.id, error = %e, "failed to load dashboard");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to load bookmarks").into_response()
        }
    }
}

// ─── Auth ───

#[derive(Deserialize)]
pub struct CallbackQuery {
    code: Option<String>,
}

/// OAuth redirect target: trades the code for a session cookie.
pub async fn auth_callback(State(state): State<AppState>, Query(query): Query<CallbackQuery>) -> Response {
    let Some(code) = query.code.filter(|c| !c.is_empty()) else {
        return Redirect::to("/dashboard").into_response();
    };

    match state.auth.exchange_code_for_session(&code).await {
        Ok(session) => {
            let max_age = (session.expires_at - now_secs()).max(0);
            let cookie = session_cookie(&session.token, max_age, state.cookie_secure);
            ([(header::SET_COOKIE, cookie)], Redirect::to("/dashboard")).into_response()
        }
        Err(e) => {
            warn!(error = %e, "oauth callback failed");
            Redirect::to("/login?error=auth").into_response()
        }
    }
}

pub async fn sign_out(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = session_token(&headers) {
        if let Err(e) = state.auth.sign_out(&token) {
            warn!(error = %e, "failed to delete session");
        }
    }
    let cleared = session_cookie("", 0, state.cookie_secure);
    ([(header::SET_COOKIE, cleared)], Redirect::to("/login")).into_response()
}

fn now_secs() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

// ─── Bookmark API ───

pub async fn list_bookmarks(State(state): State<AppState>, Caller(user): Caller) -> Response {
    match state.bookmarks.get_bookmarks(user.as_ref()) {
        Ok(bookmarks) => Json(bookmarks).into_response(),
        Err(BookmarkError::Unauthorized) => unauthorized(),
        Err(e) => {
            error!(error = %e, "failed to list bookmarks");
            action_response(ActionResult::failed(
                FailureKind::Unexpected,
                "Failed to load bookmarks",
            ))
        }
    }
}

pub async fn add_bookmark(
    State(state): State<AppState>,
    Caller(user): Caller,
    Form(form): Form<BookmarkForm>,
) -> Response {
    action_response(add_bookmark_action(&state.bookmarks, user.as_ref(), &form))
}

pub async fn update_bookmark(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Caller(user): Caller,
    Form(form): Form<BookmarkForm>,
) -> Response {
    action_response(update_bookmark_action(&state.bookmarks, user.as_ref(), &id, &form))
}

pub async fn delete_bookmark(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Caller(user): Caller,
) -> Response {
    action_response(delete_bookmark_action(&state.bookmarks, user.as_ref(), &id))
}

/// Server-Sent Events stream of the caller's bookmark changes.
pub async fn bookmark_changes(
    State(state): State<AppState>,
    Caller(user): Caller,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, Response> {
    let user = user.ok_or_else(unauthorized)?;

    let stream = state
        .feed
        .subscribe(&user.id)
        .into_stream()
        .filter_map(|event| match serde_json::to_string(&event) {
            Ok(json) => Some(Ok(Event::default().event(event.kind()).data(json))),
            Err(e) => {
                warn!(error = %e, "failed to encode change event");
                None
            }
        });

    Ok(Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keepalive"),
    ))
}
