//! Request handlers for the share server.
//!
//! Each handler resolves the caller's session from the cookie jar, runs one
//! controller action, and answers with the freshly rendered view (or the file
//! bytes, for downloads).

use axum::Json;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, header};
use axum::response::{Html, Response};
use axum_extra::extract::{CookieJar, WithRejection};
use futures_util::TryStreamExt;
use log::{debug, info};
use serde::Deserialize;
use std::io;
use tokio_util::io::StreamReader;

use crate::controller::{View, delete_notice, upload_notice};
use crate::error::ShareError;
use crate::protocol::page::render_page;
use crate::protocol::responses::{
    ListResponse, SESSION_COOKIE, cleared_session_cookie, download_response, session_cookie,
};
use crate::server::AppState;
use crate::session::Session;
use crate::storage::Scope;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

fn session_token(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE).map(|cookie| cookie.value().to_string())
}

/// The caller's session; anything unrecognised counts as logged out.
async fn current_session(state: &AppState, jar: &CookieJar) -> Session {
    let token = session_token(jar);
    match state.sessions.resolve(token.as_deref()).await {
        Ok(session) => session,
        Err(e) => {
            debug!("Treating request as logged out: {}", e);
            Session::default()
        }
    }
}

/// GET /
pub async fn index(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Html<String>, ShareError> {
    let session = current_session(&state, &jar).await;
    let view = state.controller.render(&session, None).await?;
    let limit = state.controller.storage().limits().max_file_size;
    Ok(Html(render_page(&view, limit)))
}

/// GET /api/view
pub async fn get_view(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<View>, ShareError> {
    let session = current_session(&state, &jar).await;
    Ok(Json(state.controller.render(&session, None).await?))
}

/// Path parameters; undecodable values answer with the JSON error body.
type ApiPath<T> = WithRejection<Path<T>, ShareError>;

/// POST /api/login
///
/// A successful login always issues a new token; the old one is dropped.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Json(request), _): WithRejection<Json<LoginRequest>, ShareError>,
) -> Result<(CookieJar, Json<View>), ShareError> {
    let old_token = session_token(&jar);
    let mut session = current_session(&state, &jar).await;

    let result = state
        .controller
        .login(&mut session, &request.username, &request.password)?;
    if result.was_logged_in {
        info!(
            "User {} re-authenticated in department {}",
            result.username, result.department.name
        );
    } else {
        info!(
            "User {} logged in to department {}",
            result.username, result.department.name
        );
    }

    if let Some(token) = old_token {
        state.sessions.remove(&token).await;
    }
    let token = state.sessions.insert(session.clone()).await;
    let view = state.controller.render(&session, None).await?;

    Ok((jar.add(session_cookie(token)), Json(view)))
}

/// POST /api/logout
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<View>), ShareError> {
    let mut session = match session_token(&jar) {
        Some(token) => state.sessions.remove(&token).await.unwrap_or_default(),
        None => Session::default(),
    };
    if !state.controller.logout(&mut session).was_logged_in {
        debug!("Logout without an active session");
    }

    let view = state.controller.render(&session, None).await?;
    Ok((jar.remove(cleared_session_cookie()), Json(view)))
}

/// GET /api/files/{scope}
pub async fn list_files(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Path(scope), _): ApiPath<Scope>,
) -> Result<Json<ListResponse>, ShareError> {
    let session = current_session(&state, &jar).await;
    let files = state.controller.list(&session, scope).await?;
    Ok(Json(ListResponse { scope, files }))
}

/// PUT /api/files/{scope}/{filename}
///
/// The request body is the file, byte for byte.
pub async fn upload_file(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Path((scope, filename)), _): ApiPath<(Scope, String)>,
    headers: HeaderMap,
    body: Body,
) -> Result<Json<View>, ShareError> {
    let session = current_session(&state, &jar).await;

    let declared_len = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<u64>().ok());

    let stream = body.into_data_stream().map_err(io::Error::other);
    let reader = StreamReader::new(stream);

    state
        .controller
        .upload(&session, reader, &filename, scope, declared_len)
        .await?;

    let notice = upload_notice(scope, &filename);
    Ok(Json(state.controller.render_after_action(&session, notice).await))
}

/// GET /api/files/{scope}/{name}
pub async fn download_file(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Path((scope, name)), _): ApiPath<(Scope, String)>,
) -> Result<Response, ShareError> {
    let session = current_session(&state, &jar).await;
    let retrieved = state.controller.download(&session, scope, &name).await?;
    download_response(retrieved, state.controller.storage().limits().buffer_size)
}

/// DELETE /api/files/{scope}/{name}
pub async fn delete_file(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Path((scope, name)), _): ApiPath<(Scope, String)>,
) -> Result<Json<View>, ShareError> {
    let session = current_session(&state, &jar).await;
    let result = state.controller.delete(&session, scope, &name).await?;

    let notice = delete_notice(scope, &result);
    Ok(Json(state.controller.render_after_action(&session, notice).await))
}
