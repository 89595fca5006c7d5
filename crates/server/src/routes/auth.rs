//! Authentication route handlers.
//!
//! Provides the login form, password login, and logout.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::i18n::{Message, UiText};
use crate::middleware::{clear_current_admin, set_current_admin};
use crate::models::CurrentAdmin;
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub ui: &'static UiText,
    pub error: Option<&'static str>,
    pub username: String,
}

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Render the login page.
///
/// GET /login
pub async fn login_page(State(state): State<AppState>) -> LoginTemplate {
    LoginTemplate {
        ui: state.ui(),
        error: None,
        username: String::new(),
    }
}

/// Authenticate with username and password.
///
/// On success the session ID is rotated and the admin is redirected to
/// `/admin`. On failure the form is shown again with a message that does not
/// say which field was wrong.
///
/// POST /login
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let auth = AuthService::new(state.pool());

    match auth.login(&form.username, &form.password).await {
        Ok(user) => {
            session.cycle_id().await?;
            set_current_admin(&session, &CurrentAdmin::from(&user)).await?;
            set_sentry_user(&user.id, &user.username);
            tracing::info!(user_id = %user.id, username = %user.username, "Admin logged in");
            Ok(Redirect::to("/admin").into_response())
        }
        Err(AuthError::InvalidCredentials) => {
            tracing::warn!(username = %form.username, "Failed admin login attempt");
            Ok(LoginTemplate {
                ui: state.ui(),
                error: Some(state.message(Message::InvalidCredentials)),
                username: form.username,
            }
            .into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// Logout and clear session.
///
/// GET|POST /logout
pub async fn logout(session: Session) -> Result<Redirect> {
    clear_current_admin(&session).await?;
    clear_sentry_user();
    Ok(Redirect::to("/"))
}
