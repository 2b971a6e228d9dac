//! Login and logout handlers.
//!
//! The login form is a demo gate: any well-formed email is accepted and the
//! password is never checked.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use seller_pro_core::Email;

use crate::error::{clear_sentry_user, set_sentry_user};
use crate::middleware::{clear_dashboard_session, load_dashboard_session, save_dashboard_session};
use crate::state::AppState;

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Query parameters for error display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub marketplace: String,
    pub error: Option<String>,
}

/// Display the login page.
pub async fn login_page(
    State(state): State<AppState>,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    let error = query.error.map(|code| match code.as_str() {
        "email" => "Enter a valid email address".to_string(),
        _ => "Login failed, please try again".to_string(),
    });

    LoginTemplate {
        marketplace: state.config().marketplace_name.clone(),
        error,
    }
}

/// Handle login form submission.
pub async fn login(session: Session, Form(form): Form<LoginForm>) -> Response {
    let email = match Email::parse(&form.email) {
        Ok(email) => email,
        Err(e) => {
            tracing::debug!(error = %e, "Rejected login email");
            return Redirect::to("/login?error=email").into_response();
        }
    };

    let mut dashboard = match load_dashboard_session(&session).await {
        Ok(dashboard) => dashboard,
        Err(e) => {
            tracing::error!("Failed to load session: {e}");
            return Redirect::to("/login?error=session").into_response();
        }
    };

    set_sentry_user(email.as_str());
    tracing::info!(email = %email, "Seller logged in");
    dashboard.login(email);

    if let Err(e) = save_dashboard_session(&session, &dashboard).await {
        tracing::error!("Failed to set session: {e}");
        return Redirect::to("/login?error=session").into_response();
    }

    Redirect::to("/").into_response()
}

/// Handle logout.
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_dashboard_session(&session).await {
        tracing::error!("Failed to clear session: {e}");
    }
    clear_sentry_user();
    Redirect::to("/login").into_response()
}
