//! Seller authentication extractor and session helpers.

use axum::{
    extract::{FromRequestParts, OriginalUri},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::{CurrentSeller, DashboardSession, session_keys};
use crate::state::AppState;

/// Extractor that requires a logged-in seller.
///
/// Builds the session workspace on the first authenticated request, so
/// handlers can rely on `dashboard.workspace` being present.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(seller: RequireSeller) -> impl IntoResponse {
///     format!("Hello, {}!", seller.seller.email)
/// }
/// ```
pub struct RequireSeller {
    /// The logged-in seller.
    pub seller: CurrentSeller,
    /// Current session state; call [`save_dashboard_session`] after changing it.
    pub dashboard: DashboardSession,
    /// Underlying session handle.
    pub session: Session,
}

impl RequireSeller {
    /// Persist `self.dashboard` back into the session.
    ///
    /// The session store saves whole records, so two concurrent requests
    /// that both change state in one session resolve last-writer-wins.
    /// Requests that leave the state as loaded do not mark the session
    /// modified and never write it back.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be modified.
    pub async fn save(&self) -> Result<(), tower_sessions::session::Error> {
        save_dashboard_session(&self.session, &self.dashboard).await
    }
}

/// Error returned when a seller is required but nobody is logged in.
#[derive(Debug)]
pub enum AuthRejection {
    /// Redirect to login page (for HTML requests).
    RedirectToLogin,
    /// Unauthorized response (for API requests).
    Unauthorized,
    /// The session store failed.
    SessionUnavailable,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/login").into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
            Self::SessionUnavailable => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}

impl FromRequestParts<AppState> for RequireSeller {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Set by SessionManagerLayer
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or(AuthRejection::SessionUnavailable)?;

        let mut dashboard = load_dashboard_session(&session).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to load session");
            AuthRejection::SessionUnavailable
        })?;

        let Some(seller) = dashboard.seller.clone() else {
            // Nested routers see a stripped path; the original keeps `/api`.
            let path = match parts.extensions.get::<OriginalUri>() {
                Some(original) => original.0.path(),
                None => parts.uri.path(),
            };
            return Err(if path.starts_with("/api/") {
                AuthRejection::Unauthorized
            } else {
                AuthRejection::RedirectToLogin
            });
        };

        if dashboard.initialize(state.config().pricing_strategy) {
            save_dashboard_session(&session, &dashboard)
                .await
                .map_err(|e| {
                    tracing::error!(error = %e, "Failed to save session");
                    AuthRejection::SessionUnavailable
                })?;
        }

        Ok(Self {
            seller,
            dashboard,
            session,
        })
    }
}

/// Read the dashboard state, or a blank one for a new visit.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn load_dashboard_session(
    session: &Session,
) -> Result<DashboardSession, tower_sessions::session::Error> {
    Ok(session
        .get::<DashboardSession>(session_keys::DASHBOARD)
        .await?
        .unwrap_or_default())
}

/// Helper to store the dashboard state in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn save_dashboard_session(
    session: &Session,
    dashboard: &DashboardSession,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::DASHBOARD, dashboard).await
}

/// Helper to drop all session state (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be flushed.
pub async fn clear_dashboard_session(
    session: &Session,
) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use seller_pro_core::Email;
    use tower_sessions::MemoryStore;

    use super::*;
    use crate::models::Page;
    use crate::services::PricingStrategy;

    /// Store a logged-in, initialized session and return its store and a
    /// fresh handle over the saved record, as a later request would see it.
    async fn stored_session() -> (Arc<MemoryStore>, Session) {
        let store = Arc::new(MemoryStore::default());
        let first = Session::new(None, Arc::clone(&store), None);
        let mut dashboard = load_dashboard_session(&first).await.unwrap();
        dashboard.login(Email::parse("seller@example.com").unwrap());
        dashboard.initialize(PricingStrategy::default());
        save_dashboard_session(&first, &dashboard).await.unwrap();
        first.save().await.unwrap();

        let next = Session::new(first.id(), Arc::clone(&store), None);
        (store, next)
    }

    async fn require_seller(session: &Session) -> RequireSeller {
        let dashboard = load_dashboard_session(session).await.unwrap();
        RequireSeller {
            seller: dashboard.seller.clone().unwrap(),
            dashboard,
            session: session.clone(),
        }
    }

    #[tokio::test]
    async fn test_unchanged_state_is_not_written_back() {
        let (_store, session) = stored_session().await;
        let seller = require_seller(&session).await;

        seller.save().await.unwrap();
        assert!(!session.is_modified());
    }

    #[tokio::test]
    async fn test_changed_state_is_written_back() {
        let (store, session) = stored_session().await;
        let mut seller = require_seller(&session).await;

        seller.dashboard.navigate(Page::Research);
        seller.save().await.unwrap();
        assert!(session.is_modified());
        session.save().await.unwrap();

        let later = Session::new(session.id(), store, None);
        let reloaded = load_dashboard_session(&later).await.unwrap();
        assert_eq!(reloaded.page, Page::Research);
    }
}
