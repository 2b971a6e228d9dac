//! Page dispatch.
//!
//! `GET /` shows whatever page the session last navigated to; the sidebar
//! buttons post to `/navigate` to change it.

use axum::{Form, response::Redirect};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::middleware::RequireSeller;
use crate::models::Page;

/// Navigation form data.
#[derive(Debug, Deserialize)]
pub struct NavigateForm {
    pub page: String,
}

/// Redirect to the session's current page.
pub async fn index(seller: RequireSeller) -> Redirect {
    Redirect::to(seller.dashboard.page.path())
}

/// Switch the current page.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for an unknown page name.
pub async fn navigate(
    mut seller: RequireSeller,
    Form(form): Form<NavigateForm>,
) -> Result<Redirect> {
    let page: Page = form.page.parse().map_err(AppError::BadRequest)?;
    seller.dashboard.navigate(page);
    seller.save().await?;
    Ok(Redirect::to(page.path()))
}
