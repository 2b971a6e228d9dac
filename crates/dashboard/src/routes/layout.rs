//! Shared view data for the page chrome.

use crate::models::{CurrentSeller, Page};

/// One sidebar navigation button.
#[derive(Debug, Clone)]
pub struct NavItem {
    pub title: &'static str,
    pub slug: &'static str,
    pub active: bool,
}

/// Data every authenticated page passes to `base.html`.
#[derive(Debug, Clone)]
pub struct PageLayout {
    pub title: &'static str,
    pub seller_email: String,
    pub marketplace: String,
    pub nav: Vec<NavItem>,
}

impl PageLayout {
    #[must_use]
    pub fn new(page: Page, seller: &CurrentSeller, marketplace: &str) -> Self {
        Self {
            title: page.title(),
            seller_email: seller.email.to_string(),
            marketplace: marketplace.to_string(),
            nav: Page::ALL
                .into_iter()
                .map(|p| NavItem {
                    title: p.title(),
                    slug: p.slug(),
                    active: p == page,
                })
                .collect(),
        }
    }
}

/// Format a price for display.
#[must_use]
pub fn format_price(amount: f64) -> String {
    format!("${amount:.2}")
}
