//! Session-related types.
//!
//! Everything the dashboard remembers about a visit lives in one
//! [`DashboardSession`] value stored under [`session_keys::DASHBOARD`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use seller_pro_core::{Email, Product, ProductId};

use crate::services::catalog::sample_catalog;
use crate::services::pricing::{LinearPriceModel, PriceAdvisor, PricingStrategy};

/// Session-stored seller identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentSeller {
    /// Seller's email address; keys the saved-product portfolio.
    pub email: Email,
}

/// Dashboard pages, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    #[default]
    Dashboard,
    Research,
    Advertising,
    Competitors,
    Portfolio,
}

impl Page {
    /// All pages, in navigation order.
    pub const ALL: [Self; 5] = [
        Self::Dashboard,
        Self::Research,
        Self::Advertising,
        Self::Competitors,
        Self::Portfolio,
    ];

    /// Navigation label.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Research => "Product Research",
            Self::Advertising => "Advertising Tools",
            Self::Competitors => "Competitor Monitor",
            Self::Portfolio => "My Products",
        }
    }

    /// URL path of the page.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Dashboard => "/dashboard",
            Self::Research => "/research",
            Self::Advertising => "/ads",
            Self::Competitors => "/competitors",
            Self::Portfolio => "/portfolio",
        }
    }

    /// Form value used by the navigation buttons.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Research => "research",
            Self::Advertising => "advertising",
            Self::Competitors => "competitors",
            Self::Portfolio => "portfolio",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Page {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.slug() == s || p.title() == s)
            .ok_or_else(|| format!("unknown page '{s}'"))
    }
}

/// Resources built once per session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    /// Session dataset shown on the dashboard.
    pub products: Vec<Product>,
    /// Price model trained on `products`, if the strategy uses one.
    pub price_model: Option<LinearPriceModel>,
}

impl Workspace {
    /// Build the session dataset and train the price model once.
    #[must_use]
    pub fn build(strategy: PricingStrategy) -> Self {
        let products = sample_catalog();
        let price_model = strategy.train(&products);
        tracing::debug!(
            %strategy,
            products = products.len(),
            trained = price_model.is_some(),
            "Initialized session workspace"
        );
        Self {
            products,
            price_model,
        }
    }

    /// Price advisor over this dataset.
    #[must_use]
    pub fn advisor(&self) -> PriceAdvisor<'_> {
        PriceAdvisor::new(self.price_model.as_ref(), &self.products)
    }

    /// Find a product in the dataset.
    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }
}

/// Transient per-visit UI state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSession {
    /// Logged-in seller; `None` until the login form is submitted.
    pub seller: Option<CurrentSeller>,
    /// Page shown by `GET /`.
    pub page: Page,
    /// Session resources; `None` until first initialized.
    pub workspace: Option<Workspace>,
    /// Product picked on the dashboard page.
    pub selected_product: Option<ProductId>,
}

impl DashboardSession {
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.seller.is_some()
    }

    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.workspace.is_some()
    }

    /// Mark the seller as logged in.
    pub fn login(&mut self, email: Email) {
        self.seller = Some(CurrentSeller { email });
    }

    /// Build session resources unless that already happened.
    ///
    /// Returns `true` when this call did the work.
    pub fn initialize(&mut self, strategy: PricingStrategy) -> bool {
        if self.workspace.is_some() {
            return false;
        }
        self.workspace = Some(Workspace::build(strategy));
        true
    }

    /// Make `page` the one shown by `GET /`.
    pub fn navigate(&mut self, page: Page) {
        self.page = page;
    }

    /// Select a dashboard product. Ids outside the dataset are ignored.
    ///
    /// Returns whether the selection changed.
    pub fn select_product(&mut self, id: ProductId) -> bool {
        let known = self
            .workspace
            .as_ref()
            .is_some_and(|w| w.product(id).is_some());
        if known && self.selected_product != Some(id) {
            self.selected_product = Some(id);
            return true;
        }
        false
    }

    /// Selected product, defaulting to the first in the dataset.
    #[must_use]
    pub fn selected(&self) -> Option<&Product> {
        let workspace = self.workspace.as_ref()?;
        self.selected_product
            .and_then(|id| workspace.product(id))
            .or_else(|| workspace.products.first())
    }
}

/// Session keys.
pub mod session_keys {
    /// Key for the whole [`super::DashboardSession`].
    pub const DASHBOARD: &str = "dashboard";
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_page_parses_from_slug_and_title() {
        assert_eq!("research".parse::<Page>().unwrap(), Page::Research);
        assert_eq!("Advertising Tools".parse::<Page>().unwrap(), Page::Advertising);
        assert!("settings".parse::<Page>().is_err());
    }

    #[test]
    fn test_default_session_is_blank() {
        let session = DashboardSession::default();
        assert!(!session.is_authenticated());
        assert!(!session.is_initialized());
        assert_eq!(session.page, Page::Dashboard);
    }

    #[test]
    fn test_session_survives_json_round_trip() {
        let session = DashboardSession {
            seller: Some(CurrentSeller {
                email: Email::parse("seller@example.com").unwrap(),
            }),
            page: Page::Competitors,
            workspace: None,
            selected_product: Some(ProductId::new(1003)),
        };
        let value = serde_json::to_value(&session).unwrap();
        assert_eq!(value["page"], "competitors");
        assert_eq!(serde_json::from_value::<DashboardSession>(value).unwrap(), session);
    }

    #[test]
    fn test_initialize_runs_once() {
        let mut session = DashboardSession::default();
        assert!(session.initialize(PricingStrategy::Regression));
        assert!(session.workspace.as_ref().unwrap().price_model.is_some());

        session.workspace.as_mut().unwrap().products.truncate(1);
        assert!(!session.initialize(PricingStrategy::Regression));
        assert_eq!(session.workspace.as_ref().unwrap().products.len(), 1);
    }

    #[test]
    fn test_category_average_strategy_trains_nothing() {
        let workspace = Workspace::build(PricingStrategy::CategoryAverage);
        assert!(workspace.price_model.is_none());
        assert_eq!(workspace.products.len(), 5);
    }

    #[test]
    fn test_selected_defaults_to_first_product() {
        let mut session = DashboardSession::default();
        assert!(session.selected().is_none());

        session.initialize(PricingStrategy::CategoryAverage);
        assert_eq!(session.selected().unwrap().name, "Wireless Headphones");

        assert!(session.select_product(ProductId::new(1004)));
        assert_eq!(session.selected().unwrap().name, "Yoga Mat");
        assert!(!session.select_product(ProductId::new(1004)));
    }

    #[test]
    fn test_unknown_product_selection_is_ignored() {
        let mut session = DashboardSession::default();
        session.initialize(PricingStrategy::CategoryAverage);
        assert!(!session.select_product(ProductId::new(42)));
        assert_eq!(session.selected_product, None);
    }
}
