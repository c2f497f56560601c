use serde::{Deserialize, Serialize};

use shelfscan_catalog::Product;
use shelfscan_matching::{ConfigError, MatchResult, MatchingConfig, classify_match_with};

/// What the user is doing with the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    /// Registering new stock: every label becomes a product.
    Inventory,
    /// Ringing up a customer: labels resolve to existing products.
    Checkout,
}

impl ScanMode {
    pub fn toggled(self) -> Self {
        match self {
            ScanMode::Inventory => ScanMode::Checkout,
            ScanMode::Checkout => ScanMode::Inventory,
        }
    }
}

/// Routing decision for one scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScanDecision<'a> {
    /// Nothing readable was captured.
    Ignored,
    /// Register the label text as a new product.
    Register { name: String },
    /// Confident single match: add it to the cart without asking.
    AddToCart { product: &'a Product, confidence: f64 },
    /// Ask the user to pick among candidates (possibly just one).
    Choose {
        candidates: Vec<&'a Product>,
        confidence: f64,
    },
    /// Nothing matched; offer to register the label as a new product.
    OfferRegistration { name: String },
}

/// Routes scans using a fixed matching configuration.
#[derive(Debug, Clone, Default)]
pub struct ScanRouter {
    config: MatchingConfig,
}

impl ScanRouter {
    /// Build a router, rejecting confidences and thresholds outside `[0, 1]`.
    pub fn new(config: MatchingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    pub fn route<'a>(
        &self,
        mode: ScanMode,
        raw_text: &str,
        catalog: &'a [Product],
    ) -> ScanDecision<'a> {
        let text = raw_text.trim();
        if text.is_empty() {
            return ScanDecision::Ignored;
        }

        let decision = match mode {
            ScanMode::Inventory => ScanDecision::Register {
                name: text.to_string(),
            },
            ScanMode::Checkout => self.resolve(text, catalog),
        };

        tracing::debug!(?mode, action = decision.action(), "routed scan");
        decision
    }

    fn resolve<'a>(&self, text: &str, catalog: &'a [Product]) -> ScanDecision<'a> {
        match classify_match_with(text, catalog, &self.config) {
            MatchResult::Exact {
                product,
                confidence,
            } if self.config.should_auto_add(confidence) => ScanDecision::AddToCart {
                product,
                confidence,
            },
            MatchResult::Exact {
                product,
                confidence,
            } => ScanDecision::Choose {
                candidates: vec![product],
                confidence,
            },
            // Several products can't be auto-added whatever the confidence.
            MatchResult::Ambiguous {
                candidates,
                confidence,
            } => ScanDecision::Choose {
                candidates,
                confidence,
            },
            MatchResult::None => ScanDecision::OfferRegistration {
                name: text.to_string(),
            },
        }
    }
}

impl ScanDecision<'_> {
    pub fn action(&self) -> &'static str {
        match self {
            ScanDecision::Ignored => "ignored",
            ScanDecision::Register { .. } => "register",
            ScanDecision::AddToCart { .. } => "add_to_cart",
            ScanDecision::Choose { .. } => "choose",
            ScanDecision::OfferRegistration { .. } => "offer_registration",
        }
    }
}
