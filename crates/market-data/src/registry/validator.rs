//! Quote data validation.
//!
//! Sanity checks applied to every quote before the aggregator returns it:
//! - Non-finite price/change values are rejected
//! - A zero price is rejected (venues report 0 when they have no trade)
//! - Negative prices are accepted with a warning (some futures settle
//!   below zero)

use log::warn;

use crate::config::MarketDataConfig;
use crate::errors::MarketDataError;
use crate::models::Quote;

/// Validation severity levels.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValidationSeverity {
    /// Hard failure - reject quote, try next provider.
    Hard,
    /// Soft warning - accept quote but log warning.
    Soft,
}

#[derive(Clone, Debug)]
struct ValidationIssue {
    severity: ValidationSeverity,
    message: String,
}

/// Quote validator configuration.
#[derive(Clone, Debug, Default)]
pub struct ValidatorConfig {
    /// Whether to reject quotes with negative prices instead of warning.
    pub reject_negative_prices: bool,
}

/// Quote data validator.
#[derive(Default)]
pub struct QuoteValidator {
    config: ValidatorConfig,
}

impl QuoteValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn from_config(config: &MarketDataConfig) -> Self {
        Self::with_config(ValidatorConfig {
            reject_negative_prices: config.reject_negative_prices,
        })
    }

    /// Validate a quote.
    ///
    /// Returns `Ok(())` if the quote is usable. Warnings are logged but do
    /// not cause rejection.
    pub fn validate(&self, quote: &Quote) -> Result<(), MarketDataError> {
        let mut issues = Vec::new();

        for (field, value) in [
            ("price", quote.price),
            ("change", quote.change),
            ("change_pct", quote.change_pct),
        ] {
            if !value.is_finite() {
                issues.push(ValidationIssue {
                    severity: ValidationSeverity::Hard,
                    message: format!("Non-finite {}: {}", field, value),
                });
            }
        }

        if quote.price == 0.0 {
            issues.push(ValidationIssue {
                severity: ValidationSeverity::Hard,
                message: "Zero price".to_string(),
            });
        } else if quote.price < 0.0 {
            issues.push(ValidationIssue {
                severity: if self.config.reject_negative_prices {
                    ValidationSeverity::Hard
                } else {
                    ValidationSeverity::Soft
                },
                message: format!("Negative price: {}", quote.price),
            });
        }

        let errors: Vec<&str> = issues
            .iter()
            .filter(|i| i.severity == ValidationSeverity::Hard)
            .map(|i| i.message.as_str())
            .collect();

        if !errors.is_empty() {
            return Err(MarketDataError::ValidationFailed {
                message: errors.join("; "),
            });
        }

        for issue in issues.iter().filter(|i| i.severity == ValidationSeverity::Soft) {
            warn!(
                "Quote validation warning for {} from {}: {}",
                quote.symbol, quote.source, issue.message
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn make_quote(price: f64, change: f64) -> Quote {
        Quote {
            symbol: "CL=F".to_string(),
            price,
            change,
            change_pct: 1.0,
            updated_at: Utc::now(),
            source: "TEST".to_string(),
        }
    }

    #[test]
    fn test_valid_quote() {
        let validator = QuoteValidator::new();
        assert!(validator.validate(&make_quote(100.0, 1.0)).is_ok());
    }

    #[test]
    fn test_non_finite_rejected() {
        let validator = QuoteValidator::new();

        let result = validator.validate(&make_quote(f64::NAN, 1.0));
        match result {
            Err(MarketDataError::ValidationFailed { message }) => {
                assert!(message.contains("Non-finite price"));
            }
            other => panic!("Expected ValidationFailed, got {:?}", other),
        }

        assert!(validator.validate(&make_quote(10.0, f64::INFINITY)).is_err());
    }

    #[test]
    fn test_zero_price_rejected() {
        let validator = QuoteValidator::new();
        match validator.validate(&make_quote(0.0, -190.0)) {
            Err(MarketDataError::ValidationFailed { message }) => {
                assert_eq!(message, "Zero price");
            }
            other => panic!("Expected ValidationFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_price_is_soft_by_default() {
        let validator = QuoteValidator::new();
        assert!(validator.validate(&make_quote(-37.63, -55.9)).is_ok());
    }

    #[test]
    fn test_custom_config_rejects_negative() {
        let validator = QuoteValidator::with_config(ValidatorConfig {
            reject_negative_prices: true,
        });
        assert!(validator.validate(&make_quote(-1.0, 0.0)).is_err());
    }

    #[test]
    fn test_from_config_follows_negative_price_setting() {
        let mut config = MarketDataConfig::default();
        assert!(QuoteValidator::from_config(&config)
            .validate(&make_quote(-1.0, 0.0))
            .is_ok());

        config.reject_negative_prices = true;
        assert!(QuoteValidator::from_config(&config)
            .validate(&make_quote(-1.0, 0.0))
            .is_err());
    }
}
