//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `HEMLINE_ORDER_TRANSITIONS` - `strict` (default) or `permissive`
//! - `HEMLINE_LOW_STOCK_THRESHOLD` - Stock level at or below which a product
//!   is flagged on the dashboard (default: 5)

use std::fmt;
use std::str::FromStr;

use hemline_client::config::{ConfigError, parse_env_or_default};
use hemline_core::{OrderStatus, TransitionError};

const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 5;

/// How order status changes are checked before they are sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPolicy {
    /// Only edges of the status graph: one step forward, or cancel from a
    /// non-terminal status.
    #[default]
    Strict,
    /// Any status may be set from any other.
    Permissive,
}

impl TransitionPolicy {
    /// Check a requested change from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns `TransitionError` if the policy forbids the change.
    pub fn check(self, from: OrderStatus, to: OrderStatus) -> Result<(), TransitionError> {
        match self {
            Self::Strict => from.transition_to(to).map(drop),
            Self::Permissive if from == to => Err(TransitionError { from, to }),
            Self::Permissive => Ok(()),
        }
    }

    /// Statuses an order currently in `from` may be moved to.
    #[must_use]
    pub fn targets(self, from: OrderStatus) -> Vec<OrderStatus> {
        OrderStatus::all()
            .into_iter()
            .filter(|to| self.check(from, *to).is_ok())
            .collect()
    }
}

impl FromStr for TransitionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "permissive" => Ok(Self::Permissive),
            other => Err(format!("expected 'strict' or 'permissive', got '{other}'")),
        }
    }
}

impl fmt::Display for TransitionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Strict => "strict",
            Self::Permissive => "permissive",
        })
    }
}

/// Admin console configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminConfig {
    pub transition_policy: TransitionPolicy,
    pub low_stock_threshold: u32,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            transition_policy: TransitionPolicy::default(),
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            transition_policy: parse_env_or_default(
                "HEMLINE_ORDER_TRANSITIONS",
                TransitionPolicy::default(),
            )?,
            low_stock_threshold: parse_env_or_default(
                "HEMLINE_LOW_STOCK_THRESHOLD",
                DEFAULT_LOW_STOCK_THRESHOLD,
            )?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_follows_graph() {
        let strict = TransitionPolicy::Strict;
        assert!(strict.check(OrderStatus::Pending, OrderStatus::Processing).is_ok());
        assert!(strict.check(OrderStatus::Pending, OrderStatus::Delivered).is_err());
        assert!(strict.check(OrderStatus::Delivered, OrderStatus::Cancelled).is_err());
        assert_eq!(
            strict.targets(OrderStatus::Shipped),
            vec![OrderStatus::Delivered, OrderStatus::Cancelled]
        );
        assert!(strict.targets(OrderStatus::Cancelled).is_empty());
    }

    #[test]
    fn test_permissive_allows_skips_and_reversals() {
        let permissive = TransitionPolicy::Permissive;
        assert!(permissive.check(OrderStatus::Pending, OrderStatus::Delivered).is_ok());
        assert!(permissive.check(OrderStatus::Delivered, OrderStatus::Pending).is_ok());
        assert!(permissive.check(OrderStatus::Shipped, OrderStatus::Shipped).is_err());
        assert_eq!(permissive.targets(OrderStatus::Pending).len(), 4);
    }

    #[test]
    fn test_parse_policy() {
        assert_eq!(
            "Permissive".parse::<TransitionPolicy>(),
            Ok(TransitionPolicy::Permissive)
        );
        assert!("lenient".parse::<TransitionPolicy>().is_err());
    }

    #[test]
    fn test_defaults() {
        let config = AdminConfig::default();
        assert_eq!(config.transition_policy, TransitionPolicy::Strict);
        assert_eq!(config.low_stock_threshold, 5);
    }
}
