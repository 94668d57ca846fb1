//! Status and method enums for orders and products.
//!
//! All enums are stored as `TEXT` columns (snake_case) in Postgres.

use serde::{Deserialize, Serialize};

/// The kind of product being sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(feature = "postgres", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    /// A subscription sold as plan + duration (e.g. Netflix Premium, 1 month).
    Subscription,
    /// A gift card sold in fixed denominations.
    GiftCard,
    /// A plain product sold at its base price (e.g. a game top-up bundle).
    #[default]
    Simple,
}

/// Order lifecycle status.
///
/// Transitions are forward-only and enforced server-side via
/// [`OrderStatus::can_transition_to`]. The legacy system only gated these in
/// the UI; here an illegal transition is rejected at the API layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(feature = "postgres", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Cancelled,
    Refunded,
}

impl OrderStatus {
    /// The statuses this order may move to next.
    ///
    /// No backward transitions, no skips: pending orders are either taken up
    /// or cancelled, processing orders complete, and only completed orders
    /// can be refunded.
    #[must_use]
    pub const fn allowed_transitions(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Processing, Self::Cancelled],
            Self::Processing => &[Self::Completed],
            Self::Completed => &[Self::Refunded],
            Self::Cancelled | Self::Refunded => &[],
        }
    }

    /// Whether moving from `self` to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_transitions().contains(&next)
    }

    /// Whether this status is terminal.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        self.allowed_transitions().is_empty()
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Refunded => "refunded",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            "refunded" => Ok(Self::Refunded),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// Manual-transfer account details shown to the shopper for a payment method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentAccount {
    /// The merchant account identifier (wallet ID or account number).
    pub account_id: &'static str,
    /// The registered account holder name.
    pub account_name: &'static str,
}

/// The fixed set of supported payment methods.
///
/// These are manual-transfer rails: the shopper pays out-of-band and uploads
/// a screenshot as proof. The set is not runtime-configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(feature = "postgres", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Esewa,
    Khalti,
    Connectips,
    InternetBanking,
}

impl PaymentMethod {
    /// All payment methods, in display order.
    pub const ALL: [Self; 4] = [
        Self::Esewa,
        Self::Khalti,
        Self::Connectips,
        Self::InternetBanking,
    ];

    /// Human-readable display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Esewa => "eSewa",
            Self::Khalti => "Khalti",
            Self::Connectips => "ConnectIPS",
            Self::InternetBanking => "Internet Banking",
        }
    }

    /// Brand color used on the payment selection screen.
    #[must_use]
    pub const fn brand_color(self) -> &'static str {
        match self {
            Self::Esewa => "#60bb46",
            Self::Khalti => "#5c2d91",
            Self::Connectips => "#0065b3",
            Self::InternetBanking => "#1a1a2e",
        }
    }

    /// The merchant account the shopper should transfer to.
    #[must_use]
    pub const fn account(self) -> PaymentAccount {
        match self {
            Self::Esewa => PaymentAccount {
                account_id: "9801234567",
                account_name: "Kinmel Store Pvt. Ltd.",
            },
            Self::Khalti => PaymentAccount {
                account_id: "9801234567",
                account_name: "Kinmel Store Pvt. Ltd.",
            },
            Self::Connectips => PaymentAccount {
                account_id: "0123456789012345",
                account_name: "Kinmel Store Pvt. Ltd.",
            },
            Self::InternetBanking => PaymentAccount {
                account_id: "01-2345678-90",
                account_name: "Kinmel Store Pvt. Ltd.",
            },
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Esewa => "esewa",
            Self::Khalti => "khalti",
            Self::Connectips => "connectips",
            Self::InternetBanking => "internet_banking",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "esewa" => Ok(Self::Esewa),
            "khalti" => Ok(Self::Khalti),
            "connectips" => Ok(Self::Connectips),
            "internet_banking" => Ok(Self::InternetBanking),
            _ => Err(format!("invalid payment method: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_transitions() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Processing));
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Completed));
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Refunded));
    }

    #[test]
    fn test_processing_transitions() {
        assert!(OrderStatus::Processing.can_transition_to(OrderStatus::Completed));
        assert!(!OrderStatus::Processing.can_transition_to(OrderStatus::Pending));
        assert!(!OrderStatus::Processing.can_transition_to(OrderStatus::Cancelled));
    }

    #[test]
    fn test_completed_can_only_refund() {
        assert_eq!(
            OrderStatus::Completed.allowed_transitions(),
            &[OrderStatus::Refunded]
        );
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(OrderStatus::Refunded.is_terminal());
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::Processing.is_terminal());
        assert!(!OrderStatus::Completed.is_terminal());
    }

    #[test]
    fn test_no_backward_transitions() {
        for status in [
            OrderStatus::Processing,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
            OrderStatus::Refunded,
        ] {
            assert!(!status.can_transition_to(OrderStatus::Pending));
        }
    }

    #[test]
    fn test_status_roundtrip() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Processing,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
            OrderStatus::Refunded,
        ] {
            let parsed: OrderStatus = status.to_string().parse().expect("roundtrip");
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_payment_method_labels() {
        assert_eq!(PaymentMethod::Esewa.label(), "eSewa");
        assert_eq!(PaymentMethod::InternetBanking.label(), "Internet Banking");
    }

    #[test]
    fn test_payment_method_roundtrip() {
        for method in PaymentMethod::ALL {
            let parsed: PaymentMethod = method.to_string().parse().expect("roundtrip");
            assert_eq!(parsed, method);
        }
    }

    #[test]
    fn test_payment_method_serde_snake_case() {
        let json = serde_json::to_string(&PaymentMethod::InternetBanking).expect("serialize");
        assert_eq!(json, "\"internet_banking\"");
    }

    #[test]
    fn test_every_method_has_an_account() {
        for method in PaymentMethod::ALL {
            let account = method.account();
            assert!(!account.account_id.is_empty());
            assert!(!account.account_name.is_empty());
        }
    }
}
