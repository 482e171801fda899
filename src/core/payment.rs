use crate::core::member::MemberId;
use crate::core::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A direct settlement payment from one member to another.
///
/// Payments are how members actually square up outside the group's shared
/// expenses: handing over cash, a bank transfer, and so on. Recording one
/// shifts both parties' net balances toward zero.
///
/// Payments are immutable once created.
///
/// # Examples
///
/// ```
/// use split_engine::core::payment::Payment;
/// use split_engine::core::member::MemberId;
/// use split_engine::core::money::Money;
///
/// let p = Payment::new(MemberId::new("bob"), MemberId::new("alice"), Money::new(500));
/// assert_eq!(p.amount(), Money::new(500));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier for this payment.
    id: Uuid,
    /// The member who paid.
    from: MemberId,
    /// The member who received the money.
    to: MemberId,
    /// The amount transferred, in minor units. Must be positive.
    amount: Money,
    /// When the payment was made.
    date: DateTime<Utc>,
    /// When the record was created.
    created_at: DateTime<Utc>,
    /// Optional free-text description.
    description: Option<String>,
}

impl Payment {
    /// Create a new payment dated now.
    ///
    /// # Panics
    ///
    /// Panics if `amount` is not positive.
    pub fn new(from: MemberId, to: MemberId, amount: Money) -> Self {
        assert!(
            amount.is_positive(),
            "Payment amount must be positive, got {}",
            amount
        );
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            from,
            to,
            amount,
            date: now,
            created_at: now,
            description: None,
        }
    }

    /// Create a payment with a specific ID (useful for testing / determinism).
    pub fn with_id(id: Uuid, from: MemberId, to: MemberId, amount: Money) -> Self {
        assert!(amount.is_positive());
        let now = Utc::now();
        Self {
            id,
            from,
            to,
            amount,
            date: now,
            created_at: now,
            description: None,
        }
    }

    /// Set the date the payment was made.
    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    /// Set a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    // --- Accessors ---

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn from(&self) -> &MemberId {
        &self.from
    }

    pub fn to(&self) -> &MemberId {
        &self.to
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_creation() {
        let p = Payment::new(MemberId::new("bob"), MemberId::new("alice"), Money::new(500));
        assert_eq!(p.from().as_str(), "bob");
        assert_eq!(p.to().as_str(), "alice");
        assert_eq!(p.amount(), Money::new(500));
    }

    #[test]
    #[should_panic(expected = "must be positive")]
    fn test_payment_zero_amount() {
        Payment::new(MemberId::new("bob"), MemberId::new("alice"), Money::ZERO);
    }

    #[test]
    fn test_payment_description() {
        let p = Payment::new(MemberId::new("bob"), MemberId::new("alice"), Money::new(100))
            .with_description("venmo");
        assert_eq!(p.description(), Some("venmo"));
    }
}
