use crate::core::member::MemberId;
use crate::core::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A shared expense paid by one member on behalf of the whole group.
///
/// The amount is split equally across all accepted members when balances are
/// computed; the expense itself only records who fronted the money.
///
/// Expenses are immutable once created.
///
/// # Examples
///
/// ```
/// use split_engine::core::expense::Expense;
/// use split_engine::core::member::MemberId;
/// use split_engine::core::money::Money;
///
/// let dinner = Expense::new(MemberId::new("alice"), Money::new(4_800))
///     .with_description("dinner");
///
/// assert_eq!(dinner.amount(), Money::new(4_800));
/// assert_eq!(dinner.description(), Some("dinner"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier for this expense.
    id: Uuid,
    /// The member who paid.
    payer: MemberId,
    /// The amount paid, in minor units. Must be positive.
    amount: Money,
    /// When the expense occurred.
    date: DateTime<Utc>,
    /// When the record was created.
    created_at: DateTime<Utc>,
    /// Optional free-text description.
    description: Option<String>,
}

impl Expense {
    /// Create a new expense dated now.
    ///
    /// # Panics
    ///
    /// Panics if `amount` is not positive.
    pub fn new(payer: MemberId, amount: Money) -> Self {
        assert!(
            amount.is_positive(),
            "Expense amount must be positive, got {}",
            amount
        );
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            payer,
            amount,
            date: now,
            created_at: now,
            description: None,
        }
    }

    /// Create an expense with a specific ID (useful for testing / determinism).
    pub fn with_id(id: Uuid, payer: MemberId, amount: Money) -> Self {
        assert!(amount.is_positive());
        let now = Utc::now();
        Self {
            id,
            payer,
            amount,
            date: now,
            created_at: now,
            description: None,
        }
    }

    /// Set the date the expense occurred.
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

    pub fn payer(&self) -> &MemberId {
        &self.payer
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
