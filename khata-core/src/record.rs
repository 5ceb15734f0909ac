//! Normalized transaction records (issuer-agnostic).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Direction of money movement. Always a separate field; `amount` stays a
/// non-negative magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "credit")]
    Credit,
    #[serde(rename = "debit")]
    Debit,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Credit => "credit",
            Direction::Debit => "debit",
        }
    }
}

/// One extracted transaction. Created per successful pattern match, never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub date: NaiveDate,
    /// Trimmed free text, internal whitespace collapsed.
    pub description: String,
    /// Non-negative magnitude; see `direction` for sign.
    pub amount: f64,
    pub direction: Direction,
}

impl TransactionRecord {
    pub fn is_credit(&self) -> bool {
        self.direction == Direction::Credit
    }

    /// Signed view: credits positive, debits negative.
    pub fn signed_amount(&self) -> f64 {
        match self.direction {
            Direction::Credit => self.amount,
            Direction::Debit => -self.amount,
        }
    }
}
