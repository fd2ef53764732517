use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Warning level applied to new items that do not specify one.
pub const DEFAULT_REORDER_THRESHOLD: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "solution_category", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Lethal,
    NonLethal,
    Medical,
    Chaos,
    Logistics,
    TopSecret,
    Intimidation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "solution_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Available,
    OutOfStock,
    Discontinued,
    Recalled,
}

/// A catalog item as persisted. `id` and `created_at` never change after
/// insert; `updated_at` is refreshed by the store on every update.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Solution {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category: Category,
    pub stock_quantity: i32,
    pub reorder_threshold: i32,
    pub price: BigDecimal,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Inbound payload for create and full-replace update. `status` is optional
/// and may be derived from the stock level; see the service rule.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: Category,
    pub stock_quantity: i32,
    #[serde(default)]
    pub reorder_threshold: Option<i32>,
    pub price: BigDecimal,
    #[serde(default)]
    pub status: Option<Status>,
}

#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub code: &'static str,
    pub message: String,
}

fn invalid(code: &'static str, message: &str) -> ValidationError {
    ValidationError { code, message: message.to_string() }
}

impl SolutionInput {
    /// Structural field checks, run before the business rule ever sees the
    /// payload. Cross-field logic does not belong here.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(invalid("invalid_name", "Name is required"));
        }
        if self.stock_quantity < 0 {
            return Err(invalid("invalid_stock_quantity", "Stock cannot be negative"));
        }
        if matches!(self.reorder_threshold, Some(t) if t < 0) {
            return Err(invalid("invalid_reorder_threshold", "Threshold cannot be negative"));
        }
        if self.price < BigDecimal::from(0) {
            return Err(invalid("invalid_price", "Price cannot be negative"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> SolutionInput {
        SolutionInput {
            name: "Grappling Hook".into(),
            description: None,
            category: Category::Logistics,
            stock_quantity: 3,
            reorder_threshold: None,
            price: BigDecimal::from(250),
            status: None,
        }
    }

    #[test]
    fn accepts_well_formed_input() {
        assert!(input().validate().is_ok());
    }

    #[test]
    fn rejects_blank_name() {
        let mut bad = input();
        bad.name = "   ".into();
        let err = bad.validate().unwrap_err();
        assert_eq!(err.code, "invalid_name");
    }

    #[test]
    fn rejects_negative_stock() {
        let mut bad = input();
        bad.stock_quantity = -1;
        assert_eq!(bad.validate().unwrap_err().code, "invalid_stock_quantity");
    }

    #[test]
    fn rejects_negative_threshold() {
        let mut bad = input();
        bad.reorder_threshold = Some(-5);
        assert_eq!(bad.validate().unwrap_err().code, "invalid_reorder_threshold");
    }

    #[test]
    fn rejects_negative_price() {
        let mut bad = input();
        bad.price = BigDecimal::from(-1);
        assert_eq!(bad.validate().unwrap_err().code, "invalid_price");
    }

    #[test]
    fn zero_values_are_valid() {
        let mut edge = input();
        edge.stock_quantity = 0;
        edge.reorder_threshold = Some(0);
        edge.price = BigDecimal::from(0);
        assert!(edge.validate().is_ok());
    }
}
