//! Where-clause fingerprints

use std::fmt::Debug;

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Anything that can fingerprint the filter of a query
pub trait WhereChecksum: Debug + Send + Sync {
    fn create_where_checksum(&self) -> String;
}

/// Comparison applied by a [`Condition`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Equals,
    NotEquals,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Condition {
    pub field: String,
    pub operator: Operator,
    pub value: Value,
}

/// Ordered list of conditions, joined with AND
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WhereClause {
    conditions: Vec<Condition>,
}

impl WhereClause {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and(mut self, field: impl Into<String>, operator: Operator, value: impl Into<Value>) -> Self {
        self.conditions.push(Condition {
            field: field.into(),
            operator,
            value: value.into(),
        });
        self
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

impl WhereChecksum for WhereClause {
    /// Hex SHA-256 of the canonical JSON of the conditions
    fn create_where_checksum(&self) -> String {
        // Serializing plain strings, enums and JSON values cannot fail
        let canonical = serde_json::to_vec(&self.conditions).unwrap_or_default();
        hex::encode(Sha256::digest(&canonical))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_is_deterministic() {
        let a = WhereClause::new().and("user_id", Operator::Equals, 42);
        let b = WhereClause::new().and("user_id", Operator::Equals, 42);

        assert_eq!(a.create_where_checksum(), b.create_where_checksum());
        assert_eq!(a.create_where_checksum().len(), 64);
    }

    #[test]
    fn test_checksum_differs_by_value_and_operator() {
        let base = WhereClause::new().and("user_id", Operator::Equals, 42);
        let other_value = WhereClause::new().and("user_id", Operator::Equals, 43);
        let other_op = WhereClause::new().and("user_id", Operator::GreaterThan, 42);

        assert_ne!(base.create_where_checksum(), other_value.create_where_checksum());
        assert_ne!(base.create_where_checksum(), other_op.create_where_checksum());
    }

    #[test]
    fn test_condition_order_matters() {
        let ab = WhereClause::new()
            .and("a", Operator::Equals, 1)
            .and("b", Operator::Equals, 2);
        let ba = WhereClause::new()
            .and("b", Operator::Equals, 2)
            .and("a", Operator::Equals, 1);

        assert_ne!(ab.create_where_checksum(), ba.create_where_checksum());
    }
}
