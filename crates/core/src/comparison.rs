//! Comparison operators used by persisted alert criteria.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Operator stored in `tab_criterio_alerta.comparacao`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Comparison {
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = "<")]
    Less,
    #[serde(rename = ">=")]
    GreaterOrEqual,
    #[serde(rename = "<=")]
    LessOrEqual,
    #[serde(rename = "==")]
    Equal,
    #[serde(rename = "!=")]
    NotEqual,
    /// Inclusive range between the two critical values.
    #[serde(rename = "entre")]
    Between,
}

impl Comparison {
    pub const ALL: [Comparison; 7] = [
        Comparison::Greater,
        Comparison::Less,
        Comparison::GreaterOrEqual,
        Comparison::LessOrEqual,
        Comparison::Equal,
        Comparison::NotEqual,
        Comparison::Between,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Comparison::Greater => ">",
            Comparison::Less => "<",
            Comparison::GreaterOrEqual => ">=",
            Comparison::LessOrEqual => "<=",
            Comparison::Equal => "==",
            Comparison::NotEqual => "!=",
            Comparison::Between => "entre",
        }
    }

    /// Whether the operator needs a second critical value.
    pub fn needs_upper_value(self) -> bool {
        self == Comparison::Between
    }

    /// Check that the critical values are usable with this operator.
    pub fn validate(self, upper: Option<f64>) -> Result<(), CoreError> {
        if self.needs_upper_value() && upper.is_none() {
            return Err(CoreError::Validation(
                "comparison 'entre' requires a second critical value".into(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Comparison {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s.trim())
            .ok_or_else(|| CoreError::Validation(format!("unknown comparison operator '{s}'")))
    }
}

/// Used when decoding the stored text column.
impl TryFrom<String> for Comparison {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn parses_stored_operators() {
        for op in Comparison::ALL {
            assert_eq!(op.as_str().parse::<Comparison>().unwrap(), op);
        }
        assert_matches!("=>".parse::<Comparison>(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn between_requires_upper_value() {
        assert_matches!(Comparison::Between.validate(None), Err(CoreError::Validation(_)));
        assert!(Comparison::Between.validate(Some(10.0)).is_ok());
        assert!(Comparison::Less.validate(None).is_ok());
    }

    #[test]
    fn serializes_as_symbol() {
        assert_eq!(serde_json::to_string(&Comparison::Between).unwrap(), "\"entre\"");
        let op: Comparison = serde_json::from_str("\">=\"").unwrap();
        assert_eq!(op, Comparison::GreaterOrEqual);
    }
}
