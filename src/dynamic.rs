//! Attribute values that are either literal integers or formulas.
//!
//! A configuration value wrapped in parentheses is a formula and is
//! evaluated against the canvas variables on every draw; anything else is
//! read as an unsigned integer.

use log::debug;

use crate::formula::{self, FormulaError};
use crate::variables::VariableContext;

/// A literal value or a deferred formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DynamicValue {
    Resolved(i32),
    /// `last` is the most recent result (or the value before the formula
    /// was assigned) until the formula is evaluated again.
    Deferred { formula: String, last: i32 },
}

impl Default for DynamicValue {
    fn default() -> Self {
        DynamicValue::Resolved(0)
    }
}

impl DynamicValue {
    /// Build from configuration text, starting from `default`.
    pub fn from_text(text: &str, default: i32) -> Self {
        let mut value = DynamicValue::Resolved(default);
        value.resolve(text);
        value
    }

    /// Update from configuration text.
    ///
    /// Empty text leaves the value untouched; text starting with `(` becomes
    /// a formula; anything else is parsed as an unsigned integer, reading
    /// `0` on failure.
    pub fn resolve(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }

        if text.starts_with('(') {
            let last = self.value();
            *self = DynamicValue::Deferred {
                formula: text.to_string(),
                last,
            };
        } else {
            *self = DynamicValue::Resolved(parse_unsigned(text));
        }
    }

    /// The current value; stale for a formula that has not been evaluated
    /// since it was assigned.
    pub fn value(&self) -> i32 {
        match self {
            DynamicValue::Resolved(v) => *v,
            DynamicValue::Deferred { last, .. } => *last,
        }
    }

    pub fn formula(&self) -> Option<&str> {
        match self {
            DynamicValue::Resolved(_) => None,
            DynamicValue::Deferred { formula, .. } => Some(formula),
        }
    }

    /// Re-evaluate a pending formula and return the fresh value.
    pub fn evaluate(&mut self, variables: &VariableContext) -> Result<i32, FormulaError> {
        match self {
            DynamicValue::Resolved(v) => Ok(*v),
            DynamicValue::Deferred { formula: source, last } => {
                debug!(target: "easel::draw", "Executing formula '{}'", source);
                *last = formula::evaluate(source, variables)?.as_int();
                Ok(*last)
            }
        }
    }
}

/// Permissive unsigned parse used for literal attributes.
pub(crate) fn parse_unsigned(text: &str) -> i32 {
    text.trim()
        .parse::<u32>()
        .ok()
        .and_then(|v| i32::try_from(v).ok())
        .unwrap_or(0)
}

/// Permissive signed parse used for literal attributes.
pub(crate) fn parse_signed(text: &str) -> i32 {
    text.trim().parse::<i32>().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_leaves_value_untouched() {
        let mut v = DynamicValue::Resolved(7);
        v.resolve("");
        assert_eq!(v, DynamicValue::Resolved(7));

        let mut f = DynamicValue::Deferred {
            formula: "(width)".into(),
            last: 3,
        };
        f.resolve("");
        assert_eq!(f.formula(), Some("(width)"));
        assert_eq!(f.value(), 3);
    }

    #[test]
    fn test_formula_keeps_stale_value() {
        let mut v = DynamicValue::Resolved(5);
        v.resolve("(a+1)");
        assert_eq!(v.formula(), Some("(a+1)"));
        assert_eq!(v.value(), 5);
    }

    #[test]
    fn test_literal_clears_formula() {
        let mut v = DynamicValue::from_text("(a+1)", 0);
        v.resolve("42");
        assert_eq!(v, DynamicValue::Resolved(42));
        assert_eq!(v.formula(), None);
    }

    #[test]
    fn test_literal_parse_failure_reads_zero() {
        assert_eq!(DynamicValue::from_text("abc", 9).value(), 0);
        assert_eq!(DynamicValue::from_text("-5", 9).value(), 0);
    }

    #[test]
    fn test_evaluate_updates_last() {
        let mut vars = VariableContext::new();
        vars.add("a", 41);
        let mut v = DynamicValue::from_text("(a+1)", 0);
        assert_eq!(v.evaluate(&vars), Ok(42));
        assert_eq!(v.value(), 42);

        vars.add("a", 1);
        assert_eq!(v.evaluate(&vars), Ok(2));
    }

    #[test]
    fn test_evaluate_error_keeps_previous() {
        let vars = VariableContext::new();
        let mut v = DynamicValue::Deferred {
            formula: "(1 / 0)".into(),
            last: 4,
        };
        assert_eq!(v.evaluate(&vars), Err(FormulaError::DivisionByZero));
        assert_eq!(v.value(), 4);
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_unsigned(" 12 "), 12);
        assert_eq!(parse_unsigned("-1"), 0);
        assert_eq!(parse_signed("-1"), -1);
        assert_eq!(parse_signed("x"), 0);
    }
}
