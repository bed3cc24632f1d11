//! Runtime values and the variable bindings formulas are evaluated against.

use std::collections::HashMap;
use std::fmt;

/// A tagged runtime value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Variant {
    #[default]
    Null,
    Int(i32),
    Str(String),
}

impl Variant {
    /// Integer view: strings are parsed (0 on failure), null is 0.
    pub fn as_int(&self) -> i32 {
        match self {
            Variant::Null => 0,
            Variant::Int(n) => *n,
            Variant::Str(s) => s.trim().parse().unwrap_or(0),
        }
    }

    pub fn as_bool(&self) -> bool {
        match self {
            Variant::Null => false,
            Variant::Int(n) => *n != 0,
            Variant::Str(s) => !s.is_empty(),
        }
    }

    pub fn as_string(&self) -> String {
        match self {
            Variant::Null => String::new(),
            Variant::Int(n) => n.to_string(),
            Variant::Str(s) => s.clone(),
        }
    }

    pub fn is_str(&self) -> bool {
        matches!(self, Variant::Str(_))
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Null => f.write_str("null"),
            Variant::Int(n) => write!(f, "{}", n),
            Variant::Str(s) => write!(f, "'{}'", s),
        }
    }
}

impl From<i32> for Variant {
    fn from(n: i32) -> Self {
        Variant::Int(n)
    }
}

impl From<u32> for Variant {
    fn from(n: u32) -> Self {
        Variant::Int(i32::try_from(n).unwrap_or(i32::MAX))
    }
}

impl From<bool> for Variant {
    fn from(b: bool) -> Self {
        Variant::Int(b as i32)
    }
}

impl From<&str> for Variant {
    fn from(s: &str) -> Self {
        Variant::Str(s.to_string())
    }
}

impl From<String> for Variant {
    fn from(s: String) -> Self {
        Variant::Str(s)
    }
}

/// Name → value bindings visible to formulas during a draw.
#[derive(Debug, Clone, Default)]
pub struct VariableContext {
    values: HashMap<String, Variant>,
}

impl VariableContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name`, replacing any previous value.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<Variant>) {
        self.values.insert(name.into(), value.into());
    }

    /// Look up a binding; unknown names read as [`Variant::Null`].
    pub fn query(&self, name: &str) -> Variant {
        self.values.get(name).cloned().unwrap_or_default()
    }

    pub fn get(&self, name: &str) -> Option<&Variant> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        assert_eq!(Variant::Null.as_int(), 0);
        assert_eq!(Variant::Str("42".into()).as_int(), 42);
        assert_eq!(Variant::Str("abc".into()).as_int(), 0);
        assert_eq!(Variant::Int(-3).as_string(), "-3");
        assert!(!Variant::Str(String::new()).as_bool());
        assert!(Variant::Int(2).as_bool());
    }

    #[test]
    fn test_add_replaces() {
        let mut vars = VariableContext::new();
        vars.add("width", 10);
        vars.add("width", 20);
        assert_eq!(vars.query("width"), Variant::Int(20));
        assert_eq!(vars.len(), 1);
    }

    #[test]
    fn test_unknown_is_null() {
        let vars = VariableContext::new();
        assert_eq!(vars.query("missing"), Variant::Null);
        assert!(vars.get("missing").is_none());
    }
}
