//! # Formulas
//!
//! A small expression language for attributes that depend on runtime state,
//! most often the canvas size. Configuration marks a formula by wrapping it
//! in parentheses, e.g. `w = "(width - 20)"`.
//!
//! ## Pipeline
//!
//! ```text
//! "(width / 2 - 3)" ──► lexer ──► parser ──► Expr ──► evaluate(vars) ──► Variant
//! ```
//!
//! ## Example
//!
//! ```
//! use easel::formula::Formula;
//! use easel::variables::{Variant, VariableContext};
//!
//! let mut vars = VariableContext::new();
//! vars.add("width", 100);
//!
//! let f = Formula::parse("(width / 2 - 3)").unwrap();
//! assert_eq!(f.execute(&vars).unwrap(), Variant::Int(47));
//! ```

mod eval;
mod lexer;
mod parser;

use thiserror::Error;

use crate::variables::{VariableContext, Variant};
pub use parser::{BinaryOp, Expr, MAX_DEPTH, MAX_TOKENS, UnaryOp};

/// Errors from parsing or evaluating a formula.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormulaError {
    #[error("syntax error at offset {pos}: {message}")]
    Syntax { pos: usize, message: String },

    #[error("division by zero")]
    DivisionByZero,

    #[error("unknown function '{0}'")]
    UnknownFunction(String),

    #[error("function '{name}' called with {got} arguments")]
    Arity { name: String, got: usize },
}

/// A parsed formula, ready to be executed against variable bindings.
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    source: String,
    expr: Expr,
}

impl Formula {
    /// Parse formula text.
    pub fn parse(source: &str) -> Result<Self, FormulaError> {
        let tokens = lexer::tokenize(source)?;
        let expr = parser::parse(&tokens, source.len())?;
        Ok(Self {
            source: source.to_string(),
            expr,
        })
    }

    /// Evaluate against the given variables.
    pub fn execute(&self, variables: &VariableContext) -> Result<Variant, FormulaError> {
        eval::evaluate(&self.expr, variables)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }
}

/// Parse and evaluate in one step.
pub fn evaluate(source: &str, variables: &VariableContext) -> Result<Variant, FormulaError> {
    Formula::parse(source)?.execute(variables)
}
