//! Formula evaluation against a [`VariableContext`].

use super::FormulaError;
use super::parser::{BinaryOp, Expr, UnaryOp};
use crate::variables::{VariableContext, Variant};

pub(crate) fn evaluate(expr: &Expr, vars: &VariableContext) -> Result<Variant, FormulaError> {
    match expr {
        Expr::Int(n) => Ok(Variant::Int(*n)),
        Expr::Str(s) => Ok(Variant::Str(s.clone())),
        Expr::Var(name) => Ok(vars.query(name)),
        Expr::Unary { op, operand } => {
            let value = evaluate(operand, vars)?;
            Ok(match op {
                UnaryOp::Neg => Variant::Int(value.as_int().wrapping_neg()),
                UnaryOp::Not => Variant::from(!value.as_bool()),
            })
        }
        Expr::Binary { op, lhs, rhs } => binary(*op, lhs, rhs, vars),
        Expr::Call { name, args } => call(name, args, vars),
    }
}

fn binary(op: BinaryOp, lhs: &Expr, rhs: &Expr, vars: &VariableContext) -> Result<Variant, FormulaError> {
    // Short-circuit the logical operators.
    match op {
        BinaryOp::And => {
            let l = evaluate(lhs, vars)?;
            if !l.as_bool() {
                return Ok(Variant::Int(0));
            }
            return Ok(Variant::from(evaluate(rhs, vars)?.as_bool()));
        }
        BinaryOp::Or => {
            let l = evaluate(lhs, vars)?;
            if l.as_bool() {
                return Ok(Variant::Int(1));
            }
            return Ok(Variant::from(evaluate(rhs, vars)?.as_bool()));
        }
        _ => {}
    }

    let l = evaluate(lhs, vars)?;
    let r = evaluate(rhs, vars)?;

    let value = match op {
        BinaryOp::Add if l.is_str() || r.is_str() => {
            Variant::Str(format!("{}{}", l.as_string(), r.as_string()))
        }
        BinaryOp::Add => Variant::Int(l.as_int().wrapping_add(r.as_int())),
        BinaryOp::Sub => Variant::Int(l.as_int().wrapping_sub(r.as_int())),
        BinaryOp::Mul => Variant::Int(l.as_int().wrapping_mul(r.as_int())),
        BinaryOp::Div => {
            let d = r.as_int();
            if d == 0 {
                return Err(FormulaError::DivisionByZero);
            }
            Variant::Int(l.as_int().wrapping_div(d))
        }
        BinaryOp::Mod => {
            let d = r.as_int();
            if d == 0 {
                return Err(FormulaError::DivisionByZero);
            }
            Variant::Int(l.as_int().wrapping_rem(d))
        }
        BinaryOp::Pow => Variant::Int(power(l.as_int(), r.as_int())),
        BinaryOp::Eq => Variant::from(equals(&l, &r)),
        BinaryOp::NotEq => Variant::from(!equals(&l, &r)),
        BinaryOp::Less => Variant::from(l.as_int() < r.as_int()),
        BinaryOp::LessEq => Variant::from(l.as_int() <= r.as_int()),
        BinaryOp::Greater => Variant::from(l.as_int() > r.as_int()),
        BinaryOp::GreaterEq => Variant::from(l.as_int() >= r.as_int()),
        BinaryOp::And | BinaryOp::Or => unreachable!("handled above"),
    };
    Ok(value)
}

/// Integer power; negative exponents truncate toward zero like division.
fn power(base: i32, exp: i32) -> i32 {
    if exp < 0 {
        return match base {
            1 => 1,
            -1 if exp % 2 == 0 => 1,
            -1 => -1,
            _ => 0,
        };
    }
    base.wrapping_pow(exp as u32)
}

fn equals(l: &Variant, r: &Variant) -> bool {
    if l.is_str() && r.is_str() {
        l.as_string() == r.as_string()
    } else {
        l.as_int() == r.as_int()
    }
}

fn call(name: &str, args: &[Expr], vars: &VariableContext) -> Result<Variant, FormulaError> {
    let arity = |ok: bool| {
        if ok {
            Ok(())
        } else {
            Err(FormulaError::Arity {
                name: name.to_string(),
                got: args.len(),
            })
        }
    };

    match name {
        "if" => {
            arity(args.len() >= 2)?;
            // if(c1, v1, c2, v2, ..., [else])
            let mut pairs = args.chunks_exact(2);
            for pair in pairs.by_ref() {
                if evaluate(&pair[0], vars)?.as_bool() {
                    return evaluate(&pair[1], vars);
                }
            }
            match pairs.remainder() {
                [otherwise] => evaluate(otherwise, vars),
                _ => Ok(Variant::Null),
            }
        }
        "min" | "max" => {
            arity(!args.is_empty())?;
            let mut best: Option<i32> = None;
            for arg in args {
                let v = evaluate(arg, vars)?.as_int();
                best = Some(match best {
                    None => v,
                    Some(b) if name == "min" => b.min(v),
                    Some(b) => b.max(v),
                });
            }
            Ok(Variant::Int(best.unwrap_or(0)))
        }
        "abs" => {
            arity(args.len() == 1)?;
            Ok(Variant::Int(evaluate(&args[0], vars)?.as_int().wrapping_abs()))
        }
        _ => Err(FormulaError::UnknownFunction(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_edge_cases() {
        assert_eq!(power(2, 10), 1024);
        assert_eq!(power(5, 0), 1);
        assert_eq!(power(2, -1), 0);
        assert_eq!(power(-1, -3), -1);
    }

    #[test]
    fn test_string_equality() {
        assert!(equals(&Variant::Str("a".into()), &Variant::Str("a".into())));
        assert!(!equals(&Variant::Str("a".into()), &Variant::Str("b".into())));
        assert!(equals(&Variant::Str("7".into()), &Variant::Int(7)));
    }

    #[test]
    fn test_short_circuit_skips_errors() {
        let vars = VariableContext::new();
        let expr = Expr::Binary {
            op: BinaryOp::And,
            lhs: Box::new(Expr::Int(0)),
            rhs: Box::new(Expr::Binary {
                op: BinaryOp::Div,
                lhs: Box::new(Expr::Int(1)),
                rhs: Box::new(Expr::Int(0)),
            }),
        };
        assert_eq!(evaluate(&expr, &vars), Ok(Variant::Int(0)));
    }
}
