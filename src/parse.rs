use pest::Parser;
use std::f64::consts::{E, PI};

use crate::errors::*;
use crate::stack::{Stack, UNARY_MINUS};

#[derive(Parser)]
#[grammar = "calc.pest"]
pub struct CalcParser;

// characters the advanced-mode input field is allowed to produce
fn is_allowed_char(c: char) -> bool {
    matches!(c, '0'..='9' | '+' | '-' | '*' | '/' | '(' | ')' | '.' | '^' | '%' | 'π' | 'e')
}

/// Evaluates a flat arithmetic expression: numbers, `+ - * / ^ %`,
/// parentheses, and the constants `π` and `e`. Whitespace is stripped;
/// any other character fails the whole expression.
///
/// `^` is right-associative and unary minus binds tighter than `^`,
/// so `-2^2` evaluates to `4`.
pub fn evaluate(expr: &str) -> CalcResult {
    let cleaned: String = expr.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return Err(CalcError::EmptyExpression);
    }
    if let Some(c) = cleaned.chars().find(|c| !is_allowed_char(*c)) {
        return Err(CalcError::InvalidExpression(format!("character '{}' is not allowed", c)));
    }
    run(&cleaned, None)
}

/// Graph-mode evaluation: same expression language plus the variable `x`
/// and the function names `sin cos tan asin acos atan sqrt cbrt abs log
/// ln exp` (trigonometry in radians). Used to sample `y = f(x)` pointwise.
pub fn evaluate_at(expr: &str, x: f64) -> CalcResult {
    let trimmed = expr.trim();
    if trimmed.is_empty() {
        return Err(CalcError::EmptyExpression);
    }
    run(trimmed, Some(x))
}

fn constant(name: &str, x: Option<f64>) -> Option<f64> {
    match name {
        "pi" | "π" => Some(PI),
        "e" => Some(E),
        "x" => x,
        _ => None,
    }
}

fn run(expr: &str, x: Option<f64>) -> CalcResult {
    let pairs = match CalcParser::parse(Rule::expr, expr) {
        Ok(p) => p,
        Err(..) => return Err(CalcError::InvalidExpression(expr.to_string())),
    };

    let mut stk = Stack::new();
    // a value or closing bracket directly followed by another value means
    // implicit multiplication: `2π`, `(1+2)(3+4)`
    let mut is_last_value = false;

    for pair in pairs {
        let rule = pair.as_rule();
        let val = pair.as_span().as_str().to_lowercase();
        match rule {
            Rule::float | Rule::int => {
                if is_last_value {
                    stk.push("*", None)?;
                }
                let v: f64 = val
                    .parse()
                    .map_err(|_| CalcError::InvalidExpression(val.clone()))?;
                stk.push("", Some(v))?;
                is_last_value = true;
            }
            Rule::ident => {
                if stk.is_func(&val) {
                    if is_last_value {
                        stk.push("*", None)?;
                    }
                    stk.push(&val, None)?;
                    is_last_value = false;
                } else if let Some(v) = constant(&val, x) {
                    if is_last_value {
                        stk.push("*", None)?;
                    }
                    stk.push("", Some(v))?;
                    is_last_value = true;
                } else {
                    return Err(CalcError::VarUndeclared(val));
                }
            }
            Rule::operator => {
                if val == "+" && !is_last_value {
                    // unary plus is a no-op
                } else if val == "-" && !is_last_value {
                    stk.push(UNARY_MINUS, None)?;
                } else {
                    stk.push(&val, None)?;
                    is_last_value = false;
                }
            }
            Rule::open_b => {
                if is_last_value {
                    stk.push("*", None)?;
                }
                stk.push("(", None)?;
                is_last_value = false;
            }
            Rule::close_b => {
                stk.push(")", None)?;
                is_last_value = true;
            }
            Rule::EOI => {}
            _ => return Err(CalcError::Unreachable),
        }
    }

    stk.calculate()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_expr() {
        assert_eq!(evaluate("(5 + 3) * 2 - 4"), Ok(12.0));
        assert_eq!(evaluate("2^10"), Ok(1024.0));
        assert_eq!(evaluate("2+3*4"), Ok(14.0));
        assert_eq!(evaluate("10%3"), Ok(1.0));
        assert_eq!(evaluate("(1+2)(3+4)"), Ok(21.0));
        assert!(close(evaluate("2π").unwrap(), 2.0 * PI));
        assert!(close(evaluate("e").unwrap(), E));
        assert!(close(evaluate("1.5e3+1").unwrap(), 1501.0));
        assert_eq!(evaluate("((1+2)*3)"), Ok(9.0));
    }

    #[test]
    fn test_precedence() {
        // right-associative power
        assert_eq!(evaluate("2^2^3"), Ok(256.0));
        // unary minus binds tighter than power
        assert_eq!(evaluate("-2^2"), Ok(4.0));
        assert_eq!(evaluate("0-2^2"), Ok(-4.0));
        assert_eq!(evaluate("2+-3"), Ok(-1.0));
        assert_eq!(evaluate("2++3"), Ok(5.0));
    }

    #[test]
    fn test_failures() {
        assert_eq!(evaluate("((1+2)"), Err(CalcError::OpenBracketMismatch));
        assert_eq!(evaluate("(1+2))"), Err(CalcError::ClosingBracketMismatch));
        assert_eq!(evaluate("1/0"), Err(CalcError::DividedByZero));
        assert_eq!(evaluate("5%0"), Err(CalcError::DividedByZero));
        assert_eq!(evaluate(""), Err(CalcError::EmptyExpression));
        assert_eq!(evaluate("   "), Err(CalcError::EmptyExpression));
        assert_eq!(
            evaluate("2+a"),
            Err(CalcError::InvalidExpression("character 'a' is not allowed".to_string()))
        );
        assert!(matches!(evaluate("2**3"), Err(CalcError::TooManyOps)));
        assert!(evaluate("2+").is_err());
    }

    #[test]
    fn test_non_finite_result() {
        // overflow inside power is caught at the operation
        assert_eq!(evaluate("10^400"), Err(CalcError::NonFinite));
    }

    #[test]
    fn test_evaluate_at() {
        assert!(close(evaluate_at("x^2+1", 3.0).unwrap(), 10.0));
        assert!(close(evaluate_at("sin(x)", PI / 2.0).unwrap(), 1.0));
        assert!(close(evaluate_at("2x", 4.0).unwrap(), 8.0));
        assert!(close(evaluate_at("sqrt(abs(x))", -9.0).unwrap(), 3.0));
        assert!(close(evaluate_at("ln(exp(x))", 2.5).unwrap(), 2.5));
        assert_eq!(evaluate_at("y+1", 0.0), Err(CalcError::VarUndeclared("y".to_string())));
        // `x` is not bound in plain evaluation mode
        assert_eq!(evaluate("2*3"), Ok(6.0));
    }

    #[test]
    fn test_function_without_brackets() {
        assert!(close(evaluate_at("sin x", PI / 2.0).unwrap(), 1.0));
        assert!(close(evaluate_at("cos 0 * 3", 0.0).unwrap(), 3.0));
    }
}
