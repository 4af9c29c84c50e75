use std::fmt;

/// Result of any floating-point engine operation: either a finite value or
/// an explicit failure. No non-finite `f64` is ever returned as `Ok`.
pub type CalcResult = Result<f64, CalcError>;
pub type CalcErrorResult = Result<(), CalcError>;

#[derive(PartialEq, Clone)]
pub enum CalcError {
    DividedByZero,

    Domain(String, String),
    NotAnInteger(f64),
    Overflow(f64),

    EmptyExpression,
    InvalidExpression(String),
    InvalidOp(String),
    UnknownFunction(String),
    VarUndeclared(String),
    OpenBracketMismatch,
    ClosingBracketMismatch,
    TooManyOps,
    InsufficientOps,

    NonFinite,

    Unreachable,
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self {
            CalcError::DividedByZero => write!(f, "Division by zero"),

            CalcError::Domain(func, arg) => write!(f, "Argument {} is out of domain of '{}'", arg, func),
            CalcError::NotAnInteger(v) => write!(f, "Factorial requires an integer, got {}", v),
            CalcError::Overflow(v) => write!(f, "Factorial of {} does not fit a double (max: 170)", v),

            CalcError::EmptyExpression => write!(f, "Nothing to calculate"),
            CalcError::InvalidExpression(s) => write!(f, "Invalid expression: {}", s),
            CalcError::InvalidOp(s) => write!(f, "Invalid operator '{}'", s),
            CalcError::UnknownFunction(s) => write!(f, "Unknown function '{}'", s),
            CalcError::VarUndeclared(s) => write!(f, "Variable '{}' not found", s),
            CalcError::OpenBracketMismatch => write!(f, "Mismatched opening bracket"),
            CalcError::ClosingBracketMismatch => write!(f, "Mismatched closing bracket"),
            CalcError::TooManyOps => write!(f, "Too many operators"),
            CalcError::InsufficientOps => write!(f, "Too many numbers"),

            CalcError::NonFinite => write!(f, "Result is not a finite number"),

            CalcError::Unreachable => write!(f, "unreachable"),
        }
    }
}

impl fmt::Debug for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl std::error::Error for CalcError {}
